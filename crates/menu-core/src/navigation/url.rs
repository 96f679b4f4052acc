// ============================================================================
// Menu Core - URL Resolution
// File: crates/menu-core/src/navigation/url.rs
// Description: Pluggable item-to-URL strategy with a page-backed default
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Locale, MenuItem, Page};
use crate::error::DomainError;
use crate::repositories::PageRepository;

/// Turns an item's target into a URL string. Injected into the service; when
/// absent or when it yields nothing, the page-backed default takes over.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlResolver: Send + Sync {
    async fn resolve<'a>(
        &self,
        item: &MenuItem,
        locale: Option<&'a Locale>,
    ) -> Result<Option<String>, DomainError>;
}

/// Default resolver: page targets are looked up through the page repository
/// and mapped to their localized path; any other target returns its raw
/// `url` field verbatim.
pub struct PageUrlResolver {
    pages: Arc<dyn PageRepository>,
}

impl PageUrlResolver {
    pub fn new(pages: Arc<dyn PageRepository>) -> Self {
        Self { pages }
    }

    async fn find_page(&self, item: &MenuItem) -> Result<Option<Page>, DomainError> {
        if let Some(id) = item.target_str("id").and_then(|s| Uuid::parse_str(s).ok()) {
            if let Some(page) = self.pages.find_by_id(&id).await? {
                return Ok(Some(page));
            }
        }
        if let Some(slug) = item.target_str("slug") {
            return self.pages.find_by_slug(slug).await;
        }
        Ok(None)
    }
}

#[async_trait]
impl UrlResolver for PageUrlResolver {
    async fn resolve<'a>(
        &self,
        item: &MenuItem,
        locale: Option<&'a Locale>,
    ) -> Result<Option<String>, DomainError> {
        if item.target_str("type") != Some("page") {
            return Ok(item.target_str("url").map(String::from));
        }

        let Some(page) = self.find_page(item).await? else {
            return Ok(None);
        };

        let path = locale
            .and_then(|l| page.paths.get(&l.code).cloned())
            .or_else(|| page.default_path.clone())
            .or_else(|| {
                // Any available path, lowest locale code first for
                // determinism.
                page.paths
                    .iter()
                    .min_by(|a, b| a.0.cmp(b.0))
                    .map(|(_, path)| path.clone())
            })
            .unwrap_or_else(|| page.slug.clone());

        Ok(Some(with_leading_slash(&path)))
    }
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
