// ============================================================================
// Menu Core - Identity & Deduplication
// File: crates/menu-core/src/identity.rs
// Description: Canonical key derivation and pluggable id strategies
// ============================================================================

use uuid::Uuid;

use crate::domain::{MenuItemType, ParentLink};
use crate::services::requests::NewMenuItem;

/// Derives the canonical dedupe key for an add-item request.
///
/// A caller-supplied key always wins. Returns `None` for arbitrary items that
/// carry nothing to derive an identity from; those never dedupe.
///
/// `effective_position` is the sibling index the item would be inserted at;
/// separators are distinguished by position since they carry no content.
pub fn derive_canonical_key(input: &NewMenuItem, effective_position: i32) -> Option<String> {
    if let Some(key) = trimmed(input.canonical_key.as_deref()) {
        return Some(key.to_string());
    }

    match input.item_type {
        MenuItemType::Item => {
            if let Some(code) = trimmed(input.external_code.as_deref()) {
                return Some(format!("code:{}", code.to_lowercase()));
            }
            let target = input.target.as_ref()?;
            let get = |key: &str| {
                target
                    .get(key)
                    .and_then(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            };
            if get("type") == Some("page") {
                if let Some(id) = get("id") {
                    return Some(format!("page:id:{id}"));
                }
                if let Some(slug) = get("slug") {
                    return Some(format!("page:slug:{slug}"));
                }
            }
            if let Some(url) = get("url") {
                return Some(format!("url:{url}"));
            }
            if let Some(path) = get("path") {
                return Some(format!("path:{path}"));
            }
            None
        }
        MenuItemType::Group => {
            let group_key = group_key(input)?;
            Some(format!("group:{}:{}", group_key, parent_key(&input.parent)))
        }
        MenuItemType::Separator => Some(format!(
            "separator:{}:{}",
            parent_key(&input.parent),
            effective_position
        )),
    }
}

/// First non-empty of {group-title-key, label-key, group-title, label} across
/// the supplied translations.
fn group_key(input: &NewMenuItem) -> Option<String> {
    let fields: [fn(&crate::services::requests::TranslationSpec) -> Option<&str>; 4] = [
        |t| t.group_title_key.as_deref(),
        |t| t.label_key.as_deref(),
        |t| t.group_title.as_deref(),
        |t| t.label.as_deref(),
    ];
    for field in fields {
        for translation in &input.translations {
            if let Some(value) = trimmed(field(translation)) {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn parent_key(parent: &ParentLink) -> String {
    match parent {
        ParentLink::Root => "root".to_string(),
        ParentLink::Resolved(id) => id.to_string(),
        ParentLink::Pending(r) => r.trim().to_lowercase(),
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Pluggable item identifier strategy. Receives the normalized add-item input
/// so implementations can derive deterministic, content-based identifiers for
/// reproducible imports.
pub trait ItemIdStrategy: Send + Sync {
    fn item_id(&self, input: &NewMenuItem, canonical_key: Option<&str>) -> Uuid;
}

/// Pluggable menu identifier strategy, fed the normalized menu code.
pub trait MenuIdStrategy: Send + Sync {
    fn menu_id(&self, code: &str) -> Uuid;
}

/// Default strategy: random v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl ItemIdStrategy for RandomIds {
    fn item_id(&self, _input: &NewMenuItem, _canonical_key: Option<&str>) -> Uuid {
        Uuid::new_v4()
    }
}

impl MenuIdStrategy for RandomIds {
    fn menu_id(&self, _code: &str) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic strategy: v5 identifiers derived from content, so repeated
/// imports of the same seed data produce the same ids.
#[derive(Debug, Clone, Copy)]
pub struct DerivedIds {
    namespace: Uuid,
}

impl DerivedIds {
    pub fn new(namespace: Uuid) -> Self {
        Self { namespace }
    }
}

impl Default for DerivedIds {
    fn default() -> Self {
        Self::new(Uuid::NAMESPACE_URL)
    }
}

impl ItemIdStrategy for DerivedIds {
    fn item_id(&self, input: &NewMenuItem, canonical_key: Option<&str>) -> Uuid {
        match canonical_key {
            Some(key) => {
                let name = format!("{}:{}", input.menu_id, key);
                Uuid::new_v5(&self.namespace, name.as_bytes())
            }
            // Nothing content-derived to hang an identity on.
            None => Uuid::new_v4(),
        }
    }
}

impl MenuIdStrategy for DerivedIds {
    fn menu_id(&self, code: &str) -> Uuid {
        Uuid::new_v5(&self.namespace, code.as_bytes())
    }
}
