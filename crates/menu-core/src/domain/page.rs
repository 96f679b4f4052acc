//! Page entity (resolved through the page repository)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page record as seen by the menu engine: enough to validate a page target
/// and to derive a URL from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    /// Locale code to path, e.g. "fr" -> "/fr/equipe".
    pub paths: HashMap<String, String>,
    pub default_path: Option<String>,
}

impl Page {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            paths: HashMap::new(),
            default_path: None,
        }
    }

    pub fn with_path(mut self, locale_code: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(locale_code.into(), path.into());
        self
    }

    pub fn with_default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }
}
