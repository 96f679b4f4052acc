//! Locale entity (resolved through the locale repository)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub id: Uuid,
    /// BCP-47-ish language code, e.g. "en" or "fr-CA".
    pub code: String,
}

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
        }
    }
}
