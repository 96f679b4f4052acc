// ============================================================================
// Menu Core - Menu Entity
// File: crates/menu-core/src/domain/menu.rs
// Description: Named navigation container
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Menu entity: a named navigation container that owns a tree of items.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Menu {
    pub id: Uuid,

    /// Unique handle, restricted to `[A-Za-z0-9_-]+`.
    #[validate(length(min = 1, max = 100, message = "Menu code must be between 1 and 100 characters"))]
    pub code: String,

    /// Optional binding slot, e.g. "header" or "footer".
    #[validate(length(max = 100, message = "Location too long"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl Menu {
    pub fn new(
        code: String,
        location: Option<String>,
        description: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<Self, DomainError> {
        Self::with_id(Uuid::new_v4(), code, location, description, created_by)
    }

    pub fn with_id(
        id: Uuid,
        code: String,
        location: Option<String>,
        description: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<Self, DomainError> {
        let code = code.trim().to_string();
        if !is_valid_code(&code) {
            return Err(DomainError::InvalidMenuCode(code));
        }

        let menu = Self {
            id,
            code,
            location: location.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
            description: description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
        };

        menu.validate()?;
        Ok(menu)
    }

    pub fn touch(&mut self, modified_by: Option<Uuid>) {
        self.modified_at = Some(Utc::now());
        self.modified_by = modified_by;
    }
}

pub(crate) fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
