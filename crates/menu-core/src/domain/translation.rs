// ============================================================================
// Menu Core - Menu Item Translation Entity
// File: crates/menu-core/src/domain/translation.rs
// Description: Localized label for a menu item
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Localized label for a menu item. At most one per `(item, locale)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemTranslation {
    pub id: Uuid,
    pub item_id: Uuid,
    pub locale_id: Uuid,

    pub label: Option<String>,
    pub label_key: Option<String>,
    pub group_title: Option<String>,
    pub group_title_key: Option<String>,

    /// Per-locale URL override; wins over any resolver output.
    pub url_override: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl MenuItemTranslation {
    pub fn new(
        item_id: Uuid,
        locale_id: Uuid,
        label: Option<String>,
        label_key: Option<String>,
        group_title: Option<String>,
        group_title_key: Option<String>,
        url_override: Option<String>,
        created_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            locale_id,
            label: normalize(label),
            label_key: normalize(label_key),
            group_title: normalize(group_title),
            group_title_key: normalize(group_title_key),
            url_override: normalize(url_override),
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
        }
    }

    /// True when the translation carries any label or title text.
    pub fn has_text(&self) -> bool {
        self.label.is_some()
            || self.label_key.is_some()
            || self.group_title.is_some()
            || self.group_title_key.is_some()
    }

    pub fn touch(&mut self, modified_by: Option<Uuid>) {
        self.modified_at = Some(Utc::now());
        self.modified_by = modified_by;
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
