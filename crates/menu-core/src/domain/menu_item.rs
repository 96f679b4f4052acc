// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: A node in a menu's tree, with parent link and sibling position
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Menu item type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemType {
    Item,
    Group,
    Separator,
}

impl MenuItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemType::Item => "item",
            MenuItemType::Group => "group",
            MenuItemType::Separator => "separator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "item" => Some(MenuItemType::Item),
            "group" => Some(MenuItemType::Group),
            "separator" => Some(MenuItemType::Separator),
            _ => None,
        }
    }
}

impl Default for MenuItemType {
    fn default() -> Self {
        MenuItemType::Item
    }
}

/// Parent link of a menu item.
///
/// `Pending` holds an unresolved placeholder reference (an external code,
/// canonical key, or raw identifier) recorded while the parent does not exist
/// yet; reconciliation turns it into `Resolved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParentLink {
    #[default]
    Root,
    Resolved(Uuid),
    Pending(String),
}

impl ParentLink {
    pub fn resolved_id(&self) -> Option<Uuid> {
        match self {
            ParentLink::Resolved(id) => Some(*id),
            _ => None,
        }
    }

    pub fn pending_ref(&self) -> Option<&str> {
        match self {
            ParentLink::Pending(r) => Some(r.as_str()),
            _ => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentLink::Root)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ParentLink::Pending(_))
    }
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub parent: ParentLink,

    /// 0-based sibling order; meaningful only among items sharing a parent.
    pub position: i32,

    pub item_type: MenuItemType,

    /// Type-specific payload; required non-empty for `item`, forbidden for
    /// `group` and `separator`.
    pub target: Option<Map<String, Value>>,

    /// Human-assigned stable handle.
    pub external_code: Option<String>,

    /// Derived dedupe key.
    pub canonical_key: Option<String>,

    pub icon: Option<String>,
    pub badge: Option<String>,
    pub permissions: Vec<String>,
    pub classes: Option<String>,
    pub styles: Option<String>,
    pub metadata: Option<Map<String, Value>>,

    pub collapsible: bool,
    pub collapsed: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
}

impl MenuItem {
    pub fn is_separator(&self) -> bool {
        self.item_type == MenuItemType::Separator
    }

    /// Returns a string value out of the target payload, ignoring blanks.
    pub fn target_str(&self, key: &str) -> Option<&str> {
        self.target
            .as_ref()
            .and_then(|t| t.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn touch(&mut self, modified_by: Option<Uuid>) {
        self.modified_at = Some(Utc::now());
        self.modified_by = modified_by;
    }
}
