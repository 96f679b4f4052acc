// ============================================================================
// Menu Core - Service Request Types
// File: crates/menu-core/src/services/requests.rs
// ============================================================================

use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{MenuItemType, ParentLink};

/// Input for `create_menu`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenu {
    pub code: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
}

impl NewMenu {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            location: None,
            description: None,
            created_by: None,
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Field patch for `update_menu`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuUpdate {
    pub code: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub modified_by: Option<Uuid>,
}

/// One localized label in an add-item or add-translation request. The locale
/// is addressed by code and resolved through the locale repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationSpec {
    pub locale: String,
    pub label: Option<String>,
    pub label_key: Option<String>,
    pub group_title: Option<String>,
    pub group_title_key: Option<String>,
    pub url_override: Option<String>,
}

impl TranslationSpec {
    pub fn label(locale: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn group_title(locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            group_title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn has_text(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.label)
            || filled(&self.label_key)
            || filled(&self.group_title)
            || filled(&self.group_title_key)
    }
}

/// Input for `add_menu_item`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub menu_id: Uuid,
    /// Caller-supplied identifier; wins over the id strategy.
    pub id: Option<Uuid>,
    /// Caller-supplied canonical key; wins over derivation.
    pub canonical_key: Option<String>,
    pub external_code: Option<String>,
    pub item_type: MenuItemType,
    pub parent: ParentLink,
    /// Sibling insertion index; `None` appends.
    pub position: Option<i32>,
    pub target: Option<Map<String, Value>>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub permissions: Vec<String>,
    pub classes: Option<String>,
    pub styles: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub collapsible: bool,
    pub collapsed: bool,
    pub translations: Vec<TranslationSpec>,
    pub created_by: Option<Uuid>,
}

impl NewMenuItem {
    pub fn new(menu_id: Uuid, item_type: MenuItemType) -> Self {
        Self {
            menu_id,
            id: None,
            canonical_key: None,
            external_code: None,
            item_type,
            parent: ParentLink::Root,
            position: None,
            target: None,
            icon: None,
            badge: None,
            permissions: Vec::new(),
            classes: None,
            styles: None,
            metadata: None,
            collapsible: false,
            collapsed: false,
            translations: Vec::new(),
            created_by: None,
        }
    }

    pub fn parent(mut self, parent: ParentLink) -> Self {
        self.parent = parent;
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn target(mut self, target: Map<String, Value>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn external_code(mut self, code: impl Into<String>) -> Self {
        self.external_code = Some(code.into());
        self
    }

    pub fn canonical_key(mut self, key: impl Into<String>) -> Self {
        self.canonical_key = Some(key.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn translation(mut self, spec: TranslationSpec) -> Self {
        self.translations.push(spec);
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// Field patch for `update_menu_item`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub parent: Option<ParentLink>,
    pub position: Option<i32>,
    pub target: Option<Map<String, Value>>,
    pub external_code: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub classes: Option<String>,
    pub styles: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub collapsible: Option<bool>,
    pub collapsed: Option<bool>,
    pub modified_by: Option<Uuid>,
}

/// One item's assignment in a bulk reorder request. `parent_id == None`
/// places the item at the root level.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPlacement {
    pub item_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub position: i32,
}
