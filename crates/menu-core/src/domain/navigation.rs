// ============================================================================
// Menu Core - Navigation Node Projection
// File: crates/menu-core/src/domain/navigation.rs
// Description: Render-ready, locale-resolved projection of a menu item tree
// ============================================================================

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::menu_item::{MenuItem, MenuItemType};

/// Derived, non-persisted projection of a menu item used for rendering.
/// Built fresh on every navigation resolution.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationNode {
    pub id: Uuid,
    pub position: i32,
    pub node_type: MenuItemType,

    /// Resolved display label (per-type resolution chain).
    pub label: Option<String>,
    pub label_key: Option<String>,
    pub group_title: Option<String>,
    pub group_title_key: Option<String>,

    pub url: Option<String>,
    pub target: Option<Map<String, Value>>,

    pub icon: Option<String>,
    pub badge: Option<String>,
    pub permissions: Vec<String>,
    pub classes: Option<String>,
    pub styles: Option<String>,
    pub metadata: Option<Map<String, Value>>,

    pub collapsible: bool,
    pub collapsed: bool,

    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Seed a node from its persisted item; labels, URL and children are
    /// filled in by the navigation builder.
    pub(crate) fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            position: item.position,
            node_type: item.item_type,
            label: None,
            label_key: None,
            group_title: None,
            group_title_key: None,
            url: None,
            target: item.target.clone(),
            icon: item.icon.clone(),
            badge: item.badge.clone(),
            permissions: item.permissions.clone(),
            classes: item.classes.clone(),
            styles: item.styles.clone(),
            metadata: item.metadata.clone(),
            collapsible: item.collapsible,
            collapsed: item.collapsed,
            children: Vec::new(),
        }
    }

    /// True when a group node shows anything of its own: a title, URL,
    /// target, icon, badge, permissions, classes, styles or metadata.
    pub(crate) fn has_presentational_content(&self) -> bool {
        self.label.is_some()
            || self.group_title.is_some()
            || self.group_title_key.is_some()
            || self.url.is_some()
            || self.target.is_some()
            || self.icon.is_some()
            || self.badge.is_some()
            || !self.permissions.is_empty()
            || self.classes.is_some()
            || self.styles.is_some()
            || self.metadata.is_some()
    }
}
