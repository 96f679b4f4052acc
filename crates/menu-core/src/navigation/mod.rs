// ============================================================================
// Menu Core - Navigation Builder
// File: crates/menu-core/src/navigation/mod.rs
// Description: Locale-resolved tree build and structural normalization
// ============================================================================

pub mod url;

pub use url::{PageUrlResolver, UrlResolver};

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{Locale, MenuItem, MenuItemTranslation, MenuItemType, NavigationNode};

/// Exact locale match wins; otherwise the first translation on record is the
/// fallback. Separators never carry translations.
pub(crate) fn select_translation<'a>(
    translations: &'a [MenuItemTranslation],
    locale: Option<&Locale>,
) -> Option<&'a MenuItemTranslation> {
    if let Some(locale) = locale {
        if let Some(exact) = translations.iter().find(|t| t.locale_id == locale.id) {
            return Some(exact);
        }
    }
    translations.first()
}

/// Builds the normalized node tree out of a menu's persisted items.
///
/// `urls` holds pre-resolved URLs for `item` nodes; `group` and `separator`
/// nodes never carry one. Items with an unresolved pending parent have no
/// place in the tree and are skipped.
pub(crate) fn build_tree(
    items: &[MenuItem],
    translations: &HashMap<Uuid, Vec<MenuItemTranslation>>,
    locale: Option<&Locale>,
    urls: &HashMap<Uuid, Option<String>>,
) -> Vec<NavigationNode> {
    let mut children_of: HashMap<Option<Uuid>, Vec<&MenuItem>> = HashMap::new();
    for item in items {
        match &item.parent {
            crate::domain::ParentLink::Root => children_of.entry(None).or_default().push(item),
            crate::domain::ParentLink::Resolved(pid) => {
                children_of.entry(Some(*pid)).or_default().push(item)
            }
            crate::domain::ParentLink::Pending(_) => {}
        }
    }

    build_level(None, &children_of, translations, locale, urls)
}

fn build_level(
    parent: Option<Uuid>,
    children_of: &HashMap<Option<Uuid>, Vec<&MenuItem>>,
    translations: &HashMap<Uuid, Vec<MenuItemTranslation>>,
    locale: Option<&Locale>,
    urls: &HashMap<Uuid, Option<String>>,
) -> Vec<NavigationNode> {
    let Some(level_items) = children_of.get(&parent) else {
        return Vec::new();
    };

    let mut nodes: Vec<NavigationNode> = Vec::with_capacity(level_items.len());
    for item in level_items {
        let mut node = NavigationNode::from_item(item);
        let item_translations = translations.get(&item.id).map(Vec::as_slice).unwrap_or(&[]);

        if !item.is_separator() {
            let selected = select_translation(item_translations, locale);
            if let Some(t) = selected {
                node.label_key = t.label_key.clone();
                node.group_title = t.group_title.clone();
                node.group_title_key = t.group_title_key.clone();
            }
            node.label = resolve_label(item, selected, item_translations);

            if item.item_type == MenuItemType::Item {
                // An override is honored only for the locale it was written
                // in; a fallback translation's override must not shadow the
                // resolved URL of the requested locale.
                let exact_override = selected
                    .filter(|t| locale.is_some_and(|l| t.locale_id == l.id))
                    .and_then(|t| t.url_override.clone());
                node.url = exact_override.or_else(|| urls.get(&item.id).cloned().flatten());
            }
        }

        node.children = build_level(Some(item.id), children_of, translations, locale, urls);
        nodes.push(node);
    }

    normalize_level(&mut nodes);
    nodes
}

/// Per-type display label resolution.
fn resolve_label(
    item: &MenuItem,
    selected: Option<&MenuItemTranslation>,
    all: &[MenuItemTranslation],
) -> Option<String> {
    match item.item_type {
        MenuItemType::Separator => None,
        MenuItemType::Group => selected.and_then(|t| {
            t.group_title
                .clone()
                .or_else(|| t.group_title_key.clone())
                .or_else(|| t.label.clone())
                .or_else(|| t.label_key.clone())
        }),
        MenuItemType::Item => selected
            .and_then(|t| t.label.clone())
            .or_else(|| selected.and_then(|t| t.label_key.clone()))
            .or_else(|| item.target_str("slug").map(String::from))
            .or_else(|| all.iter().find_map(|t| t.label.clone()))
            .or_else(|| item.target_str("type").map(String::from))
            .or_else(|| Some(item.id.to_string())),
    }
}

/// Structural normalization of one sibling level. Children are already
/// normalized when this runs.
pub(crate) fn normalize_level(nodes: &mut Vec<NavigationNode>) {
    // Deterministic order: position, then raw id bytes for equal positions.
    nodes.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.id.as_bytes().cmp(b.id.as_bytes()))
    });

    // Empty placeholder groups disappear.
    nodes.retain(|node| {
        !(node.node_type == MenuItemType::Group
            && node.children.is_empty()
            && !node.has_presentational_content())
    });

    // Separators: never first, never doubled, never last.
    let mut cleaned: Vec<NavigationNode> = Vec::with_capacity(nodes.len());
    let mut seen_content = false;
    for node in nodes.drain(..) {
        if node.node_type == MenuItemType::Separator {
            if !seen_content {
                continue;
            }
            if matches!(cleaned.last(), Some(last) if last.node_type == MenuItemType::Separator) {
                continue;
            }
            cleaned.push(node);
        } else {
            seen_content = true;
            cleaned.push(node);
        }
    }
    while matches!(cleaned.last(), Some(last) if last.node_type == MenuItemType::Separator) {
        cleaned.pop();
    }
    *nodes = cleaned;

    for node in nodes.iter_mut() {
        if node.children.is_empty() || node.node_type == MenuItemType::Separator {
            node.collapsible = false;
            node.collapsed = false;
        }
    }
}
