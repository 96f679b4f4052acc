// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// Description: Facade orchestrating identity, hierarchy, reconciliation and
//              navigation resolution over the injected repository ports
// ============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::activity::{ActivityEmitter, ActivityEvent, NoopActivityEmitter};
use crate::config::MenuServiceConfig;
use crate::domain::{
    Locale, Menu, MenuItem, MenuItemTranslation, MenuItemType, NavigationNode, ParentLink,
};
use crate::error::DomainError;
use crate::hierarchy;
use crate::identity::{self, ItemIdStrategy, MenuIdStrategy, RandomIds};
use crate::navigation::{self, PageUrlResolver, UrlResolver};
use crate::reconcile::{self, ReconcileReport};
use crate::repositories::{
    BulkHierarchyWriter, HierarchyPlacement, LocaleRepository, MenuItemRepository,
    MenuItemTranslationRepository, MenuRepository, MenuUsageResolver, NoActiveUsage,
    PageRepository,
};
use crate::services::requests::{
    ItemPlacement, MenuItemUpdate, MenuUpdate, NewMenu, NewMenuItem, TranslationSpec,
};

/// Menu service: the single entry point for menu and item mutation and for
/// navigation resolution. Holds no mutable state of its own; correctness
/// under concurrent writers is delegated to the stores behind the ports.
pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
    items: Arc<dyn MenuItemRepository>,
    translations: Arc<dyn MenuItemTranslationRepository>,
    locales: Arc<dyn LocaleRepository>,
    pages: Arc<dyn PageRepository>,
    usage: Arc<dyn MenuUsageResolver>,
    url_resolver: Option<Arc<dyn UrlResolver>>,
    bulk_writer: Option<Arc<dyn BulkHierarchyWriter>>,
    activity: Arc<dyn ActivityEmitter>,
    item_ids: Arc<dyn ItemIdStrategy>,
    menu_ids: Arc<dyn MenuIdStrategy>,
    config: MenuServiceConfig,
}

/// Builder for [`MenuService`]. The five repository ports are required; every
/// other collaborator has a default (null object or random ids).
pub struct MenuServiceBuilder {
    menus: Arc<dyn MenuRepository>,
    items: Arc<dyn MenuItemRepository>,
    translations: Arc<dyn MenuItemTranslationRepository>,
    locales: Arc<dyn LocaleRepository>,
    pages: Arc<dyn PageRepository>,
    usage: Arc<dyn MenuUsageResolver>,
    url_resolver: Option<Arc<dyn UrlResolver>>,
    bulk_writer: Option<Arc<dyn BulkHierarchyWriter>>,
    activity: Arc<dyn ActivityEmitter>,
    item_ids: Arc<dyn ItemIdStrategy>,
    menu_ids: Arc<dyn MenuIdStrategy>,
    config: MenuServiceConfig,
}

impl MenuServiceBuilder {
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        items: Arc<dyn MenuItemRepository>,
        translations: Arc<dyn MenuItemTranslationRepository>,
        locales: Arc<dyn LocaleRepository>,
        pages: Arc<dyn PageRepository>,
    ) -> Self {
        Self {
            menus,
            items,
            translations,
            locales,
            pages,
            usage: Arc::new(NoActiveUsage),
            url_resolver: None,
            bulk_writer: None,
            activity: Arc::new(NoopActivityEmitter),
            item_ids: Arc::new(RandomIds),
            menu_ids: Arc::new(RandomIds),
            config: MenuServiceConfig::default(),
        }
    }

    pub fn usage_resolver(mut self, usage: Arc<dyn MenuUsageResolver>) -> Self {
        self.usage = usage;
        self
    }

    pub fn url_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.url_resolver = Some(resolver);
        self
    }

    pub fn bulk_writer(mut self, writer: Arc<dyn BulkHierarchyWriter>) -> Self {
        self.bulk_writer = Some(writer);
        self
    }

    pub fn activity_emitter(mut self, activity: Arc<dyn ActivityEmitter>) -> Self {
        self.activity = activity;
        self
    }

    pub fn item_id_strategy(mut self, strategy: Arc<dyn ItemIdStrategy>) -> Self {
        self.item_ids = strategy;
        self
    }

    pub fn menu_id_strategy(mut self, strategy: Arc<dyn MenuIdStrategy>) -> Self {
        self.menu_ids = strategy;
        self
    }

    pub fn config(mut self, config: MenuServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> MenuService {
        MenuService {
            menus: self.menus,
            items: self.items,
            translations: self.translations,
            locales: self.locales,
            pages: self.pages,
            usage: self.usage,
            url_resolver: self.url_resolver,
            bulk_writer: self.bulk_writer,
            activity: self.activity,
            item_ids: self.item_ids,
            menu_ids: self.menu_ids,
            config: self.config,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu operations
// ---------------------------------------------------------------------------

impl MenuService {
    pub fn builder(
        menus: Arc<dyn MenuRepository>,
        items: Arc<dyn MenuItemRepository>,
        translations: Arc<dyn MenuItemTranslationRepository>,
        locales: Arc<dyn LocaleRepository>,
        pages: Arc<dyn PageRepository>,
    ) -> MenuServiceBuilder {
        MenuServiceBuilder::new(menus, items, translations, locales, pages)
    }

    pub async fn create_menu(&self, input: NewMenu) -> Result<Menu, DomainError> {
        let code = input.code.trim().to_string();
        info!("Creating menu: {}", code);

        // 1. Build and validate the entity.
        let id = self.menu_ids.menu_id(&code);
        let menu = Menu::with_id(id, code, input.location, input.description, input.created_by)?;

        // 2. Code uniqueness. The store enforces it too; this check just
        //    gives a clean error on the common path.
        if self.menus.find_by_code(&menu.code).await?.is_some() {
            warn!("Menu code already exists: {}", menu.code);
            return Err(DomainError::MenuCodeAlreadyExists(menu.code));
        }

        let created = self.menus.create(&menu).await?;
        self.emit(ActivityEvent::MenuCreated {
            menu_id: created.id,
            code: created.code.clone(),
        })
        .await;
        Ok(created)
    }

    pub async fn update_menu(&self, id: &Uuid, update: MenuUpdate) -> Result<Menu, DomainError> {
        let mut menu = self.require_menu(id).await?;

        if let Some(code) = update.code {
            let code = code.trim().to_string();
            if !crate::domain::menu::is_valid_code(&code) {
                return Err(DomainError::InvalidMenuCode(code));
            }
            if code != menu.code {
                if self.menus.find_by_code(&code).await?.is_some() {
                    return Err(DomainError::MenuCodeAlreadyExists(code));
                }
                menu.code = code;
            }
        }
        if let Some(location) = update.location {
            let location = location.trim().to_string();
            menu.location = (!location.is_empty()).then_some(location);
        }
        if let Some(description) = update.description {
            let description = description.trim().to_string();
            menu.description = (!description.is_empty()).then_some(description);
        }

        menu.touch(update.modified_by);
        let updated = self.menus.update(&menu).await?;
        self.emit(ActivityEvent::MenuUpdated { menu_id: updated.id }).await;
        Ok(updated)
    }

    /// Deletes a menu with its whole item tree and translations. Blocked
    /// while any theme/location binding reports the menu as in use.
    pub async fn delete_menu(&self, id: &Uuid) -> Result<(), DomainError> {
        let menu = self.require_menu(id).await?;

        let bindings = self.usage.active_bindings(id).await?;
        if !bindings.is_empty() {
            warn!(
                "Refusing to delete menu {}: {} active binding(s)",
                menu.code,
                bindings.len()
            );
            return Err(DomainError::MenuInUse { bindings });
        }

        for item in self.items.list_by_menu(id).await? {
            self.translations.delete_by_item(&item.id).await?;
            self.items.delete(&item.id).await?;
        }
        self.menus.delete(id).await?;

        info!("Deleted menu: {}", menu.code);
        self.emit(ActivityEvent::MenuDeleted {
            menu_id: menu.id,
            code: menu.code,
        })
        .await;
        Ok(())
    }

    pub async fn get_menu(&self, id: &Uuid) -> Result<Menu, DomainError> {
        self.require_menu(id).await
    }

    pub async fn find_menu_by_code(&self, code: &str) -> Result<Option<Menu>, DomainError> {
        self.menus.find_by_code(code.trim()).await
    }

    pub async fn find_menu_by_location(
        &self,
        location: &str,
    ) -> Result<Option<Menu>, DomainError> {
        self.menus.find_by_location(location.trim()).await
    }

    async fn require_menu(&self, id: &Uuid) -> Result<Menu, DomainError> {
        self.menus
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("menu", id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Item operations
// ---------------------------------------------------------------------------

impl MenuService {
    /// Adds an item to a menu. When the derived canonical key already exists
    /// in the menu the call is an upsert: no new item is created and the
    /// request's new-locale translations are merged into the existing item.
    pub async fn add_menu_item(&self, input: NewMenuItem) -> Result<MenuItem, DomainError> {
        // 1. Menu and payload validation.
        self.require_menu(&input.menu_id).await?;
        self.validate_new_item(&input)?;
        self.validate_parent_spec(&input.menu_id, &input.parent, None).await?;
        if !self.config.forgiving_bootstrap {
            self.validate_page_target(&input).await?;
        }

        // 2. Resolve translation locales up front; writes are strict about
        //    unknown locales.
        let resolved_translations = self.resolve_translation_locales(&input.translations).await?;

        // 3. Sibling list and effective insertion index. Items with a
        //    pending parent belong to no sibling group yet; reconciliation
        //    renumbers them once the parent resolves.
        let (siblings, index, position) = match &input.parent {
            ParentLink::Pending(_) => {
                let position = match input.position {
                    Some(p) if p < 0 => return Err(DomainError::InvalidPosition(p)),
                    Some(p) => p,
                    None => 0,
                };
                (Vec::new(), 0usize, position)
            }
            parent => {
                let parent_id = parent.resolved_id();
                let mut siblings = self
                    .items
                    .list_children(&input.menu_id, parent_id.as_ref())
                    .await?;
                hierarchy::sort_siblings(&mut siblings);
                let index = hierarchy::clamp_index(input.position, siblings.len())?;
                (siblings, index, index as i32)
            }
        };

        // 4. Identity: dedupe on the canonical key before any write.
        let canonical_key = identity::derive_canonical_key(&input, position);
        if let Some(key) = &canonical_key {
            if let Some(existing) = self
                .items
                .find_by_canonical_key(&input.menu_id, key)
                .await?
            {
                return self.merge_into_existing(existing, resolved_translations, input.created_by).await;
            }
        }

        // 5. Free the slot and create.
        for (sibling_id, new_position) in hierarchy::insertion_changes(&siblings, index) {
            self.persist_position(&siblings, sibling_id, new_position).await?;
        }

        let id = input
            .id
            .unwrap_or_else(|| self.item_ids.item_id(&input, canonical_key.as_deref()));
        let item = MenuItem {
            id,
            menu_id: input.menu_id,
            parent: input.parent.clone(),
            position,
            item_type: input.item_type,
            target: input.target.clone(),
            external_code: input
                .external_code
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            canonical_key,
            icon: input.icon.clone(),
            badge: input.badge.clone(),
            permissions: input.permissions.clone(),
            classes: input.classes.clone(),
            styles: input.styles.clone(),
            metadata: input.metadata.clone(),
            collapsible: input.collapsible,
            collapsed: input.collapsed,
            created_at: Utc::now(),
            created_by: input.created_by,
            modified_at: None,
            modified_by: None,
        };
        let created = self.items.create(&item).await?;

        for (locale, spec) in &resolved_translations {
            let translation = MenuItemTranslation::new(
                created.id,
                locale.id,
                spec.label.clone(),
                spec.label_key.clone(),
                spec.group_title.clone(),
                spec.group_title_key.clone(),
                spec.url_override.clone(),
                input.created_by,
            );
            self.translations.create(&translation).await?;
        }

        info!(
            "Added {} item {} to menu {}",
            created.item_type.as_str(),
            created.id,
            created.menu_id
        );
        self.emit(ActivityEvent::ItemAdded {
            menu_id: created.menu_id,
            item_id: created.id,
        })
        .await;

        if self.config.reconcile_on_add {
            self.reconcile_menu(&input.menu_id).await?;
        }
        Ok(created)
    }

    /// Dedupe hit: merge request translations whose locale the existing item
    /// does not have yet. Existing locales are never overwritten here.
    async fn merge_into_existing(
        &self,
        existing: MenuItem,
        resolved_translations: Vec<(Locale, TranslationSpec)>,
        created_by: Option<Uuid>,
    ) -> Result<MenuItem, DomainError> {
        let mut merged = 0usize;
        for (locale, spec) in &resolved_translations {
            if self
                .translations
                .find_by_item_and_locale(&existing.id, &locale.id)
                .await?
                .is_some()
            {
                continue;
            }
            let translation = MenuItemTranslation::new(
                existing.id,
                locale.id,
                spec.label.clone(),
                spec.label_key.clone(),
                spec.group_title.clone(),
                spec.group_title_key.clone(),
                spec.url_override.clone(),
                created_by,
            );
            self.translations.create(&translation).await?;
            merged += 1;
        }

        debug!(
            "Dedupe hit on item {}: merged {} translation(s)",
            existing.id, merged
        );
        self.emit(ActivityEvent::ItemMerged {
            menu_id: existing.menu_id,
            item_id: existing.id,
            merged_locales: merged,
        })
        .await;
        Ok(existing)
    }

    pub async fn update_menu_item(
        &self,
        id: &Uuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, DomainError> {
        let mut item = self.require_item(id).await?;

        // 1. Non-structural field patches, re-checked against type rules.
        if let Some(target) = update.target {
            if item.item_type != MenuItemType::Item {
                return Err(DomainError::FieldForbidden {
                    item_type: item.item_type.as_str(),
                    field: "target",
                });
            }
            if target.is_empty() {
                return Err(DomainError::TargetRequired);
            }
            item.target = Some(target);
        }
        if let Some(icon) = update.icon {
            if item.item_type != MenuItemType::Item {
                return Err(DomainError::FieldForbidden {
                    item_type: item.item_type.as_str(),
                    field: "icon",
                });
            }
            item.icon = (!icon.trim().is_empty()).then(|| icon.trim().to_string());
        }
        if let Some(badge) = update.badge {
            if item.item_type != MenuItemType::Item {
                return Err(DomainError::FieldForbidden {
                    item_type: item.item_type.as_str(),
                    field: "badge",
                });
            }
            item.badge = (!badge.trim().is_empty()).then(|| badge.trim().to_string());
        }
        if let Some(code) = update.external_code {
            item.external_code = (!code.trim().is_empty()).then(|| code.trim().to_string());
        }
        if let Some(permissions) = update.permissions {
            item.permissions = permissions;
        }
        if let Some(classes) = update.classes {
            item.classes = (!classes.trim().is_empty()).then(|| classes.trim().to_string());
        }
        if let Some(styles) = update.styles {
            item.styles = (!styles.trim().is_empty()).then(|| styles.trim().to_string());
        }
        if let Some(metadata) = update.metadata {
            item.metadata = (!metadata.is_empty()).then_some(metadata);
        }
        if let Some(collapsible) = update.collapsible {
            item.collapsible = collapsible;
        }
        if let Some(collapsed) = update.collapsed {
            item.collapsed = collapsed;
        }
        if item.collapsed && !item.collapsible {
            return Err(DomainError::CollapsedWithoutCollapsible);
        }
        if item.collapsible && !self.config.allow_childless_collapsible {
            let children = self.items.list_children(&item.menu_id, Some(id)).await?;
            if children.is_empty() {
                return Err(DomainError::CollapsibleWithoutChildren);
            }
        }

        // 2. Structural changes: reparent and/or reposition.
        let reparent = update
            .parent
            .filter(|new_parent| *new_parent != item.parent);
        if let Some(new_parent) = reparent {
            self.validate_parent_spec(&item.menu_id, &new_parent, Some(&item.id))
                .await?;
            if let Some(pid) = new_parent.resolved_id() {
                self.assert_no_upward_cycle(&item.id, &pid).await?;
            }

            let old_parent = item.parent.clone();
            item.parent = new_parent.clone();
            if new_parent.is_pending() {
                // A pending parent has no sibling group yet; the position is
                // taken at face value and no existing run is shifted.
                item.position = match update.position {
                    Some(p) if p < 0 => return Err(DomainError::InvalidPosition(p)),
                    Some(p) => p,
                    None => item.position.max(0),
                };
            } else {
                item.position = self
                    .insert_among_siblings(&item.menu_id, &new_parent, update.position, &item.id)
                    .await?;
            }

            // The group the item left gets compacted back to a dense run.
            if !old_parent.is_pending() {
                self.compact_children(&item.menu_id, old_parent.resolved_id(), Some(&item.id))
                    .await?;
            }
        } else if let Some(position) = update.position {
            if item.parent.is_pending() {
                if position < 0 {
                    return Err(DomainError::InvalidPosition(position));
                }
                item.position = position;
            } else {
                let parent = item.parent.clone();
                item.position = self
                    .insert_among_siblings(&item.menu_id, &parent, Some(position), &item.id)
                    .await?;
            }
        }

        item.touch(update.modified_by);
        let updated = self.items.update(&item).await?;
        self.emit(ActivityEvent::ItemUpdated {
            menu_id: updated.menu_id,
            item_id: updated.id,
        })
        .await;
        Ok(updated)
    }

    /// Deletes an item. With `cascade`, descendants go first (depth-first);
    /// without it, the call fails while children exist. Remaining siblings
    /// are compacted to a dense `0..n-1` run.
    pub async fn delete_menu_item(&self, id: &Uuid, cascade: bool) -> Result<(), DomainError> {
        let item = self.require_item(id).await?;

        let children = self.items.list_children(&item.menu_id, Some(id)).await?;
        if !children.is_empty() && !cascade {
            return Err(DomainError::ChildrenExist(*id));
        }

        // Collect the subtree breadth-first, then delete it deepest-first.
        let mut order: Vec<Uuid> = vec![*id];
        let mut cursor = 0usize;
        while cursor < order.len() {
            let current = order[cursor];
            cursor += 1;
            for child in self.items.list_children(&item.menu_id, Some(&current)).await? {
                order.push(child.id);
            }
        }
        for target in order.iter().rev() {
            self.translations.delete_by_item(target).await?;
            self.items.delete(target).await?;
        }

        if !item.parent.is_pending() {
            self.compact_children(&item.menu_id, item.parent.resolved_id(), None)
                .await?;
        }

        info!("Deleted item {} ({} descendant(s))", id, order.len() - 1);
        self.emit(ActivityEvent::ItemDeleted {
            menu_id: item.menu_id,
            item_id: *id,
            cascaded: order.len() - 1,
        })
        .await;
        Ok(())
    }

    /// Replaces the full parent/position assignment of a menu atomically
    /// from the service's point of view: everything is validated before the
    /// first write, and only items that actually changed are persisted.
    pub async fn bulk_reorder_items(
        &self,
        menu_id: &Uuid,
        placements: Vec<ItemPlacement>,
    ) -> Result<(), DomainError> {
        self.require_menu(menu_id).await?;
        let all = self.items.list_by_menu(menu_id).await?;

        // 1. Cardinality: every item exactly once.
        let by_placement: HashMap<Uuid, &ItemPlacement> =
            placements.iter().map(|p| (p.item_id, p)).collect();
        if by_placement.len() != placements.len() || by_placement.len() != all.len() {
            return Err(DomainError::ValidationError(
                "reorder must assign every item in the menu exactly once".to_string(),
            ));
        }
        let by_id: HashMap<Uuid, &MenuItem> = all.iter().map(|it| (it.id, it)).collect();
        for placement in &placements {
            if !by_id.contains_key(&placement.item_id) {
                return Err(DomainError::not_found("menu item", placement.item_id.to_string()));
            }
        }

        // 2. Parent assignments: inside the menu, never a separator, never
        //    the item itself.
        for placement in &placements {
            if placement.position < 0 {
                return Err(DomainError::InvalidPosition(placement.position));
            }
            let Some(parent_id) = placement.parent_id else {
                continue;
            };
            if parent_id == placement.item_id {
                return Err(DomainError::HierarchyCycle(placement.item_id));
            }
            let Some(parent) = by_id.get(&parent_id) else {
                return Err(DomainError::invalid_parent(format!(
                    "parent {parent_id} is not part of menu {menu_id}"
                )));
            };
            if parent.is_separator() {
                return Err(DomainError::invalid_parent(format!(
                    "separator {parent_id} cannot have children"
                )));
            }
        }

        // 3. The assignment as a whole must stay acyclic.
        let parent_map: HashMap<Uuid, Option<Uuid>> = placements
            .iter()
            .map(|p| (p.item_id, p.parent_id))
            .collect();
        if let Some(on_cycle) = hierarchy::find_cycle(&parent_map) {
            return Err(DomainError::HierarchyCycle(on_cycle));
        }

        // 4. Apply, persisting only actual changes.
        let mut changed: Vec<MenuItem> = Vec::new();
        for item in &all {
            let placement = by_placement[&item.id];
            let new_parent = match placement.parent_id {
                Some(pid) => ParentLink::Resolved(pid),
                None => ParentLink::Root,
            };
            if item.parent == new_parent && item.position == placement.position {
                continue;
            }
            let mut updated = item.clone();
            updated.parent = new_parent;
            updated.position = placement.position;
            updated.touch(None);
            changed.push(updated);
        }

        match &self.bulk_writer {
            Some(writer) if !changed.is_empty() => {
                let batch: Vec<HierarchyPlacement> = changed
                    .iter()
                    .map(|it| HierarchyPlacement {
                        item_id: it.id,
                        parent: it.parent.clone(),
                        position: it.position,
                    })
                    .collect();
                writer.apply_placements(menu_id, &batch).await?;
            }
            _ => {
                for item in &changed {
                    self.items.update(item).await?;
                }
            }
        }

        info!(
            "Reordered menu {}: {} item(s) changed",
            menu_id,
            changed.len()
        );
        self.emit(ActivityEvent::ItemsReordered {
            menu_id: *menu_id,
            changed: changed.len(),
        })
        .await;
        Ok(())
    }

    pub async fn get_menu_item(&self, id: &Uuid) -> Result<MenuItem, DomainError> {
        self.require_item(id).await
    }

    /// Looks an item up by its human-assigned stable handle,
    /// case-insensitively.
    pub async fn find_item_by_external_code(
        &self,
        menu_id: &Uuid,
        code: &str,
    ) -> Result<Option<MenuItem>, DomainError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        self.items.find_by_external_code(menu_id, code).await
    }

    async fn require_item(&self, id: &Uuid) -> Result<MenuItem, DomainError> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("menu item", id.to_string()))
    }

    /// Clamps into the sibling list under `parent` (excluding `moving_id`),
    /// persists the shifts, and returns the position the moved item takes.
    async fn insert_among_siblings(
        &self,
        menu_id: &Uuid,
        parent: &ParentLink,
        requested: Option<i32>,
        moving_id: &Uuid,
    ) -> Result<i32, DomainError> {
        let parent_id = parent.resolved_id();
        let mut siblings = self.items.list_children(menu_id, parent_id.as_ref()).await?;
        siblings.retain(|it| it.id != *moving_id);
        hierarchy::sort_siblings(&mut siblings);
        let index = hierarchy::clamp_index(requested, siblings.len())?;
        for (sibling_id, new_position) in hierarchy::insertion_changes(&siblings, index) {
            self.persist_position(&siblings, sibling_id, new_position).await?;
        }
        Ok(index as i32)
    }

    async fn compact_children(
        &self,
        menu_id: &Uuid,
        parent_id: Option<Uuid>,
        excluding: Option<&Uuid>,
    ) -> Result<(), DomainError> {
        let mut siblings = self.items.list_children(menu_id, parent_id.as_ref()).await?;
        if let Some(excluded) = excluding {
            siblings.retain(|it| it.id != *excluded);
        }
        hierarchy::sort_siblings(&mut siblings);
        for (sibling_id, new_position) in hierarchy::compaction_changes(&siblings) {
            self.persist_position(&siblings, sibling_id, new_position).await?;
        }
        Ok(())
    }

    async fn persist_position(
        &self,
        siblings: &[MenuItem],
        id: Uuid,
        new_position: i32,
    ) -> Result<(), DomainError> {
        let Some(sibling) = siblings.iter().find(|it| it.id == id) else {
            return Ok(());
        };
        let mut updated = sibling.clone();
        updated.position = new_position;
        updated.touch(None);
        self.items.update(&updated).await?;
        Ok(())
    }

    fn validate_new_item(&self, input: &NewMenuItem) -> Result<(), DomainError> {
        match input.item_type {
            MenuItemType::Item => {
                if input.target.as_ref().map_or(true, |t| t.is_empty()) {
                    return Err(DomainError::TargetRequired);
                }
                for spec in &input.translations {
                    if !spec.has_text() {
                        return Err(DomainError::TranslationTextRequired);
                    }
                }
            }
            MenuItemType::Group => {
                if input.target.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "group",
                        field: "target",
                    });
                }
                if input.icon.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "group",
                        field: "icon",
                    });
                }
                if input.badge.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "group",
                        field: "badge",
                    });
                }
                if input.translations.is_empty() {
                    return Err(DomainError::TranslationRequired);
                }
                if !input.translations.iter().any(TranslationSpec::has_text) {
                    return Err(DomainError::TranslationTextRequired);
                }
            }
            MenuItemType::Separator => {
                if input.target.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "separator",
                        field: "target",
                    });
                }
                if input.icon.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "separator",
                        field: "icon",
                    });
                }
                if input.badge.is_some() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "separator",
                        field: "badge",
                    });
                }
                if !input.translations.is_empty() {
                    return Err(DomainError::FieldForbidden {
                        item_type: "separator",
                        field: "translations",
                    });
                }
            }
        }

        if input.collapsed && !input.collapsible {
            return Err(DomainError::CollapsedWithoutCollapsible);
        }
        // A new item has no children yet.
        if input.collapsible && !self.config.allow_childless_collapsible {
            return Err(DomainError::CollapsibleWithoutChildren);
        }

        let mut seen = HashSet::new();
        for spec in &input.translations {
            if !seen.insert(spec.locale.trim().to_lowercase()) {
                return Err(DomainError::DuplicateLocaleInRequest(spec.locale.clone()));
            }
        }
        Ok(())
    }

    async fn validate_parent_spec(
        &self,
        menu_id: &Uuid,
        parent: &ParentLink,
        item_id: Option<&Uuid>,
    ) -> Result<(), DomainError> {
        match parent {
            ParentLink::Root => Ok(()),
            ParentLink::Pending(reference) => {
                if !self.config.forgiving_bootstrap {
                    return Err(DomainError::invalid_parent(
                        "pending parent references require forgiving bootstrap mode",
                    ));
                }
                if reference.trim().is_empty() {
                    return Err(DomainError::invalid_parent("empty parent reference"));
                }
                Ok(())
            }
            ParentLink::Resolved(pid) => {
                if item_id == Some(pid) {
                    return Err(DomainError::HierarchyCycle(*pid));
                }
                let parent_item = self
                    .items
                    .find_by_id(pid)
                    .await?
                    .ok_or_else(|| DomainError::invalid_parent(format!("parent {pid} not found")))?;
                if parent_item.menu_id != *menu_id {
                    return Err(DomainError::invalid_parent(format!(
                        "parent {pid} belongs to a different menu"
                    )));
                }
                if parent_item.is_separator() {
                    return Err(DomainError::invalid_parent(format!(
                        "separator {pid} cannot have children"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Walks the prospective ancestor chain; reparenting under one's own
    /// descendant closes a loop.
    async fn assert_no_upward_cycle(
        &self,
        item_id: &Uuid,
        new_parent_id: &Uuid,
    ) -> Result<(), DomainError> {
        let mut current = Some(*new_parent_id);
        while let Some(id) = current {
            if id == *item_id {
                return Err(DomainError::HierarchyCycle(*item_id));
            }
            current = self
                .items
                .find_by_id(&id)
                .await?
                .and_then(|it| it.parent.resolved_id());
        }
        Ok(())
    }

    async fn validate_page_target(&self, input: &NewMenuItem) -> Result<(), DomainError> {
        let Some(target) = &input.target else {
            return Ok(());
        };
        let get = |key: &str| {
            target
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        if get("type") != Some("page") {
            return Ok(());
        }
        if let Some(id) = get("id").and_then(|s| Uuid::parse_str(s).ok()) {
            if self.pages.find_by_id(&id).await?.is_none() {
                return Err(DomainError::not_found("page", id.to_string()));
            }
            return Ok(());
        }
        if let Some(slug) = get("slug") {
            if self.pages.find_by_slug(slug).await?.is_none() {
                return Err(DomainError::not_found("page", slug.to_string()));
            }
        }
        Ok(())
    }

    async fn resolve_translation_locales(
        &self,
        specs: &[TranslationSpec],
    ) -> Result<Vec<(Locale, TranslationSpec)>, DomainError> {
        let mut resolved = Vec::with_capacity(specs.len());
        for spec in specs {
            let locale = self
                .locales
                .find_by_code(spec.locale.trim())
                .await?
                .ok_or_else(|| DomainError::not_found("locale", spec.locale.clone()))?;
            resolved.push((locale, spec.clone()));
        }
        Ok(resolved)
    }
}

// ---------------------------------------------------------------------------
// Translation operations
// ---------------------------------------------------------------------------

impl MenuService {
    pub async fn add_translation(
        &self,
        item_id: &Uuid,
        spec: TranslationSpec,
        created_by: Option<Uuid>,
    ) -> Result<MenuItemTranslation, DomainError> {
        let item = self.require_item(item_id).await?;
        if item.is_separator() {
            return Err(DomainError::FieldForbidden {
                item_type: "separator",
                field: "translations",
            });
        }
        if !spec.has_text() {
            return Err(DomainError::TranslationTextRequired);
        }

        let locale = self
            .locales
            .find_by_code(spec.locale.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("locale", spec.locale.clone()))?;

        if self
            .translations
            .find_by_item_and_locale(item_id, &locale.id)
            .await?
            .is_some()
        {
            return Err(DomainError::TranslationAlreadyExists {
                item_id: *item_id,
                locale_id: locale.id,
            });
        }

        // The store arbitrates a concurrent create racing past the check
        // above: exactly one caller wins its uniqueness constraint.
        let translation = MenuItemTranslation::new(
            *item_id,
            locale.id,
            spec.label,
            spec.label_key,
            spec.group_title,
            spec.group_title_key,
            spec.url_override,
            created_by,
        );
        let created = self.translations.create(&translation).await?;
        self.emit(ActivityEvent::TranslationAdded {
            item_id: *item_id,
            locale_id: locale.id,
        })
        .await;
        Ok(created)
    }

    pub async fn update_translation(
        &self,
        item_id: &Uuid,
        spec: TranslationSpec,
        modified_by: Option<Uuid>,
    ) -> Result<MenuItemTranslation, DomainError> {
        self.require_item(item_id).await?;
        if !spec.has_text() {
            return Err(DomainError::TranslationTextRequired);
        }

        let locale = self
            .locales
            .find_by_code(spec.locale.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("locale", spec.locale.clone()))?;
        let mut translation = self
            .translations
            .find_by_item_and_locale(item_id, &locale.id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("translation", format!("{item_id}/{}", locale.code))
            })?;

        translation.label = normalize_text(spec.label);
        translation.label_key = normalize_text(spec.label_key);
        translation.group_title = normalize_text(spec.group_title);
        translation.group_title_key = normalize_text(spec.group_title_key);
        translation.url_override = normalize_text(spec.url_override);
        translation.touch(modified_by);

        let updated = self.translations.update(&translation).await?;
        self.emit(ActivityEvent::TranslationUpdated {
            item_id: *item_id,
            locale_id: locale.id,
        })
        .await;
        Ok(updated)
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Reconciliation and navigation
// ---------------------------------------------------------------------------

impl MenuService {
    /// Resolves pending parent references for a menu. Idempotent; never an
    /// error when nothing is pending.
    pub async fn reconcile_menu(&self, menu_id: &Uuid) -> Result<ReconcileReport, DomainError> {
        self.require_menu(menu_id).await?;

        let mut items = self.items.list_by_menu(menu_id).await?;
        // Deterministic processing order.
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let (report, changed) = reconcile::reconcile_items(&mut items)?;
        for id in &changed {
            if let Some(item) = items.iter().find(|it| it.id == *id) {
                self.items.update(item).await?;
            }
        }

        if report.resolved > 0 || report.remaining > 0 {
            info!(
                "Reconciled menu {}: {} resolved, {} remaining",
                menu_id, report.resolved, report.remaining
            );
        }
        self.emit(ActivityEvent::MenuReconciled {
            menu_id: *menu_id,
            report,
        })
        .await;
        Ok(report)
    }

    /// Builds the render-ready navigation tree for a menu, resolved against
    /// a locale. Unknown locales degrade to undecorated defaults.
    pub async fn resolve_navigation(
        &self,
        menu_code: &str,
        locale_code: Option<&str>,
    ) -> Result<Vec<NavigationNode>, DomainError> {
        let menu = self
            .menus
            .find_by_code(menu_code.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("menu", menu_code.to_string()))?;

        if self.config.reconcile_on_resolve {
            self.reconcile_menu(&menu.id).await?;
        }

        let items = self.items.list_by_menu(&menu.id).await?;

        // Best effort: an unknown locale must not fail navigation.
        let locale = match locale_code {
            None => None,
            Some(code) => match self.locales.find_by_code(code.trim()).await {
                Ok(found) => found,
                Err(e) => {
                    debug!("Locale lookup failed for {:?}: {}", code, e);
                    None
                }
            },
        };

        let mut translations: HashMap<Uuid, Vec<MenuItemTranslation>> = HashMap::new();
        for item in &items {
            if item.is_separator() {
                continue;
            }
            translations.insert(item.id, self.translations.list_by_item(&item.id).await?);
        }

        let mut urls: HashMap<Uuid, Option<String>> = HashMap::new();
        for item in &items {
            if item.item_type == MenuItemType::Item {
                urls.insert(item.id, self.resolve_item_url(item, locale.as_ref()).await);
            }
        }

        Ok(navigation::build_tree(
            &items,
            &translations,
            locale.as_ref(),
            &urls,
        ))
    }

    /// Custom resolver first, page-backed default second; failures degrade
    /// to "no URL" so navigation still renders.
    async fn resolve_item_url(&self, item: &MenuItem, locale: Option<&Locale>) -> Option<String> {
        if let Some(custom) = &self.url_resolver {
            match custom.resolve(item, locale).await {
                Ok(Some(url)) if !url.trim().is_empty() => return Some(url),
                Ok(_) => {}
                Err(e) => debug!("URL resolver failed for item {}: {}", item.id, e),
            }
        }
        let fallback = PageUrlResolver::new(self.pages.clone());
        match fallback.resolve(item, locale).await {
            Ok(Some(url)) if !url.trim().is_empty() => Some(url),
            Ok(_) => None,
            Err(e) => {
                debug!("Default URL resolver failed for item {}: {}", item.id, e);
                None
            }
        }
    }

    async fn emit(&self, event: ActivityEvent) {
        if let Err(e) = self.activity.record(event).await {
            warn!("Activity emission failed: {}", e);
        }
    }
}
