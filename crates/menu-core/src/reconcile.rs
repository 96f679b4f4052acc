// ============================================================================
// Menu Core - Reconciliation Engine
// File: crates/menu-core/src/reconcile.rs
// Description: Resolves pending parent references after out-of-order seeding
// ============================================================================

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{MenuItem, ParentLink};
use crate::error::DomainError;
use crate::hierarchy;

/// Outcome counts of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Pending references resolved into parent ids during this pass.
    pub resolved: usize,
    /// Pending references still unresolved after this pass.
    pub remaining: usize,
}

/// Resolves every pending parent reference it can, re-validates the whole
/// hierarchy, and renormalizes the sibling groups that gained members.
///
/// Mutates `items` in place and returns the report plus the ids of items that
/// changed and must be persisted. Errors leave no partial intent: the caller
/// persists nothing unless the whole pass succeeds.
pub(crate) fn reconcile_items(
    items: &mut [MenuItem],
) -> Result<(ReconcileReport, Vec<Uuid>), DomainError> {
    // 1. Index by id, external code and canonical key.
    let by_id: HashMap<Uuid, usize> = items.iter().enumerate().map(|(i, it)| (it.id, i)).collect();
    let by_code: HashMap<String, usize> = items
        .iter()
        .enumerate()
        .filter_map(|(i, it)| {
            it.external_code
                .as_deref()
                .map(|c| (c.trim().to_lowercase(), i))
        })
        .collect();
    let by_key: HashMap<String, usize> = items
        .iter()
        .enumerate()
        .filter_map(|(i, it)| it.canonical_key.clone().map(|k| (k, i)))
        .collect();

    // 2. Resolve pending references: id parse first, then external code,
    //    then canonical key.
    let mut resolutions: Vec<(usize, Uuid)> = Vec::new();
    let mut remaining = 0usize;
    for (idx, item) in items.iter().enumerate() {
        let Some(reference) = item.parent.pending_ref() else {
            continue;
        };
        let reference = reference.trim();

        let target_idx = Uuid::parse_str(reference)
            .ok()
            .and_then(|id| by_id.get(&id).copied())
            .or_else(|| by_code.get(&reference.to_lowercase()).copied())
            .or_else(|| by_key.get(reference).copied())
            .or_else(|| by_key.get(&reference.to_lowercase()).copied());

        let Some(target_idx) = target_idx else {
            remaining += 1;
            continue;
        };

        // 3. A reference may not point at the item itself or at a separator.
        let target = &items[target_idx];
        if target.id == item.id {
            return Err(DomainError::HierarchyCycle(item.id));
        }
        if target.is_separator() {
            return Err(DomainError::invalid_parent(format!(
                "separator {} cannot have children",
                target.id
            )));
        }
        resolutions.push((idx, target.id));
    }

    let mut changed: HashSet<Uuid> = HashSet::new();
    let mut gained_parents: HashSet<Uuid> = HashSet::new();
    for (idx, parent_id) in &resolutions {
        items[*idx].parent = ParentLink::Resolved(*parent_id);
        items[*idx].touch(None);
        changed.insert(items[*idx].id);
        gained_parents.insert(*parent_id);
    }

    // 4. Full-graph cycle check: a batch of simultaneous resolutions can
    //    jointly form a cycle no pairwise check would see.
    let parent_map: HashMap<Uuid, Option<Uuid>> = items
        .iter()
        .map(|it| (it.id, it.parent.resolved_id()))
        .collect();
    if let Some(on_cycle) = hierarchy::find_cycle(&parent_map) {
        return Err(DomainError::HierarchyCycle(on_cycle));
    }

    // 5. Renormalize only the sibling groups that gained members.
    for parent_id in gained_parents {
        let mut siblings: Vec<MenuItem> = items
            .iter()
            .filter(|it| it.parent.resolved_id() == Some(parent_id))
            .cloned()
            .collect();
        hierarchy::sort_siblings(&mut siblings);
        for (id, new_position) in hierarchy::compaction_changes(&siblings) {
            if let Some(&idx) = by_id.get(&id) {
                items[idx].position = new_position;
                items[idx].touch(None);
                changed.insert(id);
            }
        }
    }

    let report = ReconcileReport {
        resolved: resolutions.len(),
        remaining,
    };
    Ok((report, changed.into_iter().collect()))
}
