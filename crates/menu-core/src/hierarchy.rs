// ============================================================================
// Menu Core - Hierarchy & Position Manager
// File: crates/menu-core/src/hierarchy.rs
// Description: Sibling ordering math and the parent-graph cycle check
// ============================================================================

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::MenuItem;
use crate::error::DomainError;

/// Sorts a sibling list by position, tie-broken by creation time.
pub fn sort_siblings(items: &mut [MenuItem]) {
    items.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// Clamps a requested insertion index to `[0, len]`. `None` appends.
/// Explicitly negative positions are rejected rather than clamped.
pub fn clamp_index(requested: Option<i32>, len: usize) -> Result<usize, DomainError> {
    match requested {
        None => Ok(len),
        Some(p) if p < 0 => Err(DomainError::InvalidPosition(p)),
        Some(p) => Ok((p as usize).min(len)),
    }
}

/// Position changes needed to free the slot at `index` in a sorted sibling
/// list: every sibling at or after the index shifts up by one, earlier
/// siblings settle on their dense rank. Only actual changes are returned.
pub fn insertion_changes(sorted: &[MenuItem], index: usize) -> Vec<(Uuid, i32)> {
    sorted
        .iter()
        .enumerate()
        .filter_map(|(rank, item)| {
            let new_position = if rank < index { rank as i32 } else { rank as i32 + 1 };
            (new_position != item.position).then_some((item.id, new_position))
        })
        .collect()
}

/// Position changes that compact a sorted sibling list to a dense `0..n-1`
/// sequence, preserving relative order.
pub fn compaction_changes(sorted: &[MenuItem]) -> Vec<(Uuid, i32)> {
    sorted
        .iter()
        .enumerate()
        .filter_map(|(rank, item)| (rank as i32 != item.position).then_some((item.id, rank as i32)))
        .collect()
}

/// White/gray/black DFS over the parent map. Each node has at most one
/// parent, so the traversal degenerates to colored upward walks. Returns an
/// id on a cycle, if any.
pub fn find_cycle(parent_of: &HashMap<Uuid, Option<Uuid>>) -> Option<Uuid> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let mut color: HashMap<Uuid, Color> = parent_of.keys().map(|id| (*id, Color::White)).collect();

    for start in parent_of.keys() {
        if color[start] != Color::White {
            continue;
        }
        let mut path = Vec::new();
        let mut current = Some(*start);
        while let Some(id) = current {
            match color.get(&id).copied() {
                // Parent outside the known set; the chain ends here.
                None => break,
                Some(Color::Black) => break,
                Some(Color::Gray) => return Some(id),
                Some(Color::White) => {
                    color.insert(id, Color::Gray);
                    path.push(id);
                    current = parent_of.get(&id).copied().flatten();
                }
            }
        }
        for id in path {
            color.insert(id, Color::Black);
        }
    }
    None
}
