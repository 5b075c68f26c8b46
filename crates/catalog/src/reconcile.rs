//! Tag-association reconciliation.
//!
//! Given the join rows a product currently has and the tag list a client
//! wants it to have, compute the minimal set of insertions and removals that
//! transforms one into the other. Tags present in both sets are untouched.

use std::collections::HashSet;

use shopfront_core::{ProductTagId, TagId};

use crate::product::ProductTagRow;

/// The changes needed to bring a product's tag set in line with a desired list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReconciliation {
    /// Tag ids to associate (no existing join row).
    pub to_insert: Vec<TagId>,
    /// Join-row ids to delete (tag absent from the desired list).
    pub to_remove: Vec<ProductTagId>,
}

impl TagReconciliation {
    pub fn is_noop(&self) -> bool {
        self.to_insert.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the insertions and removals that turn `existing` into `desired`.
///
/// Duplicate ids in `desired` are collapsed to one insertion; first-occurrence
/// order is preserved. Removals are keyed by join-row id so duplicate existing
/// rows for the same tag (should the store ever hold them) are all removed.
pub fn reconcile_tags(existing: &[ProductTagRow], desired: &[TagId]) -> TagReconciliation {
    let existing_tags: HashSet<TagId> = existing.iter().map(|row| row.tag_id).collect();
    let desired_tags: HashSet<TagId> = desired.iter().copied().collect();

    let mut seen = HashSet::new();
    let to_insert = desired
        .iter()
        .copied()
        .filter(|tag_id| !existing_tags.contains(tag_id) && seen.insert(*tag_id))
        .collect();

    let to_remove = existing
        .iter()
        .filter(|row| !desired_tags.contains(&row.tag_id))
        .map(|row| row.id)
        .collect();

    TagReconciliation {
        to_insert,
        to_remove,
    }
}
