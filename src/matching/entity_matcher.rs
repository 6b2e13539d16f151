//! Edit-distance label matching
//!
//! Distances are case-sensitive Levenshtein distances over Unicode scalar
//! values. No normalization happens here; callers lower-case or trim first if
//! they want that.

use std::collections::HashSet;

/// Labels within `max_edit_distance` of `entity`, in label order.
pub fn match_entities<S: AsRef<str>>(
    entity: &str,
    labels: &[S],
    max_edit_distance: usize,
) -> Vec<String> {
    labels
        .iter()
        .map(AsRef::as_ref)
        .filter(|label| strsim::levenshtein(entity, label) <= max_edit_distance)
        .map(str::to_string)
        .collect()
}

/// Per-entity matches concatenated in entity order. Duplicates are kept;
/// run [`dedup_labels`] when a set is needed.
pub fn match_entities_batch<E, S>(
    entities: &[E],
    labels: &[S],
    max_edit_distance: usize,
) -> Vec<String>
where
    E: AsRef<str>,
    S: AsRef<str>,
{
    entities
        .iter()
        .flat_map(|entity| match_entities(entity.as_ref(), labels, max_edit_distance))
        .collect()
}

/// Remove repeated labels, keeping the first occurrence.
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
