//! Ordered reassignment of one record into another group.
//!
//! Result order is `[moved] ++ [others already in target, prior order] ++
//! [everything else, prior order]`, so the moved record becomes the newest
//! entry of its new group wherever it sat before.

use crate::model::Grouped;

/// Moves the record with `id` into `group_id`.
///
/// Returns an unchanged copy when `id` is absent or already in `group_id`.
pub fn move_to_group<T: Grouped + Clone>(collection: &[T], id: &str, group_id: &str) -> Vec<T> {
    let Some(target) = collection.iter().find(|record| record.id() == id) else {
        return collection.to_vec();
    };
    if target.group_id() == group_id {
        return collection.to_vec();
    }

    let (in_group, elsewhere): (Vec<T>, Vec<T>) = collection
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .partition(|record| record.group_id() == group_id);

    let mut next = Vec::with_capacity(collection.len());
    next.push(target.with_group(group_id));
    next.extend(in_group);
    next.extend(elsewhere);
    next
}
