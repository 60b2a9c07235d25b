//! Display-order bookkeeping for sibling collections (employment history,
//! accreditations).
//!
//! Every reorder commit rewrites the whole sibling set, so `sort_order`
//! values always end up a contiguous `0..n` permutation — gaps left by
//! deletions self-heal on the next commit.

use std::collections::HashSet;

use uuid::Uuid;

/// Assigns contiguous sort orders from list position.
pub fn resequence(ids: &[Uuid]) -> Vec<(Uuid, i32)> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i32))
        .collect()
}

/// A reorder request must be a permutation of the existing siblings —
/// nothing added, nothing missing, no duplicates.
pub fn validate_permutation(existing: &[Uuid], proposed: &[Uuid]) -> Result<(), String> {
    if proposed.len() != existing.len() {
        return Err(format!(
            "reorder must list all {} items, got {}",
            existing.len(),
            proposed.len()
        ));
    }
    let existing_set: HashSet<&Uuid> = existing.iter().collect();
    let proposed_set: HashSet<&Uuid> = proposed.iter().collect();
    if proposed_set.len() != proposed.len() {
        return Err("reorder contains duplicate ids".to_string());
    }
    if existing_set != proposed_set {
        return Err("reorder ids do not match the existing items".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_move_first_to_last_yields_contiguous_orders() {
        let original = ids(5);
        // Drag item 0 to position 4: same splice the client commits.
        let mut moved = original.clone();
        let dragged = moved.remove(0);
        moved.insert(4, dragged);

        let assigned = resequence(&moved);
        let orders: Vec<i32> = assigned.iter().map(|(_, o)| *o).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        // Orders follow the NEW sequence: the dragged item is now last.
        assert_eq!(assigned[4].0, original[0]);
        assert_eq!(assigned[0].0, original[1]);
    }

    #[test]
    fn test_resequence_empty() {
        assert!(resequence(&[]).is_empty());
    }

    #[test]
    fn test_permutation_accepts_reordering() {
        let existing = ids(3);
        let proposed = vec![existing[2], existing[0], existing[1]];
        assert!(validate_permutation(&existing, &proposed).is_ok());
    }

    #[test]
    fn test_permutation_rejects_missing_and_foreign_ids() {
        let existing = ids(3);
        assert!(validate_permutation(&existing, &existing[..2].to_vec()).is_err());

        let mut with_foreign = existing.clone();
        with_foreign[2] = Uuid::new_v4();
        assert!(validate_permutation(&existing, &with_foreign).is_err());
    }

    #[test]
    fn test_permutation_rejects_duplicates() {
        let existing = ids(3);
        let proposed = vec![existing[0], existing[0], existing[1]];
        assert!(validate_permutation(&existing, &proposed).is_err());
    }
}
