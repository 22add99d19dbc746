// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CourseId, PreferenceEntry, RankAllocationStore, RankChange, UNRANKED, allocate, apply_rank,
    validate_submission,
};
use std::collections::HashSet;

fn course(id: &str) -> CourseId {
    CourseId::new(id)
}

fn entry(id: &str, rank: u32) -> PreferenceEntry {
    PreferenceEntry::new(course(id), rank)
}

fn create_ranked_store(ranking: &[(&str, u32)]) -> RankAllocationStore {
    let mut store: RankAllocationStore = RankAllocationStore::new();
    for (id, rank) in ranking {
        store.set_rank(&course(id), *rank);
    }
    store
}

fn assert_bijective(entries: &[PreferenceEntry]) {
    let ranks: HashSet<u32> = entries.iter().map(|e| e.rank).collect();
    let courses: HashSet<&CourseId> = entries.iter().map(|e| &e.course_id).collect();
    assert_eq!(ranks.len(), entries.len(), "duplicate rank in {entries:?}");
    assert_eq!(
        courses.len(),
        entries.len(),
        "duplicate course in {entries:?}"
    );
    assert!(
        entries.windows(2).all(|w| w[0].rank < w[1].rank),
        "entries not sorted by rank: {entries:?}"
    );
    assert!(entries.iter().all(|e| e.rank != UNRANKED));
}

#[test]
fn test_insert_into_free_slot() {
    let mut store: RankAllocationStore = RankAllocationStore::new();
    let change: RankChange = store.set_rank(&course("A"), 2);

    assert_eq!(change, RankChange::Inserted { rank: 2 });
    assert_eq!(store.entries(), &[entry("A", 2)]);
}

#[test]
fn test_move_ranked_course_to_free_slot() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2)]);
    let change: RankChange = store.set_rank(&course("A"), 3);

    assert_eq!(change, RankChange::Moved { from: 1, to: 3 });
    assert_eq!(store.entries(), &[entry("B", 2), entry("A", 3)]);
}

#[test]
fn test_unranked_course_evicts_occupant() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2)]);
    let change: RankChange = store.set_rank(&course("C"), 1);

    assert_eq!(
        change,
        RankChange::Evicted {
            rank: 1,
            evicted: course("A")
        }
    );
    assert_eq!(store.entries(), &[entry("C", 1), entry("B", 2)]);
    assert_eq!(store.rank_of(&course("A")), UNRANKED);
}

#[test]
fn test_ranked_course_swaps_with_occupant() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2), ("C", 3)]);
    let change: RankChange = store.set_rank(&course("C"), 1);

    assert_eq!(
        change,
        RankChange::Swapped {
            from: 3,
            to: 1,
            with: course("A")
        }
    );
    assert_eq!(
        store.entries(),
        &[entry("C", 1), entry("B", 2), entry("A", 3)]
    );
}

#[test]
fn test_rank_zero_removes_course() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2)]);
    let change: RankChange = store.set_rank(&course("A"), UNRANKED);

    assert_eq!(change, RankChange::Removed { previous_rank: 1 });
    assert_eq!(store.entries(), &[entry("B", 2)]);
}

#[test]
fn test_rank_zero_on_unranked_course_is_unchanged() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1)]);
    let change: RankChange = store.set_rank(&course("Z"), UNRANKED);

    assert_eq!(change, RankChange::Unchanged);
    assert_eq!(store.entries(), &[entry("A", 1)]);
}

#[test]
fn test_same_rank_again_is_unchanged() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2)]);
    let change: RankChange = store.set_rank(&course("B"), 2);

    assert_eq!(change, RankChange::Unchanged);
    assert_eq!(store.entries(), &[entry("A", 1), entry("B", 2)]);
}

#[test]
fn test_apply_rank_does_not_modify_input() {
    let entries: Vec<PreferenceEntry> = vec![entry("A", 1), entry("B", 2)];
    let next: Vec<PreferenceEntry> = apply_rank(&entries, &course("B"), 1);

    assert_eq!(entries, vec![entry("A", 1), entry("B", 2)]);
    assert_eq!(next, vec![entry("B", 1), entry("A", 2)]);
}

#[test]
fn test_swap_keeps_entry_count() {
    let entries: Vec<PreferenceEntry> = vec![entry("A", 1), entry("B", 2), entry("C", 3)];
    let allocation = allocate(&entries, &course("A"), 3);

    assert_eq!(allocation.entries.len(), entries.len());
    assert!(matches!(allocation.change, RankChange::Swapped { .. }));
}

#[test]
fn test_eviction_replaces_exactly_one_course() {
    let entries: Vec<PreferenceEntry> = vec![entry("A", 1), entry("B", 2)];
    let allocation = allocate(&entries, &course("C"), 2);

    let before: HashSet<CourseId> = entries.iter().map(|e| e.course_id.clone()).collect();
    let after: HashSet<CourseId> = allocation
        .entries
        .iter()
        .map(|e| e.course_id.clone())
        .collect();

    assert_eq!(allocation.entries.len(), entries.len());
    assert_eq!(
        before.difference(&after).cloned().collect::<Vec<_>>(),
        vec![course("B")]
    );
    assert_eq!(
        after.difference(&before).cloned().collect::<Vec<_>>(),
        vec![course("C")]
    );
}

#[test]
fn test_reorder_scenario_stays_valid() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2), ("C", 3)]);
    assert_eq!(validate_submission(store.entries(), 3), Ok(()));

    store.set_rank(&course("B"), 1);

    assert_eq!(store.rank_of(&course("A")), 2);
    assert_eq!(store.rank_of(&course("B")), 1);
    assert_eq!(store.rank_of(&course("C")), 3);
    assert_eq!(validate_submission(store.entries(), 3), Ok(()));
}

#[test]
fn test_clear_empties_store() {
    let mut store: RankAllocationStore = create_ranked_store(&[("A", 1), ("B", 2)]);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_from_entries_normalizes_prior_submission() {
    let store: RankAllocationStore = RankAllocationStore::from_entries(vec![
        entry("C", 3),
        entry("A", 1),
        entry("B", 0),
        entry("D", 1),
        entry("A", 2),
    ]);

    assert_eq!(store.entries(), &[entry("A", 1), entry("C", 3)]);
}

/// Runs every sequence of `depth` edits over three courses and ranks `0..=3`.
#[test]
fn test_every_edit_sequence_preserves_bijection() {
    let courses: [CourseId; 3] = [course("A"), course("B"), course("C")];
    let edits: Vec<(usize, u32)> = (0..courses.len())
        .flat_map(|c| (0..=3).map(move |r| (c, r)))
        .collect();
    let depth: u32 = 4;
    let total: usize = edits.len().pow(depth);

    for mut seed in 0..total {
        let mut store: RankAllocationStore = RankAllocationStore::new();
        for _ in 0..depth {
            let (course_index, rank) = edits[seed % edits.len()];
            seed /= edits.len();

            let target: &CourseId = &courses[course_index];
            let before: usize = store.len();
            let was_ranked: bool = store.rank_of(target) != UNRANKED;
            let change: RankChange = store.set_rank(target, rank);

            assert_bijective(store.entries());

            if rank == UNRANKED {
                assert_eq!(store.rank_of(target), UNRANKED);
            } else {
                assert_eq!(store.rank_of(target), rank);
            }

            match change {
                RankChange::Swapped { .. } | RankChange::Evicted { .. } => {
                    assert_eq!(store.len(), before);
                }
                RankChange::Inserted { .. } => {
                    assert!(!was_ranked);
                    assert_eq!(store.len(), before + 1);
                }
                RankChange::Removed { .. } => assert_eq!(store.len() + 1, before),
                RankChange::Moved { .. } | RankChange::Unchanged => {
                    assert_eq!(store.len(), before);
                }
            }
        }
    }
}
