// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rank allocation for an instructor's in-progress preference list.
//!
//! The store maps courses to rank slots `1..=max_preferences`. Every edit is
//! resolved by [`allocate`], which chooses between four outcomes:
//!
//! - the target slot is free: the course moves (or enters) there
//! - the slot is taken and the course was unranked: the occupant is evicted
//! - the slot is taken and the course was ranked: the two courses swap slots
//! - the new rank is `0`: the course is removed
//!
//! ## Invariants
//!
//! - No two entries share a rank
//! - No two entries share a course
//! - Entries are ordered by rank ascending
//!
//! Contiguity (`1..=max_preferences` without gaps) is not an invariant of the
//! store; it is checked when submitting.

use crate::types::{CourseId, PreferenceEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The rank value meaning "not ranked".
pub const UNRANKED: u32 = 0;

/// Describes which allocation case an edit resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "case", rename_all = "snake_case")]
pub enum RankChange {
    /// The edit left the entries as they were.
    Unchanged,
    /// The course was removed from the ranking.
    Removed {
        /// The rank the course held.
        previous_rank: u32,
    },
    /// An unranked course took a free slot.
    Inserted {
        /// The slot taken.
        rank: u32,
    },
    /// A ranked course moved to a free slot.
    Moved {
        /// The slot left.
        from: u32,
        /// The slot taken.
        to: u32,
    },
    /// An unranked course took a slot held by another course, which lost its rank.
    Evicted {
        /// The slot taken.
        rank: u32,
        /// The course that lost the slot.
        evicted: CourseId,
    },
    /// A ranked course took a slot held by another course, which took its old slot.
    Swapped {
        /// The slot left, now held by `with`.
        from: u32,
        /// The slot taken.
        to: u32,
        /// The course that traded slots.
        with: CourseId,
    },
}

/// The result of resolving one rank edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankAllocation {
    /// The entries after the edit, ordered by rank.
    pub entries: Vec<PreferenceEntry>,
    /// The case the edit resolved to.
    pub change: RankChange,
}

/// Returns the rank currently held by a course, or [`UNRANKED`].
#[must_use]
pub fn rank_of(entries: &[PreferenceEntry], course_id: &CourseId) -> u32 {
    entries
        .iter()
        .find(|e| &e.course_id == course_id)
        .map_or(UNRANKED, |e| e.rank)
}

/// Resolves a rank edit, returning the new entries and the case that applied.
///
/// The input entries are never modified.
#[must_use]
pub fn allocate(
    entries: &[PreferenceEntry],
    course_id: &CourseId,
    new_rank: u32,
) -> RankAllocation {
    let current_rank: u32 = rank_of(entries, course_id);

    if new_rank == UNRANKED {
        let change: RankChange = if current_rank == UNRANKED {
            RankChange::Unchanged
        } else {
            RankChange::Removed {
                previous_rank: current_rank,
            }
        };
        return finish(without(entries, &[course_id]), change);
    }

    let occupant: Option<CourseId> = entries
        .iter()
        .find(|e| e.rank == new_rank && &e.course_id != course_id)
        .map(|e| e.course_id.clone());

    match (occupant, current_rank) {
        (None, UNRANKED) => {
            let mut next: Vec<PreferenceEntry> = without(entries, &[course_id]);
            next.push(PreferenceEntry::new(course_id.clone(), new_rank));
            finish(next, RankChange::Inserted { rank: new_rank })
        }
        (None, current) if current == new_rank => finish(entries.to_vec(), RankChange::Unchanged),
        (None, current) => {
            let mut next: Vec<PreferenceEntry> = without(entries, &[course_id]);
            next.push(PreferenceEntry::new(course_id.clone(), new_rank));
            finish(
                next,
                RankChange::Moved {
                    from: current,
                    to: new_rank,
                },
            )
        }
        (Some(evicted), UNRANKED) => {
            let mut next: Vec<PreferenceEntry> = without(entries, &[course_id, &evicted]);
            next.push(PreferenceEntry::new(course_id.clone(), new_rank));
            finish(
                next,
                RankChange::Evicted {
                    rank: new_rank,
                    evicted,
                },
            )
        }
        (Some(with), current) => {
            let next: Vec<PreferenceEntry> = entries
                .iter()
                .map(|e| {
                    if &e.course_id == course_id {
                        PreferenceEntry::new(course_id.clone(), new_rank)
                    } else if e.course_id == with {
                        PreferenceEntry::new(with.clone(), current)
                    } else {
                        e.clone()
                    }
                })
                .collect();
            finish(
                next,
                RankChange::Swapped {
                    from: current,
                    to: new_rank,
                    with,
                },
            )
        }
    }
}

/// Applies a rank edit and returns the new entries.
///
/// `new_rank == 0` removes the course.
#[must_use]
pub fn apply_rank(
    entries: &[PreferenceEntry],
    course_id: &CourseId,
    new_rank: u32,
) -> Vec<PreferenceEntry> {
    allocate(entries, course_id, new_rank).entries
}

fn without(entries: &[PreferenceEntry], excluded: &[&CourseId]) -> Vec<PreferenceEntry> {
    entries
        .iter()
        .filter(|e| !excluded.contains(&&e.course_id))
        .cloned()
        .collect()
}

fn finish(mut entries: Vec<PreferenceEntry>, change: RankChange) -> RankAllocation {
    entries.sort_by_key(|e| e.rank);
    RankAllocation { entries, change }
}

/// The in-memory working set of an instructor's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankAllocationStore {
    entries: Vec<PreferenceEntry>,
}

impl RankAllocationStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a store from previously submitted entries.
    ///
    /// Unranked entries are dropped. When a course or a rank appears more
    /// than once, the entry with the lowest rank is kept.
    #[must_use]
    pub fn from_entries(entries: Vec<PreferenceEntry>) -> Self {
        let mut sorted: Vec<PreferenceEntry> = entries;
        sorted.sort_by_key(|e| e.rank);

        let mut courses: HashSet<CourseId> = HashSet::new();
        let mut ranks: HashSet<u32> = HashSet::new();
        let normalized: Vec<PreferenceEntry> = sorted
            .into_iter()
            .filter(|e| e.rank != UNRANKED)
            .filter(|e| {
                let fresh: bool = !courses.contains(&e.course_id) && !ranks.contains(&e.rank);
                if fresh {
                    courses.insert(e.course_id.clone());
                    ranks.insert(e.rank);
                }
                fresh
            })
            .collect();

        Self {
            entries: normalized,
        }
    }

    /// Assigns `new_rank` to a course, resolving any conflict.
    ///
    /// Returns the case the edit resolved to.
    pub fn set_rank(&mut self, course_id: &CourseId, new_rank: u32) -> RankChange {
        let allocation: RankAllocation = allocate(&self.entries, course_id, new_rank);
        self.entries = allocation.entries;
        allocation.change
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries ordered by rank.
    #[must_use]
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    /// Returns the rank held by a course, or [`UNRANKED`].
    #[must_use]
    pub fn rank_of(&self, course_id: &CourseId) -> u32 {
        rank_of(&self.entries, course_id)
    }

    /// Returns the number of ranked courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no course is ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the store, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<PreferenceEntry> {
        self.entries
    }
}
