// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pre-submit validation of a preference list.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. at least one entry
//! 2. exactly `max_preferences` entries
//! 3. ranks are exactly `1..=max_preferences`
//! 4. no course appears twice

use crate::types::{CourseId, PreferenceEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Reason a preference list cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionViolation {
    #[error("Please select at least one preference")]
    NoPreferences,
    #[error("You must select exactly {required} courses ({selected} selected)")]
    WrongCount { selected: usize, required: u32 },
    #[error("Ranking must be sequential from 1 to {required} without gaps")]
    NonSequential { required: u32 },
    #[error("Each course can only be selected once ('{course_id}' is selected more than once)")]
    DuplicateCourse { course_id: CourseId },
}

impl SubmissionViolation {
    /// Returns a stable identifier of the violated rule.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::NoPreferences => "at_least_one_preference",
            Self::WrongCount { .. } => "exact_preference_count",
            Self::NonSequential { .. } => "sequential_ranking",
            Self::DuplicateCourse { .. } => "unique_courses",
        }
    }
}

/// Live `selected/required` indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionProgress {
    pub selected: usize,
    pub required: u32,
}

impl std::fmt::Display for SubmissionProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.selected, self.required)
    }
}

/// Computes the progress indicator for the current entries.
#[must_use]
pub const fn submission_progress(
    entries: &[PreferenceEntry],
    max_preferences: u32,
) -> SubmissionProgress {
    SubmissionProgress {
        selected: entries.len(),
        required: max_preferences,
    }
}

/// Validates that a preference list may be submitted.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_submission(
    entries: &[PreferenceEntry],
    max_preferences: u32,
) -> Result<(), SubmissionViolation> {
    if entries.is_empty() {
        return Err(SubmissionViolation::NoPreferences);
    }

    let count_matches: bool =
        usize::try_from(max_preferences).is_ok_and(|max| max == entries.len());
    if !count_matches {
        return Err(SubmissionViolation::WrongCount {
            selected: entries.len(),
            required: max_preferences,
        });
    }

    let mut ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
    ranks.sort_unstable();
    if !ranks.iter().copied().eq(1..=max_preferences) {
        return Err(SubmissionViolation::NonSequential {
            required: max_preferences,
        });
    }

    let mut seen: HashSet<&CourseId> = HashSet::new();
    if let Some(repeated) = entries.iter().find(|&e| !seen.insert(&e.course_id)) {
        return Err(SubmissionViolation::DuplicateCourse {
            course_id: repeated.course_id.clone(),
        });
    }

    Ok(())
}
