// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod eligibility;
mod error;
mod form_status;
mod rank_allocation;
mod submission;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use eligibility::is_eligible;
pub use form_status::{FormLookup, FormStatus, FormStatusKind, ServiceFault, resolve_form_status};
pub use rank_allocation::{
    RankAllocation, RankAllocationStore, RankChange, UNRANKED, allocate, apply_rank, rank_of,
};
pub use submission::{
    SubmissionProgress, SubmissionViolation, submission_progress, validate_submission,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Chair, CourseId, CourseOffering, FormQuery, FormRecord, InstructorId, InstructorScope,
    PreferenceEntry, PreferenceForm, Semester, SubmissionWindow, WindowPhase,
};
pub use validation::{
    validate_course_offerings, validate_form_query, validate_form_year, validate_instructor_ids,
    validate_max_preferences, validate_rank,
};
