// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use course_pref::{SessionMode, SubmitKind};
use course_pref_domain::{FormStatusKind, PreferenceEntry, SubmissionProgress, WindowPhase};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to look up a form and open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The academic year (e.g., 2024).
    pub year: u16,
    /// The semester label (e.g., "Regular 1").
    pub semester: String,
    /// The chair identifier.
    pub chair: String,
    /// The instructor opening the session.
    pub instructor_id: String,
}

/// API request to rank a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRankRequest {
    /// The course to rank.
    pub course_id: String,
    /// The new rank; 0 removes the course from the ranking.
    pub rank: u32,
}

/// One offered course with its current rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRankView {
    pub course_id: String,
    pub section: u32,
    pub number_of_sections: u32,
    pub lab_division: bool,
    /// The rank in the working set; 0 when unranked.
    pub rank: u32,
}

/// Serializable snapshot of a preference session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// The form identifier.
    pub form_id: i64,
    /// The academic year.
    pub year: u16,
    /// The semester display label.
    pub semester: String,
    /// The chair identifier.
    pub chair: String,
    /// The exact number of courses a submission must rank.
    pub max_preferences: u32,
    /// The window opening time.
    #[serde(with = "time::serde::rfc3339")]
    pub submission_start: OffsetDateTime,
    /// The window closing time.
    #[serde(with = "time::serde::rfc3339")]
    pub submission_end: OffsetDateTime,
    /// Where the current time falls relative to the window.
    pub window_phase: WindowPhase,
    /// The server-declared open/closed flag.
    pub submission_allowed: bool,
    /// Whether the instructor may submit to this form.
    pub eligible: bool,
    /// The session mode.
    pub mode: SessionMode,
    /// Every offered course in form order.
    pub courses: Vec<CourseRankView>,
    /// The working entries, ordered by rank.
    pub entries: Vec<PreferenceEntry>,
    /// The last accepted submission.
    pub accepted: Vec<PreferenceEntry>,
    /// The `selected/required` indicator.
    pub progress: SubmissionProgress,
    /// Whether the submit action is enabled.
    pub can_submit: bool,
    /// The first failing pre-submit check while editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    /// Explanation shown when the instructor cannot edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Whether the submission was created or replaced.
    pub kind: SubmitKind,
    /// A success message.
    pub message: String,
    /// The session after the submission.
    pub session: SessionView,
}

/// API response describing a form that could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatusResponse {
    /// The resolved status.
    pub status: FormStatusKind,
    /// The form identifier, when a form exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<i64>,
    /// The window opening time, when known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub submission_start: Option<OffsetDateTime>,
    /// The window closing time, when known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub submission_end: Option<OffsetDateTime>,
    /// A human-readable description.
    pub message: String,
}
