// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The year of a preference form is out of range.
    InvalidYear(String),
    /// The semester label is not recognised.
    InvalidSemester(String),
    /// Chair identifier is empty or invalid.
    InvalidChair(String),
    /// Course identifier is empty or invalid.
    InvalidCourseId(String),
    /// Instructor identifier is empty or invalid.
    InvalidInstructorId(String),
    /// The submission window does not open before it closes.
    InvalidSubmissionWindow {
        /// The declared opening time.
        start: OffsetDateTime,
        /// The declared closing time.
        end: OffsetDateTime,
    },
    /// The required number of ranked slots cannot be satisfied.
    InvalidMaxPreferences {
        /// The declared number of required preferences.
        max_preferences: u32,
        /// The number of courses offered by the form.
        offered: usize,
    },
    /// The same course appears twice in a form's offering list.
    DuplicateCourseOffering {
        /// The repeated course identifier.
        course_id: String,
    },
    /// A number of sections was declared as zero.
    InvalidSectionCount {
        /// The course the offering refers to.
        course_id: String,
    },
    /// The course is not part of the preference form.
    CourseNotOffered {
        /// The form identifier.
        form_id: i64,
        /// The unknown course identifier.
        course_id: String,
    },
    /// A rank lies outside the form's `0..=max_preferences` range.
    RankOutOfRange {
        /// The requested rank.
        rank: u32,
        /// The highest valid rank.
        max: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYear(msg) => write!(f, "Invalid year: {msg}"),
            Self::InvalidSemester(value) => write!(f, "Invalid semester: '{value}'"),
            Self::InvalidChair(msg) => write!(f, "Invalid chair: {msg}"),
            Self::InvalidCourseId(msg) => write!(f, "Invalid course id: {msg}"),
            Self::InvalidInstructorId(msg) => write!(f, "Invalid instructor id: {msg}"),
            Self::InvalidSubmissionWindow { start, end } => {
                write!(
                    f,
                    "Submission window must open before it closes, \
                     but starts at {start} and ends at {end}"
                )
            }
            Self::InvalidMaxPreferences {
                max_preferences,
                offered,
            } => {
                write!(
                    f,
                    "Invalid number of required preferences: {max_preferences}. \
                     Must be between 1 and {offered}"
                )
            }
            Self::DuplicateCourseOffering { course_id } => {
                write!(f, "Course '{course_id}' is offered more than once")
            }
            Self::InvalidSectionCount { course_id } => {
                write!(f, "Course '{course_id}' must have at least one section")
            }
            Self::CourseNotOffered { form_id, course_id } => {
                write!(
                    f,
                    "Course '{course_id}' is not offered by preference form {form_id}"
                )
            }
            Self::RankOutOfRange { rank, max } => {
                write!(f, "Invalid rank: {rank}. Must be between 0 and {max}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
