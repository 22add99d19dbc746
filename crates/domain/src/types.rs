// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Academic term a preference form is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    /// First regular semester.
    Regular1,
    /// Second regular semester.
    Regular2,
    /// Summer term.
    Summer,
    /// First extension term.
    Extension1,
    /// Second extension term.
    Extension2,
}

impl Semester {
    /// Returns the display label of the semester.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular1 => "Regular 1",
            Self::Regular2 => "Regular 2",
            Self::Summer => "Summer",
            Self::Extension1 => "Extension 1",
            Self::Extension2 => "Extension 2",
        }
    }
}

impl FromStr for Semester {
    type Err = DomainError;

    /// Accepts both the display label ("Regular 1") and the wire name ("regular1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Regular 1" | "regular1" => Ok(Self::Regular1),
            "Regular 2" | "regular2" => Ok(Self::Regular2),
            "Summer" | "summer" => Ok(Self::Summer),
            "Extension 1" | "extension1" => Ok(Self::Extension1),
            "Extension 2" | "extension2" => Ok(Self::Extension2),
            other => Err(DomainError::InvalidSemester(other.to_string())),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier of a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Creates a new `CourseId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an instructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructorId(String);

impl InstructorId {
    /// Creates a new `InstructorId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstructorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the chair (department) owning a preference form.
///
/// Chair identifiers are normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chair(String);

impl Chair {
    /// Creates a new `Chair`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }

    /// Returns the chair identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Chair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `(year, semester, chair)` triple a preference form is looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormQuery {
    pub year: u16,
    pub semester: Semester,
    pub chair: Chair,
}

impl FormQuery {
    /// Creates a new `FormQuery`.
    #[must_use]
    pub const fn new(year: u16, semester: Semester, chair: Chair) -> Self {
        Self {
            year,
            semester,
            chair,
        }
    }
}

impl std::fmt::Display for FormQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} / {}", self.year, self.semester, self.chair)
    }
}

/// A course offered by a preference form, with its per-form attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub course_id: CourseId,
    pub section: u32,
    pub number_of_sections: u32,
    pub lab_division: bool,
}

impl CourseOffering {
    /// Creates a single-section offering without a lab division.
    #[must_use]
    pub const fn new(course_id: CourseId) -> Self {
        Self {
            course_id,
            section: 1,
            number_of_sections: 1,
            lab_division: false,
        }
    }
}

/// Where `now` falls relative to a submission window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPhase {
    /// The window has not opened yet.
    Upcoming,
    /// The window is open (both bounds inclusive).
    Open,
    /// The window has closed.
    Closed,
}

/// The period during which instructors may submit preferences.
///
/// ## Invariants
///
/// - `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl SubmissionWindow {
    /// Creates a new `SubmissionWindow`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSubmissionWindow` if `start` is not strictly before `end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidSubmissionWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the opening time.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the closing time.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Classifies `now` against the window.
    #[must_use]
    pub fn phase(&self, now: OffsetDateTime) -> WindowPhase {
        if now < self.start {
            WindowPhase::Upcoming
        } else if now > self.end {
            WindowPhase::Closed
        } else {
            WindowPhase::Open
        }
    }
}

/// Which instructors may submit to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructorScope {
    /// Every instructor may submit.
    All,
    /// Only the listed instructors may submit.
    Listed(Vec<InstructorId>),
}

impl InstructorScope {
    /// Returns true if the instructor falls within this scope.
    #[must_use]
    pub fn includes(&self, instructor: &InstructorId) -> bool {
        match self {
            Self::All => true,
            Self::Listed(instructors) => instructors.contains(instructor),
        }
    }
}

/// A chair-defined campaign in which instructors rank course offerings.
///
/// Forms are read-only from the instructor's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceForm {
    form_id: i64,
    query: FormQuery,
    max_preferences: u32,
    window: SubmissionWindow,
    courses: Vec<CourseOffering>,
    scope: InstructorScope,
}

impl PreferenceForm {
    /// Creates a new `PreferenceForm`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The year is out of range or the chair is blank
    /// - A course identifier is blank, repeated, or declares zero sections
    /// - `max_preferences` is zero or exceeds the number of offered courses
    /// - A listed instructor identifier is blank
    pub fn new(
        form_id: i64,
        query: FormQuery,
        max_preferences: u32,
        window: SubmissionWindow,
        courses: Vec<CourseOffering>,
        scope: InstructorScope,
    ) -> Result<Self, DomainError> {
        crate::validation::validate_form_query(&query)?;
        crate::validation::validate_course_offerings(&courses)?;
        crate::validation::validate_max_preferences(max_preferences, courses.len())?;
        if let InstructorScope::Listed(instructors) = &scope {
            crate::validation::validate_instructor_ids(instructors)?;
        }

        Ok(Self {
            form_id,
            query,
            max_preferences,
            window,
            courses,
            scope,
        })
    }

    #[must_use]
    pub const fn form_id(&self) -> i64 {
        self.form_id
    }

    #[must_use]
    pub const fn query(&self) -> &FormQuery {
        &self.query
    }

    /// Returns the exact number of ranked courses a submission must contain.
    #[must_use]
    pub const fn max_preferences(&self) -> u32 {
        self.max_preferences
    }

    #[must_use]
    pub const fn window(&self) -> SubmissionWindow {
        self.window
    }

    /// Returns the offered courses in form order.
    #[must_use]
    pub fn courses(&self) -> &[CourseOffering] {
        &self.courses
    }

    #[must_use]
    pub const fn scope(&self) -> &InstructorScope {
        &self.scope
    }

    /// Returns true if the course is offered by this form.
    #[must_use]
    pub fn offers(&self, course_id: &CourseId) -> bool {
        self.courses.iter().any(|c| &c.course_id == course_id)
    }
}

/// The raw form record returned alongside a rejected lookup.
///
/// The window bounds are optional because a rejected record is displayed
/// as-is and is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub form_id: i64,
    pub query: FormQuery,
    #[serde(with = "time::serde::rfc3339::option")]
    pub submission_start: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub submission_end: Option<OffsetDateTime>,
}

impl From<&PreferenceForm> for FormRecord {
    fn from(form: &PreferenceForm) -> Self {
        Self {
            form_id: form.form_id,
            query: form.query.clone(),
            submission_start: Some(form.window.start()),
            submission_end: Some(form.window.end()),
        }
    }
}

/// One ranked course in an instructor's preference list.
///
/// Rank 1 is the most preferred course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub course_id: CourseId,
    pub rank: u32,
}

impl PreferenceEntry {
    /// Creates a new `PreferenceEntry`.
    #[must_use]
    pub const fn new(course_id: CourseId, rank: u32) -> Self {
        Self { course_id, rank }
    }
}
