// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON seed format for the in-memory backend.

use crate::error::PersistenceError;
use course_pref_domain::{
    Chair, CourseId, CourseOffering, FormQuery, InstructorId, InstructorScope, PreferenceEntry,
    PreferenceForm, Semester, SubmissionWindow,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::OffsetDateTime;

const fn default_true() -> bool {
    true
}

const fn default_one() -> u32 {
    1
}

/// One offered course as written in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFixture {
    pub course_id: String,
    #[serde(default = "default_one")]
    pub section: u32,
    #[serde(default = "default_one")]
    pub number_of_sections: u32,
    #[serde(default)]
    pub lab_division: bool,
}

/// One preference form as written in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFixture {
    pub form_id: i64,
    pub year: u16,
    pub semester: Semester,
    pub chair: String,
    pub max_preferences: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub submission_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub submission_end: OffsetDateTime,
    pub courses: Vec<CourseFixture>,
    /// Instructors allowed to submit; absent means every instructor.
    #[serde(default)]
    pub instructors: Option<Vec<String>>,
    /// Whether the chair has activated the form.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Whether the service accepts submissions while the form is open.
    #[serde(default = "default_true")]
    pub submission_allowed: bool,
}

impl FormFixture {
    /// Builds the validated domain form.
    ///
    /// # Errors
    ///
    /// Returns an error if the form violates a domain rule.
    pub fn to_form(&self) -> Result<PreferenceForm, PersistenceError> {
        let invalid = |source| PersistenceError::InvalidForm {
            form_id: self.form_id,
            source,
        };

        let window: SubmissionWindow =
            SubmissionWindow::new(self.submission_start, self.submission_end).map_err(invalid)?;
        let courses: Vec<CourseOffering> = self
            .courses
            .iter()
            .map(|c| CourseOffering {
                course_id: CourseId::new(&c.course_id),
                section: c.section,
                number_of_sections: c.number_of_sections,
                lab_division: c.lab_division,
            })
            .collect();
        let scope: InstructorScope = match &self.instructors {
            Some(ids) => {
                InstructorScope::Listed(ids.iter().map(|id| InstructorId::new(id)).collect())
            }
            None => InstructorScope::All,
        };

        PreferenceForm::new(
            self.form_id,
            FormQuery::new(self.year, self.semester, Chair::new(&self.chair)),
            self.max_preferences,
            window,
            courses,
            scope,
        )
        .map_err(invalid)
    }
}

/// A previously accepted submission as written in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFixture {
    pub form_id: i64,
    pub instructor_id: String,
    pub entries: Vec<PreferenceEntry>,
}

/// Top-level fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendFixture {
    #[serde(default)]
    pub forms: Vec<FormFixture>,
    #[serde(default)]
    pub submissions: Vec<SubmissionFixture>,
}

impl BackendFixture {
    /// Parses a fixture from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let read_failed = |source| PersistenceError::FixtureRead {
            path: path.display().to_string(),
            source,
        };
        let json: String = std::fs::read_to_string(path).map_err(read_failed)?;
        Self::from_json(&json)
    }
}
