// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use course_pref_domain::{DomainError, SubmissionViolation};
use thiserror::Error;

/// Errors that can occur while seeding the in-memory backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The fixture file could not be read.
    #[error("Failed to read fixture {path}: {source}")]
    FixtureRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The fixture is not valid JSON for the expected shape.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    /// A form in the fixture violates a domain rule.
    #[error("Invalid form {form_id} in fixture: {source}")]
    InvalidForm {
        form_id: i64,
        #[source]
        source: DomainError,
    },
    /// Two forms in the fixture share an identifier.
    #[error("Duplicate form id {0} in fixture")]
    DuplicateForm(i64),
    /// A seeded submission references a form that does not exist.
    #[error("Submission for instructor '{instructor_id}' references unknown form {form_id}")]
    UnknownForm { form_id: i64, instructor_id: String },
    /// A seeded submission fails the submission rules of its form.
    #[error("Invalid submission for instructor '{instructor_id}' on form {form_id}: {source}")]
    InvalidSubmission {
        form_id: i64,
        instructor_id: String,
        #[source]
        source: SubmissionViolation,
    },
    /// A seeded submission ranks a course its form does not offer.
    #[error("Course '{course_id}' seeded for '{instructor_id}' is not offered by form {form_id}")]
    CourseNotOffered {
        form_id: i64,
        instructor_id: String,
        course_id: String,
    },
}
