// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every variant carries a message that can be shown to the instructor as-is.
//! None of them end the session: the caller can always search again or retry.

use course_pref::CoreError;
use course_pref_domain::{DomainError, FormQuery, FormStatus, FormStatusKind, ServiceFault};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No preference form exists for the query.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The form exists but is outside its submission window or inactive.
    WindowRejected {
        /// `upcoming`, `closed` or `inactive`.
        status: FormStatusKind,
        /// The form.
        form_id: i64,
        /// The window opening time, when known.
        submission_start: Option<OffsetDateTime>,
        /// The window closing time, when known.
        submission_end: Option<OffsetDateTime>,
        /// A human-readable description including the window dates.
        message: String,
    },
    /// The form is active but the service does not accept submissions.
    SubmissionClosed {
        /// The form.
        form_id: i64,
        /// A human-readable description.
        message: String,
    },
    /// The instructor is not authorized for the form.
    Ineligible {
        /// A human-readable description.
        message: String,
    },
    /// The preference list failed a pre-submit check.
    ValidationFailed {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The collaborator service could not be reached or failed.
    ServiceUnavailable {
        /// True when the service could not be reached at all.
        connectivity: bool,
        /// A human-readable retry message.
        message: String,
    },
    /// The operation is not permitted in the session's current state.
    InvalidState {
        /// A human-readable description.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { message }
            | Self::WindowRejected { message, .. }
            | Self::SubmissionClosed { message, .. }
            | Self::Ineligible { message }
            | Self::ValidationFailed { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::InvalidState { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Formats a timestamp for display, as RFC 3339 where possible.
#[must_use]
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidYear(msg) => ApiError::InvalidInput {
            field: String::from("year"),
            message: msg,
        },
        DomainError::InvalidSemester(value) => ApiError::InvalidInput {
            field: String::from("semester"),
            message: format!("Unknown semester '{value}'"),
        },
        DomainError::InvalidChair(msg) => ApiError::InvalidInput {
            field: String::from("chair"),
            message: msg,
        },
        DomainError::InvalidCourseId(msg) => ApiError::InvalidInput {
            field: String::from("course_id"),
            message: msg,
        },
        DomainError::InvalidInstructorId(msg) => ApiError::InvalidInput {
            field: String::from("instructor_id"),
            message: msg,
        },
        DomainError::RankOutOfRange { rank, max } => ApiError::InvalidInput {
            field: String::from("rank"),
            message: format!("Rank {rank} is not between 0 and {max}"),
        },
        DomainError::CourseNotOffered { form_id, course_id } => ApiError::InvalidInput {
            field: String::from("course_id"),
            message: format!("Course '{course_id}' is not offered by preference form {form_id}"),
        },
        err @ DomainError::InvalidSubmissionWindow { .. } => ApiError::DomainRuleViolation {
            rule: String::from("window_start_before_end"),
            message: err.to_string(),
        },
        err @ DomainError::InvalidMaxPreferences { .. } => ApiError::DomainRuleViolation {
            rule: String::from("max_preferences_within_offer"),
            message: err.to_string(),
        },
        err @ DomainError::DuplicateCourseOffering { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_course_offerings"),
            message: err.to_string(),
        },
        err @ DomainError::InvalidSectionCount { .. } => ApiError::DomainRuleViolation {
            rule: String::from("positive_section_count"),
            message: err.to_string(),
        },
    }
}

/// Translates a collaborator fault into a retry message.
#[must_use]
pub fn translate_service_fault(fault: &ServiceFault) -> ApiError {
    match fault {
        ServiceFault::Connectivity { .. } => ApiError::ServiceUnavailable {
            connectivity: true,
            message: String::from(
                "Could not reach the preference service. Check your connection and try again.",
            ),
        },
        ServiceFault::Server { message, .. } => ApiError::ServiceUnavailable {
            connectivity: false,
            message: format!(
                "The preference service could not process the request ({message}). \
                 Please try again later."
            ),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Ineligible { .. } => ApiError::Ineligible {
            message: String::from(
                "This preference form is limited to instructors selected by the chair. \
                 Contact your chair if you believe you should be included.",
            ),
        },
        CoreError::SubmissionClosed { form_id } => ApiError::SubmissionClosed {
            form_id,
            message: String::from("This preference form is not accepting submissions."),
        },
        err @ CoreError::InvalidMode { .. } => ApiError::InvalidState {
            message: err.to_string(),
        },
        CoreError::ValidationFailed(violation) => ApiError::ValidationFailed {
            rule: violation.rule().to_string(),
            message: violation.to_string(),
        },
        CoreError::Service(fault) => translate_service_fault(&fault),
    }
}

/// Translates a form status that does not allow opening a session.
///
/// `Active` is not an error and yields `None`.
#[must_use]
pub fn translate_form_status(status: &FormStatus, query: &FormQuery) -> Option<ApiError> {
    match status {
        FormStatus::Active { .. } => None,
        FormStatus::NotFound => Some(ApiError::NotFound {
            message: format!(
                "No preference form was found for {query}. \
                 Try a different year or semester, or contact your chair."
            ),
        }),
        FormStatus::Upcoming(record)
        | FormStatus::Closed(record)
        | FormStatus::Inactive(record) => {
            let kind: FormStatusKind = status.kind();
            let message: String = match (kind, record.submission_start, record.submission_end) {
                (FormStatusKind::Upcoming, Some(start), _) => format!(
                    "The submission window for this form has not opened yet. It opens on {}.",
                    format_timestamp(start)
                ),
                (FormStatusKind::Closed, _, Some(end)) => format!(
                    "The submission window for this form closed on {}.",
                    format_timestamp(end)
                ),
                _ => String::from("This preference form is not currently active."),
            };
            Some(ApiError::WindowRejected {
                status: status.kind(),
                form_id: record.form_id,
                submission_start: record.submission_start,
                submission_end: record.submission_end,
                message,
            })
        }
        FormStatus::Error(fault) => Some(translate_service_fault(fault)),
    }
}
