// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::session::SessionMode;
use course_pref_domain::{DomainError, InstructorId, ServiceFault, SubmissionViolation};

/// Errors that can occur while driving a preference session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The instructor is not authorized to submit to the form.
    Ineligible {
        /// The instructor.
        instructor: InstructorId,
        /// The form.
        form_id: i64,
    },
    /// The service does not currently accept submissions for the form.
    SubmissionClosed {
        /// The form.
        form_id: i64,
    },
    /// The operation is not permitted in the session's current mode.
    InvalidMode {
        /// The attempted operation.
        action: &'static str,
        /// The mode the session was in.
        mode: SessionMode,
    },
    /// The preference list failed pre-submit validation.
    ValidationFailed(SubmissionViolation),
    /// The collaborator service failed.
    Service(ServiceFault),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Ineligible {
                instructor,
                form_id,
            } => {
                write!(
                    f,
                    "Instructor '{instructor}' is not eligible to submit \
                     to preference form {form_id}"
                )
            }
            Self::SubmissionClosed { form_id } => {
                write!(f, "Preference form {form_id} is not accepting submissions")
            }
            Self::InvalidMode { action, mode } => {
                write!(f, "Cannot {action} while {}", mode.as_str())
            }
            Self::ValidationFailed(violation) => write!(f, "Validation failed: {violation}"),
            Self::Service(fault) => write!(f, "Service error: {fault}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<SubmissionViolation> for CoreError {
    fn from(violation: SubmissionViolation) -> Self {
        Self::ValidationFailed(violation)
    }
}

impl From<ServiceFault> for CoreError {
    fn from(fault: ServiceFault) -> Self {
        Self::Service(fault)
    }
}
