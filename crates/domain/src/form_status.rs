// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Preference form status resolution.
//!
//! A form lookup for `(year, semester, chair)` is classified into one of
//! `not_found | upcoming | active | closed | inactive | error`.
//!
//! ## Invariants
//!
//! - The collaborator's answer is authoritative: only a successful lookup is `active`
//! - The time window is consulted only to label a rejected form for display
//! - Resolution has no side effects and never retries

use crate::types::{FormRecord, PreferenceForm};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A transport or server fault raised by the collaborator service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceFault {
    /// The service could not be reached.
    Connectivity {
        /// Description of the failure.
        message: String,
    },
    /// The service answered with a server-side failure.
    Server {
        /// Status code reported by the service, when known.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ServiceFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connectivity { message } => write!(f, "Connectivity failure: {message}"),
            Self::Server {
                status: Some(status),
                message,
            } => write!(f, "Server failure ({status}): {message}"),
            Self::Server {
                status: None,
                message,
            } => write!(f, "Server failure: {message}"),
        }
    }
}

impl std::error::Error for ServiceFault {}

/// The raw answer of the collaborator to a form lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormLookup {
    /// A usable form was found.
    Found {
        /// The form.
        form: PreferenceForm,
        /// The server-declared open/closed flag.
        submission_allowed: bool,
    },
    /// No form matches the query.
    NotFound,
    /// A form exists but a business rule rejected the lookup.
    Rejected {
        /// The rejected form as stored.
        record: FormRecord,
        /// The rejection reason reported by the service.
        reason: String,
    },
    /// The lookup failed in transport or on the server.
    TransportError(ServiceFault),
}

/// The tag of a resolved form status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatusKind {
    NotFound,
    Upcoming,
    Active,
    Closed,
    Inactive,
    Error,
}

impl FormStatusKind {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Inactive => "inactive",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for FormStatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved availability of a preference form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// No form exists for the query.
    NotFound,
    /// The form's submission window has not opened yet.
    Upcoming(FormRecord),
    /// The form is usable.
    Active {
        /// The form.
        form: PreferenceForm,
        /// The server-declared open/closed flag.
        submission_allowed: bool,
    },
    /// The form's submission window has closed.
    Closed(FormRecord),
    /// The form was rejected for a reason other than its window.
    Inactive(FormRecord),
    /// The lookup failed.
    Error(ServiceFault),
}

impl FormStatus {
    /// Returns the status tag.
    #[must_use]
    pub const fn kind(&self) -> FormStatusKind {
        match self {
            Self::NotFound => FormStatusKind::NotFound,
            Self::Upcoming(_) => FormStatusKind::Upcoming,
            Self::Active { .. } => FormStatusKind::Active,
            Self::Closed(_) => FormStatusKind::Closed,
            Self::Inactive(_) => FormStatusKind::Inactive,
            Self::Error(_) => FormStatusKind::Error,
        }
    }

    /// Returns the form record to display for a non-active status, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&FormRecord> {
        match self {
            Self::Upcoming(record) | Self::Closed(record) | Self::Inactive(record) => Some(record),
            Self::NotFound | Self::Active { .. } | Self::Error(_) => None,
        }
    }

    /// Returns true if the form is active and the server accepts submissions.
    #[must_use]
    pub const fn accepts_submissions(&self) -> bool {
        matches!(
            self,
            Self::Active {
                submission_allowed: true,
                ..
            }
        )
    }
}

/// Resolves a form lookup into a status.
///
/// # Arguments
///
/// * `lookup` - The collaborator's answer to the form lookup
/// * `now` - The current time
///
/// # Rejected lookups
///
/// - `now < submission_start` -> `Upcoming`
/// - `now > submission_end` -> `Closed`
/// - otherwise, including a record without window bounds -> `Inactive`
#[must_use]
pub fn resolve_form_status(lookup: FormLookup, now: OffsetDateTime) -> FormStatus {
    match lookup {
        FormLookup::Found {
            form,
            submission_allowed,
        } => FormStatus::Active {
            form,
            submission_allowed,
        },
        FormLookup::NotFound => FormStatus::NotFound,
        FormLookup::Rejected { record, .. } => classify_rejected(record, now),
        FormLookup::TransportError(fault) => FormStatus::Error(fault),
    }
}

fn classify_rejected(record: FormRecord, now: OffsetDateTime) -> FormStatus {
    if record.submission_start.is_some_and(|start| now < start) {
        FormStatus::Upcoming(record)
    } else if record.submission_end.is_some_and(|end| now > end) {
        FormStatus::Closed(record)
    } else {
        FormStatus::Inactive(record)
    }
}
