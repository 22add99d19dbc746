// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::service::PreferenceService;
use crate::session::PreferenceSession;
use course_pref_domain::{
    FormQuery, FormStatus, InstructorId, PreferenceEntry, is_eligible, resolve_form_status,
};
use time::OffsetDateTime;

/// The result of searching for a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The form is active and a session was opened for the instructor.
    Opened(PreferenceSession),
    /// The form cannot be worked on; the status says why.
    Unavailable(FormStatus),
}

/// Resolves a form and opens a preference session for the instructor.
///
/// The form lookup gates everything else: only an `active` form is checked
/// for eligibility, and only an eligible instructor's prior submission is
/// fetched. A failed prior fetch yields an `error` status.
///
/// Nothing is retried; a new search must be issued after a failure.
///
/// # Arguments
///
/// * `service` - The collaborator service
/// * `query` - The `(year, semester, chair)` to look up
/// * `instructor` - The instructor opening the session
/// * `now` - The current time, used to label rejected forms
pub fn open_session<S: PreferenceService + ?Sized>(
    service: &S,
    query: &FormQuery,
    instructor: InstructorId,
    now: OffsetDateTime,
) -> SearchOutcome {
    let status: FormStatus = resolve_form_status(service.get_active_preference_form(query), now);

    let FormStatus::Active {
        form,
        submission_allowed,
    } = status
    else {
        return SearchOutcome::Unavailable(status);
    };

    let eligible: bool = is_eligible(&form, &instructor);

    let prior: Vec<PreferenceEntry> = if eligible {
        match service.get_submitted_preferences(&instructor, query) {
            Ok(entries) => entries,
            Err(fault) => return SearchOutcome::Unavailable(FormStatus::Error(fault)),
        }
    } else {
        Vec::new()
    };

    SearchOutcome::Opened(PreferenceSession::new(
        form,
        instructor,
        eligible,
        submission_allowed,
        prior,
    ))
}
