// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler drives one engine operation and translates its errors.

use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_form_status};
use crate::request_response::{
    CourseRankView, FormStatusResponse, SearchRequest, SessionView, SetRankRequest, SubmitResponse,
};
use course_pref::{PreferenceService, PreferenceSession, SearchOutcome, SubmitKind, open_session};
use course_pref_domain::{
    Chair, CourseId, FormQuery, FormStatus, FormStatusKind, InstructorId, PreferenceForm,
    RankChange, Semester, validate_form_query, validate_instructor_ids,
};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Parses and validates a search request into a lookup key and instructor.
///
/// # Errors
///
/// Returns an error if the semester is unknown, the year is out of range,
/// or the chair or instructor identifier is empty.
pub fn parse_search_request(
    request: &SearchRequest,
) -> Result<(FormQuery, InstructorId), ApiError> {
    let semester: Semester = Semester::from_str(&request.semester).map_err(translate_domain_error)?;
    let query: FormQuery = FormQuery::new(request.year, semester, Chair::new(&request.chair));
    validate_form_query(&query).map_err(translate_domain_error)?;

    let instructor: InstructorId = InstructorId::new(&request.instructor_id);
    validate_instructor_ids(std::slice::from_ref(&instructor)).map_err(translate_domain_error)?;

    Ok((query, instructor))
}

/// Looks up a form and opens a preference session.
///
/// # Arguments
///
/// * `service` - The collaborator service
/// * `request` - The search request
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The request is invalid
/// - No form exists for the query
/// - The form is outside its window or inactive
/// - The service failed
pub fn search<S: PreferenceService + ?Sized>(
    service: &S,
    request: &SearchRequest,
    now: OffsetDateTime,
) -> Result<PreferenceSession, ApiError> {
    let (query, instructor) = parse_search_request(request)?;

    match open_session(service, &query, instructor, now) {
        SearchOutcome::Opened(session) => {
            info!(
                form_id = session.form().form_id(),
                instructor = %session.instructor(),
                eligible = session.is_eligible(),
                submission_allowed = session.submission_allowed(),
                mode = session.mode().as_str(),
                "Opened preference session"
            );
            Ok(session)
        }
        SearchOutcome::Unavailable(status) => {
            match &status {
                FormStatus::Error(fault) => {
                    warn!(query = %query, error = %fault, "Form lookup failed");
                }
                _ => info!(query = %query, status = %status.kind(), "Form not available"),
            }
            Err(translate_form_status(&status, &query).unwrap_or_else(|| {
                ApiError::InvalidState {
                    message: String::from("The preference form could not be opened."),
                }
            }))
        }
    }
}

/// Ranks a course in the session's working set.
///
/// # Errors
///
/// Returns an error if the course id is empty or the session rejects the edit.
pub fn set_rank(
    session: &mut PreferenceSession,
    request: &SetRankRequest,
) -> Result<RankChange, ApiError> {
    let course_id: CourseId = CourseId::new(&request.course_id);
    if course_id.value().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("course_id"),
            message: String::from("Course id cannot be empty"),
        });
    }

    let change: RankChange = session
        .set_rank(&course_id, request.rank)
        .map_err(translate_core_error)?;

    debug!(
        form_id = session.form().form_id(),
        course_id = %course_id,
        rank = request.rank,
        change = ?change,
        progress = %session.progress(),
        "Applied rank change"
    );

    Ok(change)
}

/// Enters update mode for a previously accepted submission.
///
/// # Errors
///
/// Returns an error if the session is not showing an accepted submission
/// or the instructor may not submit.
pub fn enter_update(session: &mut PreferenceSession) -> Result<(), ApiError> {
    session.enter_update().map_err(translate_core_error)?;
    info!(
        form_id = session.form().form_id(),
        instructor = %session.instructor(),
        "Entered update mode"
    );
    Ok(())
}

/// Leaves update mode and restores the accepted submission.
///
/// # Errors
///
/// Returns an error if the session is not in update mode.
pub fn cancel_update(session: &mut PreferenceSession) -> Result<(), ApiError> {
    session.cancel().map_err(translate_core_error)?;
    info!(
        form_id = session.form().form_id(),
        instructor = %session.instructor(),
        "Cancelled update"
    );
    Ok(())
}

/// Validates and submits the session's working set.
///
/// # Errors
///
/// Returns an error if validation fails, the session cannot submit, or the
/// service call fails. The working set is kept on failure.
pub fn submit<S: PreferenceService + ?Sized>(
    session: &mut PreferenceSession,
    service: &mut S,
    now: OffsetDateTime,
) -> Result<SubmitResponse, ApiError> {
    let kind: SubmitKind = session.confirm_submit(service).map_err(|err| {
        warn!(
            form_id = session.form().form_id(),
            instructor = %session.instructor(),
            error = %err,
            "Submission rejected"
        );
        translate_core_error(err)
    })?;

    info!(
        form_id = session.form().form_id(),
        instructor = %session.instructor(),
        kind = ?kind,
        "Preferences submitted"
    );

    let message: String = match kind {
        SubmitKind::Created => String::from("Your preferences were submitted."),
        SubmitKind::Replaced => String::from("Your preferences were updated."),
    };

    Ok(SubmitResponse {
        kind,
        message,
        session: session_view(session, now),
    })
}

/// Builds the serializable view of a session.
#[must_use]
pub fn session_view(session: &PreferenceSession, now: OffsetDateTime) -> SessionView {
    let form: &PreferenceForm = session.form();
    let editing: bool = session.mode().is_editing();

    let notice: Option<String> = if !session.is_eligible() {
        Some(String::from(
            "This preference form is limited to instructors selected by the chair.",
        ))
    } else if !session.submission_allowed() {
        Some(String::from(
            "This preference form is not accepting submissions.",
        ))
    } else {
        None
    };

    let validation_message: Option<String> = if editing && notice.is_none() {
        session.submission_check().err().map(|v| v.to_string())
    } else {
        None
    };

    SessionView {
        form_id: form.form_id(),
        year: form.query().year,
        semester: form.query().semester.as_str().to_string(),
        chair: form.query().chair.id().to_string(),
        max_preferences: form.max_preferences(),
        submission_start: form.window().start(),
        submission_end: form.window().end(),
        window_phase: form.window().phase(now),
        submission_allowed: session.submission_allowed(),
        eligible: session.is_eligible(),
        mode: session.mode(),
        courses: form
            .courses()
            .iter()
            .map(|offering| CourseRankView {
                course_id: offering.course_id.value().to_string(),
                section: offering.section,
                number_of_sections: offering.number_of_sections,
                lab_division: offering.lab_division,
                rank: session.rank_of(&offering.course_id),
            })
            .collect(),
        entries: session.entries().to_vec(),
        accepted: session.accepted().to_vec(),
        progress: session.progress(),
        can_submit: session.can_submit(),
        validation_message,
        notice,
    }
}

/// Describes an error raised by [`search`] as a form status, when it is one.
#[must_use]
pub fn form_status_response(err: &ApiError) -> Option<FormStatusResponse> {
    match err {
        ApiError::NotFound { message } => Some(FormStatusResponse {
            status: FormStatusKind::NotFound,
            form_id: None,
            submission_start: None,
            submission_end: None,
            message: message.clone(),
        }),
        ApiError::WindowRejected {
            status,
            form_id,
            submission_start,
            submission_end,
            message,
        } => Some(FormStatusResponse {
            status: *status,
            form_id: Some(*form_id),
            submission_start: *submission_start,
            submission_end: *submission_end,
            message: message.clone(),
        }),
        ApiError::ServiceUnavailable { message, .. } => Some(FormStatusResponse {
            status: FormStatusKind::Error,
            form_id: None,
            submission_start: None,
            submission_end: None,
            message: message.clone(),
        }),
        _ => None,
    }
}
