// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for ranking and submitting in a fresh session.

use crate::{CoreError, PreferenceSession, SessionMode, SubmitKind};
use course_pref_domain::{
    DomainError, FormLookup, InstructorId, InstructorScope, RankChange, SubmissionViolation,
};

use super::helpers::{
    MockService, connectivity_fault, course, create_creating_session, create_test_form,
    create_test_instructor, entry,
};

fn create_service() -> MockService {
    MockService::new(FormLookup::NotFound)
}

#[test]
fn test_set_rank_updates_progress() {
    let mut session: PreferenceSession = create_creating_session(3);

    session.set_rank(&course("A"), 1).unwrap();
    session.set_rank(&course("B"), 2).unwrap();

    let progress = session.progress();
    assert_eq!(progress.selected, 2);
    assert_eq!(progress.required, 3);
    assert!(!session.can_submit());
}

#[test]
fn test_reorder_scenario_remains_submittable() {
    let mut session: PreferenceSession = create_creating_session(3);
    session.set_rank(&course("A"), 1).unwrap();
    session.set_rank(&course("B"), 2).unwrap();
    session.set_rank(&course("C"), 3).unwrap();
    assert!(session.can_submit());

    let change: RankChange = session.set_rank(&course("B"), 1).unwrap();

    assert_eq!(
        change,
        RankChange::Swapped {
            from: 2,
            to: 1,
            with: course("A")
        }
    );
    assert_eq!(
        session.entries(),
        &[entry("B", 1), entry("A", 2), entry("C", 3)]
    );
    assert!(session.can_submit());
}

#[test]
fn test_incomplete_ranking_reports_required_count() {
    let mut session: PreferenceSession = create_creating_session(2);
    session.set_rank(&course("A"), 1).unwrap();

    let violation: SubmissionViolation = session.submission_check().unwrap_err();
    assert!(
        violation
            .to_string()
            .contains("must select exactly 2 courses")
    );
}

#[test]
fn test_set_rank_rejects_rank_above_maximum() {
    let mut session: PreferenceSession = create_creating_session(2);

    let result = session.set_rank(&course("A"), 3);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::RankOutOfRange {
            rank: 3,
            max: 2
        }))
    );
    assert!(session.entries().is_empty());
}

#[test]
fn test_set_rank_rejects_course_not_offered() {
    let mut session: PreferenceSession = create_creating_session(2);

    let result = session.set_rank(&course("Z"), 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CourseNotOffered { .. }
        ))
    ));
}

#[test]
fn test_ineligible_instructor_cannot_rank() {
    let mut session: PreferenceSession = PreferenceSession::new(
        create_test_form(2, InstructorScope::Listed(vec![InstructorId::new("i-999")])),
        create_test_instructor(),
        false,
        true,
        Vec::new(),
    );

    let result = session.set_rank(&course("A"), 1);

    assert!(matches!(result, Err(CoreError::Ineligible { .. })));
}

#[test]
fn test_closed_form_cannot_rank_or_submit() {
    let mut session: PreferenceSession = PreferenceSession::new(
        create_test_form(1, InstructorScope::All),
        create_test_instructor(),
        true,
        false,
        Vec::new(),
    );
    let mut service: MockService = create_service();

    assert_eq!(
        session.set_rank(&course("A"), 1),
        Err(CoreError::SubmissionClosed { form_id: 42 })
    );
    assert_eq!(
        session.confirm_submit(&mut service),
        Err(CoreError::SubmissionClosed { form_id: 42 })
    );
    assert_eq!(service.write_count(), 0);
}

#[test]
fn test_submit_without_prior_creates() {
    let mut session: PreferenceSession = create_creating_session(2);
    let mut service: MockService = create_service();
    session.set_rank(&course("B"), 1).unwrap();
    session.set_rank(&course("D"), 2).unwrap();

    let kind: SubmitKind = session.confirm_submit(&mut service).unwrap();

    assert_eq!(kind, SubmitKind::Created);
    assert_eq!(service.created.len(), 1);
    assert_eq!(service.created[0].form_id, 42);
    assert_eq!(service.created[0].instructor_id, create_test_instructor());
    assert_eq!(
        service.created[0].entries,
        vec![entry("B", 1), entry("D", 2)]
    );
    assert_eq!(session.mode(), SessionMode::Viewing);
    assert_eq!(session.accepted(), &[entry("B", 1), entry("D", 2)]);
}

#[test]
fn test_invalid_submission_makes_no_call() {
    let mut session: PreferenceSession = create_creating_session(2);
    let mut service: MockService = create_service();
    session.set_rank(&course("A"), 2).unwrap();

    let result = session.confirm_submit(&mut service);

    assert!(matches!(
        result,
        Err(CoreError::ValidationFailed(
            SubmissionViolation::WrongCount { .. }
        ))
    ));
    assert_eq!(service.write_count(), 0);
    assert_eq!(session.mode(), SessionMode::Creating);
}

#[test]
fn test_gapped_ranking_is_not_submitted() {
    let mut session: PreferenceSession = create_creating_session(3);
    let mut service: MockService = create_service();
    session.set_rank(&course("A"), 1).unwrap();
    session.set_rank(&course("B"), 2).unwrap();
    session.set_rank(&course("C"), 2).unwrap();

    assert_eq!(session.entries(), &[entry("A", 1), entry("C", 2)]);
    assert!(session.confirm_submit(&mut service).is_err());
    assert_eq!(service.write_count(), 0);
}

#[test]
fn test_failed_submit_keeps_selections() {
    let mut session: PreferenceSession = create_creating_session(1);
    let mut service: MockService = create_service();
    service.write_fault = Some(connectivity_fault());
    session.set_rank(&course("C"), 1).unwrap();

    let result = session.confirm_submit(&mut service);

    assert_eq!(result, Err(CoreError::Service(connectivity_fault())));
    assert_eq!(session.mode(), SessionMode::Creating);
    assert_eq!(session.entries(), &[entry("C", 1)]);
    assert!(session.accepted().is_empty());

    service.write_fault = None;
    assert_eq!(
        session.confirm_submit(&mut service),
        Ok(SubmitKind::Created)
    );
}

#[test]
fn test_viewing_session_cannot_rank() {
    let mut session: PreferenceSession = super::helpers::create_viewing_session(vec![
        entry("A", 1),
        entry("B", 2),
    ]);

    let result = session.set_rank(&course("A"), 2);

    assert_eq!(
        result,
        Err(CoreError::InvalidMode {
            action: "rank courses",
            mode: SessionMode::Viewing
        })
    );
}

#[test]
fn test_core_error_display() {
    let err: CoreError = CoreError::InvalidMode {
        action: "cancel an update",
        mode: SessionMode::Creating,
    };
    assert_eq!(format!("{err}"), "Cannot cancel an update while creating");

    let err: CoreError = CoreError::SubmissionClosed { form_id: 7 };
    assert_eq!(
        format!("{err}"),
        "Preference form 7 is not accepting submissions"
    );

    let err: CoreError = CoreError::Ineligible {
        instructor: InstructorId::new("i-1"),
        form_id: 7,
    };
    assert_eq!(
        format!("{err}"),
        "Instructor 'i-1' is not eligible to submit to preference form 7"
    );
}
