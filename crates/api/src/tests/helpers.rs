// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use course_pref::{PreferenceService, PreferenceSubmission};
use course_pref_domain::{
    Chair, CourseId, CourseOffering, FormLookup, FormQuery, FormRecord, InstructorId,
    InstructorScope, PreferenceEntry, PreferenceForm, Semester, ServiceFault, SubmissionWindow,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{SearchRequest, SetRankRequest};

/// In-memory collaborator with a single scripted form.
pub struct StubService {
    pub lookup: FormLookup,
    pub prior: Result<Vec<PreferenceEntry>, ServiceFault>,
    pub write_fault: Option<ServiceFault>,
    pub submissions: Vec<PreferenceSubmission>,
}

impl StubService {
    pub fn new(lookup: FormLookup) -> Self {
        Self {
            lookup,
            prior: Ok(Vec::new()),
            write_fault: None,
            submissions: Vec::new(),
        }
    }

    pub fn active(max_preferences: u32, scope: InstructorScope) -> Self {
        Self::new(FormLookup::Found {
            form: create_test_form(max_preferences, scope),
            submission_allowed: true,
        })
    }

    fn write(&mut self, submission: &PreferenceSubmission) -> Result<(), ServiceFault> {
        if let Some(fault) = self.write_fault.clone() {
            return Err(fault);
        }
        self.submissions.push(submission.clone());
        Ok(())
    }
}

impl PreferenceService for StubService {
    fn get_active_preference_form(&self, _query: &FormQuery) -> FormLookup {
        self.lookup.clone()
    }

    fn get_submitted_preferences(
        &self,
        _instructor: &InstructorId,
        _query: &FormQuery,
    ) -> Result<Vec<PreferenceEntry>, ServiceFault> {
        self.prior.clone()
    }

    fn create_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault> {
        self.write(submission)
    }

    fn replace_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault> {
        self.write(submission)
    }
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-03-05 10:00 UTC)
}

pub fn create_test_query() -> FormQuery {
    FormQuery::new(2024, Semester::Regular1, Chair::new("CS"))
}

pub fn create_test_form(max_preferences: u32, scope: InstructorScope) -> PreferenceForm {
    let window: SubmissionWindow = SubmissionWindow::new(
        datetime!(2024-03-01 0:00 UTC),
        datetime!(2024-03-15 0:00 UTC),
    )
    .unwrap();
    let courses: Vec<CourseOffering> = ["CS101", "CS102", "CS201", "CS301"]
        .iter()
        .map(|id| CourseOffering::new(CourseId::new(id)))
        .collect();
    PreferenceForm::new(
        42,
        create_test_query(),
        max_preferences,
        window,
        courses,
        scope,
    )
    .unwrap()
}

pub fn create_test_record(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> FormRecord {
    FormRecord {
        form_id: 7,
        query: create_test_query(),
        submission_start: start,
        submission_end: end,
    }
}

pub fn create_search_request() -> SearchRequest {
    SearchRequest {
        year: 2024,
        semester: String::from("Regular 1"),
        chair: String::from("cs"),
        instructor_id: String::from("i-100"),
    }
}

pub fn rank_request(course_id: &str, rank: u32) -> SetRankRequest {
    SetRankRequest {
        course_id: String::from(course_id),
        rank,
    }
}

pub fn entry(course_id: &str, rank: u32) -> PreferenceEntry {
    PreferenceEntry::new(CourseId::new(course_id), rank)
}
