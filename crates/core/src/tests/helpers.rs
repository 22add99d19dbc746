// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PreferenceService, PreferenceSession, PreferenceSubmission};
use course_pref_domain::{
    Chair, CourseId, CourseOffering, FormLookup, FormQuery, InstructorId, InstructorScope,
    PreferenceEntry, PreferenceForm, Semester, ServiceFault, SubmissionWindow,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// Scripted collaborator that records every write.
pub struct MockService {
    pub lookup: FormLookup,
    pub prior: Result<Vec<PreferenceEntry>, ServiceFault>,
    pub write_fault: Option<ServiceFault>,
    pub created: Vec<PreferenceSubmission>,
    pub replaced: Vec<PreferenceSubmission>,
}

impl MockService {
    pub fn new(lookup: FormLookup) -> Self {
        Self {
            lookup,
            prior: Ok(Vec::new()),
            write_fault: None,
            created: Vec::new(),
            replaced: Vec::new(),
        }
    }

    pub fn with_prior(mut self, prior: Vec<PreferenceEntry>) -> Self {
        self.prior = Ok(prior);
        self
    }

    pub fn write_count(&self) -> usize {
        self.created.len() + self.replaced.len()
    }

    fn write(&self) -> Result<(), ServiceFault> {
        self.write_fault.clone().map_or(Ok(()), Err)
    }
}

impl PreferenceService for MockService {
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
        self.write()?;
        self.created.push(submission.clone());
        Ok(())
    }

    fn replace_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault> {
        self.write()?;
        self.replaced.push(submission.clone());
        Ok(())
    }
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-03-05 10:00 UTC)
}

pub fn create_test_query() -> FormQuery {
    FormQuery::new(2024, Semester::Regular1, Chair::new("CS"))
}

pub fn create_test_instructor() -> InstructorId {
    InstructorId::new("i-100")
}

pub fn create_test_form(max_preferences: u32, scope: InstructorScope) -> PreferenceForm {
    PreferenceForm::new(
        42,
        create_test_query(),
        max_preferences,
        SubmissionWindow::new(
            datetime!(2024-03-01 08:00 UTC),
            datetime!(2024-03-15 17:00 UTC),
        )
        .unwrap(),
        ["A", "B", "C", "D"]
            .iter()
            .map(|id| CourseOffering::new(CourseId::new(id)))
            .collect(),
        scope,
    )
    .unwrap()
}

pub fn course(id: &str) -> CourseId {
    CourseId::new(id)
}

pub fn entry(id: &str, rank: u32) -> PreferenceEntry {
    PreferenceEntry::new(course(id), rank)
}

/// An eligible, open session with no prior submission.
pub fn create_creating_session(max_preferences: u32) -> PreferenceSession {
    PreferenceSession::new(
        create_test_form(max_preferences, InstructorScope::All),
        create_test_instructor(),
        true,
        true,
        Vec::new(),
    )
}

/// An eligible, open session showing a prior submission.
pub fn create_viewing_session(prior: Vec<PreferenceEntry>) -> PreferenceSession {
    let max: u32 = u32::try_from(prior.len()).unwrap();
    PreferenceSession::new(
        create_test_form(max, InstructorScope::All),
        create_test_instructor(),
        true,
        true,
        prior,
    )
}

pub fn connectivity_fault() -> ServiceFault {
    ServiceFault::Connectivity {
        message: String::from("connection reset"),
    }
}
