// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory preference service.

use crate::error::PersistenceError;
use crate::fixture::BackendFixture;
use course_pref::{PreferenceService, PreferenceSubmission};
use course_pref_domain::{
    FormLookup, FormQuery, FormRecord, InstructorId, PreferenceEntry, PreferenceForm, ServiceFault,
    WindowPhase, validate_submission,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// A collaborator call that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// `get_active_preference_form`.
    Lookup,
    /// `get_submitted_preferences`.
    PriorFetch,
    /// `create_preferences` and `replace_preferences`.
    Write,
}

#[derive(Debug, Clone)]
struct StoredForm {
    form: PreferenceForm,
    active: bool,
    submission_allowed: bool,
}

/// Reference implementation of [`PreferenceService`] held in memory.
///
/// A form is served as usable only while it is active and its window is
/// open; otherwise the lookup is rejected with the stored record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    forms: Vec<StoredForm>,
    submissions: HashMap<(i64, InstructorId), Vec<PreferenceEntry>>,
    clock: Option<OffsetDateTime>,
    faults: HashMap<FaultPoint, ServiceFault>,
}

impl InMemoryBackend {
    /// Creates an empty backend that reads the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend seeded from a fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if a form is invalid, a form id repeats, or a
    /// submission references an unknown form.
    pub fn from_fixture(fixture: &BackendFixture) -> Result<Self, PersistenceError> {
        let mut backend: Self = Self::new();

        for form_fixture in &fixture.forms {
            if backend.find_by_id(form_fixture.form_id).is_some() {
                return Err(PersistenceError::DuplicateForm(form_fixture.form_id));
            }
            backend.insert_form(
                form_fixture.to_form()?,
                form_fixture.active,
                form_fixture.submission_allowed,
            );
        }

        for submission in &fixture.submissions {
            let Some(stored) = backend.find_by_id(submission.form_id) else {
                return Err(PersistenceError::UnknownForm {
                    form_id: submission.form_id,
                    instructor_id: submission.instructor_id.clone(),
                });
            };
            validate_submission(&submission.entries, stored.form.max_preferences())
                .map_err(|source| PersistenceError::InvalidSubmission {
                    form_id: submission.form_id,
                    instructor_id: submission.instructor_id.clone(),
                    source,
                })?;
            if let Some(entry) = submission
                .entries
                .iter()
                .find(|e| !stored.form.offers(&e.course_id))
            {
                return Err(PersistenceError::CourseNotOffered {
                    form_id: submission.form_id,
                    instructor_id: submission.instructor_id.clone(),
                    course_id: entry.course_id.value().to_string(),
                });
            }
            backend.submissions.insert(
                (submission.form_id, InstructorId::new(&submission.instructor_id)),
                submission.entries.clone(),
            );
        }

        info!(
            forms = backend.forms.len(),
            submissions = backend.submissions.len(),
            "Seeded in-memory preference backend"
        );

        Ok(backend)
    }

    /// Pins the backend clock.
    #[must_use]
    pub const fn with_clock(mut self, now: OffsetDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    /// Adds a form.
    pub fn insert_form(&mut self, form: PreferenceForm, active: bool, submission_allowed: bool) {
        self.forms.push(StoredForm {
            form,
            active,
            submission_allowed,
        });
    }

    /// Makes every call at `point` fail with `fault` until cleared.
    pub fn inject_fault(&mut self, point: FaultPoint, fault: ServiceFault) {
        self.faults.insert(point, fault);
    }

    /// Removes the injected fault at `point`.
    pub fn clear_fault(&mut self, point: FaultPoint) {
        self.faults.remove(&point);
    }

    /// Returns the accepted submission of an instructor for a form.
    #[must_use]
    pub fn submission(
        &self,
        form_id: i64,
        instructor: &InstructorId,
    ) -> Option<&[PreferenceEntry]> {
        self.submissions
            .get(&(form_id, instructor.clone()))
            .map(Vec::as_slice)
    }

    /// Returns the number of stored forms.
    #[must_use]
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Returns the number of stored submissions.
    #[must_use]
    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    fn now(&self) -> OffsetDateTime {
        self.clock.unwrap_or_else(OffsetDateTime::now_utc)
    }

    fn fault(&self, point: FaultPoint) -> Result<(), ServiceFault> {
        self.faults.get(&point).cloned().map_or(Ok(()), Err)
    }

    fn find_by_id(&self, form_id: i64) -> Option<&StoredForm> {
        self.forms.iter().find(|s| s.form.form_id() == form_id)
    }

    /// Finds the form for a query, preferring an active one.
    fn find_by_query(&self, query: &FormQuery) -> Option<&StoredForm> {
        let mut matching = self.forms.iter().filter(|s| s.form.query() == query);
        let first: &StoredForm = matching.next()?;
        if first.active {
            return Some(first);
        }
        Some(matching.find(|s| s.active).unwrap_or(first))
    }

    fn rejection(&self, stored: &StoredForm) -> Option<String> {
        if !stored.active {
            return Some(String::from("Preference form is not active"));
        }
        match stored.form.window().phase(self.now()) {
            WindowPhase::Upcoming => Some(String::from("Submission window has not opened")),
            WindowPhase::Closed => Some(String::from("Submission window has closed")),
            WindowPhase::Open => None,
        }
    }

    fn write(
        &mut self,
        submission: &PreferenceSubmission,
        replace: bool,
    ) -> Result<(), ServiceFault> {
        self.fault(FaultPoint::Write)?;

        let stored: &StoredForm =
            self.find_by_id(submission.form_id)
                .ok_or_else(|| ServiceFault::Server {
                    status: Some(404),
                    message: format!("Preference form {} does not exist", submission.form_id),
                })?;

        if self.rejection(stored).is_some() || !stored.submission_allowed {
            return Err(ServiceFault::Server {
                status: Some(403),
                message: String::from("Preference form is not accepting submissions"),
            });
        }
        if !stored.form.scope().includes(&submission.instructor_id) {
            return Err(ServiceFault::Server {
                status: Some(403),
                message: format!(
                    "Instructor '{}' is not eligible for this form",
                    submission.instructor_id
                ),
            });
        }
        validate_submission(&submission.entries, stored.form.max_preferences())
            .map_err(|violation| ServiceFault::Server {
                status: Some(422),
                message: violation.to_string(),
            })?;
        if let Some(entry) = submission
            .entries
            .iter()
            .find(|e| !stored.form.offers(&e.course_id))
        {
            return Err(ServiceFault::Server {
                status: Some(422),
                message: format!("Course '{}' is not offered by this form", entry.course_id),
            });
        }

        let key: (i64, InstructorId) = (submission.form_id, submission.instructor_id.clone());
        match (replace, self.submissions.contains_key(&key)) {
            (false, true) => {
                return Err(ServiceFault::Server {
                    status: Some(409),
                    message: String::from("Preferences were already submitted"),
                });
            }
            (true, false) => {
                return Err(ServiceFault::Server {
                    status: Some(404),
                    message: String::from("No submitted preferences to replace"),
                });
            }
            _ => {}
        }

        self.submissions.insert(key, submission.entries.clone());
        Ok(())
    }
}

impl PreferenceService for InMemoryBackend {
    fn get_active_preference_form(&self, query: &FormQuery) -> FormLookup {
        if let Err(fault) = self.fault(FaultPoint::Lookup) {
            warn!(query = %query, error = %fault, "Injected lookup fault");
            return FormLookup::TransportError(fault);
        }

        let Some(stored) = self.find_by_query(query) else {
            debug!(query = %query, "No preference form");
            return FormLookup::NotFound;
        };

        if let Some(reason) = self.rejection(stored) {
            debug!(form_id = stored.form.form_id(), reason = %reason, "Lookup rejected");
            return FormLookup::Rejected {
                record: FormRecord::from(&stored.form),
                reason,
            };
        }

        FormLookup::Found {
            form: stored.form.clone(),
            submission_allowed: stored.submission_allowed,
        }
    }

    fn get_submitted_preferences(
        &self,
        instructor: &InstructorId,
        query: &FormQuery,
    ) -> Result<Vec<PreferenceEntry>, ServiceFault> {
        self.fault(FaultPoint::PriorFetch)?;

        Ok(self
            .find_by_query(query)
            .and_then(|stored| self.submission(stored.form.form_id(), instructor))
            .map(<[PreferenceEntry]>::to_vec)
            .unwrap_or_default())
    }

    fn create_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault> {
        self.write(submission, false)?;
        info!(
            form_id = submission.form_id,
            instructor = %submission.instructor_id,
            entries = submission.entries.len(),
            "Stored new preferences"
        );
        Ok(())
    }

    fn replace_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault> {
        self.write(submission, true)?;
        info!(
            form_id = submission.form_id,
            instructor = %submission.instructor_id,
            entries = submission.entries.len(),
            "Replaced preferences"
        );
        Ok(())
    }
}
