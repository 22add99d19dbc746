// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An instructor's preference session for one active form.
//!
//! ## Modes
//!
//! - `Creating`: no prior submission exists; the store is editable
//! - `Viewing`: a prior submission is shown; the store is read-only
//! - `Updating`: the prior submission is being re-entered from scratch
//!
//! ## Transitions
//!
//! - `Viewing -> Updating` via [`PreferenceSession::enter_update`]
//! - `Updating -> Viewing` via [`PreferenceSession::cancel`] (snapshot restored)
//! - `Creating | Updating -> Viewing` via [`PreferenceSession::confirm_submit`]
//!
//! A failed submit leaves the mode and the store untouched.

use crate::error::CoreError;
use crate::service::{PreferenceService, PreferenceSubmission};
use course_pref_domain::{
    CourseId, DomainError, InstructorId, PreferenceEntry, PreferenceForm, RankAllocationStore,
    RankChange, SubmissionProgress, SubmissionViolation, submission_progress, validate_rank,
    validate_submission,
};
use serde::{Deserialize, Serialize};

/// The editing mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Creating,
    Viewing,
    Updating,
}

impl SessionMode {
    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Viewing => "viewing",
            Self::Updating => "updating",
        }
    }

    /// Returns true if rank edits are allowed in this mode.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Creating | Self::Updating)
    }
}

/// A saved copy of the accepted submission, held while updating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSnapshot {
    entries: Vec<PreferenceEntry>,
}

impl SubmissionSnapshot {
    /// Returns the saved entries.
    #[must_use]
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }
}

/// Which collaborator call a successful submit used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    /// A first submission was created.
    Created,
    /// An existing submission was replaced.
    Replaced,
}

/// The state of one instructor editing preferences for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSession {
    form: PreferenceForm,
    instructor: InstructorId,
    eligible: bool,
    submission_allowed: bool,
    accepted: Vec<PreferenceEntry>,
    store: RankAllocationStore,
    snapshot: Option<SubmissionSnapshot>,
    mode: SessionMode,
}

impl PreferenceSession {
    /// Creates a session from a resolved form and the instructor's prior submission.
    ///
    /// A non-empty prior submission starts the session in `Viewing`;
    /// otherwise it starts in `Creating`.
    #[must_use]
    pub fn new(
        form: PreferenceForm,
        instructor: InstructorId,
        eligible: bool,
        submission_allowed: bool,
        prior: Vec<PreferenceEntry>,
    ) -> Self {
        let store: RankAllocationStore = RankAllocationStore::from_entries(prior);
        let accepted: Vec<PreferenceEntry> = store.entries().to_vec();
        let mode: SessionMode = if accepted.is_empty() {
            SessionMode::Creating
        } else {
            SessionMode::Viewing
        };

        Self {
            form,
            instructor,
            eligible,
            submission_allowed,
            accepted,
            store,
            snapshot: None,
            mode,
        }
    }

    /// Returns the form this session works on.
    #[must_use]
    pub const fn form(&self) -> &PreferenceForm {
        &self.form
    }

    /// Returns the instructor who opened the session.
    #[must_use]
    pub const fn instructor(&self) -> &InstructorId {
        &self.instructor
    }

    /// Returns true if the instructor may submit to the form.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Returns the server-declared open/closed flag captured when the session opened.
    #[must_use]
    pub const fn submission_allowed(&self) -> bool {
        self.submission_allowed
    }

    /// Returns the current session mode.
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Returns the last submission accepted by the service.
    #[must_use]
    pub fn accepted(&self) -> &[PreferenceEntry] {
        &self.accepted
    }

    /// Returns the working entries, ordered by rank.
    #[must_use]
    pub fn entries(&self) -> &[PreferenceEntry] {
        self.store.entries()
    }

    /// Returns the rank a course currently holds in the working set (0 when unranked).
    #[must_use]
    pub fn rank_of(&self, course_id: &CourseId) -> u32 {
        self.store.rank_of(course_id)
    }

    /// Returns the accepted submission saved on entering update mode.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&SubmissionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Returns true if the service already holds a submission from this instructor.
    #[must_use]
    pub fn has_prior_submission(&self) -> bool {
        !self.accepted.is_empty()
    }

    /// Returns the live `selected/required` indicator.
    #[must_use]
    pub fn progress(&self) -> SubmissionProgress {
        submission_progress(self.store.entries(), self.form.max_preferences())
    }

    /// Runs the pre-submit checks against the working entries.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn submission_check(&self) -> Result<(), SubmissionViolation> {
        validate_submission(self.store.entries(), self.form.max_preferences())
    }

    /// Returns true if the submit action is currently enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.ensure_editable("submit").is_ok() && self.submission_check().is_ok()
    }

    /// Assigns a rank to a course, resolving conflicts with other courses.
    ///
    /// Rank 0 removes the course from the ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The instructor is ineligible or the form is closed for submissions
    /// - The session is not in `Creating` or `Updating` mode
    /// - The rank is above the form's maximum
    /// - The course is not offered by the form
    pub fn set_rank(&mut self, course_id: &CourseId, rank: u32) -> Result<RankChange, CoreError> {
        self.ensure_editable("rank courses")?;
        validate_rank(&self.form, rank)?;

        if !self.form.offers(course_id) {
            return Err(CoreError::DomainViolation(DomainError::CourseNotOffered {
                form_id: self.form.form_id(),
                course_id: course_id.value().to_string(),
            }));
        }

        Ok(self.store.set_rank(course_id, rank))
    }

    /// Enters update mode, saving the accepted submission and clearing the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the instructor may not submit or the session is not `Viewing`.
    pub fn enter_update(&mut self) -> Result<(), CoreError> {
        self.ensure_submittable()?;
        if self.mode != SessionMode::Viewing {
            return Err(CoreError::InvalidMode {
                action: "enter update mode",
                mode: self.mode,
            });
        }

        self.snapshot = Some(SubmissionSnapshot {
            entries: self.accepted.clone(),
        });
        self.store.clear();
        self.mode = SessionMode::Updating;
        Ok(())
    }

    /// Leaves update mode without submitting, restoring the saved submission.
    ///
    /// No service call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not `Updating`.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if self.mode != SessionMode::Updating {
            return Err(CoreError::InvalidMode {
                action: "cancel an update",
                mode: self.mode,
            });
        }

        if let Some(snapshot) = self.snapshot.take() {
            self.accepted = snapshot.entries;
        }
        self.store = RankAllocationStore::from_entries(self.accepted.clone());
        self.mode = SessionMode::Viewing;
        Ok(())
    }

    /// Validates the working entries and submits them.
    ///
    /// A first submission is created; an existing one is replaced. On
    /// success the submitted entries become the accepted submission and the
    /// session returns to `Viewing`. On failure nothing changes, so the
    /// instructor may retry without re-entering selections.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The instructor is ineligible or the form is closed for submissions
    /// - The session is not in `Creating` or `Updating` mode
    /// - The working entries fail validation
    /// - The service call fails
    pub fn confirm_submit<S: PreferenceService + ?Sized>(
        &mut self,
        service: &mut S,
    ) -> Result<SubmitKind, CoreError> {
        self.ensure_editable("submit")?;
        self.submission_check()?;

        let submission: PreferenceSubmission = PreferenceSubmission {
            instructor_id: self.instructor.clone(),
            form_id: self.form.form_id(),
            entries: self.store.entries().to_vec(),
        };

        let kind: SubmitKind = if self.has_prior_submission() {
            service.replace_preferences(&submission)?;
            SubmitKind::Replaced
        } else {
            service.create_preferences(&submission)?;
            SubmitKind::Created
        };

        self.accepted = submission.entries;
        self.snapshot = None;
        self.mode = SessionMode::Viewing;
        Ok(kind)
    }

    fn ensure_submittable(&self) -> Result<(), CoreError> {
        if !self.eligible {
            return Err(CoreError::Ineligible {
                instructor: self.instructor.clone(),
                form_id: self.form.form_id(),
            });
        }
        if !self.submission_allowed {
            return Err(CoreError::SubmissionClosed {
                form_id: self.form.form_id(),
            });
        }
        Ok(())
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), CoreError> {
        self.ensure_submittable()?;
        if !self.mode.is_editing() {
            return Err(CoreError::InvalidMode {
                action,
                mode: self.mode,
            });
        }
        Ok(())
    }
}
