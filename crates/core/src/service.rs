// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use course_pref_domain::{FormLookup, FormQuery, InstructorId, PreferenceEntry, ServiceFault};
use serde::{Deserialize, Serialize};

/// A complete preference list sent to the collaborator service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSubmission {
    pub instructor_id: InstructorId,
    pub form_id: i64,
    pub entries: Vec<PreferenceEntry>,
}

/// The external service that stores forms and submitted preferences.
///
/// Every call is a single request. Implementations must not retry.
pub trait PreferenceService {
    /// Looks up the preference form for `(year, semester, chair)`.
    fn get_active_preference_form(&self, query: &FormQuery) -> FormLookup;

    /// Fetches an instructor's previously submitted preferences.
    ///
    /// An instructor without a submission receives an empty list.
    ///
    /// # Errors
    ///
    /// Returns a fault if the request fails.
    fn get_submitted_preferences(
        &self,
        instructor: &InstructorId,
        query: &FormQuery,
    ) -> Result<Vec<PreferenceEntry>, ServiceFault>;

    /// Stores a first submission.
    ///
    /// # Errors
    ///
    /// Returns a fault if the request fails.
    fn create_preferences(&mut self, submission: &PreferenceSubmission)
    -> Result<(), ServiceFault>;

    /// Replaces an existing submission.
    ///
    /// # Errors
    ///
    /// Returns a fault if the request fails.
    fn replace_preferences(
        &mut self,
        submission: &PreferenceSubmission,
    ) -> Result<(), ServiceFault>;
}
