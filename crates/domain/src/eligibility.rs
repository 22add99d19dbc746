// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{InstructorId, PreferenceForm};

/// Decides whether an instructor may submit preferences to an active form.
///
/// An instructor is eligible when the form is open to all instructors or
/// lists the instructor explicitly. Ineligible instructors may still see the
/// course list.
#[must_use]
pub fn is_eligible(form: &PreferenceForm, instructor: &InstructorId) -> bool {
    form.scope().includes(instructor)
}
