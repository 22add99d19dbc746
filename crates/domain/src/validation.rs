// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{CourseOffering, FormQuery, InstructorId, PreferenceForm};
use std::collections::HashSet;

/// Validates that a form year is a reasonable calendar year.
///
/// # Errors
///
/// Returns an error if the year is not between 1900 and 2200.
pub fn validate_form_year(year: u16) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(format!(
            "Year must be between 1900 and 2200, got {year}"
        )));
    }
    Ok(())
}

/// Validates the `(year, semester, chair)` lookup key.
///
/// # Errors
///
/// Returns an error if:
/// - The year is out of range
/// - The chair identifier is empty
pub fn validate_form_query(query: &FormQuery) -> Result<(), DomainError> {
    validate_form_year(query.year)?;

    if query.chair.id().is_empty() {
        return Err(DomainError::InvalidChair(String::from(
            "Chair cannot be empty",
        )));
    }

    Ok(())
}

/// Validates the course offerings of a form.
///
/// # Errors
///
/// Returns an error if:
/// - A course identifier is empty
/// - A course is offered more than once
/// - An offering declares zero sections
pub fn validate_course_offerings(courses: &[CourseOffering]) -> Result<(), DomainError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for offering in courses {
        let course_id: &str = offering.course_id.value();
        if course_id.is_empty() {
            return Err(DomainError::InvalidCourseId(String::from(
                "Course id cannot be empty",
            )));
        }
        if offering.number_of_sections == 0 {
            return Err(DomainError::InvalidSectionCount {
                course_id: course_id.to_string(),
            });
        }
        if !seen.insert(course_id) {
            return Err(DomainError::DuplicateCourseOffering {
                course_id: course_id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates the number of required preferences against the offered courses.
///
/// # Errors
///
/// Returns an error if `max_preferences` is zero or greater than `offered`.
pub fn validate_max_preferences(max_preferences: u32, offered: usize) -> Result<(), DomainError> {
    let fits: bool = usize::try_from(max_preferences).is_ok_and(|max| max <= offered);
    if max_preferences == 0 || !fits {
        return Err(DomainError::InvalidMaxPreferences {
            max_preferences,
            offered,
        });
    }
    Ok(())
}

/// Validates that listed instructor identifiers are not empty.
///
/// # Errors
///
/// Returns an error if any identifier is empty.
pub fn validate_instructor_ids(instructors: &[InstructorId]) -> Result<(), DomainError> {
    if instructors.iter().any(|i| i.value().is_empty()) {
        return Err(DomainError::InvalidInstructorId(String::from(
            "Instructor id cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that a rank chosen for a form lies within `0..=max_preferences`.
///
/// Rank 0 means "unranked".
///
/// # Errors
///
/// Returns `DomainError::RankOutOfRange` if the rank is above the form's maximum.
pub const fn validate_rank(form: &PreferenceForm, rank: u32) -> Result<(), DomainError> {
    let max: u32 = form.max_preferences();
    if rank > max {
        return Err(DomainError::RankOutOfRange { rank, max });
    }
    Ok(())
}
