// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use course_pref::PreferenceSubmission;
use course_pref_domain::{Chair, CourseId, FormQuery, InstructorId, PreferenceEntry, Semester};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{BackendFixture, InMemoryBackend};

pub const TEST_FIXTURE: &str = r#"{
  "forms": [
    {
      "form_id": 1,
      "year": 2024,
      "semester": "regular1",
      "chair": "cs",
      "max_preferences": 2,
      "submission_start": "2024-03-01T00:00:00Z",
      "submission_end": "2024-03-15T00:00:00Z",
      "courses": [
        { "course_id": "CS101" },
        { "course_id": "CS102", "number_of_sections": 2 },
        { "course_id": "CS201", "lab_division": true }
      ]
    },
    {
      "form_id": 2,
      "year": 2024,
      "semester": "summer",
      "chair": "MATH",
      "max_preferences": 1,
      "submission_start": "2024-03-01T00:00:00Z",
      "submission_end": "2024-03-15T00:00:00Z",
      "courses": [{ "course_id": "MA100" }],
      "instructors": ["i-200"],
      "submission_allowed": false
    },
    {
      "form_id": 3,
      "year": 2024,
      "semester": "extension1",
      "chair": "CS",
      "max_preferences": 1,
      "submission_start": "2024-04-01T00:00:00Z",
      "submission_end": "2024-04-15T00:00:00Z",
      "courses": [{ "course_id": "CS900" }]
    },
    {
      "form_id": 4,
      "year": 2024,
      "semester": "regular2",
      "chair": "CS",
      "max_preferences": 1,
      "submission_start": "2024-03-01T00:00:00Z",
      "submission_end": "2024-03-15T00:00:00Z",
      "courses": [{ "course_id": "CS500" }],
      "active": false
    }
  ],
  "submissions": [
    {
      "form_id": 1,
      "instructor_id": "i-300",
      "entries": [
        { "course_id": "CS102", "rank": 1 },
        { "course_id": "CS101", "rank": 2 }
      ]
    }
  ]
}"#;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-03-05 10:00 UTC)
}

pub fn create_test_backend() -> InMemoryBackend {
    let fixture: BackendFixture = BackendFixture::from_json(TEST_FIXTURE).unwrap();
    InMemoryBackend::from_fixture(&fixture)
        .unwrap()
        .with_clock(create_test_now())
}

pub fn query(semester: Semester, chair: &str) -> FormQuery {
    FormQuery::new(2024, semester, Chair::new(chair))
}

pub fn entry(course_id: &str, rank: u32) -> PreferenceEntry {
    PreferenceEntry::new(CourseId::new(course_id), rank)
}

pub fn submission(
    form_id: i64,
    instructor: &str,
    entries: Vec<PreferenceEntry>,
) -> PreferenceSubmission {
    PreferenceSubmission {
        instructor_id: InstructorId::new(instructor),
        form_id,
        entries,
    }
}
