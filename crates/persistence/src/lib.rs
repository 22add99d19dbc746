// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory collaborator for the Course Preference engine.
//!
//! This crate provides a reference implementation of the preference
//! service the engine talks to. Forms and prior submissions are seeded from
//! a JSON fixture and held in memory; nothing is written to disk.
//!
//! ## Fixture Format
//!
//! ```json
//! {
//!   "forms": [{
//!     "form_id": 1, "year": 2024, "semester": "regular1", "chair": "CS",
//!     "max_preferences": 2,
//!     "submission_start": "2024-03-01T00:00:00Z",
//!     "submission_end": "2024-03-15T00:00:00Z",
//!     "courses": [{ "course_id": "CS101" }, { "course_id": "CS102" }],
//!     "instructors": ["i-100"]
//!   }],
//!   "submissions": []
//! }
//! ```
//!
//! `instructors` may be omitted to open the form to every instructor.
//! `active` and `submission_allowed` default to `true`.
//!
//! ## Fault Injection
//!
//! Each collaborator call can be made to fail with a chosen
//! [`ServiceFault`](course_pref_domain::ServiceFault) through
//! [`InMemoryBackend::inject_fault`], so callers can exercise their
//! connectivity and server error paths.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod fixture;
mod memory;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use fixture::{BackendFixture, CourseFixture, FormFixture, SubmissionFixture};
pub use memory::{FaultPoint, InMemoryBackend};
