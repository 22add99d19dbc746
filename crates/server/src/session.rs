// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Open preference sessions and their extraction from request paths.
//!
//! Each session sits behind its own mutex, so operations on one session run
//! one at a time while other sessions proceed independently. Sessions left
//! untouched for [`SESSION_IDLE_TIMEOUT`] are dropped.

use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use course_pref::PreferenceSession;
use std::collections::HashMap;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;

use crate::AppState;

/// How long a session may go unused before it is dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::minutes(30);

/// A session shared between the registry and in-flight requests.
pub type SharedSession = Arc<Mutex<PreferenceSession>>;

#[derive(Debug)]
struct RegisteredSession {
    session: SharedSession,
    last_used: OffsetDateTime,
}

impl RegisteredSession {
    fn is_idle(&self, now: OffsetDateTime) -> bool {
        now - self.last_used > SESSION_IDLE_TIMEOUT
    }
}

/// Open sessions keyed by identifier.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    next_id: u64,
    sessions: HashMap<u64, RegisteredSession>,
}

impl SessionRegistry {
    /// Stores a session and returns its identifier.
    ///
    /// Idle sessions are evicted first.
    pub fn insert(&mut self, session: PreferenceSession, now: OffsetDateTime) -> u64 {
        self.evict_idle(now);
        self.next_id += 1;
        self.sessions.insert(
            self.next_id,
            RegisteredSession {
                session: Arc::new(Mutex::new(session)),
                last_used: now,
            },
        );
        self.next_id
    }

    /// Returns a handle to an open session and marks it as used.
    ///
    /// An idle session is dropped instead.
    pub fn get(&mut self, session_id: u64, now: OffsetDateTime) -> Option<SharedSession> {
        let registered: &mut RegisteredSession = self.sessions.get_mut(&session_id)?;
        if registered.is_idle(now) {
            self.sessions.remove(&session_id);
            debug!(session_id, "Dropped idle session");
            return None;
        }
        registered.last_used = now;
        Some(Arc::clone(&registered.session))
    }

    /// Closes a session. Returns false if it was not open.
    pub fn remove(&mut self, session_id: u64) -> bool {
        self.sessions.remove(&session_id).is_some()
    }

    /// Drops every idle session. Returns how many were dropped.
    pub fn evict_idle(&mut self, now: OffsetDateTime) -> usize {
        let before: usize = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_idle(now));
        let evicted: usize = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, "Evicted idle sessions");
        }
        evicted
    }

    /// Returns the number of open sessions.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Extractor for the session named by the `{session_id}` path segment.
///
/// # Errors
///
/// Returns HTTP 400 if the segment is not a number and HTTP 404 if no
/// session with that identifier is open.
pub struct OpenSession(pub u64, pub SharedSession);

impl FromRequestParts<AppState> for OpenSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(session_id) = Path::<u64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!(error = %e, "Invalid session id");
                SessionError::InvalidSessionId
            })?;

        let session: SharedSession = state
            .sessions
            .lock()
            .await
            .get(session_id, state.now())
            .ok_or_else(|| {
                debug!(session_id, "Unknown session");
                SessionError::UnknownSession(session_id)
            })?;

        Ok(Self(session_id, session))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The path segment is not a session identifier.
    InvalidSessionId,
    /// No session with this identifier is open.
    UnknownSession(u64),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidSessionId => (StatusCode::BAD_REQUEST, String::from("Invalid session id")),
            Self::UnknownSession(session_id) => (
                StatusCode::NOT_FOUND,
                format!("Session {session_id} is not open. Search for the form again."),
            ),
        };

        (status, message).into_response()
    }
}
