// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use course_pref::PreferenceSession;
use course_pref_api::{
    ApiError, FormStatusResponse, SearchRequest, SessionView, SetRankRequest, SubmitResponse,
    cancel_update, enter_update, form_status_response, search, session_view, set_rank, submit,
};
use course_pref_domain::RankChange;
use course_pref_persistence::{BackendFixture, InMemoryBackend, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use session::{OpenSession, SessionRegistry};

/// Course Preference Server - HTTP server for instructor course preferences
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON fixture seeding the preference service. If not provided, starts empty.
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// Lock order is session before backend.
#[derive(Clone)]
struct AppState {
    /// The preference service collaborator.
    backend: Arc<Mutex<InMemoryBackend>>,
    /// Open instructor sessions.
    sessions: Arc<Mutex<SessionRegistry>>,
    /// Fixed time for tests; the wall clock when `None`.
    clock: Option<OffsetDateTime>,
}

impl AppState {
    fn new(backend: InMemoryBackend) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            sessions: Arc::new(Mutex::new(SessionRegistry::default())),
            clock: None,
        }
    }

    fn now(&self) -> OffsetDateTime {
        self.clock.unwrap_or_else(OffsetDateTime::now_utc)
    }
}

/// API response for a newly opened session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenSessionResponse {
    /// The session identifier to use in later requests.
    session_id: u64,
    /// The session as opened.
    session: SessionView,
}

/// API response for a rank edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RankResponse {
    /// Which allocation case the edit resolved to.
    change: RankChange,
    /// The session after the edit.
    session: SessionView,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The violated rule, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    /// Why a searched form could not be opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form_status: Option<FormStatusResponse>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// The violated rule, if any.
    rule: Option<String>,
    /// The form status, for failed searches.
    form_status: Option<FormStatusResponse>,
}

impl HttpError {
    /// Converts a failed search, attaching the form status it resolved to.
    fn search_failed(err: ApiError) -> Self {
        let form_status: Option<FormStatusResponse> = form_status_response(&err);
        Self {
            form_status,
            ..Self::from(err)
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            rule: self.rule,
            form_status: self.form_status,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, rule): (StatusCode, Option<String>) = match &err {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::WindowRejected { .. }
            | ApiError::SubmissionClosed { .. }
            | ApiError::InvalidState { .. } => (StatusCode::CONFLICT, None),
            ApiError::Ineligible { .. } => (StatusCode::FORBIDDEN, None),
            ApiError::ValidationFailed { rule, .. }
            | ApiError::DomainRuleViolation { rule, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(rule.clone()))
            }
            ApiError::ServiceUnavailable { connectivity, .. } => {
                if *connectivity {
                    (StatusCode::SERVICE_UNAVAILABLE, None)
                } else {
                    (StatusCode::BAD_GATEWAY, None)
                }
            }
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
        };
        Self {
            status,
            message: err.to_string(),
            rule,
            form_status: None,
        }
    }
}

/// Handler for POST `/sessions` endpoint.
///
/// Looks up a form and opens a session for the instructor.
async fn handle_search(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<(StatusCode, Json<OpenSessionResponse>), HttpError> {
    info!(
        year = req.year,
        semester = %req.semester,
        chair = %req.chair,
        instructor = %req.instructor_id,
        "Handling search request"
    );

    let now: OffsetDateTime = app_state.now();

    let backend = app_state.backend.lock().await;
    let session: PreferenceSession =
        search(&*backend, &req, now).map_err(HttpError::search_failed)?;
    drop(backend);

    let view: SessionView = session_view(&session, now);
    let mut sessions = app_state.sessions.lock().await;
    let session_id: u64 = sessions.insert(session, now);
    let open_sessions: usize = sessions.open_count();
    drop(sessions);

    info!(
        session_id,
        form_id = view.form_id,
        open_sessions,
        "Session opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(OpenSessionResponse {
            session_id,
            session: view,
        }),
    ))
}

/// Handler for GET `/sessions/{session_id}` endpoint.
async fn handle_get_session(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(_, session): OpenSession,
) -> Json<SessionView> {
    let session = session.lock().await;
    Json(session_view(&session, app_state.now()))
}

/// Handler for DELETE `/sessions/{session_id}` endpoint.
///
/// Discards the session without contacting the preference service.
async fn handle_close_session(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(session_id, _): OpenSession,
) -> StatusCode {
    app_state.sessions.lock().await.remove(session_id);
    info!(session_id, "Session closed");
    StatusCode::NO_CONTENT
}

/// Handler for POST `/sessions/{session_id}/rank` endpoint.
async fn handle_set_rank(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(session_id, session): OpenSession,
    Json(req): Json<SetRankRequest>,
) -> Result<Json<RankResponse>, HttpError> {
    info!(
        session_id,
        course_id = %req.course_id,
        rank = req.rank,
        "Handling set_rank request"
    );

    let mut session = session.lock().await;
    let change: RankChange = set_rank(&mut session, &req)?;

    Ok(Json(RankResponse {
        change,
        session: session_view(&session, app_state.now()),
    }))
}

/// Handler for POST `/sessions/{session_id}/update` endpoint.
///
/// Enters update mode for a previously accepted submission.
async fn handle_enter_update(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(session_id, session): OpenSession,
) -> Result<Json<SessionView>, HttpError> {
    info!(session_id, "Handling enter_update request");

    let mut session = session.lock().await;
    enter_update(&mut session)?;
    Ok(Json(session_view(&session, app_state.now())))
}

/// Handler for POST `/sessions/{session_id}/cancel` endpoint.
///
/// Leaves update mode and restores the accepted submission.
async fn handle_cancel_update(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(session_id, session): OpenSession,
) -> Result<Json<SessionView>, HttpError> {
    info!(session_id, "Handling cancel_update request");

    let mut session = session.lock().await;
    cancel_update(&mut session)?;
    Ok(Json(session_view(&session, app_state.now())))
}

/// Handler for POST `/sessions/{session_id}/submit` endpoint.
///
/// Holds the session lock across the service call, so a second submit for
/// the same session waits for the first to finish.
async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    OpenSession(session_id, session): OpenSession,
) -> Result<Json<SubmitResponse>, HttpError> {
    info!(session_id, "Handling submit request");

    let mut session = session.lock().await;
    let mut backend = app_state.backend.lock().await;
    let response: SubmitResponse =
        submit(&mut session, &mut *backend, app_state.now()).map_err(|err| {
            warn!(session_id, error = %err, "Submit failed");
            HttpError::from(err)
        })?;
    drop(backend);

    info!(session_id, kind = ?response.kind, "Submit succeeded");

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(handle_search))
        .route(
            "/sessions/{session_id}",
            get(handle_get_session).delete(handle_close_session),
        )
        .route("/sessions/{session_id}/rank", post(handle_set_rank))
        .route("/sessions/{session_id}/update", post(handle_enter_update))
        .route("/sessions/{session_id}/cancel", post(handle_cancel_update))
        .route("/sessions/{session_id}/submit", post(handle_submit))
        .with_state(app_state)
}

/// Builds the preference service from the optional fixture path.
fn load_backend(fixture: Option<&PathBuf>) -> Result<InMemoryBackend, PersistenceError> {
    let Some(path) = fixture else {
        info!("No fixture given; starting with an empty preference service");
        return Ok(InMemoryBackend::new());
    };

    info!("Loading fixture from: {}", path.display());
    let fixture: BackendFixture = BackendFixture::load(path)?;
    InMemoryBackend::from_fixture(&fixture)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Course Preference Server");

    let backend: InMemoryBackend = load_backend(args.fixture.as_ref()).map_err(|e| {
        error!(error = %e, "Failed to load fixture");
        e
    })?;

    let app: Router = build_router(AppState::new(backend));

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
