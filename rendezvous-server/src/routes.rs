use axum::error_handling::HandleErrorLayer;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use rendezvous_core::{Command, ComputeOutcome, ComputeTicket, Error, PersonId};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::snapshot::{GraphDocument, SessionSnapshot};
use crate::{AppState, ServerConfig, ServerError};

type SnapshotResponse = Result<Json<SessionSnapshot>, ServerError>;

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(TimeoutLayer::new(config.request_timeout()));

    Router::new()
        .route("/graph", get(graph))
        .route("/state", get(current_state))
        .route("/people/{id}/select", post(select_person))
        .route("/people/{id}/deselect", post(deselect_person))
        .route("/compute", post(compute))
        .route("/step", post(step))
        .route("/clear", post(clear))
        .route("/notice/dismiss", post(dismiss_notice))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("service unavailable: {err}"),
        )
    }
}

async fn snapshot_of(state: &AppState) -> SnapshotResponse {
    let session = state.session.lock().await;
    Ok(Json(SessionSnapshot::capture(&session, state.initial_zoom)?))
}

async fn run(state: &AppState, command: Command) -> SnapshotResponse {
    let mut session = state.session.lock().await;
    session.dispatch(command)?;
    Ok(Json(SessionSnapshot::capture(&session, state.initial_zoom)?))
}

async fn graph(State(state): State<AppState>) -> Json<GraphDocument> {
    let session = state.session.lock().await;
    Json(GraphDocument::from_graph(session.graph()))
}

async fn current_state(State(state): State<AppState>) -> SnapshotResponse {
    snapshot_of(&state).await
}

async fn select_person(State(state): State<AppState>, Path(id): Path<String>) -> SnapshotResponse {
    run(&state, Command::SelectPerson(PersonId::new(id))).await
}

async fn deselect_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> SnapshotResponse {
    run(&state, Command::DeselectPerson(PersonId::new(id))).await
}

async fn step(State(state): State<AppState>) -> SnapshotResponse {
    run(&state, Command::Step).await
}

async fn clear(State(state): State<AppState>) -> SnapshotResponse {
    run(&state, Command::Clear).await
}

async fn dismiss_notice(State(state): State<AppState>) -> SnapshotResponse {
    run(&state, Command::DismissError).await
}

/// The session lock is released while the solver works, so `step`,
/// `clear` and `state` stay responsive. A clear in the meantime turns the
/// answer stale.
async fn compute(State(state): State<AppState>) -> SnapshotResponse {
    let ticket = {
        let mut session = state.session.lock().await;
        match session.begin_compute() {
            Ok(ticket) => ticket,
            Err(Error::EmptySelection) => {
                if let Some(notice) = session.notice() {
                    state.schedule_expiry(notice.id);
                }
                return Ok(Json(SessionSnapshot::capture(&session, state.initial_zoom)?));
            }
            Err(err) => return Err(err.into()),
        }
    };

    // Runs detached so a dropped request cannot leave the session pending
    let task = tokio::spawn(finish_compute(state, ticket));
    task.await
        .map_err(|e| ServerError::Core(Error::Compute(e.to_string())))?
}

async fn finish_compute(state: AppState, ticket: ComputeTicket) -> SnapshotResponse {
    let result = state.solver.solve(&ticket.request).await;

    let mut session = state.session.lock().await;
    match session.complete_compute(ticket, result) {
        ComputeOutcome::Applied => tracing::info!("Meeting point computed"),
        ComputeOutcome::Failed(id) => state.schedule_expiry(id),
        ComputeOutcome::Stale => {
            tracing::info!("Session was cleared during compute, answer dropped");
        }
    }
    Ok(Json(SessionSnapshot::capture(&session, state.initial_zoom)?))
}
