use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{event, health, session};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{slug}", get(event::get_event).delete(event::delete_event))

        // Sessions
        .route("/api/v1/events/{slug}/sessions", get(session::list_sessions).post(session::create_session))
        .route("/api/v1/sessions/{session_id}", get(session::get_session).delete(session::delete_session))

        // Session lifecycle
        .route("/api/v1/sessions/{session_id}/register", post(session::register_participant))
        .route("/api/v1/sessions/{session_id}/start", post(session::start_session))
        .route("/api/v1/sessions/{session_id}/complete", post(session::complete_session))

        // Participant queries
        .route("/api/v1/sessions/{session_id}/participants/{participant_id}/current", get(session::get_current_match))
        .route("/api/v1/sessions/{session_id}/participants/{participant_id}/schedule", get(session::get_personal_schedule))
        .route("/api/v1/sessions/{session_id}/participants/{participant_id}/upcoming", get(session::get_upcoming_matches))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
