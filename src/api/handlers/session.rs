use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateSessionRequest, InstantQuery, RegisterRequest};
use crate::api::dtos::responses::SessionResponse;
use crate::domain::models::session::{NetworkingSession, NewSessionParams, STATUS_ACTIVE, STATUS_SCHEDULED};
use crate::domain::services::matching::generate_matches;
use crate::domain::services::schedule::{build_schedules, current_match, personal_schedule, upcoming_matches};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

// Bounded retries for the registration and start compare-and-sets.
const CAS_RETRIES: u32 = 3;

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.duration_min <= 0 {
        return Err(AppError::Validation("Meeting duration must be positive".into()));
    }
    if payload.max_participants < 2 {
        return Err(AppError::Validation("Session needs room for at least 2 participants".into()));
    }

    let session = NetworkingSession::new(NewSessionParams {
        event_id: event.id,
        name: payload.name,
        description: payload.description.unwrap_or_default(),
        start_time: payload.start_time,
        duration_min: payload.duration_min,
        max_participants: payload.max_participants,
    });
    let created = state.session_repo.create(&session).await?;

    info!("Created networking session {} for event {}", created.id, slug);
    Ok(Json(SessionResponse::from(created)))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let sessions = state.session_repo.list_by_event(&event.id).await?;
    let body: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(body))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;
    Ok(Json(SessionResponse::from(session)))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.status != STATUS_SCHEDULED {
        return Err(AppError::InvalidState("only a SCHEDULED session can be deleted".into()));
    }

    state.session_repo.delete(&session_id).await?;
    info!("Deleted session {}", session_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Adds a participant while the session is still SCHEDULED. The write is
/// a compare-and-set against the participant list we read, guarded by
/// status, so a registration racing a start either lands before the
/// start reads participants or fails the status guard here.
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.participant_id.trim().is_empty() {
        return Err(AppError::Validation("Participant id must not be empty".into()));
    }

    for _ in 0..CAS_RETRIES {
        let session = state.session_repo.find_by_id(&session_id).await?
            .ok_or(AppError::NotFound("Session not found".into()))?;

        if session.status != STATUS_SCHEDULED {
            return Err(AppError::InvalidState(format!(
                "registration is closed, session is {}", session.status
            )));
        }

        let mut participants = session.participants();
        if participants.len() as i32 >= session.max_participants {
            return Err(AppError::SessionFull);
        }
        if participants.iter().any(|p| p == &payload.participant_id) {
            return Err(AppError::AlreadyRegistered);
        }

        participants.push(payload.participant_id.clone());
        let new_json = serde_json::to_string(&participants)
            .map_err(|e| AppError::InternalWithMsg(format!("Failed to encode participants: {}", e)))?;

        if state.session_repo
            .append_participant(&session.id, &session.participants_json, &new_json)
            .await?
        {
            info!("Registered participant {} for session {}", payload.participant_id, session_id);
            // The CAS succeeded against exactly the row we read, so the
            // updated session is known without a second round trip.
            let mut updated = session;
            updated.participants_json = new_json;
            return Ok(Json(SessionResponse::from(updated)));
        }

        warn!("Registration CAS miss for session {}, retrying", session_id);
    }

    Err(AppError::Conflict("Session was updated concurrently, please retry".into()))
}

/// Freezes the participant list, computes the round-robin schedule and
/// flips SCHEDULED -> ACTIVE in one conditional update, then hands every
/// participant their full personal schedule via the notifier. Notify
/// failures are logged and do not roll the start back.
///
/// The activation is a compare-and-set on both status and the
/// participant list the schedule was computed from: a registration that
/// lands between the read and the update makes the CAS miss, and the
/// schedule is recomputed so nobody is left out of it.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    for _ in 0..CAS_RETRIES {
        let session = state.session_repo.find_by_id(&session_id).await?
            .ok_or(AppError::NotFound("Session not found".into()))?;

        if session.status != STATUS_SCHEDULED {
            return Err(AppError::InvalidState(format!(
                "cannot start a session that is {}", session.status
            )));
        }

        let participants = session.participants();
        let matches = generate_matches(&participants, session.start_time, session.duration_min);
        let matches_json = serde_json::to_string(&matches)
            .map_err(|e| AppError::InternalWithMsg(format!("Failed to encode matches: {}", e)))?;

        if !state.session_repo
            .mark_active(&session_id, &matches_json, &session.participants_json)
            .await?
        {
            warn!("Start CAS miss for session {}, retrying", session_id);
            continue;
        }

        info!(
            "Started session {} with {} participants, {} matches",
            session_id, participants.len(), matches.len()
        );

        let mut updated = session;
        updated.status = STATUS_ACTIVE.to_string();
        updated.matches_json = matches_json;

        let schedules = build_schedules(&participants, &matches);
        if let Err(e) = state.notifier.notify_session_started(&updated, &schedules).await {
            warn!("Failed to notify participants of session {}: {}", session_id, e);
        }

        return Ok(Json(SessionResponse::from(updated)));
    }

    Err(AppError::Conflict("Session was updated concurrently, please retry".into()))
}

pub async fn complete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.status != STATUS_ACTIVE {
        return Err(AppError::InvalidState(format!(
            "cannot complete a session that is {}", session.status
        )));
    }

    if !state.session_repo.mark_completed(&session_id).await? {
        return Err(AppError::InvalidState("session was completed concurrently".into()));
    }

    info!("Completed session {}", session_id);
    let updated = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;
    Ok(Json(SessionResponse::from(updated)))
}

/// The meeting happening right now for one participant, or JSON null.
/// Clients poll this to drive the "current room" view; `at` overrides
/// the clock for testing.
pub async fn get_current_match(
    State(state): State<Arc<AppState>>,
    Path((session_id, participant_id)): Path<(String, String)>,
    Query(query): Query<InstantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if !session.is_registered(&participant_id) {
        return Err(AppError::NotFound("Participant not registered for this session".into()));
    }

    let now = query.at.unwrap_or_else(Utc::now);
    Ok(Json(current_match(&session, &participant_id, now)))
}

pub async fn get_personal_schedule(
    State(state): State<Arc<AppState>>,
    Path((session_id, participant_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if !session.is_registered(&participant_id) {
        return Err(AppError::NotFound("Participant not registered for this session".into()));
    }

    Ok(Json(personal_schedule(&session.matches(), &participant_id)))
}

pub async fn get_upcoming_matches(
    State(state): State<Arc<AppState>>,
    Path((session_id, participant_id)): Path<(String, String)>,
    Query(query): Query<InstantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if !session.is_registered(&participant_id) {
        return Err(AppError::NotFound("Participant not registered for this session".into()));
    }

    let now = query.at.unwrap_or_else(Utc::now);
    Ok(Json(upcoming_matches(&session, &participant_id, now)))
}
