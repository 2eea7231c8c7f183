use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateEventRequest;
use crate::domain::models::event::Event;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("Slug must not be empty".into()));
    }

    let event = Event::new(payload.slug, payload.title, payload.description, payload.location);
    let created = state.event_repo.create(&event).await?;

    info!("Created event {}", created.slug);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let sessions = state.session_repo.count_by_event(&event.id).await?;
    if sessions > 0 {
        return Err(AppError::Conflict("Cannot delete event with existing sessions".into()));
    }

    state.event_repo.delete(&event.id).await?;
    info!("Deleted event {}", slug);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
