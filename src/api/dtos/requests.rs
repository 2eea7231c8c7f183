use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub location: String,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub max_participants: i32,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub participant_id: String,
}

#[derive(Deserialize)]
pub struct InstantQuery {
    pub at: Option<DateTime<Utc>>,
}
