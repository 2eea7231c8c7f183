use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::session::{Match, NetworkingSession};
use crate::domain::services::matching::total_rounds;

/// Session as exposed over the API: the JSON columns are parsed into
/// proper arrays so clients never see the storage encoding.
#[derive(Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub max_participants: i32,
    pub participants: Vec<String>,
    pub matches: Vec<Match>,
    pub status: String,
    pub rounds: usize,
    pub created_at: DateTime<Utc>,
}

impl From<NetworkingSession> for SessionResponse {
    fn from(session: NetworkingSession) -> Self {
        let participants = session.participants();
        let matches = session.matches();
        let rounds = total_rounds(participants.len());
        Self {
            id: session.id,
            event_id: session.event_id,
            name: session.name,
            description: session.description,
            start_time: session.start_time,
            duration_min: session.duration_min,
            max_participants: session.max_participants,
            participants,
            matches,
            status: session.status,
            rounds,
            created_at: session.created_at,
        }
    }
}
