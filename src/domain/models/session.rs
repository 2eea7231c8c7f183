use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_SCHEDULED: &str = "SCHEDULED";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// One pairwise meeting within a session. Immutable once the session
/// schedule is generated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Match {
    pub user1: String,
    pub user2: String,
    pub start_time: DateTime<Utc>,
    pub room_id: String,
}

impl Match {
    pub fn involves(&self, participant_id: &str) -> bool {
        self.user1 == participant_id || self.user2 == participant_id
    }

    pub fn partner_of(&self, participant_id: &str) -> Option<&str> {
        if self.user1 == participant_id {
            Some(&self.user2)
        } else if self.user2 == participant_id {
            Some(&self.user1)
        } else {
            None
        }
    }
}

/// A speed-networking session. Participants register while SCHEDULED;
/// the match schedule is computed once, at the SCHEDULED -> ACTIVE
/// transition, and frozen afterwards.
///
/// `participants_json` and `matches_json` hold the persisted JSON
/// representation; accessors parse on demand.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NetworkingSession {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub max_participants: i32,
    pub participants_json: String,
    pub matches_json: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewSessionParams {
    pub event_id: String,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub max_participants: i32,
}

impl NetworkingSession {
    pub fn new(params: NewSessionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            name: params.name,
            description: params.description,
            start_time: params.start_time,
            duration_min: params.duration_min,
            max_participants: params.max_participants,
            participants_json: "[]".to_string(),
            matches_json: "[]".to_string(),
            status: STATUS_SCHEDULED.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Participant ids in registration order.
    pub fn participants(&self) -> Vec<String> {
        serde_json::from_str(&self.participants_json).unwrap_or_default()
    }

    pub fn matches(&self) -> Vec<Match> {
        serde_json::from_str(&self.matches_json).unwrap_or_default()
    }

    pub fn is_registered(&self, participant_id: &str) -> bool {
        self.participants().iter().any(|p| p == participant_id)
    }
}
