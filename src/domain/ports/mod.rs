use crate::domain::models::{event::Event, session::{Match, NetworkingSession}};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Persistence for networking sessions. The three mutating operations
/// beyond `create`/`delete` are conditional single-statement updates so
/// that registration and lifecycle transitions never race each other:
///
/// - `append_participant` compares against the caller's previously read
///   participant list and only applies while the session is SCHEDULED.
/// - `mark_active` writes status and matches together, guarded by
///   status = SCHEDULED and the participant list the schedule was
///   computed from, so a registration landing after that read forces
///   the start to recompute.
/// - `mark_completed` is guarded by status = ACTIVE.
///
/// Each returns `false` when the guard did not hold (lost race or wrong
/// lifecycle stage); the caller decides how to surface that.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &NetworkingSession) -> Result<NetworkingSession, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<NetworkingSession>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<NetworkingSession>, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn append_participant(
        &self,
        id: &str,
        expected_participants_json: &str,
        new_participants_json: &str,
    ) -> Result<bool, AppError>;
    async fn mark_active(
        &self,
        id: &str,
        matches_json: &str,
        expected_participants_json: &str,
    ) -> Result<bool, AppError>;
    async fn mark_completed(&self, id: &str) -> Result<bool, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Delivery of personal schedules when a session starts. The payload
/// contract is each participant's full ordered sub-schedule, not just
/// their next match; the transport is up to the implementation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_session_started(
        &self,
        session: &NetworkingSession,
        schedules: &[(String, Vec<Match>)],
    ) -> Result<(), AppError>;
}
