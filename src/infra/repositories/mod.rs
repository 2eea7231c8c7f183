pub mod sqlite_event_repo;
pub mod sqlite_session_repo;

pub mod postgres_event_repo;
pub mod postgres_session_repo;
