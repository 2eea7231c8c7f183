use crate::domain::{models::session::NetworkingSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSessionRepo {
    pool: SqlitePool,
}

impl SqliteSessionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepo {
    async fn create(&self, session: &NetworkingSession) -> Result<NetworkingSession, AppError> {
        sqlx::query_as::<_, NetworkingSession>(
            r#"INSERT INTO networking_sessions (
                id, event_id, name, description, start_time, duration_min,
                max_participants, participants_json, matches_json, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&session.id)
            .bind(&session.event_id)
            .bind(&session.name)
            .bind(&session.description)
            .bind(session.start_time)
            .bind(session.duration_min)
            .bind(session.max_participants)
            .bind(&session.participants_json)
            .bind(&session.matches_json)
            .bind(&session.status)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<NetworkingSession>, AppError> {
        sqlx::query_as::<_, NetworkingSession>(
            "SELECT * FROM networking_sessions WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<NetworkingSession>, AppError> {
        sqlx::query_as::<_, NetworkingSession>(
            "SELECT * FROM networking_sessions WHERE event_id = ? ORDER BY start_time ASC"
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM networking_sessions WHERE event_id = ?"
        )
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn append_participant(
        &self,
        id: &str,
        expected_participants_json: &str,
        new_participants_json: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"UPDATE networking_sessions
               SET participants_json = ?
               WHERE id = ? AND status = 'SCHEDULED' AND participants_json = ?"#
        )
            .bind(new_participants_json)
            .bind(id)
            .bind(expected_participants_json)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_active(
        &self,
        id: &str,
        matches_json: &str,
        expected_participants_json: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"UPDATE networking_sessions
               SET status = 'ACTIVE', matches_json = ?
               WHERE id = ? AND status = 'SCHEDULED' AND participants_json = ?"#
        )
            .bind(matches_json)
            .bind(id)
            .bind(expected_participants_json)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_completed(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE networking_sessions SET status = 'COMPLETED' WHERE id = ? AND status = 'ACTIVE'"
        )
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM networking_sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }
        Ok(())
    }
}
