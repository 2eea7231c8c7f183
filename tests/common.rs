use networking_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_session_repo::SqliteSessionRepo,
    },
    domain::models::session::{Match, NetworkingSession},
    domain::ports::Notifier,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::Request,
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

#[allow(dead_code)]
pub struct RecordedNotification {
    pub session_id: String,
    pub schedules: Vec<(String, Vec<Match>)>,
}

/// Captures notification payloads so tests can assert the content
/// contract (full personal schedule per participant).
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<RecordedNotification>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_session_started(
        &self,
        session: &NetworkingSession,
        schedules: &[(String, Vec<Match>)],
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(RecordedNotification {
            session_id: session.id.clone(),
            schedules: schedules.to_vec(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifier: RecordingNotifier,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
        };

        let notifier = RecordingNotifier::default();

        let state = Arc::new(AppState {
            config,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            notifier: Arc::new(notifier.clone()),
        });

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, notifier }
    }

    #[allow(dead_code)]
    pub async fn post_json(&self, uri: &str, body: &Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    #[allow(dead_code)]
    pub async fn delete(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
    }
}
