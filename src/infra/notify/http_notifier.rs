use crate::domain::models::session::{Match, NetworkingSession};
use crate::domain::ports::Notifier;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// Posts personal schedules to an external notification service which
/// handles the actual delivery (email, push, in-app).
pub struct HttpNotifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpNotifier {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct MeetingPayload {
    room_id: String,
    partner_id: String,
    start_time: DateTime<Utc>,
}

#[derive(Serialize)]
struct ParticipantSchedulePayload {
    participant_id: String,
    meetings: Vec<MeetingPayload>,
}

#[derive(Serialize)]
struct SessionStartedPayload {
    session_id: String,
    session_name: String,
    duration_min: i32,
    schedules: Vec<ParticipantSchedulePayload>,
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify_session_started(
        &self,
        session: &NetworkingSession,
        schedules: &[(String, Vec<Match>)],
    ) -> Result<(), AppError> {
        let payload = SessionStartedPayload {
            session_id: session.id.clone(),
            session_name: session.name.clone(),
            duration_min: session.duration_min,
            schedules: schedules
                .iter()
                .map(|(participant_id, matches)| ParticipantSchedulePayload {
                    participant_id: participant_id.clone(),
                    meetings: matches
                        .iter()
                        .map(|m| MeetingPayload {
                            room_id: m.room_id.clone(),
                            partner_id: m.partner_of(participant_id).unwrap_or_default().to_string(),
                            start_time: m.start_time,
                        })
                        .collect(),
                })
                .collect(),
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notification service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notification service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
