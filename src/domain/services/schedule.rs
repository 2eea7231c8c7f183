use chrono::{DateTime, Duration, Utc};
use crate::domain::models::session::{Match, NetworkingSession, STATUS_ACTIVE};

/// A participant's sub-schedule: every match they appear in, time-ordered.
pub fn personal_schedule(matches: &[Match], participant_id: &str) -> Vec<Match> {
    let mut schedule: Vec<Match> = matches
        .iter()
        .filter(|m| m.involves(participant_id))
        .cloned()
        .collect();
    schedule.sort_by_key(|m| m.start_time);
    schedule
}

/// Personal schedules for every participant, in registration order.
/// This is the payload handed to the notifier at session start.
pub fn build_schedules(
    participants: &[String],
    matches: &[Match],
) -> Vec<(String, Vec<Match>)> {
    participants
        .iter()
        .map(|p| (p.clone(), personal_schedule(matches, p)))
        .collect()
}

/// The match covering instant `now` for the given participant, if any.
///
/// Silent on lifecycle: a session that is not ACTIVE has no current
/// match. The meeting window is `[start_time, start_time + duration)`,
/// end exclusive. Per-participant matches never overlap, so at most one
/// match can satisfy the predicate.
pub fn current_match(
    session: &NetworkingSession,
    participant_id: &str,
    now: DateTime<Utc>,
) -> Option<Match> {
    if session.status != STATUS_ACTIVE {
        return None;
    }

    let duration = Duration::minutes(session.duration_min as i64);
    session
        .matches()
        .into_iter()
        .find(|m| m.involves(participant_id) && m.start_time <= now && now < m.start_time + duration)
}

/// The participant's matches that have not started yet at `now`.
pub fn upcoming_matches(
    session: &NetworkingSession,
    participant_id: &str,
    now: DateTime<Utc>,
) -> Vec<Match> {
    personal_schedule(&session.matches(), participant_id)
        .into_iter()
        .filter(|m| m.start_time > now)
        .collect()
}
