use chrono::{DateTime, Duration, Utc};
use crate::domain::models::session::Match;

/// Generates the full round-robin meeting schedule for a session.
///
/// Circle method: one seat is held fixed while the others rotate, one
/// rotation step per round. For odd participant counts a phantom "bye"
/// seat is added; whoever lands opposite it sits that round out. This
/// gives every unordered pair exactly one meeting, no self-matches, and
/// at most one meeting per participant per round.
///
/// Round `r` starts at `session_start + r * duration_min`. Room ids are
/// `room-{round}-{slot}` with `slot` counting the meetings actually
/// emitted in that round, so they are unique and stable within the
/// session.
///
/// Pure and deterministic: identical inputs produce identical output,
/// pair order and room ids included. Fewer than two participants yields
/// an empty schedule.
pub fn generate_matches(
    participants: &[String],
    session_start: DateTime<Utc>,
    duration_min: i32,
) -> Vec<Match> {
    let n = participants.len();
    if n < 2 {
        return Vec::new();
    }

    let seats = if n % 2 == 0 { n } else { n + 1 };
    let rounds = seats - 1;

    let mut matches = Vec::with_capacity(n * (n - 1) / 2);

    for round in 0..rounds {
        let round_start = session_start + Duration::minutes(round as i64 * duration_min as i64);
        let mut slot = 0usize;

        for k in 0..seats / 2 {
            let idx1 = (round + k) % (seats - 1);
            let idx2 = if k == 0 {
                seats - 1
            } else {
                (round + seats - 1 - k) % (seats - 1)
            };

            // idx == n is the bye seat (odd n only): that participant idles.
            if idx1 >= n || idx2 >= n {
                continue;
            }

            matches.push(Match {
                user1: participants[idx1].clone(),
                user2: participants[idx2].clone(),
                start_time: round_start,
                room_id: format!("room-{}-{}", round, slot),
            });
            slot += 1;
        }
    }

    matches
}

/// Wall-clock length of the whole session: number of rounds times the
/// per-meeting duration. Zero when there is nothing to schedule.
pub fn total_rounds(participant_count: usize) -> usize {
    match participant_count {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}
