use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;

use networking_backend::domain::services::matching::{generate_matches, total_rounds};

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_fewer_than_two_participants_yields_no_matches() {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    assert!(generate_matches(&[], start, 10).is_empty());
    assert!(generate_matches(&ids(&["alice"]), start, 10).is_empty());
}

#[test]
fn test_four_participants_three_rounds_full_coverage() {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let participants = ids(&["A", "B", "C", "D"]);
    let matches = generate_matches(&participants, start, 10);

    assert_eq!(matches.len(), 6);
    assert_eq!(total_rounds(4), 3);

    // Round start times: T, T+10, T+20, two matches per round.
    for round in 0..3 {
        let round_start = start + Duration::minutes(round * 10);
        assert_eq!(matches.iter().filter(|m| m.start_time == round_start).count(), 2);
    }

    // Every unordered pair appears exactly once.
    let mut pairs = HashSet::new();
    for m in &matches {
        assert_ne!(m.user1, m.user2);
        let mut pair = [m.user1.as_str(), m.user2.as_str()];
        pair.sort();
        assert!(pairs.insert((pair[0].to_string(), pair[1].to_string())));
    }
    assert_eq!(pairs.len(), 6);
}

#[test]
fn test_odd_count_uses_bye_rounds() {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let participants = ids(&["A", "B", "C"]);
    let matches = generate_matches(&participants, start, 5);

    // Bye policy: 3 rounds, one meeting per round, one participant idle.
    assert_eq!(matches.len(), 3);
    assert_eq!(total_rounds(3), 3);

    for round in 0..3 {
        let round_start = start + Duration::minutes(round * 5);
        let in_round: Vec<_> = matches.iter().filter(|m| m.start_time == round_start).collect();
        assert_eq!(in_round.len(), 1);
    }

    let mut pairs = HashSet::new();
    for m in &matches {
        assert_ne!(m.user1, m.user2);
        let mut pair = [m.user1.as_str(), m.user2.as_str()];
        pair.sort();
        pairs.insert((pair[0].to_string(), pair[1].to_string()));
    }
    assert_eq!(pairs.len(), 3);

    // Each participant idles exactly one round.
    for p in &participants {
        assert_eq!(matches.iter().filter(|m| m.involves(p)).count(), 2);
    }
}

#[test]
fn test_no_self_match_and_full_coverage_across_sizes() {
    let start = Utc.with_ymd_and_hms(2030, 6, 1, 14, 0, 0).unwrap();

    for n in 2..=9usize {
        let participants: Vec<String> = (0..n).map(|i| format!("user-{}", i)).collect();
        let matches = generate_matches(&participants, start, 7);

        assert_eq!(matches.len(), n * (n - 1) / 2, "n = {}", n);

        let mut pairs = HashSet::new();
        for m in &matches {
            assert_ne!(m.user1, m.user2, "self-match for n = {}", n);
            let mut pair = [m.user1.as_str(), m.user2.as_str()];
            pair.sort();
            assert!(
                pairs.insert((pair[0].to_string(), pair[1].to_string())),
                "duplicate pair {:?} for n = {}", pair, n
            );
        }
    }
}

#[test]
fn test_no_overlapping_meetings_per_participant() {
    let start = Utc.with_ymd_and_hms(2030, 3, 15, 10, 0, 0).unwrap();
    let duration = 12i64;

    for n in [4usize, 5, 8, 9] {
        let participants: Vec<String> = (0..n).map(|i| format!("user-{}", i)).collect();
        let matches = generate_matches(&participants, start, duration as i32);

        for p in &participants {
            let mut times: Vec<_> = matches
                .iter()
                .filter(|m| m.involves(p))
                .map(|m| m.start_time)
                .collect();
            times.sort();
            for pair in times.windows(2) {
                assert!(
                    pair[1] - pair[0] >= Duration::minutes(duration),
                    "overlap for {} with n = {}", p, n
                );
            }
        }
    }
}

#[test]
fn test_deterministic_output() {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let participants = ids(&["A", "B", "C", "D", "E"]);

    let first = generate_matches(&participants, start, 10);
    let second = generate_matches(&participants, start, 10);

    assert_eq!(first, second);
}

#[test]
fn test_room_ids_unique_within_session() {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let participants: Vec<String> = (0..7).map(|i| format!("user-{}", i)).collect();
    let matches = generate_matches(&participants, start, 10);

    let rooms: HashSet<_> = matches.iter().map(|m| m.room_id.as_str()).collect();
    assert_eq!(rooms.len(), matches.len());
    assert!(matches.iter().all(|m| m.room_id.starts_with("room-")));
}
