//! Unit tests for the daily schedule builder.

use super::*;
use crate::models::PrioritizedTopic;

fn topic(id: i64, hours: f64, difficulty: i32) -> PrioritizedTopic {
    PrioritizedTopic {
        topic_id: TopicId::new(id),
        subject_name: format!("Subject {}", id),
        topic_name: format!("Topic {}", id),
        estimated_hours: hours,
        difficulty,
        material_filename: None,
        scheduled_at: None,
    }
}

#[test]
fn test_two_full_then_partial() {
    // 3h + 2h fit fully; the 4h topic gets the remaining 3h as a partial.
    let topics = vec![topic(1, 3.0, 5), topic(2, 2.0, 3), topic(3, 4.0, 1)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 3);
    assert_eq!(schedule.total_hours, 8.0);
    assert_eq!(schedule.entries[0].time_needed, 3.0);
    assert_eq!(schedule.entries[1].time_needed, 2.0);
    assert_eq!(schedule.entries[2].time_needed, 3.0);
    assert_eq!(
        schedule.entries[2].topic,
        "Topic 3 (Partial Session - 180 mins)"
    );
}

#[test]
fn test_single_oversized_topic_becomes_partial() {
    let topics = vec![topic(1, 10.0, 2)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 1);
    assert_eq!(schedule.total_hours, 8.0);
    assert_eq!(schedule.entries[0].time_needed, 8.0);
    assert_eq!(
        schedule.entries[0].topic,
        "Topic 1 (Partial Session - 480 mins)"
    );
}

#[test]
fn test_empty_input() {
    let schedule = build_schedule(&[], 8.0).unwrap();

    assert!(schedule.entries.is_empty());
    assert_eq!(schedule.total_hours, 0.0);
}

#[test]
fn test_leftover_below_threshold_drops_topic_and_stops() {
    // First topic consumes 7.95h, leaving 0.05h: below the 0.1h floor, so
    // the second topic is dropped and the third is never considered.
    let topics = vec![topic(1, 7.95, 3), topic(2, 0.05, 1), topic(3, 0.01, 1)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 1);
    assert_eq!(schedule.total_hours, 7.95);
}

#[test]
fn test_budget_smaller_than_partial_floor() {
    let topics = vec![topic(1, 1.0, 3)];

    let schedule = build_schedule(&topics, 0.05).unwrap();

    assert!(schedule.entries.is_empty());
    assert_eq!(schedule.total_hours, 0.0);
}

#[test]
fn test_exact_fit_is_a_full_entry() {
    // 5h + 3h exactly fill the budget; neither entry is partial.
    let topics = vec![topic(1, 5.0, 4), topic(2, 3.0, 2)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 2);
    assert_eq!(schedule.total_hours, 8.0);
    assert!(!schedule.entries[0].topic.contains("Partial"));
    assert!(!schedule.entries[1].topic.contains("Partial"));
}

#[test]
fn test_exact_fit_then_next_topic_dropped() {
    let topics = vec![topic(1, 8.0, 4), topic(2, 1.0, 2)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 1);
    assert_eq!(schedule.total_hours, 8.0);
}

#[test]
fn test_total_never_exceeds_limit() {
    let topics: Vec<PrioritizedTopic> = (0..20)
        .map(|i| topic(i, 0.75 + (i as f64) * 0.25, ((i % 5) + 1) as i32))
        .collect();

    for limit in [0.5, 1.0, 2.5, 8.0, 13.75] {
        let schedule = build_schedule(&topics, limit).unwrap();
        assert!(
            schedule.total_hours <= limit,
            "total {} exceeds limit {}",
            schedule.total_hours,
            limit
        );
    }
}

#[test]
fn test_at_most_one_partial_and_it_is_last() {
    let topics: Vec<PrioritizedTopic> =
        (0..10).map(|i| topic(i, 1.6, ((i % 5) + 1) as i32)).collect();

    let schedule = build_schedule(&topics, 8.5).unwrap();

    let partials: Vec<usize> = schedule
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.topic.contains("Partial Session"))
        .map(|(i, _)| i)
        .collect();
    assert!(partials.len() <= 1);
    if let Some(&idx) = partials.first() {
        assert_eq!(idx, schedule.entries.len() - 1);
    }
}

#[test]
fn test_order_preserved_and_idempotent() {
    let topics = vec![topic(7, 2.0, 5), topic(3, 2.0, 4), topic(9, 2.0, 3)];

    let first = build_schedule(&topics, 8.0).unwrap();
    let second = build_schedule(&topics, 8.0).unwrap();

    let ids: Vec<i64> = first.entries.iter().map(|e| e.topic_id.value()).collect();
    assert_eq!(ids, vec![7, 3, 9]);
    assert_eq!(first, second);
}

#[test]
fn test_partial_minutes_round_to_nearest() {
    // 8.0 - 7.49 leaves 0.51h = 30.6 minutes, displayed as 31.
    let topics = vec![topic(1, 7.49, 3), topic(2, 2.0, 2)];

    let schedule = build_schedule(&topics, 8.0).unwrap();

    assert_eq!(schedule.entries.len(), 2);
    assert!(schedule.entries[1].topic.ends_with("(Partial Session - 31 mins)"));
}

#[test]
fn test_entry_carries_topic_metadata() {
    let mut t = topic(42, 2.0, 4);
    t.material_filename = Some("notes.pdf".to_string());
    t.scheduled_at = Some(
        chrono::NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    );

    let schedule = build_schedule(&[t], 8.0).unwrap();

    let entry = &schedule.entries[0];
    assert_eq!(entry.topic_id.value(), 42);
    assert_eq!(entry.difficulty, 4);
    assert_eq!(entry.filename.as_deref(), Some("notes.pdf"));
    assert_eq!(
        entry.scheduled_datetime.as_deref(),
        Some("2026-01-05 09:00 AM")
    );
}

#[test]
fn test_rejects_non_positive_limit() {
    assert_eq!(
        build_schedule(&[], 0.0),
        Err(ScheduleError::InvalidDailyLimit(0.0))
    );
    assert!(build_schedule(&[topic(1, 1.0, 1)], -2.0).is_err());
}

#[test]
fn test_rejects_non_positive_estimate() {
    let topics = vec![topic(1, 1.0, 2), topic(2, 0.0, 3)];

    let err = build_schedule(&topics, 8.0).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::InvalidEstimate {
            topic_id: TopicId::new(2),
            hours: 0.0
        }
    );
}
