//! Tests for API types: typed ids and JSON shapes of the view DTOs.

use studyplan_rust::api::*;

#[test]
fn test_id_types_roundtrip() {
    let user = UserId::new(7);
    let subject = SubjectId::new(8);
    let topic = TopicId::new(9);

    assert_eq!(user.value(), 7);
    assert_eq!(subject.value(), 8);
    assert_eq!(topic.value(), 9);

    assert_eq!(i64::from(user), 7);
    assert_eq!(format!("{}", topic), "9");
}

#[test]
fn test_id_serializes_as_plain_number() {
    let json = serde_json::to_string(&TopicId::new(42)).unwrap();
    assert_eq!(json, "42");

    let back: TopicId = serde_json::from_str("42").unwrap();
    assert_eq!(back, TopicId::new(42));
}

#[test]
fn test_schedule_entry_json_shape() {
    let entry = ScheduleEntry {
        subject: "Maths".to_string(),
        topic: "Integrals (Partial Session - 90 mins)".to_string(),
        time_needed: 1.5,
        difficulty: 4,
        topic_id: TopicId::new(3),
        filename: Some("notes.pdf".to_string()),
        scheduled_datetime: None,
    };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["subject"], "Maths");
    assert_eq!(value["time_needed"], 1.5);
    assert_eq!(value["topic_id"], 3);
    assert_eq!(value["filename"], "notes.pdf");
    // Absent optional timestamp serializes as null.
    assert!(value["scheduled_datetime"].is_null());
}

#[test]
fn test_daily_schedule_default_is_empty() {
    let schedule = DailySchedule::default();
    assert!(schedule.entries.is_empty());
    assert_eq!(schedule.total_hours, 0.0);
}

#[test]
fn test_reminder_focus_omitted_when_done() {
    let done = ReminderMessage {
        message: "all done".to_string(),
        focus: None,
    };
    let value = serde_json::to_value(&done).unwrap();
    assert!(value.get("focus").is_none());

    let busy = ReminderMessage {
        message: "go study".to_string(),
        focus: Some(ReminderFocus {
            subject: "Maths".to_string(),
            topic: "Integrals".to_string(),
            difficulty: 5,
        }),
    };
    let value = serde_json::to_value(&busy).unwrap();
    assert_eq!(value["focus"]["difficulty"], 5);
}

#[test]
fn test_dashboard_summary_json_fields() {
    let summary = DashboardSummary {
        total_topics: 4,
        completed_topics: 1,
        remaining_topics: 3,
        total_estimated_hours: 9.5,
        avg_difficulty: 3.2,
        completion_percentage: 25.0,
    };

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["total_topics"], 4);
    assert_eq!(value["remaining_topics"], 3);
    assert_eq!(value["completion_percentage"], 25.0);
}
