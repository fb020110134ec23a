//! Functional tests for the application flows.
//!
//! These tests exercise the full call stack from the service layer
//! through repositories, validating end-to-end functionality against the
//! in-memory backend.

use studyplan_rust::api::{SubjectId, UserId};
use studyplan_rust::db::repositories::LocalRepository;
use studyplan_rust::db::repository::{CatalogRepository, RepositoryError};
use studyplan_rust::models::NewTopic;
use studyplan_rust::services::{self, catalog, users};

/// Helper to create a registered user with one subject.
async fn seed_user(repo: &LocalRepository, name: &str) -> (UserId, SubjectId) {
    let user = users::register(repo, name, "hunter2", &format!("{}@example.com", name))
        .await
        .unwrap();
    let subject = catalog::add_subject(repo, user, "Maths").await.unwrap();
    (user, subject)
}

fn topic(subject: SubjectId, name: &str, hours: f64, difficulty: i32) -> NewTopic {
    NewTopic {
        subject_id: subject,
        name: name.to_string(),
        estimated_hours: hours,
        difficulty,
        scheduled_at: None,
        material_filename: None,
    }
}

// =========================================================
// Schedule Generation Flow
// =========================================================

#[tokio::test]
async fn test_schedule_full_flow() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;

    catalog::add_topic(&repo, user, topic(subject, "integrals", 3.0, 5))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(subject, "vectors", 2.0, 3))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(subject, "history essay", 4.0, 1))
        .await
        .unwrap();

    let view = services::generate_schedule(&repo, user, 8.0).await.unwrap();

    assert_eq!(view.entries.len(), 3);
    assert_eq!(view.total_hours, 8.0);
    assert_eq!(view.entries[0].topic, "integrals");
    assert_eq!(view.entries[1].topic, "vectors");
    assert_eq!(
        view.entries[2].topic,
        "history essay (Partial Session - 180 mins)"
    );
}

#[tokio::test]
async fn test_completed_topics_leave_the_schedule() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;

    let hard = catalog::add_topic(&repo, user, topic(subject, "hard", 2.0, 5))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(subject, "easy", 1.0, 1))
        .await
        .unwrap();

    assert!(catalog::complete_topic(&repo, user, hard).await.unwrap());

    let view = services::generate_schedule(&repo, user, 8.0).await.unwrap();
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].topic, "easy");

    // And it shows up in history instead.
    let history = services::fetch_history(&repo, user).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sessions[0].topic, "hard");
}

#[tokio::test]
async fn test_schedule_is_isolated_per_user() {
    let repo = LocalRepository::new();
    let (ada, ada_subject) = seed_user(&repo, "ada").await;
    let (bob, _) = seed_user(&repo, "bob").await;

    catalog::add_topic(&repo, ada, topic(ada_subject, "calculus", 2.0, 4))
        .await
        .unwrap();

    let ada_view = services::generate_schedule(&repo, ada, 8.0).await.unwrap();
    let bob_view = services::generate_schedule(&repo, bob, 8.0).await.unwrap();

    assert_eq!(ada_view.entries.len(), 1);
    assert!(bob_view.entries.is_empty());
}

// =========================================================
// Dashboard and Charts
// =========================================================

#[tokio::test]
async fn test_dashboard_tracks_completion() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;

    let first = catalog::add_topic(&repo, user, topic(subject, "a", 2.0, 4))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(subject, "b", 3.0, 2))
        .await
        .unwrap();

    let before = services::dashboard_summary(&repo, user).await.unwrap();
    assert_eq!(before.total_topics, 2);
    assert_eq!(before.completed_topics, 0);
    assert_eq!(before.completion_percentage, 0.0);
    assert_eq!(before.total_estimated_hours, 5.0);
    assert_eq!(before.avg_difficulty, 3.0);

    catalog::complete_topic(&repo, user, first).await.unwrap();

    let after = services::dashboard_summary(&repo, user).await.unwrap();
    assert_eq!(after.completed_topics, 1);
    assert_eq!(after.remaining_topics, 1);
    assert_eq!(after.completion_percentage, 50.0);
}

#[tokio::test]
async fn test_chart_data_flow() {
    let repo = LocalRepository::new();
    let (user, maths) = seed_user(&repo, "ada").await;
    let biology = catalog::add_subject(&repo, user, "Biology").await.unwrap();

    catalog::add_topic(&repo, user, topic(maths, "integrals", 2.0, 5))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(maths, "vectors", 1.0, 3))
        .await
        .unwrap();
    catalog::add_topic(&repo, user, topic(biology, "cells", 1.0, 2))
        .await
        .unwrap();

    let data = services::chart_data(&repo, user).await.unwrap();

    assert_eq!(data.subjects.len(), 2);
    let maths_avg = data
        .subjects
        .iter()
        .find(|s| s.subject_name == "Maths")
        .unwrap();
    assert_eq!(maths_avg.avg_difficulty, 4.0);

    // Topic ranking is difficulty-descending.
    let difficulties: Vec<i32> = data.topics.iter().map(|t| t.difficulty).collect();
    assert_eq!(difficulties, vec![5, 3, 2]);
}

// =========================================================
// Subjects View and Duplicates
// =========================================================

#[tokio::test]
async fn test_subjects_view_includes_topics() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;
    catalog::add_topic(&repo, user, topic(subject, "integrals", 2.0, 5))
        .await
        .unwrap();

    let subjects = catalog::subjects_with_topics(&repo, user).await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].subject_name, "Maths");
    assert_eq!(subjects[0].topics.len(), 1);
    assert!(!subjects[0].topics[0].is_completed);
}

#[tokio::test]
async fn test_duplicate_subject_is_conflict() {
    let repo = LocalRepository::new();
    let (user, _) = seed_user(&repo, "ada").await;

    let err = catalog::add_subject(&repo, user, "Maths").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict { .. }));
}

#[tokio::test]
async fn test_topic_under_foreign_subject_is_not_found() {
    let repo = LocalRepository::new();
    let (_, ada_subject) = seed_user(&repo, "ada").await;
    let (bob, _) = seed_user(&repo, "bob").await;

    let err = catalog::add_topic(&repo, bob, topic(ada_subject, "sneaky", 1.0, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

// =========================================================
// Alarms
// =========================================================

#[tokio::test]
async fn test_alarm_flow_with_snooze() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;

    let mut with_alarm = topic(subject, "review", 1.0, 2);
    with_alarm.scheduled_at = Some(
        chrono::NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap(),
    );
    let topic_id = catalog::add_topic(&repo, user, with_alarm).await.unwrap();
    catalog::add_topic(&repo, user, topic(subject, "no alarm", 1.0, 2))
        .await
        .unwrap();

    let alarms = catalog::scheduled_alarms(&repo, user).await.unwrap();
    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].scheduled_at, "2026-08-07T18:00:00");

    // Default snooze pushes by five minutes.
    assert!(catalog::snooze_topic(&repo, user, topic_id, None)
        .await
        .unwrap());
    let alarms = catalog::scheduled_alarms(&repo, user).await.unwrap();
    assert_eq!(alarms[0].scheduled_at, "2026-08-07T18:05:00");
}

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_topic_creation() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let repo_clone = repo.clone();
            tokio::spawn(async move {
                repo_clone
                    .add_topic(
                        user,
                        NewTopic {
                            subject_id: subject,
                            name: format!("concurrent_{}", i),
                            estimated_hours: 1.0,
                            difficulty: (i % 5) + 1,
                            scheduled_at: None,
                            material_filename: None,
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let topics = repo.fetch_topics_for_user(user).await.unwrap();
    assert_eq!(topics.len(), 5);
}

#[tokio::test]
async fn test_concurrent_schedule_reads() {
    let repo = LocalRepository::new();
    let (user, subject) = seed_user(&repo, "ada").await;
    catalog::add_topic(&repo, user, topic(subject, "calculus", 2.0, 4))
        .await
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let repo_clone = repo.clone();
            tokio::spawn(
                async move { services::generate_schedule(&repo_clone, user, 8.0).await },
            )
        })
        .collect();

    for handle in handles {
        let view = handle.await.unwrap().unwrap();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.total_hours, 2.0);
    }
}
