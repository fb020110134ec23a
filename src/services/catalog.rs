//! Subject and topic management.
//!
//! Validation of user input happens here, before anything reaches the
//! repository: the schedule builder and the stores only ever see
//! well-formed records.

use chrono::Local;

use crate::api::{SubjectId, TopicId, UserId};
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::topic::{DIFFICULTY_MAX, DIFFICULTY_MIN};
use crate::models::{is_allowed_material, NewTopic, Subject};
use crate::routes::alarms::ScheduledAlarm;
use crate::routes::subjects::SubjectWithTopics;

/// Default snooze interval for study alarms.
pub const DEFAULT_SNOOZE_MINUTES: i64 = 5;

/// Create a subject for the user.
pub async fn add_subject(
    repo: &dyn FullRepository,
    user_id: UserId,
    name: &str,
) -> RepositoryResult<SubjectId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation("Subject name is required"));
    }
    repo.add_subject(user_id, name).await
}

/// All subjects of the user, ordered by name.
pub async fn list_subjects(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<Vec<Subject>> {
    repo.list_subjects(user_id).await
}

/// All subjects of the user with their topics.
pub async fn subjects_with_topics(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<Vec<SubjectWithTopics>> {
    repo.fetch_subjects_with_topics(user_id).await
}

/// Validate and create a topic under one of the user's subjects.
pub async fn add_topic(
    repo: &dyn FullRepository,
    user_id: UserId,
    topic: NewTopic,
) -> RepositoryResult<TopicId> {
    if topic.name.trim().is_empty() {
        return Err(RepositoryError::validation("Topic name is required"));
    }
    if !topic.estimated_hours.is_finite() || topic.estimated_hours <= 0.0 {
        return Err(RepositoryError::validation(format!(
            "Estimated study time must be positive, got {}",
            topic.estimated_hours
        )));
    }
    if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&topic.difficulty) {
        return Err(RepositoryError::validation(format!(
            "Difficulty must be between {} and {}, got {}",
            DIFFICULTY_MIN, DIFFICULTY_MAX, topic.difficulty
        )));
    }
    if let Some(ref filename) = topic.material_filename {
        if !is_allowed_material(filename) {
            return Err(RepositoryError::validation(format!(
                "File type not allowed for study material: {}",
                filename
            )));
        }
    }

    repo.add_topic(user_id, topic).await
}

/// Mark a topic complete, stamping today's date.
///
/// Returns whether a topic owned by the user was updated.
pub async fn complete_topic(
    repo: &dyn FullRepository,
    user_id: UserId,
    topic_id: TopicId,
) -> RepositoryResult<bool> {
    repo.mark_topic_complete(user_id, topic_id, Local::now().date_naive())
        .await
}

/// Push a topic's alarm forward. `minutes` defaults to
/// [`DEFAULT_SNOOZE_MINUTES`] and must be positive.
pub async fn snooze_topic(
    repo: &dyn FullRepository,
    user_id: UserId,
    topic_id: TopicId,
    minutes: Option<i64>,
) -> RepositoryResult<bool> {
    let minutes = minutes.unwrap_or(DEFAULT_SNOOZE_MINUTES);
    if minutes <= 0 {
        return Err(RepositoryError::validation(format!(
            "Snooze minutes must be positive, got {}",
            minutes
        )));
    }
    repo.snooze_topic(user_id, topic_id, minutes).await
}

/// Upcoming study alarms with ISO-8601 timestamps, soonest first.
pub async fn scheduled_alarms(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<Vec<ScheduledAlarm>> {
    let scheduled = repo.fetch_scheduled_topics(user_id).await?;
    Ok(scheduled
        .into_iter()
        .map(|t| ScheduledAlarm {
            topic_id: t.topic_id,
            topic_name: t.topic_name,
            subject_name: t.subject_name,
            scheduled_at: t.scheduled_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::services::users;

    fn topic(subject_id: SubjectId, hours: f64, difficulty: i32) -> NewTopic {
        NewTopic {
            subject_id,
            name: "calculus".to_string(),
            estimated_hours: hours,
            difficulty,
            scheduled_at: None,
            material_filename: None,
        }
    }

    async fn user_with_subject(repo: &LocalRepository) -> (UserId, SubjectId) {
        let user = users::register(repo, "ada", "pw123456", "ada@example.com")
            .await
            .unwrap();
        let subject = add_subject(repo, user, "Maths").await.unwrap();
        (user, subject)
    }

    #[tokio::test]
    async fn test_add_topic_rejects_bad_estimate() {
        let repo = LocalRepository::new();
        let (user, subject) = user_with_subject(&repo).await;

        let err = add_topic(&repo, user, topic(subject, 0.0, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_add_topic_rejects_out_of_scale_difficulty() {
        let repo = LocalRepository::new();
        let (user, subject) = user_with_subject(&repo).await;

        assert!(add_topic(&repo, user, topic(subject, 1.0, 0)).await.is_err());
        assert!(add_topic(&repo, user, topic(subject, 1.0, 6)).await.is_err());
        assert!(add_topic(&repo, user, topic(subject, 1.0, 5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_topic_rejects_bad_material() {
        let repo = LocalRepository::new();
        let (user, subject) = user_with_subject(&repo).await;

        let mut t = topic(subject, 1.0, 3);
        t.material_filename = Some("malware.exe".to_string());
        assert!(add_topic(&repo, user, t).await.is_err());

        let mut t = topic(subject, 1.0, 3);
        t.material_filename = Some("notes.pdf".to_string());
        assert!(add_topic(&repo, user, t).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_subject_name_rejected() {
        let repo = LocalRepository::new();
        let user = users::register(&repo, "ada", "pw123456", "ada@example.com")
            .await
            .unwrap();

        assert!(add_subject(&repo, user, "   ").await.is_err());
    }

    #[tokio::test]
    async fn test_snooze_rejects_non_positive_minutes() {
        let repo = LocalRepository::new();
        let (user, _) = user_with_subject(&repo).await;

        let err = snooze_topic(&repo, user, TopicId::new(1), Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }
}
