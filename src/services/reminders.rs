//! Study reminder messages.

use crate::api::UserId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::routes::reminder::{ReminderFocus, ReminderMessage};

/// Build a personalized study nudge for the client-side pop-up.
///
/// Points at the user's most difficult incomplete topic, or congratulates
/// them when everything is done.
pub async fn study_reminder(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<ReminderMessage> {
    let username = repo.get_username(user_id).await?;
    let focus = repo.fetch_most_difficult_topic(user_id).await?;

    Ok(match focus {
        Some(focus) => ReminderMessage {
            message: format!(
                "Hey {}, time to tackle a challenge! Your most difficult pending topic is \
                 '{}' (Difficulty: {}/5) in the subject '{}'. Start your focused study \
                 session now!",
                username, focus.topic_name, focus.difficulty, focus.subject_name
            ),
            focus: Some(ReminderFocus {
                subject: focus.subject_name,
                topic: focus.topic_name,
                difficulty: focus.difficulty,
            }),
        },
        None => ReminderMessage {
            message: format!(
                "Great job, {}! You have completed all your recorded topics. \
                 Time to add more subjects or relax!",
                username
            ),
            focus: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::CatalogRepository;
    use crate::models::NewTopic;
    use crate::services::users;

    #[tokio::test]
    async fn test_reminder_names_hardest_topic() {
        let repo = LocalRepository::new();
        let user = users::register(&repo, "ada", "pw123456", "ada@example.com")
            .await
            .unwrap();
        let subject = repo.add_subject(user, "Maths").await.unwrap();
        for (name, hours, difficulty) in [("easy", 1.0, 2), ("hard", 2.0, 5)] {
            repo.add_topic(
                user,
                NewTopic {
                    subject_id: subject,
                    name: name.to_string(),
                    estimated_hours: hours,
                    difficulty,
                    scheduled_at: None,
                    material_filename: None,
                },
            )
            .await
            .unwrap();
        }

        let reminder = study_reminder(&repo, user).await.unwrap();

        let focus = reminder.focus.unwrap();
        assert_eq!(focus.topic, "hard");
        assert_eq!(focus.difficulty, 5);
        assert!(reminder.message.contains("ada"));
        assert!(reminder.message.contains("'hard'"));
    }

    #[tokio::test]
    async fn test_reminder_congratulates_when_done() {
        let repo = LocalRepository::new();
        let user = users::register(&repo, "ada", "pw123456", "ada@example.com")
            .await
            .unwrap();

        let reminder = study_reminder(&repo, user).await.unwrap();

        assert!(reminder.focus.is_none());
        assert!(reminder.message.contains("Great job, ada!"));
    }
}
