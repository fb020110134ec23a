//! In-memory repository for unit testing and local development.
//!
//! All data lives in maps behind a `parking_lot::RwLock`. The repository
//! is cheap to clone; clones share the same store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use parking_lot::RwLock;

use crate::api::{SubjectId, TopicId, UserId};
use crate::db::repository::{
    CatalogRepository, FullRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::topic::sort_by_priority;
use crate::models::{
    CompletedTopic, NewTopic, NewUser, PrioritizedTopic, ScheduledTopic, StudyFocus, Subject,
    Topic, User,
};
use crate::routes::subjects::{SubjectWithTopics, TopicSummary};

#[derive(Debug, Default)]
struct Store {
    users: HashMap<i64, User>,
    subjects: HashMap<i64, Subject>,
    topics: HashMap<i64, Topic>,
    next_user_id: i64,
    next_subject_id: i64,
    next_topic_id: i64,
}

impl Store {
    fn subject_ids_of(&self, user_id: UserId) -> Vec<SubjectId> {
        self.subjects
            .values()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.id)
            .collect()
    }

    /// Topics of one user, each paired with its subject name.
    fn topics_of(&self, user_id: UserId) -> Vec<(&Topic, &str)> {
        self.topics
            .values()
            .filter_map(|t| {
                let subject = self.subjects.get(&t.subject_id.value())?;
                (subject.user_id == user_id).then_some((t, subject.name.as_str()))
            })
            .collect()
    }

    /// Look up a topic owned by the given user.
    fn owned_topic_mut(&mut self, user_id: UserId, topic_id: TopicId) -> Option<&mut Topic> {
        let owned: Vec<SubjectId> = self.subject_ids_of(user_id);
        self.topics
            .get_mut(&topic_id.value())
            .filter(|t| owned.contains(&t.subject_id))
    }
}

/// In-memory repository instance.
#[derive(Debug, Clone, Default)]
pub struct LocalRepository {
    inner: Arc<RwLock<Store>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<UserId> {
        let mut store = self.inner.write();

        let duplicate = store
            .users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if duplicate {
            return Err(RepositoryError::conflict(
                "Username or email already exists",
            ));
        }

        store.next_user_id += 1;
        let id = UserId::new(store.next_user_id);
        store.users.insert(
            id.value(),
            User {
                id,
                username: new_user.username,
                email: new_user.email,
                password_digest: new_user.password_digest,
                google_id: new_user.google_id,
            },
        );
        Ok(id)
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let store = self.inner.read();
        Ok(store
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_by_google(&self, google_id: &str) -> RepositoryResult<Option<User>> {
        let store = self.inner.read();
        Ok(store
            .users
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let store = self.inner.read();
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn link_google_account(
        &self,
        user_id: UserId,
        google_id: &str,
    ) -> RepositoryResult<()> {
        let mut store = self.inner.write();
        let user = store
            .users
            .get_mut(&user_id.value())
            .ok_or_else(|| RepositoryError::not_found(format!("User {} not found", user_id)))?;
        user.google_id = Some(google_id.to_string());
        Ok(())
    }

    async fn get_username(&self, user_id: UserId) -> RepositoryResult<String> {
        let store = self.inner.read();
        store
            .users
            .get(&user_id.value())
            .map(|u| u.username.clone())
            .ok_or_else(|| RepositoryError::not_found(format!("User {} not found", user_id)))
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn add_subject(&self, user_id: UserId, name: &str) -> RepositoryResult<SubjectId> {
        let mut store = self.inner.write();

        let duplicate = store
            .subjects
            .values()
            .any(|s| s.user_id == user_id && s.name == name);
        if duplicate {
            return Err(RepositoryError::conflict(format!(
                "Subject '{}' already exists for this user",
                name
            )));
        }

        store.next_subject_id += 1;
        let id = SubjectId::new(store.next_subject_id);
        store.subjects.insert(
            id.value(),
            Subject {
                id,
                user_id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    async fn list_subjects(&self, user_id: UserId) -> RepositoryResult<Vec<Subject>> {
        let store = self.inner.read();
        let mut subjects: Vec<Subject> = store
            .subjects
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn fetch_subjects_with_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<SubjectWithTopics>> {
        let store = self.inner.read();

        let mut subjects: Vec<&Subject> = store
            .subjects
            .values()
            .filter(|s| s.user_id == user_id)
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));

        let mut result = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let mut topics: Vec<&Topic> = store
                .topics
                .values()
                .filter(|t| t.subject_id == subject.id)
                .collect();
            topics.sort_by_key(|t| t.id.value());

            result.push(SubjectWithTopics {
                subject_id: subject.id,
                subject_name: subject.name.clone(),
                topics: topics
                    .into_iter()
                    .map(|t| TopicSummary {
                        topic_id: t.id,
                        name: t.name.clone(),
                        estimated_hours: t.estimated_hours,
                        difficulty: t.difficulty,
                        is_completed: t.is_completed,
                        completion_date: t.completion_date,
                    })
                    .collect(),
            });
        }
        Ok(result)
    }

    async fn add_topic(&self, user_id: UserId, topic: NewTopic) -> RepositoryResult<TopicId> {
        let mut store = self.inner.write();

        let owned = store
            .subjects
            .get(&topic.subject_id.value())
            .map(|s| s.user_id == user_id)
            .unwrap_or(false);
        if !owned {
            return Err(RepositoryError::not_found(format!(
                "Subject {} not found for user {}",
                topic.subject_id, user_id
            )));
        }

        store.next_topic_id += 1;
        let id = TopicId::new(store.next_topic_id);
        store.topics.insert(
            id.value(),
            Topic {
                id,
                subject_id: topic.subject_id,
                name: topic.name,
                estimated_hours: topic.estimated_hours,
                difficulty: topic.difficulty,
                is_completed: false,
                completion_date: None,
                scheduled_at: topic.scheduled_at,
                material_filename: topic.material_filename,
            },
        );
        Ok(id)
    }

    async fn fetch_topics_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Topic>> {
        let store = self.inner.read();
        let mut topics: Vec<Topic> = store
            .topics_of(user_id)
            .into_iter()
            .map(|(t, _)| t.clone())
            .collect();
        topics.sort_by_key(|t| t.id.value());
        Ok(topics)
    }

    async fn fetch_prioritized_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<PrioritizedTopic>> {
        let store = self.inner.read();
        let mut topics: Vec<PrioritizedTopic> = store
            .topics_of(user_id)
            .into_iter()
            .filter(|(t, _)| !t.is_completed)
            .map(|(t, subject_name)| PrioritizedTopic {
                topic_id: t.id,
                subject_name: subject_name.to_string(),
                topic_name: t.name.clone(),
                estimated_hours: t.estimated_hours,
                difficulty: t.difficulty,
                material_filename: t.material_filename.clone(),
                scheduled_at: t.scheduled_at,
            })
            .collect();
        sort_by_priority(&mut topics);
        Ok(topics)
    }

    async fn mark_topic_complete(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        completion_date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let mut store = self.inner.write();
        match store.owned_topic_mut(user_id, topic_id) {
            Some(topic) => {
                topic.is_completed = true;
                topic.completion_date = Some(completion_date);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn snooze_topic(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        minutes: i64,
    ) -> RepositoryResult<bool> {
        let mut store = self.inner.write();
        match store.owned_topic_mut(user_id, topic_id) {
            Some(topic) => match topic.scheduled_at {
                Some(at) => {
                    topic.scheduled_at = Some(at + Duration::minutes(minutes));
                    Ok(true)
                }
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    async fn fetch_scheduled_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<ScheduledTopic>> {
        let store = self.inner.read();
        let mut scheduled: Vec<ScheduledTopic> = store
            .topics_of(user_id)
            .into_iter()
            .filter(|(t, _)| !t.is_completed)
            .filter_map(|(t, subject_name)| {
                t.scheduled_at.map(|at| ScheduledTopic {
                    topic_id: t.id,
                    topic_name: t.name.clone(),
                    subject_name: subject_name.to_string(),
                    scheduled_at: at,
                })
            })
            .collect();
        scheduled.sort_by_key(|t| t.scheduled_at);
        Ok(scheduled)
    }

    async fn fetch_most_difficult_topic(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Option<StudyFocus>> {
        let store = self.inner.read();
        let mut incomplete: Vec<(&Topic, &str)> = store
            .topics_of(user_id)
            .into_iter()
            .filter(|(t, _)| !t.is_completed)
            .collect();
        incomplete.sort_by(|(a, _), (b, _)| {
            b.difficulty.cmp(&a.difficulty).then(
                b.estimated_hours
                    .partial_cmp(&a.estimated_hours)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        Ok(incomplete.first().map(|(t, subject_name)| StudyFocus {
            subject_name: subject_name.to_string(),
            topic_name: t.name.clone(),
            difficulty: t.difficulty,
        }))
    }

    async fn fetch_completed_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<CompletedTopic>> {
        let store = self.inner.read();
        Ok(store
            .topics_of(user_id)
            .into_iter()
            .filter(|(t, _)| t.is_completed)
            .filter_map(|(t, subject_name)| {
                t.completion_date.map(|date| CompletedTopic {
                    subject_name: subject_name.to_string(),
                    topic_name: t.name.clone(),
                    hours: t.estimated_hours,
                    completion_date: date,
                })
            })
            .collect())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_digest: "salt$digest".to_string(),
            google_id: None,
        }
    }

    fn new_topic(subject_id: SubjectId, name: &str, hours: f64, difficulty: i32) -> NewTopic {
        NewTopic {
            subject_id,
            name: name.to_string(),
            estimated_hours: hours,
            difficulty,
            scheduled_at: None,
            material_filename: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let repo = LocalRepository::new();
        repo.create_user(new_user("ada")).await.unwrap();

        let err = repo.create_user(new_user("ada")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_prioritized_topics_are_sorted() {
        let repo = LocalRepository::new();
        let user = repo.create_user(new_user("ada")).await.unwrap();
        let subject = repo.add_subject(user, "Maths").await.unwrap();

        repo.add_topic(user, new_topic(subject, "easy", 2.0, 1))
            .await
            .unwrap();
        repo.add_topic(user, new_topic(subject, "hard", 3.0, 5))
            .await
            .unwrap();
        repo.add_topic(user, new_topic(subject, "medium", 4.0, 2))
            .await
            .unwrap();

        let topics = repo.fetch_prioritized_topics(user).await.unwrap();
        let names: Vec<&str> = topics.iter().map(|t| t.topic_name.as_str()).collect();
        assert_eq!(names, vec!["hard", "medium", "easy"]);
    }

    #[tokio::test]
    async fn test_topics_are_isolated_per_user() {
        let repo = LocalRepository::new();
        let ada = repo.create_user(new_user("ada")).await.unwrap();
        let bob = repo.create_user(new_user("bob")).await.unwrap();

        let ada_subject = repo.add_subject(ada, "Maths").await.unwrap();
        repo.add_topic(ada, new_topic(ada_subject, "calculus", 2.0, 4))
            .await
            .unwrap();

        assert!(repo.fetch_prioritized_topics(bob).await.unwrap().is_empty());

        // Bob cannot complete Ada's topic.
        let topics = repo.fetch_prioritized_topics(ada).await.unwrap();
        let updated = repo
            .mark_topic_complete(bob, topics[0].topic_id, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_snooze_requires_an_alarm() {
        let repo = LocalRepository::new();
        let user = repo.create_user(new_user("ada")).await.unwrap();
        let subject = repo.add_subject(user, "Maths").await.unwrap();
        let topic_id = repo
            .add_topic(user, new_topic(subject, "calculus", 2.0, 4))
            .await
            .unwrap();

        assert!(!repo.snooze_topic(user, topic_id, 5).await.unwrap());
    }
}
