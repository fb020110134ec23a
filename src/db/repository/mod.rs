//! Repository trait definitions.
//!
//! The repository pattern decouples the service and HTTP layers from any
//! particular storage backend. Two implementations exist:
//! `repositories::local` (in-memory) and `repositories::postgres`
//! (Diesel + connection pool).
//!
//! Every operation takes the authenticated [`UserId`] explicitly. There is
//! no ambient "current user": ownership is part of each query, so a topic
//! can only be read, completed, or snoozed through its owner's id.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{SubjectId, TopicId, UserId};
use crate::models::{
    CompletedTopic, NewTopic, NewUser, PrioritizedTopic, ScheduledTopic, StudyFocus, Subject,
    Topic, User,
};
use crate::routes::subjects::SubjectWithTopics;

/// Repository trait for user account operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user account.
    ///
    /// # Returns
    /// * `Ok(UserId)` - Id of the created account
    /// * `Err(RepositoryError::Conflict)` - Username or email already taken
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<UserId>;

    /// Look up an account by username. Returns `None` when absent.
    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Look up an account by its Google account id.
    async fn find_user_by_google(&self, google_id: &str) -> RepositoryResult<Option<User>>;

    /// Look up an account by email address.
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Attach a Google account id to an existing account.
    async fn link_google_account(&self, user_id: UserId, google_id: &str)
        -> RepositoryResult<()>;

    /// Username for dashboard personalization.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - No such account
    async fn get_username(&self, user_id: UserId) -> RepositoryResult<String>;
}

/// Repository trait for subject and topic operations.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Create a subject for a user.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - The user already has a subject
    ///   with this name
    async fn add_subject(&self, user_id: UserId, name: &str) -> RepositoryResult<SubjectId>;

    /// All subjects of one user, ordered by name.
    async fn list_subjects(&self, user_id: UserId) -> RepositoryResult<Vec<Subject>>;

    /// All subjects of one user with their topics, ordered by subject name
    /// then topic id.
    async fn fetch_subjects_with_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<SubjectWithTopics>>;

    /// Create a topic under one of the user's subjects.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - The subject does not exist or
    ///   belongs to another user
    async fn add_topic(&self, user_id: UserId, topic: NewTopic) -> RepositoryResult<TopicId>;

    /// All topics of one user, completed or not.
    async fn fetch_topics_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Topic>>;

    /// Incomplete topics of one user in descending priority order
    /// (difficulty x estimated hours, ties broken by estimated hours).
    ///
    /// The returned order is the schedule builder's input contract; the
    /// builder never re-sorts.
    async fn fetch_prioritized_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<PrioritizedTopic>>;

    /// Mark a topic complete with the given completion day.
    ///
    /// # Returns
    /// * `Ok(true)` - The topic existed, belonged to the user, and was updated
    /// * `Ok(false)` - No matching topic for this user
    async fn mark_topic_complete(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        completion_date: NaiveDate,
    ) -> RepositoryResult<bool>;

    /// Push a topic's alarm timestamp forward by `minutes`.
    ///
    /// Only applies when the topic has an alarm set; returns whether a row
    /// was updated.
    async fn snooze_topic(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        minutes: i64,
    ) -> RepositoryResult<bool>;

    /// Incomplete topics with an alarm timestamp, ascending by alarm time.
    async fn fetch_scheduled_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<ScheduledTopic>>;

    /// The single most difficult incomplete topic (difficulty descending,
    /// ties broken by longest estimated time), if any remain.
    async fn fetch_most_difficult_topic(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Option<StudyFocus>>;

    /// Completed topics that carry a completion date.
    async fn fetch_completed_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<CompletedTopic>>;
}

/// Combined repository interface used by the application.
#[async_trait]
pub trait FullRepository: UserRepository + CatalogRepository {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
