//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres
//! database. Connections come from an r2d2 pool and are checked out for
//! exactly one operation: every call path acquires, uses, and releases a
//! pooled connection, including error paths.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::task;

use crate::api::{SubjectId, TopicId, UserId};
use crate::db::repository::{
    CatalogRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    UserRepository,
};
use crate::models::topic::sort_by_priority;
use crate::models::{
    CompletedTopic, NewTopic, NewUser, PrioritizedTopic, ScheduledTopic, StudyFocus, Subject,
    Topic, User,
};
use crate::routes::subjects::{SubjectWithTopics, TopicSummary};

mod models;
mod schema;

use models::*;
use schema::{subjects, topics, users};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
///
/// This repository implementation provides:
/// - Connection pooling with configurable limits
/// - Automatic retry for transient failures
/// - Health monitoring and statistics
/// - Automatic schema migrations
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// The operation runs on the blocking thread pool with a connection
    /// checked out from the pool for its duration only. Retryable errors
    /// (connection loss, timeouts, serialization failures) are retried up
    /// to `max_retries` times with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                // Get connection
                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                // Execute the operation
                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Check if the database connection is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }

    /// Get detailed health information.
    ///
    /// Returns a tuple of (is_healthy, latency_ms, error_message).
    pub async fn health_check_detailed(&self) -> (bool, Option<u64>, Option<String>) {
        let start = Instant::now();
        match self.health_check().await {
            Ok(true) => (true, Some(start.elapsed().as_millis() as u64), None),
            Ok(false) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some("Health check returned false".to_string()),
            ),
            Err(e) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some(e.to_string()),
            ),
        }
    }
}

/// Subquery selecting the subject ids owned by one user. Ownership filters
/// on topic reads and mutations are expressed through `eq_any` over this.
macro_rules! owned_subjects {
    ($user_id:expr) => {
        subjects::table
            .filter(subjects::user_id.eq($user_id.value()))
            .select(subjects::subject_id)
    };
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<UserId> {
        let row = NewUserRow {
            username: new_user.username,
            email: new_user.email,
            password_digest: new_user.password_digest,
            google_id: new_user.google_id,
        };

        let id = self
            .with_conn(move |conn| {
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(users::user_id)
                    .get_result::<i64>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("create_user"))
            })
            .await?;
        Ok(UserId::new(id))
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let username = username.to_string();
        let row = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::username.eq(&username))
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_google(&self, google_id: &str) -> RepositoryResult<Option<User>> {
        let google_id = google_id.to_string();
        let row = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::google_id.eq(&google_id))
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = email.to_string();
        let row = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::email.eq(&email))
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(row.map(User::from))
    }

    async fn link_google_account(
        &self,
        user_id: UserId,
        google_id: &str,
    ) -> RepositoryResult<()> {
        let google_id = google_id.to_string();
        let updated = self
            .with_conn(move |conn| {
                diesel::update(users::table.filter(users::user_id.eq(user_id.value())))
                    .set(users::google_id.eq(&google_id))
                    .execute(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        if updated == 0 {
            return Err(RepositoryError::not_found_with_context(
                format!("User {} not found", user_id),
                ErrorContext::new("link_google_account").with_entity("user"),
            ));
        }
        Ok(())
    }

    async fn get_username(&self, user_id: UserId) -> RepositoryResult<String> {
        let name = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::user_id.eq(user_id.value()))
                    .select(users::username)
                    .first::<String>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        name.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("User {} not found", user_id),
                ErrorContext::new("get_username").with_entity("user"),
            )
        })
    }
}

#[async_trait]
impl CatalogRepository for PostgresRepository {
    async fn add_subject(&self, user_id: UserId, name: &str) -> RepositoryResult<SubjectId> {
        let row = NewSubjectRow {
            user_id: user_id.value(),
            subject_name: name.to_string(),
        };

        let id = self
            .with_conn(move |conn| {
                diesel::insert_into(subjects::table)
                    .values(&row)
                    .returning(subjects::subject_id)
                    .get_result::<i64>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("add_subject"))
            })
            .await?;
        Ok(SubjectId::new(id))
    }

    async fn list_subjects(&self, user_id: UserId) -> RepositoryResult<Vec<Subject>> {
        let rows = self
            .with_conn(move |conn| {
                subjects::table
                    .filter(subjects::user_id.eq(user_id.value()))
                    .order(subjects::subject_name.asc())
                    .select(SubjectRow::as_select())
                    .load::<SubjectRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    async fn fetch_subjects_with_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<SubjectWithTopics>> {
        let (subject_rows, topic_rows) = self
            .with_conn(move |conn| {
                let subject_rows = subjects::table
                    .filter(subjects::user_id.eq(user_id.value()))
                    .order(subjects::subject_name.asc())
                    .select(SubjectRow::as_select())
                    .load::<SubjectRow>(conn)
                    .map_err(RepositoryError::from)?;

                let topic_rows = topics::table
                    .filter(topics::subject_id.eq_any(owned_subjects!(user_id)))
                    .order(topics::topic_id.asc())
                    .select(TopicRow::as_select())
                    .load::<TopicRow>(conn)
                    .map_err(RepositoryError::from)?;

                Ok((subject_rows, topic_rows))
            })
            .await?;

        let mut result: Vec<SubjectWithTopics> = subject_rows
            .into_iter()
            .map(|s| SubjectWithTopics {
                subject_id: SubjectId::new(s.subject_id),
                subject_name: s.subject_name,
                topics: Vec::new(),
            })
            .collect();

        for row in topic_rows {
            if let Some(subject) = result
                .iter_mut()
                .find(|s| s.subject_id.value() == row.subject_id)
            {
                subject.topics.push(TopicSummary {
                    topic_id: TopicId::new(row.topic_id),
                    name: row.topic_name,
                    estimated_hours: row.estimated_hours,
                    difficulty: row.difficulty,
                    is_completed: row.is_completed,
                    completion_date: row.completion_date,
                });
            }
        }
        Ok(result)
    }

    async fn add_topic(&self, user_id: UserId, topic: NewTopic) -> RepositoryResult<TopicId> {
        let id = self
            .with_conn(move |conn| {
                // The subject must belong to the requesting user.
                let owned = subjects::table
                    .filter(
                        subjects::subject_id
                            .eq(topic.subject_id.value())
                            .and(subjects::user_id.eq(user_id.value())),
                    )
                    .select(subjects::subject_id)
                    .first::<i64>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?;

                if owned.is_none() {
                    return Err(RepositoryError::not_found_with_context(
                        format!("Subject {} not found for user {}", topic.subject_id, user_id),
                        ErrorContext::new("add_topic").with_entity("subject"),
                    ));
                }

                let row = NewTopicRow {
                    subject_id: topic.subject_id.value(),
                    topic_name: topic.name.clone(),
                    estimated_hours: topic.estimated_hours,
                    difficulty: topic.difficulty,
                    scheduled_at: topic.scheduled_at,
                    material_filename: topic.material_filename.clone(),
                };

                diesel::insert_into(topics::table)
                    .values(&row)
                    .returning(topics::topic_id)
                    .get_result::<i64>(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("add_topic"))
            })
            .await?;
        Ok(TopicId::new(id))
    }

    async fn fetch_topics_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Topic>> {
        let rows = self
            .with_conn(move |conn| {
                topics::table
                    .filter(topics::subject_id.eq_any(owned_subjects!(user_id)))
                    .order(topics::topic_id.asc())
                    .select(TopicRow::as_select())
                    .load::<TopicRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(rows.into_iter().map(Topic::from).collect())
    }

    async fn fetch_prioritized_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<PrioritizedTopic>> {
        let rows = self
            .with_conn(move |conn| {
                topics::table
                    .inner_join(subjects::table)
                    .filter(
                        subjects::user_id
                            .eq(user_id.value())
                            .and(topics::is_completed.eq(false)),
                    )
                    .select((TopicRow::as_select(), subjects::subject_name))
                    .load::<(TopicRow, String)>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        let mut prioritized: Vec<PrioritizedTopic> = rows
            .into_iter()
            .map(|(t, subject_name)| PrioritizedTopic {
                topic_id: TopicId::new(t.topic_id),
                subject_name,
                topic_name: t.topic_name,
                estimated_hours: t.estimated_hours,
                difficulty: t.difficulty,
                material_filename: t.material_filename,
                scheduled_at: t.scheduled_at,
            })
            .collect();
        // Same comparator as the local backend.
        sort_by_priority(&mut prioritized);
        Ok(prioritized)
    }

    async fn mark_topic_complete(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        completion_date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let updated = self
            .with_conn(move |conn| {
                diesel::update(
                    topics::table.filter(
                        topics::topic_id
                            .eq(topic_id.value())
                            .and(topics::subject_id.eq_any(owned_subjects!(user_id))),
                    ),
                )
                .set((
                    topics::is_completed.eq(true),
                    topics::completion_date.eq(Some(completion_date)),
                ))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("mark_topic_complete"))
            })
            .await?;
        Ok(updated > 0)
    }

    async fn snooze_topic(
        &self,
        user_id: UserId,
        topic_id: TopicId,
        minutes: i64,
    ) -> RepositoryResult<bool> {
        let updated = self
            .with_conn(move |conn| {
                let current: Option<Option<NaiveDateTime>> = topics::table
                    .filter(
                        topics::topic_id
                            .eq(topic_id.value())
                            .and(topics::subject_id.eq_any(owned_subjects!(user_id))),
                    )
                    .select(topics::scheduled_at)
                    .first::<Option<NaiveDateTime>>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?;

                let Some(Some(at)) = current else {
                    return Ok(0);
                };

                diesel::update(topics::table.filter(topics::topic_id.eq(topic_id.value())))
                    .set(topics::scheduled_at.eq(Some(at + ChronoDuration::minutes(minutes))))
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("snooze_topic"))
            })
            .await?;
        Ok(updated > 0)
    }

    async fn fetch_scheduled_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<ScheduledTopic>> {
        let rows = self
            .with_conn(move |conn| {
                topics::table
                    .inner_join(subjects::table)
                    .filter(
                        subjects::user_id
                            .eq(user_id.value())
                            .and(topics::is_completed.eq(false))
                            .and(topics::scheduled_at.is_not_null()),
                    )
                    .order(topics::scheduled_at.asc())
                    .select((
                        topics::topic_id,
                        topics::topic_name,
                        subjects::subject_name,
                        topics::scheduled_at,
                    ))
                    .load::<(i64, String, String, Option<NaiveDateTime>)>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(topic_id, topic_name, subject_name, scheduled_at)| {
                scheduled_at.map(|at| ScheduledTopic {
                    topic_id: TopicId::new(topic_id),
                    topic_name,
                    subject_name,
                    scheduled_at: at,
                })
            })
            .collect())
    }

    async fn fetch_most_difficult_topic(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Option<StudyFocus>> {
        let row = self
            .with_conn(move |conn| {
                topics::table
                    .inner_join(subjects::table)
                    .filter(
                        subjects::user_id
                            .eq(user_id.value())
                            .and(topics::is_completed.eq(false)),
                    )
                    .order((topics::difficulty.desc(), topics::estimated_hours.desc()))
                    .select((subjects::subject_name, topics::topic_name, topics::difficulty))
                    .first::<(String, String, i32)>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(row.map(|(subject_name, topic_name, difficulty)| StudyFocus {
            subject_name,
            topic_name,
            difficulty,
        }))
    }

    async fn fetch_completed_topics(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<CompletedTopic>> {
        let rows = self
            .with_conn(move |conn| {
                topics::table
                    .inner_join(subjects::table)
                    .filter(
                        subjects::user_id
                            .eq(user_id.value())
                            .and(topics::is_completed.eq(true))
                            .and(topics::completion_date.is_not_null()),
                    )
                    .order(topics::completion_date.desc())
                    .select((
                        subjects::subject_name,
                        topics::topic_name,
                        topics::estimated_hours,
                        topics::completion_date,
                    ))
                    .load::<(String, String, f64, Option<NaiveDate>)>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(subject_name, topic_name, hours, date)| {
                date.map(|completion_date| CompletedTopic {
                    subject_name,
                    topic_name,
                    hours,
                    completion_date,
                })
            })
            .collect())
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }
}
