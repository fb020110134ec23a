use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use super::schema::{subjects, topics, users};
use crate::api::{SubjectId, TopicId, UserId};
use crate::models::{Subject, Topic, User};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[allow(dead_code)] // Some fields used only for database operations
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub google_id: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[allow(dead_code)]
pub struct SubjectRow {
    pub subject_id: i64,
    pub user_id: i64,
    pub subject_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subjects)]
pub struct NewSubjectRow {
    pub user_id: i64,
    pub subject_name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct TopicRow {
    pub topic_id: i64,
    pub subject_id: i64,
    pub topic_name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    pub is_completed: bool,
    pub completion_date: Option<NaiveDate>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub material_filename: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = topics)]
pub struct NewTopicRow {
    pub subject_id: i64,
    pub topic_name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    pub scheduled_at: Option<NaiveDateTime>,
    pub material_filename: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.user_id),
            username: row.username,
            email: row.email,
            password_digest: row.password_digest,
            google_id: row.google_id,
        }
    }
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Subject {
            id: SubjectId::new(row.subject_id),
            user_id: UserId::new(row.user_id),
            name: row.subject_name,
        }
    }
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Topic {
            id: TopicId::new(row.topic_id),
            subject_id: SubjectId::new(row.subject_id),
            name: row.topic_name,
            estimated_hours: row.estimated_hours,
            difficulty: row.difficulty,
            is_completed: row.is_completed,
            completion_date: row.completion_date,
            scheduled_at: row.scheduled_at,
            material_filename: row.material_filename,
        }
    }
}
