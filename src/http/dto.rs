//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most view DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Alarms
    ScheduledAlarm,
    // Charts
    ChartData,
    SubjectDifficulty,
    TopicDifficulty,
    // Dashboard
    DashboardSummary,
    // Reminder
    ReminderFocus,
    ReminderMessage,
    // Schedule
    CompletedSession,
    HistoryDay,
    ScheduleEntry,
    ScheduleView,
    // Subjects
    SubjectWithTopics,
    TopicSummary,
};

/// Request body for manual registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Response for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub message: String,
}

/// Request body for manual login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for combined Google sign-in/registration, carrying the
/// verified Google profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    pub google_id: String,
    pub email: String,
    pub name: String,
}

/// Request body for strict Google login (existing accounts only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleStrictRequest {
    pub google_id: String,
    pub email: String,
}

/// Response for a successful login: the bearer token for later requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request body for creating a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubjectRequest {
    pub subject_name: String,
}

/// Response for subject creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubjectResponse {
    pub subject_id: i64,
    pub message: String,
}

/// Request body for creating a topic.
///
/// `scheduled_date` ("YYYY-MM-DD") and `scheduled_time` ("HH:MM") mirror
/// the two form fields of the frontend; both must be present to set an
/// alarm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTopicRequest {
    pub subject_id: i64,
    pub topic_name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub material_filename: Option<String>,
}

/// Response for topic creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTopicResponse {
    pub topic_id: i64,
    pub message: String,
}

/// Response for completion and snooze actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Request body for snoozing an alarm.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnoozeRequest {
    /// Minutes to push the alarm by (default: 5)
    #[serde(default)]
    pub minutes: Option<i64>,
}

/// Query parameters for the schedule endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleQuery {
    /// Daily budget override in hours (must be positive)
    #[serde(default)]
    pub limit_hours: Option<f64>,
}

/// Subject list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectListResponse {
    pub subjects: Vec<SubjectWithTopics>,
    pub total: usize,
}

/// Dashboard response: summary statistics plus the username for
/// personalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub username: String,
    pub summary: DashboardSummary,
}

/// History response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub days: Vec<HistoryDay>,
}

/// Alarm list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmListResponse {
    pub alarms: Vec<ScheduledAlarm>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
