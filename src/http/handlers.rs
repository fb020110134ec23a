//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::dto::{
    ActionResponse, AddSubjectRequest, AddSubjectResponse, AddTopicRequest, AddTopicResponse,
    AlarmListResponse, AuthResponse, DashboardResponse, GoogleAuthRequest, GoogleStrictRequest,
    HealthResponse, HistoryResponse, LoginRequest, MessageResponse, RegisterRequest,
    RegisterResponse, ScheduleQuery, ScheduleView, SubjectListResponse,
};
use super::error::AppError;
use super::sessions::{CurrentUser, SessionToken};
use super::state::AppState;
use crate::api::{ReminderMessage, SubjectId, TopicId};
use crate::models::NewTopic;
use crate::services::{catalog, users};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Authentication
// =============================================================================

/// POST /v1/auth/register
///
/// Manual registration with username, password, and email.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user_id = users::register(
        state.repository.as_ref(),
        &request.username,
        &request.password,
        &request.email,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user_id.value(),
            message: "User registered successfully! You can now log in.".to_string(),
        }),
    ))
}

/// POST /v1/auth/login
///
/// Manual login. Returns a bearer token for subsequent requests.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<AuthResponse> {
    let user_id = users::login(
        state.repository.as_ref(),
        &request.username,
        &request.password,
    )
    .await?
    .ok_or_else(|| AppError::Unauthorized("Login failed: Invalid credentials.".to_string()))?;

    let username = state.repository.get_username(user_id).await?;
    let token = state.sessions.create(user_id);

    Ok(Json(AuthResponse {
        token,
        user_id: user_id.value(),
        username,
    }))
}

/// POST /v1/auth/google
///
/// Combined Google sign-in/registration (used on the register page):
/// matches by Google id, links by email, or creates a fresh account.
pub async fn google_auth(
    State(state): State<AppState>,
    Json(request): Json<GoogleAuthRequest>,
) -> HandlerResult<AuthResponse> {
    let user_id = users::login_or_register_google(
        state.repository.as_ref(),
        &request.google_id,
        &request.email,
        &request.name,
    )
    .await?;

    let username = state.repository.get_username(user_id).await?;
    let token = state.sessions.create(user_id);

    Ok(Json(AuthResponse {
        token,
        user_id: user_id.value(),
        username,
    }))
}

/// POST /v1/auth/google/strict
///
/// Strict Google login (used on the login page): only authenticates
/// accounts that already exist.
pub async fn google_auth_strict(
    State(state): State<AppState>,
    Json(request): Json<GoogleStrictRequest>,
) -> HandlerResult<AuthResponse> {
    let user_id = users::login_google_strict(
        state.repository.as_ref(),
        &request.google_id,
        &request.email,
    )
    .await?
    .ok_or_else(|| {
        AppError::Unauthorized(
            "Login failed: Google account not found. Please register first.".to_string(),
        )
    })?;

    let username = state.repository.get_username(user_id).await?;
    let token = state.sessions.create(user_id);

    Ok(Json(AuthResponse {
        token,
        user_id: user_id.value(),
        username,
    }))
}

/// POST /v1/auth/logout
///
/// Invalidate the presented session token.
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
) -> HandlerResult<MessageResponse> {
    state.sessions.revoke(&token.0);
    Ok(Json(MessageResponse {
        message: "Logged out.".to_string(),
    }))
}

// =============================================================================
// Subjects and Topics
// =============================================================================

/// GET /v1/subjects
///
/// All subjects of the authenticated user with their topics.
pub async fn list_subjects(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<SubjectListResponse> {
    let subjects = catalog::subjects_with_topics(state.repository.as_ref(), user_id).await?;
    let total = subjects.len();

    Ok(Json(SubjectListResponse { subjects, total }))
}

/// POST /v1/subjects
///
/// Create a subject for the authenticated user.
pub async fn add_subject(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<AddSubjectRequest>,
) -> Result<(StatusCode, Json<AddSubjectResponse>), AppError> {
    let subject_id =
        catalog::add_subject(state.repository.as_ref(), user_id, &request.subject_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddSubjectResponse {
            subject_id: subject_id.value(),
            message: "Subject added successfully!".to_string(),
        }),
    ))
}

fn parse_scheduled_at(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<Option<NaiveDateTime>, AppError> {
    match (date, time) {
        (Some(date), Some(time)) => {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| AppError::BadRequest(format!("Invalid scheduled_date: {}", e)))?;
            let time = NaiveTime::parse_from_str(time, "%H:%M")
                .map_err(|e| AppError::BadRequest(format!("Invalid scheduled_time: {}", e)))?;
            Ok(Some(date.and_time(time)))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "scheduled_date and scheduled_time must be provided together".to_string(),
        )),
    }
}

/// POST /v1/topics
///
/// Create a topic under one of the user's subjects.
pub async fn add_topic(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<AddTopicRequest>,
) -> Result<(StatusCode, Json<AddTopicResponse>), AppError> {
    let scheduled_at = parse_scheduled_at(
        request.scheduled_date.as_deref(),
        request.scheduled_time.as_deref(),
    )?;

    let material_msg = request
        .material_filename
        .as_deref()
        .map(|f| format!(" (Material link for '{}' saved)", f))
        .unwrap_or_default();

    let topic_id = catalog::add_topic(
        state.repository.as_ref(),
        user_id,
        NewTopic {
            subject_id: SubjectId::new(request.subject_id),
            name: request.topic_name,
            estimated_hours: request.estimated_hours,
            difficulty: request.difficulty,
            scheduled_at,
            material_filename: request.material_filename,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddTopicResponse {
            topic_id: topic_id.value(),
            message: format!("Topic added and scheduled successfully!{}", material_msg),
        }),
    ))
}

/// POST /v1/topics/{topic_id}/complete
///
/// Mark a topic complete. Only the owner's topics can be updated.
pub async fn complete_topic(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(topic_id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    let updated =
        catalog::complete_topic(state.repository.as_ref(), user_id, TopicId::new(topic_id))
            .await?;

    if !updated {
        return Err(AppError::NotFound(
            "Topic may not exist or belong to you.".to_string(),
        ));
    }

    Ok(Json(ActionResponse {
        success: true,
        message: "Topic successfully marked as complete!".to_string(),
    }))
}

/// POST /v1/topics/{topic_id}/snooze
///
/// Push a topic's alarm forward by a few minutes.
pub async fn snooze_topic(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(topic_id): Path<i64>,
    Json(request): Json<super::dto::SnoozeRequest>,
) -> HandlerResult<ActionResponse> {
    let updated = catalog::snooze_topic(
        state.repository.as_ref(),
        user_id,
        TopicId::new(topic_id),
        request.minutes,
    )
    .await?;

    Ok(Json(ActionResponse {
        success: updated,
        message: if updated {
            "Alarm snoozed.".to_string()
        } else {
            "Topic has no alarm or does not belong to you.".to_string()
        },
    }))
}

// =============================================================================
// Schedule, Dashboard, Charts
// =============================================================================

/// GET /v1/schedule
///
/// Generate today's study schedule for the authenticated user. An optional
/// `limit_hours` query parameter overrides the configured daily budget.
pub async fn get_schedule(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ScheduleQuery>,
) -> HandlerResult<ScheduleView> {
    let limit = query.limit_hours.unwrap_or(state.daily_limit_hours);
    if !limit.is_finite() || limit <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "limit_hours must be positive, got {}",
            limit
        )));
    }

    let view = crate::services::generate_schedule(state.repository.as_ref(), user_id, limit)
        .await?;
    Ok(Json(view))
}

/// GET /v1/schedule/history
///
/// Completed study sessions grouped by day, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<HistoryResponse> {
    let days = crate::services::fetch_history(state.repository.as_ref(), user_id).await?;
    Ok(Json(HistoryResponse { days }))
}

/// GET /v1/dashboard
///
/// Summary statistics plus the username for the dashboard header.
pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<DashboardResponse> {
    let username = state.repository.get_username(user_id).await?;
    let summary =
        crate::services::dashboard_summary(state.repository.as_ref(), user_id).await?;

    Ok(Json(DashboardResponse { username, summary }))
}

/// GET /v1/charts
///
/// Chart data: per-subject difficulty averages and the topic ranking.
pub async fn get_charts(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<crate::api::ChartData> {
    let data = crate::services::chart_data(state.repository.as_ref(), user_id).await?;
    Ok(Json(data))
}

/// GET /v1/reminder
///
/// Personalized study reminder for the client-side pop-up.
pub async fn get_reminder(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<ReminderMessage> {
    let reminder = crate::services::study_reminder(state.repository.as_ref(), user_id).await?;
    Ok(Json(reminder))
}

/// GET /v1/alarms
///
/// Upcoming study alarms, soonest first.
pub async fn get_alarms(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> HandlerResult<AlarmListResponse> {
    let alarms = catalog::scheduled_alarms(state.repository.as_ref(), user_id).await?;
    let total = alarms.len();

    Ok(Json(AlarmListResponse { alarms, total }))
}
