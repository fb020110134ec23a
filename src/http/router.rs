//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Authentication
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/google", post(handlers::google_auth))
        .route("/auth/google/strict", post(handlers::google_auth_strict))
        .route("/auth/logout", post(handlers::logout))
        // Subjects and topics
        .route("/subjects", get(handlers::list_subjects))
        .route("/subjects", post(handlers::add_subject))
        .route("/topics", post(handlers::add_topic))
        .route("/topics/{topic_id}/complete", post(handlers::complete_topic))
        .route("/topics/{topic_id}/snooze", post(handlers::snooze_topic))
        // Schedule and progress
        .route("/schedule", get(handlers::get_schedule))
        .route("/schedule/history", get(handlers::get_history))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/charts", get(handlers::get_charts))
        .route("/reminder", get(handlers::get_reminder))
        .route("/alarms", get(handlers::get_alarms));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
