//! # Studyplan Rust Backend
//!
//! Backend engine for a personal study-planning application.
//!
//! Users register, record subjects and topics with difficulty and time
//! estimates, and the backend produces a prioritized daily study schedule,
//! a progress dashboard, and study reminders. The backend exposes a REST
//! API via Axum for the web frontend.
//!
//! ## Features
//!
//! - **Schedule Generation**: Greedy packing of prioritized topics into a
//!   fixed daily time budget, with partial sessions for oversized topics
//! - **Progress Tracking**: Completion marking, historical sessions, and
//!   dashboard statistics
//! - **Accounts**: Manual registration/login and Google federated sign-in
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Core domain records (users, subjects, topics)
//! - [`scheduler`]: The daily schedule builder
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`services`]: High-level business logic
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
