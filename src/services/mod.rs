//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository: they fetch
//! typed records, run the pure computations, and assemble the route
//! response types.

pub mod catalog;

pub mod charts;

pub mod dashboard;

pub mod reminders;

pub mod schedule;

pub mod users;

pub use charts::chart_data;
pub use dashboard::dashboard_summary;
pub use reminders::study_reminder;
pub use schedule::{fetch_history, generate_schedule};
