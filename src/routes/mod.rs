//! Route-specific data types.
//!
//! Each module holds the response types for one view of the API. The
//! computations that fill them live in [`crate::services`].

pub mod alarms;
pub mod charts;
pub mod dashboard;
pub mod reminder;
pub mod schedule;
pub mod subjects;
