//! Schedule view types.

use serde::{Deserialize, Serialize};

use crate::scheduler::ScheduleEntry;

/// The generated schedule for today, as rendered by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleView {
    /// Display date, e.g. "Friday, August 07, 2026".
    pub today: String,
    pub entries: Vec<ScheduleEntry>,
    pub total_hours: f64,
}

/// One completed study session in the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub subject: String,
    pub topic: String,
    pub hours: f64,
}

/// Completed sessions grouped under one calendar day, newest day first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    /// Display label, e.g. "Friday, August 07, 2026".
    pub label: String,
    pub sessions: Vec<CompletedSession>,
}
