//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::alarms::ScheduledAlarm;
pub use crate::routes::charts::ChartData;
pub use crate::routes::charts::SubjectDifficulty;
pub use crate::routes::charts::TopicDifficulty;
pub use crate::routes::dashboard::DashboardSummary;
pub use crate::routes::reminder::ReminderFocus;
pub use crate::routes::reminder::ReminderMessage;
pub use crate::routes::schedule::CompletedSession;
pub use crate::routes::schedule::HistoryDay;
pub use crate::routes::schedule::ScheduleView;
pub use crate::routes::subjects::SubjectWithTopics;
pub use crate::routes::subjects::TopicSummary;

pub use crate::scheduler::DailySchedule;
pub use crate::scheduler::ScheduleEntry;

use serde::{Deserialize, Serialize};

/// User identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Subject identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub i64);

/// Topic identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicId(pub i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl SubjectId {
    pub fn new(value: i64) -> Self {
        SubjectId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TopicId {
    pub fn new(value: i64) -> Self {
        TopicId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
impl From<SubjectId> for i64 {
    fn from(id: SubjectId) -> Self {
        id.0
    }
}
impl From<TopicId> for i64 {
    fn from(id: TopicId) -> Self {
        id.0
    }
}
