//! Alarm view types.

use serde::{Deserialize, Serialize};

use crate::api::TopicId;

/// An upcoming study alarm, for client-side scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAlarm {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub subject_name: String,
    /// ISO-8601 timestamp for reliable JS parsing.
    pub scheduled_at: String,
}
