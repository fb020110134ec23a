//! Subject management view types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{SubjectId, TopicId};

/// Topic fields shown in the subject management view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic_id: TopicId,
    pub name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

/// One subject with all of its topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectWithTopics {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub topics: Vec<TopicSummary>,
}
