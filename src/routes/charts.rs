//! Chart data types.

use serde::{Deserialize, Serialize};

/// Average topic difficulty for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDifficulty {
    pub subject_name: String,
    pub avg_difficulty: f64,
}

/// Difficulty of one topic, for the per-topic ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDifficulty {
    pub topic_name: String,
    pub subject_name: String,
    pub difficulty: i32,
}

/// Data for the charts page: per-subject averages plus a descending
/// per-topic difficulty ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub subjects: Vec<SubjectDifficulty>,
    pub topics: Vec<TopicDifficulty>,
}
