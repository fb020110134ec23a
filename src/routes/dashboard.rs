//! Dashboard summary types.

use serde::{Deserialize, Serialize};

/// Key statistics for the dashboard home page.
///
/// Percentages and the average difficulty are rounded to one decimal.
/// A user with no topics gets the all-zero summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub remaining_topics: usize,
    pub total_estimated_hours: f64,
    pub avg_difficulty: f64,
    pub completion_percentage: f64,
}
