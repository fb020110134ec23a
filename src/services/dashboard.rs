//! Dashboard summary computation.

use crate::api::UserId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::Topic;
use crate::routes::dashboard::DashboardSummary;

/// Key statistics for the dashboard home page of one user.
pub async fn dashboard_summary(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<DashboardSummary> {
    let topics = repo.fetch_topics_for_user(user_id).await?;
    Ok(compute_summary(&topics))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregate dashboard statistics from a user's topics.
pub(crate) fn compute_summary(topics: &[Topic]) -> DashboardSummary {
    let total_topics = topics.len();
    if total_topics == 0 {
        return DashboardSummary::default();
    }

    let completed_topics = topics.iter().filter(|t| t.is_completed).count();
    let total_estimated_hours: f64 = topics.iter().map(|t| t.estimated_hours).sum();
    let avg_difficulty =
        topics.iter().map(|t| t.difficulty as f64).sum::<f64>() / total_topics as f64;
    let completion_percentage = completed_topics as f64 / total_topics as f64 * 100.0;

    DashboardSummary {
        total_topics,
        completed_topics,
        remaining_topics: total_topics - completed_topics,
        total_estimated_hours,
        avg_difficulty: round1(avg_difficulty),
        completion_percentage: round1(completion_percentage),
    }
}
