//! Chart data computation.

use crate::api::UserId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::routes::charts::{ChartData, SubjectDifficulty, TopicDifficulty};
use crate::routes::subjects::SubjectWithTopics;

/// Chart data for one user: average difficulty per subject and the
/// per-topic difficulty ranking.
pub async fn chart_data(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<ChartData> {
    let subjects = repo.fetch_subjects_with_topics(user_id).await?;
    Ok(compute_chart_data(&subjects))
}

pub(crate) fn compute_chart_data(subjects: &[SubjectWithTopics]) -> ChartData {
    let subject_averages = subjects
        .iter()
        .filter(|s| !s.topics.is_empty())
        .map(|s| SubjectDifficulty {
            subject_name: s.subject_name.clone(),
            avg_difficulty: s.topics.iter().map(|t| t.difficulty as f64).sum::<f64>()
                / s.topics.len() as f64,
        })
        .collect();

    let mut topics: Vec<TopicDifficulty> = subjects
        .iter()
        .flat_map(|s| {
            s.topics.iter().map(|t| TopicDifficulty {
                topic_name: t.name.clone(),
                subject_name: s.subject_name.clone(),
                difficulty: t.difficulty,
            })
        })
        .collect();
    topics.sort_by(|a, b| b.difficulty.cmp(&a.difficulty));

    ChartData {
        subjects: subject_averages,
        topics,
    }
}
