//! Schedule generation and study history.

use chrono::{Local, NaiveDate};

use crate::api::UserId;
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::CompletedTopic;
use crate::routes::schedule::{CompletedSession, HistoryDay, ScheduleView};
use crate::scheduler::build_schedule;

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod schedule_tests;

/// Display format used for day labels across the schedule views.
const DAY_LABEL_FORMAT: &str = "%A, %B %d, %Y";

/// Generate today's study schedule for one user.
///
/// Fetches the user's incomplete topics in priority order and packs them
/// into the daily budget. A non-positive `daily_limit_hours` is rejected
/// with a validation error before any packing happens.
pub async fn generate_schedule(
    repo: &dyn FullRepository,
    user_id: UserId,
    daily_limit_hours: f64,
) -> RepositoryResult<ScheduleView> {
    let topics = repo.fetch_prioritized_topics(user_id).await?;

    let schedule = build_schedule(&topics, daily_limit_hours)
        .map_err(|e| RepositoryError::validation(e.to_string()))?;

    Ok(ScheduleView {
        today: Local::now().date_naive().format(DAY_LABEL_FORMAT).to_string(),
        entries: schedule.entries,
        total_hours: schedule.total_hours,
    })
}

/// Completed study sessions grouped by day, newest day first.
pub async fn fetch_history(
    repo: &dyn FullRepository,
    user_id: UserId,
) -> RepositoryResult<Vec<HistoryDay>> {
    let completed = repo.fetch_completed_topics(user_id).await?;
    Ok(group_history(completed))
}

/// Group completed topics into day buckets, newest day first with
/// subjects alphabetical inside each day.
pub(crate) fn group_history(mut completed: Vec<CompletedTopic>) -> Vec<HistoryDay> {
    completed.sort_by(|a, b| {
        b.completion_date
            .cmp(&a.completion_date)
            .then(a.subject_name.cmp(&b.subject_name))
    });

    let mut days: Vec<(NaiveDate, HistoryDay)> = Vec::new();
    for topic in completed {
        let session = CompletedSession {
            subject: topic.subject_name,
            topic: topic.topic_name,
            hours: topic.hours,
        };

        match days.last_mut() {
            Some((date, day)) if *date == topic.completion_date => day.sessions.push(session),
            _ => days.push((
                topic.completion_date,
                HistoryDay {
                    label: topic
                        .completion_date
                        .format(DAY_LABEL_FORMAT)
                        .to_string(),
                    sessions: vec![session],
                },
            )),
        }
    }

    days.into_iter().map(|(_, day)| day).collect()
}
