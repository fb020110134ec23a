//! Daily schedule builder.
//!
//! Packs a priority-ordered list of incomplete topics into a fixed daily
//! time budget. The pass is greedy and first-fit: topics are consumed in
//! the order given, a topic that no longer fits produces at most one
//! partial session for the remaining budget, and packing stops at the
//! first topic that does not fully fit. It deliberately does not attempt
//! to skip an oversized topic so that smaller ones could fill the day;
//! the priority order decides, not the packing.
//!
//! The builder is a pure function: no I/O, no shared state, safe to call
//! concurrently for any number of users. Input ordering is the caller's
//! contract (see [`crate::models::topic::sort_by_priority`]); the builder
//! never re-sorts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::TopicId;
use crate::models::PrioritizedTopic;

#[cfg(test)]
mod tests;

/// Default daily study budget in hours.
pub const DEFAULT_DAILY_LIMIT_HOURS: f64 = 8.0;

/// Smallest leftover budget worth scheduling as a partial session (6 minutes).
pub const MIN_PARTIAL_SESSION_HOURS: f64 = 0.1;

/// Validation errors raised before the packing pass runs.
///
/// The pass itself cannot fail: these only reject malformed input that the
/// store boundary should never have produced.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("daily limit must be positive, got {0}")]
    InvalidDailyLimit(f64),

    #[error("topic {topic_id} has non-positive estimated time {hours}")]
    InvalidEstimate { topic_id: TopicId, hours: f64 },
}

/// One slot of the generated schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub subject: String,
    /// Topic name; partial sessions carry a " (Partial Session - N mins)" suffix.
    pub topic: String,
    /// Hours allocated to this slot, never more than the topic's estimate.
    pub time_needed: f64,
    pub difficulty: i32,
    pub topic_id: TopicId,
    pub filename: Option<String>,
    pub scheduled_datetime: Option<String>,
}

/// An ordered day plan plus the total time it consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub entries: Vec<ScheduleEntry>,
    pub total_hours: f64,
}

fn full_entry(topic: &PrioritizedTopic) -> ScheduleEntry {
    ScheduleEntry {
        subject: topic.subject_name.clone(),
        topic: topic.topic_name.clone(),
        time_needed: topic.estimated_hours,
        difficulty: topic.difficulty,
        topic_id: topic.topic_id,
        filename: topic.material_filename.clone(),
        scheduled_datetime: topic.scheduled_display(),
    }
}

fn partial_entry(topic: &PrioritizedTopic, remaining_hours: f64) -> ScheduleEntry {
    // Minutes are rounded to the nearest whole minute for display.
    let minutes = (remaining_hours * 60.0).round() as i64;
    ScheduleEntry {
        topic: format!("{} (Partial Session - {} mins)", topic.topic_name, minutes),
        time_needed: remaining_hours,
        ..full_entry(topic)
    }
}

/// Build a daily schedule from priority-ordered incomplete topics.
///
/// Topics are packed greedily in input order until the budget runs out.
/// The first topic that does not fully fit yields a partial session for
/// the leftover budget when at least [`MIN_PARTIAL_SESSION_HOURS`] remain,
/// and the pass stops either way.
///
/// # Arguments
/// * `topics` - Incomplete topics, already in descending priority order
/// * `daily_limit_hours` - Positive daily budget (default 8.0)
///
/// # Returns
/// * `Ok(DailySchedule)` - Entries in input order; `total_hours` never
///   exceeds `daily_limit_hours`; at most one partial entry, always last
/// * `Err(ScheduleError)` - Non-positive budget or topic estimate
pub fn build_schedule(
    topics: &[PrioritizedTopic],
    daily_limit_hours: f64,
) -> Result<DailySchedule, ScheduleError> {
    if !daily_limit_hours.is_finite() || daily_limit_hours <= 0.0 {
        return Err(ScheduleError::InvalidDailyLimit(daily_limit_hours));
    }
    if let Some(bad) = topics
        .iter()
        .find(|t| !t.estimated_hours.is_finite() || t.estimated_hours <= 0.0)
    {
        return Err(ScheduleError::InvalidEstimate {
            topic_id: bad.topic_id,
            hours: bad.estimated_hours,
        });
    }

    let mut schedule = DailySchedule::default();

    for topic in topics {
        let need = topic.estimated_hours;

        if schedule.total_hours + need <= daily_limit_hours {
            schedule.entries.push(full_entry(topic));
            schedule.total_hours += need;
            continue;
        }

        let remaining = daily_limit_hours - schedule.total_hours;
        if remaining >= MIN_PARTIAL_SESSION_HOURS {
            schedule.entries.push(partial_entry(topic, remaining));
            schedule.total_hours += remaining;
        }
        // The budget is spent; later (lower-priority) topics never fit.
        break;
    }

    Ok(schedule)
}
