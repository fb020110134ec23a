//! Topic records and the priority ordering contract.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::api::{SubjectId, TopicId};

/// Minimum difficulty rating.
pub const DIFFICULTY_MIN: i32 = 1;
/// Maximum difficulty rating.
pub const DIFFICULTY_MAX: i32 = 5;

/// File extensions accepted for attached study material.
pub const ALLOWED_MATERIAL_EXTENSIONS: &[&str] =
    &["txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx"];

/// Check whether a study-material filename carries an accepted extension.
pub fn is_allowed_material(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ALLOWED_MATERIAL_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// A unit of study material belonging to one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub subject_id: SubjectId,
    pub name: String,
    /// Estimated study time in hours. Positive; validated at the boundary.
    pub estimated_hours: f64,
    /// Difficulty rating, 1-5.
    pub difficulty: i32,
    pub is_completed: bool,
    pub completion_date: Option<NaiveDate>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub material_filename: Option<String>,
}

/// Data required to create a new topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub subject_id: SubjectId,
    pub name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    pub scheduled_at: Option<NaiveDateTime>,
    pub material_filename: Option<String>,
}

/// An incomplete topic joined with its subject name, as consumed by the
/// schedule builder. Sequences of these are ordered by [`compare_priority`];
/// producing that order is the repository's contract with the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedTopic {
    pub topic_id: TopicId,
    pub subject_name: String,
    pub topic_name: String,
    pub estimated_hours: f64,
    pub difficulty: i32,
    pub material_filename: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl PrioritizedTopic {
    /// Static priority key: difficulty weighted by estimated time.
    pub fn priority(&self) -> f64 {
        self.difficulty as f64 * self.estimated_hours
    }

    /// Scheduled timestamp rendered in 12-hour display format.
    pub fn scheduled_display(&self) -> Option<String> {
        self.scheduled_at
            .map(|dt| dt.format("%Y-%m-%d %I:%M %p").to_string())
    }
}

/// Descending priority order: highest difficulty x time first, ties broken
/// by longest estimated time.
pub fn compare_priority(a: &PrioritizedTopic, b: &PrioritizedTopic) -> Ordering {
    b.priority()
        .partial_cmp(&a.priority())
        .unwrap_or(Ordering::Equal)
        .then(
            b.estimated_hours
                .partial_cmp(&a.estimated_hours)
                .unwrap_or(Ordering::Equal),
        )
}

/// Sort topics into the order the schedule builder expects.
pub fn sort_by_priority(topics: &mut [PrioritizedTopic]) {
    topics.sort_by(compare_priority);
}

/// A completed topic with the day it was finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTopic {
    pub subject_name: String,
    pub topic_name: String,
    pub hours: f64,
    pub completion_date: NaiveDate,
}

/// An incomplete topic that has an alarm timestamp attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTopic {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub subject_name: String,
    pub scheduled_at: NaiveDateTime,
}

/// The single most difficult incomplete topic for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyFocus {
    pub subject_name: String,
    pub topic_name: String,
    pub difficulty: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: i64, hours: f64, difficulty: i32) -> PrioritizedTopic {
        PrioritizedTopic {
            topic_id: TopicId::new(id),
            subject_name: "Maths".to_string(),
            topic_name: format!("topic_{}", id),
            estimated_hours: hours,
            difficulty,
            material_filename: None,
            scheduled_at: None,
        }
    }

    #[test]
    fn test_priority_key() {
        assert_eq!(topic(1, 3.0, 5).priority(), 15.0);
        assert_eq!(topic(2, 2.0, 3).priority(), 6.0);
    }

    #[test]
    fn test_sort_descending_with_time_tiebreak() {
        // Same key (2.0 * 3 == 6.0 * 1), longer estimate wins the tie.
        let mut topics = vec![topic(1, 2.0, 3), topic(2, 6.0, 1), topic(3, 4.0, 5)];
        sort_by_priority(&mut topics);

        let ids: Vec<i64> = topics.iter().map(|t| t.topic_id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_allowed_material_extensions() {
        assert!(is_allowed_material("notes.pdf"));
        assert!(is_allowed_material("diagram.PNG"));
        assert!(!is_allowed_material("script.exe"));
        assert!(!is_allowed_material("no_extension"));
        assert!(!is_allowed_material(".pdf"));
    }

    #[test]
    fn test_scheduled_display_is_twelve_hour() {
        let mut t = topic(1, 1.0, 1);
        t.scheduled_at = Some(
            NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap(),
        );
        assert_eq!(t.scheduled_display().unwrap(), "2026-03-14 03:30 PM");
    }
}
