//! Study reminder types.

use serde::{Deserialize, Serialize};

/// The topic a reminder points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderFocus {
    pub subject: String,
    pub topic: String,
    pub difficulty: i32,
}

/// A personalized study nudge for the client-side pop-up.
///
/// `focus` is absent when the user has completed every recorded topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<ReminderFocus>,
}
