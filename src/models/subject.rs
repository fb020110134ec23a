//! Subject records.

use serde::{Deserialize, Serialize};

use crate::api::{SubjectId, UserId};

/// A subject owned by one user. Subject names are unique per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub user_id: UserId,
    pub name: String,
}
