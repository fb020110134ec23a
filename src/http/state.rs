//! Application state for the HTTP server.

use std::sync::Arc;

use super::sessions::SessionStore;
use crate::db::repository::FullRepository;
use crate::scheduler::DEFAULT_DAILY_LIMIT_HOURS;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// In-process session store for bearer tokens
    pub sessions: SessionStore,
    /// Daily study budget handed to the schedule builder unless the
    /// request overrides it
    pub daily_limit_hours: f64,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            sessions: SessionStore::new(),
            daily_limit_hours: DEFAULT_DAILY_LIMIT_HOURS,
        }
    }

    /// Override the default daily study budget.
    pub fn with_daily_limit(mut self, hours: f64) -> Self {
        self.daily_limit_hours = hours;
        self
    }
}
