//! Startup
//!
//! Restores a remembered session. The three fetches run as one group: each
//! failure is recorded without holding up the others, and the group settles
//! into a single report.

use std::fmt;

use super::Store;
use crate::error::AppResult;

/// One of the fetches issued at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupTask {
    Session,
    FoodEntries,
    ActivityEntries,
}

impl fmt::Display for StartupTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupTask::Session => write!(f, "session"),
            StartupTask::FoodEntries => write!(f, "food entries"),
            StartupTask::ActivityEntries => write!(f, "activity entries"),
        }
    }
}

/// A startup fetch that did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitFailure {
    pub task: StartupTask,
    pub error: String,
}

/// Outcome of `Store::initialize`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// A token was persisted when startup began
    pub token_found: bool,
    /// A user was signed in when startup settled
    pub restored: bool,
    pub failures: Vec<InitFailure>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, task: StartupTask, result: AppResult<()>) {
        if let Err(e) = result {
            tracing::warn!(task = %task, error = %e, "Startup fetch failed");
            self.failures.push(InitFailure {
                task,
                error: e.to_string(),
            });
        }
    }
}

impl Store {
    pub(super) async fn run_startup(&self) -> InitReport {
        let mut report = InitReport::default();

        if self.inner.session.read().is_none() {
            tracing::debug!("No remembered session");
            self.mark_session_fetched();
        } else {
            report.token_found = true;

            let (session, food, activities) = tokio::join!(
                self.fetch_session(),
                self.fetch_food_entries(),
                self.fetch_activity_entries(),
            );

            report.record(StartupTask::Session, session);
            report.record(StartupTask::FoodEntries, food);
            report.record(StartupTask::ActivityEntries, activities);
        }

        self.inner.state.send_modify(|state| state.initialized = true);
        report.restored = self.inner.state.borrow().current_user.is_some();

        tracing::info!(
            restored = report.restored,
            failures = report.failures.len(),
            "Startup complete"
        );
        report
    }
}
