//! Application state snapshot
//!
//! Plain data held by the store. Views receive clones; only `Store` writes.

use chrono::NaiveDate;

use crate::models::{ActivityEntry, FoodEntry, User};
use crate::router::{Route, Screen};
use crate::summary::{entries_on, DaySummary};

/// Everything the view layer renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Signed-in user, `None` when logged out
    pub current_user: Option<User>,
    /// Set once the startup session check has settled; never reset
    pub session_fetched: bool,
    /// Set once the whole startup group has settled
    pub initialized: bool,
    pub food_entries: Vec<FoodEntry>,
    pub activity_entries: Vec<ActivityEntry>,
    /// Current page for a signed-in user
    pub location: Route,
    /// Advanced whenever a session starts or ends
    pub(crate) epoch: u64,
}

impl AppState {
    /// Derived from the current user on every read
    pub fn onboarding_completed(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(User::onboarding_completed)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn screen(&self) -> Screen {
        match (&self.current_user, self.session_fetched) {
            (Some(_), _) => Screen::Page(self.location),
            (None, true) => Screen::Login,
            (None, false) => Screen::Loading,
        }
    }

    pub fn food_on(&self, day: NaiveDate) -> Vec<&FoodEntry> {
        entries_on(&self.food_entries, day)
    }

    pub fn activities_on(&self, day: NaiveDate) -> Vec<&ActivityEntry> {
        entries_on(&self.activity_entries, day)
    }

    pub fn summary(&self, day: NaiveDate) -> DaySummary {
        DaySummary::compute(&self.food_entries, &self.activity_entries, day)
    }

    /// Session generation this snapshot belongs to
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
