//! Activity entry form
//!
//! Quick-add pre-fills duration and calories from the activity's burn rate;
//! changing the duration keeps calories in step while the name still matches
//! a quick activity.

use super::catalog::{quick_activity, QuickActivity};
use crate::error::{AppResult, ValidationError};
use crate::models::{ActivityEntry, NewActivityEntry};
use crate::store::Store;

/// Duration used when a quick activity is picked
pub const QUICK_ADD_MINUTES: u32 = 30;
pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 300;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityForm {
    pub name: String,
    pub duration: u32,
    pub calories: u32,
    pub show_form: bool,
    /// Message shown under the form after a failed submit
    pub error: Option<String>,
}

impl ActivityForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quick_add(&mut self, activity: &QuickActivity) {
        self.name = activity.name.to_string();
        self.duration = QUICK_ADD_MINUTES;
        self.calories = QUICK_ADD_MINUTES * activity.rate;
        self.show_form = true;
    }

    pub fn open(&mut self) {
        self.show_form = true;
    }

    /// Close without clearing the draft
    pub fn close(&mut self) {
        self.show_form = false;
    }

    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration;
        if let Some(activity) = quick_activity(&self.name) {
            self.calories = duration.saturating_mul(activity.rate);
        }
    }

    pub fn validate(&self) -> Result<NewActivityEntry, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() || self.duration == 0 || self.calories == 0 {
            return Err(ValidationError::MissingFields);
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration) {
            return Err(ValidationError::DurationOutOfRange {
                min: MIN_DURATION_MINUTES,
                max: MAX_DURATION_MINUTES,
            });
        }

        Ok(NewActivityEntry {
            name: name.to_string(),
            duration: self.duration,
            calories: self.calories,
        })
    }

    /// Validate, submit through the store, and reset on success
    pub async fn submit(&mut self, store: &Store) -> AppResult<ActivityEntry> {
        self.error = None;

        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        let entry = store.add_activity_entry(&draft).await?;
        *self = Self::default();
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::catalog::QUICK_ACTIVITIES;
    use crate::gateway::MockGateway;
    use crate::models::Credentials;
    use crate::session::MemorySessionStore;
    use crate::summary::{today, total_minutes};
    use std::sync::Arc;

    fn running() -> &'static QuickActivity {
        quick_activity("Running").unwrap()
    }

    #[test]
    fn test_quick_add_prefills_from_rate() {
        let mut form = ActivityForm::new();
        form.quick_add(running());
        assert_eq!(form.name, "Running");
        assert_eq!(form.duration, 30);
        assert_eq!(form.calories, 300);
        assert!(form.show_form);
    }

    #[test]
    fn test_duration_change_recomputes_for_known_activity() {
        let mut form = ActivityForm::new();
        form.quick_add(running());
        form.set_duration(45);
        assert_eq!(form.calories, 450);
    }

    #[test]
    fn test_duration_change_keeps_calories_for_custom_name() {
        let mut form = ActivityForm::new();
        form.quick_add(running());
        form.name = "Trail Run".to_string();
        form.set_duration(45);
        assert_eq!(form.duration, 45);
        assert_eq!(form.calories, 300);
    }

    #[test]
    fn test_every_template_prefills() {
        for activity in QUICK_ACTIVITIES {
            let mut form = ActivityForm::new();
            form.quick_add(activity);
            assert_eq!(form.calories, 30 * activity.rate);
            assert!(form.validate().is_ok());
        }
    }

    #[test]
    fn test_duration_bounds() {
        let form = ActivityForm {
            name: "Hike".to_string(),
            duration: 301,
            calories: 900,
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::DurationOutOfRange { min: 1, max: 300 })
        );
    }

    #[test]
    fn test_huge_duration_is_rejected_not_overflowed() {
        let mut form = ActivityForm::new();
        form.quick_add(running());
        form.set_duration(u32::MAX);

        assert_eq!(form.calories, u32::MAX);
        assert_eq!(
            form.validate(),
            Err(ValidationError::DurationOutOfRange { min: 1, max: 300 })
        );
    }

    #[tokio::test]
    async fn test_missing_fields_surface_message() {
        let store = Store::new(
            Arc::new(MockGateway::new()),
            Arc::new(MemorySessionStore::new()),
        );
        let mut form = ActivityForm {
            name: "Stretching".to_string(),
            show_form: true,
            ..Default::default()
        };

        assert!(form.submit(&store).await.is_err());
        assert_eq!(form.error.as_deref(), Some("Please fill in all fields"));
        assert!(form.show_form);
    }

    #[tokio::test]
    async fn test_submit_resets_and_appends() {
        let store = Store::new(
            Arc::new(MockGateway::new()),
            Arc::new(MemorySessionStore::new()),
        );
        store
            .signup(&Credentials::signup("sam", "sam@example.com", "pw"))
            .await
            .unwrap();

        let mut form = ActivityForm::new();
        form.quick_add(running());
        let entry = form.submit(&store).await.unwrap();

        assert_eq!(entry.calories, 300);
        assert_eq!(form, ActivityForm::default());
        assert_eq!(total_minutes(store.snapshot().activities_on(today())), 30);
    }
}
