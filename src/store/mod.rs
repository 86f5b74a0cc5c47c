//! Application State Container
//!
//! `Store` is the single writer of `AppState`. Views hold a cloned handle,
//! read snapshots or subscribe to changes, and mutate only through the named
//! operations below.
//!
//! ## Session epochs
//!
//! Every gateway call records the epoch it was issued under. Logout and a new
//! login advance the epoch, and a response carrying an older epoch is dropped
//! with `AppError::StaleSession` instead of being applied.

mod startup;
mod state;

pub use startup::{InitFailure, InitReport, StartupTask};
pub use state::AppState;

use std::sync::Arc;
use tokio::sync::{watch, OnceCell};

use crate::error::{AppError, AppResult};
use crate::gateway::{AuthPayload, Gateway};
use crate::models::{
    ActivityEntry, Credentials, FoodEntry, NewActivityEntry, NewFoodEntry, ProfileUpdate, User,
};
use crate::router::Route;
use crate::session::SessionStore;

/// Handle to the application state container
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    gateway: Arc<dyn Gateway>,
    session: Arc<dyn SessionStore>,
    state: watch::Sender<AppState>,
    startup: OnceCell<InitReport>,
}

impl Store {
    pub fn new(gateway: Arc<dyn Gateway>, session: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(AppState::default());

        Self {
            inner: Arc::new(Inner {
                gateway,
                session,
                state,
                startup: OnceCell::new(),
            }),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    /// Restore a remembered session. Runs once; later calls return the first report.
    pub async fn initialize(&self) -> InitReport {
        self.inner
            .startup
            .get_or_init(|| self.run_startup())
            .await
            .clone()
    }

    /// Create an account and sign in as it
    pub async fn signup(&self, credentials: &Credentials) -> AppResult<()> {
        let (epoch, _) = self.ticket();
        tracing::debug!(email = %credentials.email, "Signing up");

        let payload = self.inner.gateway.register(credentials).await?;
        self.establish(epoch, payload)?;
        self.refresh_entries().await;
        Ok(())
    }

    /// Sign in to an existing account
    pub async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        let (epoch, _) = self.ticket();
        tracing::debug!(email = %credentials.email, "Logging in");

        let payload = self.inner.gateway.login(credentials).await?;
        self.establish(epoch, payload)?;
        self.refresh_entries().await;
        Ok(())
    }

    /// Resolve the persisted token to a user.
    ///
    /// `session_fetched` is set on every path, including failures.
    pub async fn fetch_session(&self) -> AppResult<()> {
        let result = self.load_session().await;
        self.mark_session_fetched();
        result
    }

    /// Replace the food collection with the gateway's listing
    pub async fn fetch_food_entries(&self) -> AppResult<()> {
        let (epoch, token) = self.ticket();
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let entries = self.inner.gateway.list_food(&token).await?;
        let count = entries.len();
        self.apply_if_current(epoch, |state| state.food_entries = entries)?;

        tracing::debug!(count, "Loaded food entries");
        Ok(())
    }

    /// Replace the activity collection with the gateway's listing
    pub async fn fetch_activity_entries(&self) -> AppResult<()> {
        let (epoch, token) = self.ticket();
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let entries = self.inner.gateway.list_activities(&token).await?;
        let count = entries.len();
        self.apply_if_current(epoch, |state| state.activity_entries = entries)?;

        tracing::debug!(count, "Loaded activity entries");
        Ok(())
    }

    /// End the session and return to the landing route.
    ///
    /// Entry collections are left as they are.
    pub fn logout(&self) {
        let session = &self.inner.session;
        self.inner.state.send_modify(|state| {
            session.clear();
            state.epoch += 1;
            state.current_user = None;
            state.location = Route::Dashboard;
        });

        tracing::info!("Logged out");
    }

    /// Submit a food entry and append the gateway's canonical record
    pub async fn add_food_entry(&self, entry: &NewFoodEntry) -> AppResult<FoodEntry> {
        let (epoch, token) = self.ticket();
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let record = self.inner.gateway.create_food(&token, entry).await?;
        let appended = record.clone();
        self.apply_if_current(epoch, |state| state.food_entries.push(appended))?;

        tracing::debug!(id = %record.id, calories = record.calories, "Food entry added");
        Ok(record)
    }

    /// Submit an activity entry and append the gateway's canonical record
    pub async fn add_activity_entry(&self, entry: &NewActivityEntry) -> AppResult<ActivityEntry> {
        let (epoch, token) = self.ticket();
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let record = self.inner.gateway.create_activity(&token, entry).await?;
        let appended = record.clone();
        self.apply_if_current(epoch, |state| state.activity_entries.push(appended))?;

        tracing::debug!(id = %record.id, minutes = record.duration, "Activity entry added");
        Ok(record)
    }

    /// Edit the onboarding profile of the signed-in user
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<User> {
        let (epoch, token) = self.ticket();
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let mut user = self.inner.gateway.update_profile(&token, update).await?;
        user.token = Some(token);
        let stored = user.clone();
        self.apply_if_current(epoch, |state| state.current_user = Some(stored))?;

        tracing::info!(
            user_id = %user.id,
            onboarding_completed = user.onboarding_completed(),
            "Profile updated"
        );
        Ok(user)
    }

    /// Switch pages
    pub fn navigate(&self, route: Route) {
        self.inner.state.send_if_modified(|state| {
            if state.location == route {
                return false;
            }
            state.location = route;
            true
        });
    }

    /// Epoch and session token, read together so a concurrent logout is
    /// seen either before or after both. The signed-in user's token wins over
    /// the persisted one.
    fn ticket(&self) -> (u64, Option<String>) {
        let state = self.inner.state.borrow();
        let token = state
            .current_user
            .as_ref()
            .and_then(|user| user.token.clone())
            .or_else(|| self.inner.session.read());
        (state.epoch, token)
    }

    /// Run `apply` only if no session change happened since `epoch`
    fn apply_if_current(&self, epoch: u64, apply: impl FnOnce(&mut AppState)) -> AppResult<()> {
        let applied = self.inner.state.send_if_modified(|state| {
            if state.epoch != epoch {
                return false;
            }
            apply(state);
            true
        });

        if applied {
            Ok(())
        } else {
            tracing::warn!(epoch, "Discarding response from an ended session");
            Err(AppError::StaleSession)
        }
    }

    /// Install a freshly authenticated user and persist its token
    fn establish(&self, epoch: u64, payload: AuthPayload) -> AppResult<()> {
        let AuthPayload { mut user, jwt } = payload;
        user.token = Some(jwt.clone());
        let user_id = user.id.clone();
        let onboarding_completed = user.onboarding_completed();

        let session = &self.inner.session;
        self.apply_if_current(epoch, |state| {
            session.save(&jwt);
            state.epoch += 1;
            state.current_user = Some(user);
            state.location = Route::Dashboard;
        })?;

        tracing::info!(user_id = %user_id, onboarding_completed, "Session established");
        Ok(())
    }

    /// Reload both collections for the session just established
    async fn refresh_entries(&self) {
        let (food, activities) =
            tokio::join!(self.fetch_food_entries(), self.fetch_activity_entries());

        for (task, result) in [
            (StartupTask::FoodEntries, food),
            (StartupTask::ActivityEntries, activities),
        ] {
            if let Err(e) = result {
                tracing::warn!(task = %task, error = %e, "Failed to refresh entries");
            }
        }
    }

    async fn load_session(&self) -> AppResult<()> {
        let (epoch, token) = self.ticket();
        let Some(token) = token else {
            return Ok(());
        };

        match self.inner.gateway.me(&token).await? {
            Some(mut user) => {
                user.token = Some(token);
                let user_id = user.id.clone();
                self.apply_if_current(epoch, |state| state.current_user = Some(user))?;
                tracing::info!(user_id = %user_id, "Session restored");
            }
            None => {
                let session = &self.inner.session;
                self.apply_if_current(epoch, |_| session.clear())?;
                tracing::info!("Remembered session is no longer valid");
            }
        }
        Ok(())
    }

    fn mark_session_fetched(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.session_fetched {
                return false;
            }
            state.session_fetched = true;
            true
        });
    }
}
