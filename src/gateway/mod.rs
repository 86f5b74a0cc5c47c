//! Remote Gateway
//!
//! The API the store talks to. Two implementations:
//!
//! - **MockGateway**: in-process stand-in that simulates persistence
//! - **HttpGateway**: REST client for a real backend
//!
//! Protected calls take the session token they are issued under.

mod http;
mod mock;

pub use http::HttpGateway;
pub use mock::MockGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::models::{
    ActivityEntry, Credentials, FoodEntry, NewActivityEntry, NewFoodEntry, ProfileUpdate, User,
};

/// Result envelope used on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response to register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub jwt: String,
}

/// Response to the current-user call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MePayload {
    #[serde(default)]
    pub user: Option<User>,
}

/// Operations the application state container needs from a backend
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Create an account and open a session for it
    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthPayload>;

    /// Open a session for an existing account
    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthPayload>;

    /// User owning `token`, if the token is still recognized
    async fn me(&self, token: &str) -> GatewayResult<Option<User>>;

    /// Edit the onboarding profile of the session's user
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> GatewayResult<User>;

    async fn list_food(&self, token: &str) -> GatewayResult<Vec<FoodEntry>>;

    /// Store a food entry; the returned record is canonical
    async fn create_food(&self, token: &str, entry: &NewFoodEntry) -> GatewayResult<FoodEntry>;

    async fn list_activities(&self, token: &str) -> GatewayResult<Vec<ActivityEntry>>;

    /// Store an activity entry; the returned record is canonical
    async fn create_activity(
        &self,
        token: &str,
        entry: &NewActivityEntry,
    ) -> GatewayResult<ActivityEntry>;
}
