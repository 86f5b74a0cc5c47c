//! # Healthlog
//!
//! Personal health tracking client: sign in, log food and activities, and
//! read a daily dashboard.
//!
//! ## Modules
//!
//! - [`store`]: Application state container, the single writer of app state
//! - [`session`]: Durable session token storage
//! - [`gateway`]: Backend contract with mock and HTTP implementations
//! - [`summary`]: Daily totals derived from logged entries
//! - [`forms`]: Form state and validation for the view layer
//! - [`router`]: Routes and screen selection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthlog::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::new(
//!         Arc::new(MockGateway::new()),
//!         Arc::new(FileSessionStore::new("session.json")),
//!     );
//!
//!     // Restore a remembered session, if any
//!     store.initialize().await;
//!
//!     if !store.snapshot().is_authenticated() {
//!         store
//!             .signup(&Credentials::signup("sam", "sam@example.com", "secret"))
//!             .await?;
//!     }
//!
//!     store
//!         .add_food_entry(&NewFoodEntry {
//!             name: "Oatmeal".to_string(),
//!             calories: 300,
//!             meal_type: MealType::Breakfast,
//!         })
//!         .await?;
//!
//!     let summary = store.snapshot().summary(summary::today());
//!     println!("Eaten today: {} kcal", summary.consumed);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod router;
pub mod session;
pub mod store;
pub mod summary;

// Re-export top-level types for convenience
pub use models::{
    ActivityEntry, Credentials, FoodEntry, Goal, MealType, NewActivityEntry, NewFoodEntry,
    ProfileUpdate, User,
};

pub use error::{AppError, AppResult, GatewayError, GatewayResult, ValidationError};

pub use store::{AppState, InitFailure, InitReport, StartupTask, Store};

pub use session::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY};

pub use gateway::{AuthPayload, Envelope, Gateway, HttpGateway, MePayload, MockGateway};

pub use router::{Route, Screen};

pub use summary::DaySummary;

pub use forms::{ActivityForm, AuthMode, FoodForm, LoginForm, QuickActivity, QUICK_ACTIVITIES};

pub use config::{Config, ConfigError, GatewayConfig, GatewayMode, LoggingConfig, SessionConfig};
