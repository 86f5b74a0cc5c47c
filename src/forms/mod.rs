//! Form Helpers
//!
//! Local form state for the view layer. Validation happens here, before
//! anything reaches the store:
//!
//! - **FoodForm**: custom and quick-add food entries
//! - **ActivityForm**: activities with rate-based calorie pre-fill
//! - **LoginForm**: sign-in / sign-up toggle

mod activity;
pub mod catalog;
mod food;
mod login;

pub use activity::{ActivityForm, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, QUICK_ADD_MINUTES};
pub use catalog::{quick_activity, QuickActivity, QuickMeal, QUICK_ACTIVITIES, QUICK_MEALS};
pub use food::FoodForm;
pub use login::{AuthMode, LoginForm};
