//! Core data types for Healthlog
//!
//! This module defines the records exchanged with the gateway and held by the store:
//! - `User`: The authenticated account and its onboarding profile
//! - `Credentials`: Transient login/sign-up input
//! - `FoodEntry` and `ActivityEntry`: Logged records
//! - `NewFoodEntry`, `NewActivityEntry`, `ProfileUpdate`: Drafts sent to the gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    /// Session token, merged in after login or sign-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// Whether the profile carries age, weight and goal.
    ///
    /// Zero age or zero weight count as missing.
    pub fn onboarding_completed(&self) -> bool {
        let age = self.age.is_some_and(|a| a > 0);
        let weight = self.weight.is_some_and(|w| w > 0.0);
        age && weight && self.goal.is_some()
    }

    /// Apply a profile update, leaving unset fields untouched
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(goal) = update.goal {
            self.goal = Some(goal);
        }
    }
}

/// Fitness goal chosen during onboarding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Lose => write!(f, "lose"),
            Goal::Maintain => write!(f, "maintain"),
            Goal::Gain => write!(f, "gain"),
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(format!("unknown goal: {}", other)),
        }
    }
}

/// Login or sign-up input. Never stored.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Credentials for signing in to an existing account
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: None,
            email: email.into(),
            password: password.into(),
        }
    }

    /// Credentials for creating an account
    pub fn signup(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Meal a food entry belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Get all meal types in display order
    pub fn all() -> &'static [MealType] {
        &[
            MealType::Breakfast,
            MealType::Lunch,
            MealType::Dinner,
            MealType::Snack,
        ]
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "Breakfast"),
            MealType::Lunch => write!(f, "Lunch"),
            MealType::Dinner => write!(f, "Dinner"),
            MealType::Snack => write!(f, "Snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" | "snacks" => Ok(MealType::Snack),
            other => Err(format!("unknown meal type: {}", other)),
        }
    }
}

/// A logged food item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    pub calories: u32,
    pub meal_type: MealType,
    pub created_at: DateTime<Utc>,
}

/// A logged activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub name: String,
    /// Duration in minutes
    pub duration: u32,
    /// Calories burned
    pub calories: u32,
    pub created_at: DateTime<Utc>,
}

/// Food entry as submitted, before the gateway assigns id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodEntry {
    pub name: String,
    pub calories: u32,
    pub meal_type: MealType,
}

/// Activity entry as submitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityEntry {
    pub name: String,
    pub duration: u32,
    pub calories: u32,
}

/// Partial profile edit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.weight.is_none() && self.goal.is_none()
    }
}
