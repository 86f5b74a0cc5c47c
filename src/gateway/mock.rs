//! Mock Gateway
//!
//! In-process backend that simulates persistence. State lives in memory and,
//! when a data file is configured, is written back after every mutation.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthPayload, Gateway};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    ActivityEntry, Credentials, FoodEntry, NewActivityEntry, NewFoodEntry, ProfileUpdate, User,
};

/// In-memory gateway with optional JSON file backing
pub struct MockGateway {
    db: RwLock<MockDb>,
    latency: Duration,
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MockDb {
    #[serde(default)]
    accounts: Vec<Account>,
    /// token -> user id
    #[serde(default)]
    sessions: HashMap<String, String>,
    #[serde(default)]
    food: Vec<Owned<FoodEntry>>,
    #[serde(default)]
    activities: Vec<Owned<ActivityEntry>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Owned<T> {
    owner: String,
    entry: T,
}

impl MockDb {
    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email))
    }

    fn owner(&self, token: &str) -> GatewayResult<String> {
        self.sessions
            .get(token)
            .cloned()
            .ok_or(GatewayError::Unauthorized)
    }

    fn open_session(&mut self, user_id: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user_id.to_string());
        token
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create an empty in-memory gateway
    pub fn new() -> Self {
        Self {
            db: RwLock::new(MockDb::default()),
            latency: Duration::ZERO,
            path: None,
        }
    }

    /// Open a gateway persisted to `path`, loading existing data if present
    pub fn open(path: impl Into<PathBuf>) -> GatewayResult<Self> {
        let path = path.into();
        let db = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MockDb::default(),
            Err(e) => return Err(GatewayError::Storage(e.to_string())),
        };

        tracing::debug!(path = ?path, accounts = db.accounts.len(), "Opened mock gateway");

        Ok(Self {
            db: RwLock::new(db),
            latency: Duration::ZERO,
            path: Some(path),
        })
    }

    /// Builder method: delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn persist(&self, db: &MockDb) -> GatewayResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GatewayError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(db)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthPayload> {
        self.simulate_latency().await;

        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(GatewayError::Rejected(
                "email and password are required".to_string(),
            ));
        }

        let mut db = self.db.write().await;
        if db.account_by_email(email).is_some() {
            return Err(GatewayError::Rejected(
                "an account with this email already exists".to_string(),
            ));
        }

        let username = credentials
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email))
            .to_string();

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            email: email.to_string(),
            age: None,
            weight: None,
            goal: None,
            token: None,
        };

        db.accounts.push(Account {
            user: user.clone(),
            password: credentials.password.clone(),
        });
        let jwt = db.open_session(&user.id);
        self.persist(&db).await?;

        tracing::debug!(user_id = %user.id, "Mock account registered");
        Ok(AuthPayload { user, jwt })
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthPayload> {
        self.simulate_latency().await;

        let mut db = self.db.write().await;
        let user = match db.account_by_email(credentials.email.trim()) {
            Some(account) if account.password == credentials.password => account.user.clone(),
            _ => {
                return Err(GatewayError::Rejected(
                    "invalid email or password".to_string(),
                ))
            }
        };

        let jwt = db.open_session(&user.id);
        self.persist(&db).await?;

        Ok(AuthPayload { user, jwt })
    }

    async fn me(&self, token: &str) -> GatewayResult<Option<User>> {
        self.simulate_latency().await;

        let db = self.db.read().await;
        let user = db.sessions.get(token).and_then(|user_id| {
            db.accounts
                .iter()
                .find(|a| &a.user.id == user_id)
                .map(|a| a.user.clone())
        });
        Ok(user)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> GatewayResult<User> {
        self.simulate_latency().await;

        let mut db = self.db.write().await;
        let owner = db.owner(token)?;
        let account = db
            .accounts
            .iter_mut()
            .find(|a| a.user.id == owner)
            .ok_or_else(|| GatewayError::NotFound(format!("user {}", owner)))?;

        account.user.apply(update);
        let user = account.user.clone();
        self.persist(&db).await?;

        Ok(user)
    }

    async fn list_food(&self, token: &str) -> GatewayResult<Vec<FoodEntry>> {
        self.simulate_latency().await;

        let db = self.db.read().await;
        let owner = db.owner(token)?;
        Ok(db
            .food
            .iter()
            .filter(|o| o.owner == owner)
            .map(|o| o.entry.clone())
            .collect())
    }

    async fn create_food(&self, token: &str, entry: &NewFoodEntry) -> GatewayResult<FoodEntry> {
        self.simulate_latency().await;

        let mut db = self.db.write().await;
        let owner = db.owner(token)?;
        let record = FoodEntry {
            id: Uuid::new_v4().to_string(),
            name: entry.name.clone(),
            calories: entry.calories,
            meal_type: entry.meal_type,
            created_at: Utc::now(),
        };

        db.food.push(Owned {
            owner,
            entry: record.clone(),
        });
        self.persist(&db).await?;

        Ok(record)
    }

    async fn list_activities(&self, token: &str) -> GatewayResult<Vec<ActivityEntry>> {
        self.simulate_latency().await;

        let db = self.db.read().await;
        let owner = db.owner(token)?;
        Ok(db
            .activities
            .iter()
            .filter(|o| o.owner == owner)
            .map(|o| o.entry.clone())
            .collect())
    }

    async fn create_activity(
        &self,
        token: &str,
        entry: &NewActivityEntry,
    ) -> GatewayResult<ActivityEntry> {
        self.simulate_latency().await;

        let mut db = self.db.write().await;
        let owner = db.owner(token)?;
        let record = ActivityEntry {
            id: Uuid::new_v4().to_string(),
            name: entry.name.clone(),
            duration: entry.duration,
            calories: entry.calories,
            created_at: Utc::now(),
        };

        db.activities.push(Owned {
            owner,
            entry: record.clone(),
        });
        self.persist(&db).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, MealType};
    use tempfile::tempdir;

    fn oatmeal() -> NewFoodEntry {
        NewFoodEntry {
            name: "Oatmeal".to_string(),
            calories: 300,
            meal_type: MealType::Breakfast,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let gateway = MockGateway::new();
        let signup = Credentials::signup("sam", "sam@example.com", "pw");

        let registered = gateway.register(&signup).await.unwrap();
        assert_eq!(registered.user.username, "sam");
        assert!(!registered.jwt.is_empty());

        let logged_in = gateway
            .login(&Credentials::login("SAM@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert_ne!(logged_in.jwt, registered.jwt);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let gateway = MockGateway::new();
        let signup = Credentials::signup("sam", "sam@example.com", "pw");
        gateway.register(&signup).await.unwrap();

        let err = gateway.register(&signup).await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let gateway = MockGateway::new();
        gateway
            .register(&Credentials::signup("sam", "sam@example.com", "pw"))
            .await
            .unwrap();

        let err = gateway
            .login(&Credentials::login("sam@example.com", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_me_with_unknown_token() {
        let gateway = MockGateway::new();
        assert_eq!(gateway.me("bogus").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_are_scoped_to_owner() {
        let gateway = MockGateway::new();
        let a = gateway
            .register(&Credentials::signup("a", "a@example.com", "pw"))
            .await
            .unwrap();
        let b = gateway
            .register(&Credentials::signup("b", "b@example.com", "pw"))
            .await
            .unwrap();

        let created = gateway.create_food(&a.jwt, &oatmeal()).await.unwrap();
        assert_eq!(created.name, "Oatmeal");
        assert!(!created.id.is_empty());

        assert_eq!(gateway.list_food(&a.jwt).await.unwrap(), vec![created]);
        assert!(gateway.list_food(&b.jwt).await.unwrap().is_empty());

        let err = gateway.list_food("bogus").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let gateway = MockGateway::new();
        let auth = gateway
            .register(&Credentials::signup("sam", "sam@example.com", "pw"))
            .await
            .unwrap();

        let update = ProfileUpdate {
            age: Some(30),
            weight: Some(70.0),
            goal: Some(Goal::Lose),
        };
        let user = gateway.update_profile(&auth.jwt, &update).await.unwrap();
        assert!(user.onboarding_completed());

        let me = gateway.me(&auth.jwt).await.unwrap().unwrap();
        assert_eq!(me.goal, Some(Goal::Lose));
    }

    #[tokio::test]
    async fn test_file_backed_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mock_api.json");

        let jwt = {
            let gateway = MockGateway::open(&path).unwrap();
            let auth = gateway
                .register(&Credentials::signup("sam", "sam@example.com", "pw"))
                .await
                .unwrap();
            gateway
                .create_activity(
                    &auth.jwt,
                    &NewActivityEntry {
                        name: "Running".to_string(),
                        duration: 30,
                        calories: 300,
                    },
                )
                .await
                .unwrap();
            auth.jwt
        };

        let reopened = MockGateway::open(&path).unwrap();
        assert_eq!(reopened.data_file(), Some(path.as_path()));
        let me = reopened.me(&jwt).await.unwrap().unwrap();
        assert_eq!(me.username, "sam");
        let activities = reopened.list_activities(&jwt).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].calories, 300);
    }
}
