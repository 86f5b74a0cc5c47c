//! HTTP Gateway
//!
//! REST client for a Healthlog-compatible backend. Every response body is a
//! `{ "data": ... }` envelope; protected calls send the session token as a
//! bearer credential.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{AuthPayload, Envelope, Gateway, MePayload};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    ActivityEntry, Credentials, FoodEntry, NewActivityEntry, NewFoodEntry, ProfileUpdate, User,
};

/// REST gateway client
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a client for `base_url` (e.g. "http://localhost:4000/api")
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the `data` envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope<T> = response
                .json()
                .await
                .map_err(|e| GatewayError::Decode(e.to_string()))?;
            return Ok(envelope.data);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %message, "Gateway request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
            StatusCode::NOT_FOUND => GatewayError::NotFound(message),
            _ => GatewayError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Unavailable
    } else {
        GatewayError::Request(e)
    }
}

/// Client errors on the auth endpoints mean the credentials were refused
fn auth_error(e: GatewayError) -> GatewayError {
    match e {
        GatewayError::Unauthorized => GatewayError::Rejected("invalid credentials".to_string()),
        GatewayError::Api { status, message } if (400..500).contains(&status) => {
            GatewayError::Rejected(message)
        }
        other => other,
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthPayload> {
        let request = self.client.post(self.url("/auth/register")).json(credentials);
        self.send(request).await.map_err(auth_error)
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthPayload> {
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        self.send(request).await.map_err(auth_error)
    }

    async fn me(&self, token: &str) -> GatewayResult<Option<User>> {
        let request = self.client.get(self.url("/users/me")).bearer_auth(token);
        match self.send::<MePayload>(request).await {
            Ok(payload) => Ok(payload.user),
            // Expired or revoked token: nobody is signed in
            Err(GatewayError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> GatewayResult<User> {
        let request = self
            .client
            .put(self.url("/users/me"))
            .bearer_auth(token)
            .json(&Envelope::new(update));
        let payload: MePayload = self.send(request).await?;
        payload
            .user
            .ok_or_else(|| GatewayError::Decode("profile update returned no user".to_string()))
    }

    async fn list_food(&self, token: &str) -> GatewayResult<Vec<FoodEntry>> {
        let request = self.client.get(self.url("/food-logs")).bearer_auth(token);
        self.send(request).await
    }

    async fn create_food(&self, token: &str, entry: &NewFoodEntry) -> GatewayResult<FoodEntry> {
        let request = self
            .client
            .post(self.url("/food-logs"))
            .bearer_auth(token)
            .json(&Envelope::new(entry));
        self.send(request).await
    }

    async fn list_activities(&self, token: &str) -> GatewayResult<Vec<ActivityEntry>> {
        let request = self.client.get(self.url("/activity-logs")).bearer_auth(token);
        self.send(request).await
    }

    async fn create_activity(
        &self,
        token: &str,
        entry: &NewActivityEntry,
    ) -> GatewayResult<ActivityEntry> {
        let request = self
            .client
            .post(self.url("/activity-logs"))
            .bearer_auth(token)
            .json(&Envelope::new(entry));
        self.send(request).await
    }
}
