use common::models::{ApiErrorBody, LeaderboardEntry, UserProfileRecord};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::FetchError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        DashboardClient {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfileRecord, FetchError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(FetchError::EmptyUserId);
        }

        info!("Fetching profile data for user: {}", user_id);
        let url = format!("{}/profile/{}", self.base_url, urlencoding::encode(user_id));
        self.get_json(&url, "user profile").await
    }

    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, FetchError> {
        info!("Fetching global leaderboard data");
        let url = format!("{}/leaderboard", self.base_url);
        self.get_json(&url, "leaderboard").await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &'static str,
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| self.network_error(source))?;

        if !response.status().is_success() {
            return Err(status_error(response, resource).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.network_error(source))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { resource, source })
    }

    fn network_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Network {
            base_url: self.base_url.clone(),
            source,
        }
    }
}

/// Prefers the body's `error` field, then the status reason, then the bare code.
async fn status_error(response: Response, resource: &'static str) -> FetchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|body| body.error)
        .ok()
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    FetchError::Status {
        resource,
        status: status.as_u16(),
        message,
    }
}
