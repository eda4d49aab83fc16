//! VK method API client.
//!
//! Every call is a single GET to `{base_url}/{method}` with the access token
//! and API version appended. No retries, no paging: follower lists are
//! whatever the API returns for its default page.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use vkgraph_core::{FetchError, FetchResult, UserInfo, UserSource};

use crate::response::{self, FollowersPage, UserRef};

/// Default VK method endpoint.
pub const DEFAULT_API_URL: &str = "https://api.vk.com/method";

/// API version sent with every call.
pub const DEFAULT_API_VERSION: &str = "5.131";

/// Profile fields requested by `users.get`.
pub const USER_FIELDS: &str = "screen_name,sex,home_town,city";

/// Connection settings for [`VkClient`].
#[derive(Debug, Clone)]
pub struct VkConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub version: String,
    pub timeout_secs: u64,
}

impl Default for VkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for the VK method API.
#[derive(Clone)]
pub struct VkClient {
    config: VkConfig,
    client: reqwest::Client,
}

impl VkClient {
    /// Create a new client from config.
    pub fn new(config: VkConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        let config = VkConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Self { config, client }
    }

    /// Create a client against `base_url` with the default version.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::new(VkConfig {
            base_url: base_url.into(),
            token,
            ..VkConfig::default()
        })
    }

    pub fn config(&self) -> &VkConfig {
        &self.config
    }

    /// Resolve a handle (screen name or numeric id as text) to a user id.
    pub async fn get_user_id(&self, handle: &str) -> FetchResult<i64> {
        let users: Vec<UserRef> = self
            .call("users.get", &[("user_ids", handle.to_string())])
            .await?;

        users
            .into_iter()
            .next()
            .map(|u| u.id)
            .ok_or_else(|| FetchError::not_found(handle))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> FetchResult<T> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if let Some(token) = &self.config.token {
            query.push(("access_token", token.as_str()));
        }
        query.push(("v", self.config.version.as_str()));

        let response = self
            .client
            .get(format!("{}/{}", self.config.base_url, method))
            .query(&query)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_http_error)?;
        debug!(method, status = status.as_u16(), bytes = body.len(), "VK API response");

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response::decode(&body)
    }
}

fn map_http_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Network(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        FetchError::Network(format!("Connection error: {}", error))
    } else {
        FetchError::Network(error.to_string())
    }
}

#[async_trait]
impl UserSource for VkClient {
    async fn fetch_user_info(&self, user_id: i64) -> FetchResult<UserInfo> {
        let users: Vec<UserInfo> = self
            .call(
                "users.get",
                &[
                    ("user_ids", user_id.to_string()),
                    ("fields", USER_FIELDS.to_string()),
                ],
            )
            .await?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::not_found(user_id))
    }

    async fn fetch_followers(&self, user_id: i64) -> FetchResult<Vec<i64>> {
        let page: FollowersPage = self
            .call("users.getFollowers", &[("user_id", user_id.to_string())])
            .await?;
        Ok(page.items)
    }
}
