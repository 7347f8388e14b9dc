use image::RgbaImage;
use reqwest::Client;
use std::time::Duration;

use crate::error::{LoadError, LoadResult};
use crate::types::GitHubProfile;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal client for the public GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> LoadResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(http, api_base))
    }

    pub fn with_client(http: Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    async fn get_bytes(&self, url: &str) -> LoadResult<Vec<u8>> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    /// `GET /users/{username}` on the configured API base.
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.api_base.trim_end_matches('/'), username)
    }

    pub async fn fetch_profile(&self, username: &str) -> LoadResult<GitHubProfile> {
        let body = self.get_bytes(&self.profile_url(username)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_avatar(&self, avatar_url: &str) -> LoadResult<RgbaImage> {
        let body = self.get_bytes(avatar_url).await?;
        Ok(image::load_from_memory(&body)?.to_rgba8())
    }
}

/// Fetch a profile, reporting failures and returning `None` instead.
pub async fn load_profile(client: &GitHubClient, username: &str) -> Option<GitHubProfile> {
    match client.fetch_profile(username).await {
        Ok(profile) => {
            tracing::info!(login = %profile.login, "fetched GitHub profile");
            Some(profile)
        }
        Err(e) => {
            tracing::error!(username, error = %e, "error fetching GitHub data");
            None
        }
    }
}

pub async fn load_avatar(client: &GitHubClient, avatar_url: &str) -> Option<RgbaImage> {
    match client.fetch_avatar(avatar_url).await {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(avatar_url, error = %e, "avatar unavailable");
            None
        }
    }
}
