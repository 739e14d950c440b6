//! Reddit API Client
//!
//! Application-only OAuth (client-credentials grant) plus the two user
//! listings the scraper needs. The access token is requested lazily on the
//! first listing call, so authentication failures surface as fetch errors.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::RedditConfig;
use crate::constants::reddit;
use crate::types::{ErrorCategory, ErrorClassifier, PersonaError, Result};

const SERVICE: &str = "reddit";

/// A user's submission, as returned by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    pub title: String,
    /// Body of a self post; empty for link posts
    #[serde(default)]
    pub selftext: Option<String>,
    /// External link, or the full permalink URL for self posts
    #[serde(default)]
    pub url: Option<String>,
    /// Site-relative permalink (`/r/<sub>/comments/...`)
    #[serde(default)]
    pub permalink: String,
}

/// A user's comment, as returned by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    pub body: String,
    /// Site-relative permalink (`/r/<sub>/comments/.../<id>/`)
    pub permalink: String,
}

/// Read access to a user's public activity, newest first
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Most recent submissions, at most `limit`
    async fn submissions(&self, username: &str, limit: u32) -> Result<Vec<Submission>>;

    /// Most recent comments, at most `limit`
    async fn comments(&self, username: &str, limit: u32) -> Result<Vec<Comment>>;
}

/// HTTP client for the Reddit OAuth API
pub struct RedditClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    token_url: String,
    api_base: String,
    access_token: OnceCell<SecretString>,
}

impl std::fmt::Debug for RedditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditClient")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl RedditClient {
    /// Build a client from config. Fails if credentials are missing.
    pub fn new(config: &RedditConfig) -> Result<Self> {
        let client_id = config.client_id.clone().ok_or_else(|| {
            PersonaError::Config(
                "Reddit client id not found. Set REDDIT_CLIENT_ID or reddit.client_id".to_string(),
            )
        })?;
        let client_secret = config.client_secret.clone().ok_or_else(|| {
            PersonaError::Config(
                "Reddit client secret not found. Set REDDIT_CLIENT_SECRET or reddit.client_secret"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PersonaError::Reddit(ErrorClassifier::classify_request(&e, SERVICE)))?;

        Ok(Self {
            client,
            client_id,
            client_secret: SecretString::from(client_secret),
            token_url: reddit::TOKEN_URL.to_string(),
            api_base: reddit::OAUTH_API_BASE.to_string(),
            access_token: OnceCell::new(),
        })
    }

    async fn token(&self) -> Result<&SecretString> {
        self.access_token
            .get_or_try_init(|| self.authenticate())
            .await
    }

    async fn authenticate(&self) -> Result<SecretString> {
        debug!("Requesting Reddit application-only access token");

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PersonaError::Reddit(ErrorClassifier::classify_request(&e, SERVICE)))?;

        let response = check_status(response).await?;
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| PersonaError::Reddit(ErrorClassifier::classify_request(&e, SERVICE)))?;

        match body.access_token {
            Some(token) => {
                info!("Authenticated with Reddit");
                Ok(SecretString::from(token))
            }
            None => Err(PersonaError::reddit(
                ErrorCategory::Auth,
                body.error
                    .unwrap_or_else(|| "token response had no access_token".to_string()),
            )),
        }
    }

    /// `<api_base>/user/<username>/<kind>?sort=new&limit=<limit>&raw_json=1`
    fn listing_url(&self, username: &str, kind: &str, limit: u32) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.api_base)
            .map_err(|e| PersonaError::Config(format!("Invalid Reddit API base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PersonaError::Config("Reddit API base cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["user", username, kind]);
        url.query_pairs_mut()
            .append_pair("sort", "new")
            .append_pair("limit", &limit.to_string())
            .append_pair("raw_json", "1");
        Ok(url)
    }

    async fn listing<T: for<'de> Deserialize<'de>>(
        &self,
        username: &str,
        kind: &str,
        limit: u32,
    ) -> Result<Vec<T>> {
        let token = self.token().await?;
        let url = self.listing_url(username, kind, limit)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| PersonaError::Reddit(ErrorClassifier::classify_request(&e, SERVICE)))?;

        let response = check_status(response).await?;
        let listing: Listing<T> = response
            .json()
            .await
            .map_err(|e| PersonaError::Reddit(ErrorClassifier::classify_request(&e, SERVICE)))?;

        let mut items = listing.into_items();
        items.truncate(limit as usize);
        Ok(items)
    }
}

#[async_trait]
impl RedditApi for RedditClient {
    async fn submissions(&self, username: &str, limit: u32) -> Result<Vec<Submission>> {
        self.listing(username, "submitted", limit).await
    }

    async fn comments(&self, username: &str, limit: u32) -> Result<Vec<Comment>> {
        self.listing(username, "comments", limit).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PersonaError::Reddit(ErrorClassifier::classify_http_status(
        status.as_u16(),
        &format!("{} {}", status, body.trim()),
        SERVICE,
    )))
}

// Response types

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
struct Thing<T> {
    data: T,
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        self.data.children.into_iter().map(|c| c.data).collect()
    }
}
