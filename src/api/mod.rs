//! A small client for the hosting API's REST endpoints.
//!
//! Only the endpoints needed to browse a repository tree and list a user's
//! repositories are covered. Requests are sent with `reqwest` and decoded
//! with `serde` into the types of [`schema`].

use crate::file_system::PathEntry;
use crate::locator::RepoLocator;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

mod error;
pub use error::Error;

pub mod schema;
pub use schema::{RepoSummary, Repository, TreeListing, User};

const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Environment variable holding an API token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable overriding [`Config::base_url`].
pub const BASE_URL_VAR: &str = "HUB_SURF_API_URL";

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_user_agent() -> String {
    format!("hub-surf/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_seconds() -> u64 {
    10
}

/// How to reach the hosting API.
///
/// Every field has a default, so a partial (or empty) document deserializes.
///
/// The token is never serialized, and is redacted from the `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    /// The default configuration, with the token and base URL taken from
    /// [`TOKEN_VAR`] and [`BASE_URL_VAR`] when they are set.
    pub fn from_env() -> Result<Self, Error> {
        Config::default().overlay(env::var(TOKEN_VAR).ok(), env::var(BASE_URL_VAR).ok())
    }

    fn overlay(mut self, token: Option<String>, base_url: Option<String>) -> Result<Self, Error> {
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = Url::parse(base_url.trim())?;
        }
        Ok(self)
    }
}

/// Something that can produce the flat tree listing of a repository.
///
/// [`Client`] is the production implementation; the session only depends on
/// this trait.
#[async_trait]
pub trait Source: Send + Sync {
    async fn fetch_tree(&self, locator: &RepoLocator) -> Result<Vec<PathEntry>, Error>;
}

/// What is shown for a user: their profile and most recently updated
/// repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub repositories: Vec<RepoSummary>,
}

/// A client for the hosting API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Client(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        Ok(Client { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `GET /repos/{owner}/{name}`
    pub async fn repository(&self, locator: &RepoLocator) -> Result<Repository, Error> {
        let url = self.endpoint(&["repos", &locator.owner, &locator.name])?;
        self.get(url).await
    }

    /// `GET /repos/{owner}/{name}/git/trees/{branch}?recursive=1`
    pub async fn tree(&self, locator: &RepoLocator, branch: &str) -> Result<TreeListing, Error> {
        let mut url = self.endpoint(&[
            "repos",
            &locator.owner,
            &locator.name,
            "git",
            "trees",
            branch,
        ])?;
        url.query_pairs_mut().append_pair("recursive", "1");
        self.get(url).await
    }

    /// `GET /users/{username}`
    pub async fn user(&self, username: &str) -> Result<User, Error> {
        let url = self.endpoint(&["users", username])?;
        self.get(url).await
    }

    /// `GET /users/{username}/repos`, most recently updated first.
    ///
    /// Only the first page of 100 repositories is fetched.
    pub async fn user_repos(&self, username: &str) -> Result<Vec<RepoSummary>, Error> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", "100");
        self.get(url).await
    }

    /// A user together with their repositories, fetched concurrently.
    pub async fn profile(&self, username: &str) -> Result<Profile, Error> {
        let (user, repositories) = tokio::try_join!(self.user(username), self.user_repos(username))?;
        Ok(Profile { user, repositories })
    }

    /// The URL of an endpoint below [`Config::base_url`]. Each segment is
    /// percent-encoded, so a `/` in a branch name stays inside its segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Client(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
            let message = response
                .json::<schema::ApiMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or(fallback);
            warn!("GET {} failed with {}: {}", url, status.as_u16(), message);
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Source for Client {
    async fn fetch_tree(&self, locator: &RepoLocator) -> Result<Vec<PathEntry>, Error> {
        let url = self.endpoint(&["repos", &locator.owner, &locator.name])?;
        let schema::DefaultBranch { default_branch } = self.get(url).await?;
        let listing = self.tree(locator, &default_branch).await?;
        debug!(
            "fetched {} entries of {} at {}",
            listing.tree.len(),
            locator,
            default_branch
        );
        Ok(listing.entries())
    }
}
