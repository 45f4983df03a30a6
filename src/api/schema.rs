//! The shape of the hosting API's JSON responses, limited to the fields this
//! crate reads.

use crate::file_system::{EntryKind, PathEntry};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub key: Option<String>,
    pub name: String,
    pub spdx_id: Option<String>,
}

/// Repository metadata, as returned by `GET /repos/{owner}/{name}` and, in
/// lists, by `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub default_branch: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
}

/// A user profile, as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: DateTime<Utc>,
}

/// One object of a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub sha: String,
    pub size: Option<u64>,
}

impl From<RawEntry> for PathEntry {
    fn from(raw: RawEntry) -> Self {
        let kind = EntryKind::from_type(&raw.type_);
        PathEntry::new(raw.path, kind)
    }
}

/// The response of `GET /repos/{owner}/{name}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeListing {
    pub sha: String,
    pub tree: Vec<RawEntry>,
    /// The API caps recursive listings; when it does, `tree` is incomplete.
    #[serde(default)]
    pub truncated: bool,
}

impl TreeListing {
    /// The listing as input for [`crate::tree::build`], in listing order.
    pub fn entries(self) -> Vec<PathEntry> {
        if self.truncated {
            warn!(
                "tree listing {} was truncated after {} entries",
                self.sha,
                self.tree.len()
            );
        }
        self.tree.into_iter().map(PathEntry::from).collect()
    }
}

/// The one field of a repository needed to list its tree.
#[derive(Debug, Deserialize)]
pub(crate) struct DefaultBranch {
    pub default_branch: String,
}

/// The body of an API error response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    pub message: String,
}
