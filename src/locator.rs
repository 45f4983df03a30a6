//! Naming a hosted repository.
//!
//! A [`RepoLocator`] is the owner/name pair the hosting API addresses a
//! repository by. It is usually [`parse`]d out of a URL pasted by a user.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serialize")]
use serde::Serialize;

lazy_static! {
    // host (must contain a dot), an optional port, then `owner/name...`.
    static ref LOCATOR: Regex = Regex::new(
        r"(?:[A-Za-z][A-Za-z0-9+.\-]*://)?[^/\s:@]+\.[^/\s:@]+(?::\d+)?[/:]([^/\s?#]+)/(\S+)"
    )
    .expect("locator regex is valid");
}

/// The string could not be read as a repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a repository URL, expected something like https://github.com/owner/name")]
pub struct MalformedLocator(pub String);

/// The owner and name of a hosted repository.
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocator {
    pub owner: String,
    pub name: String,
}

impl RepoLocator {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoLocator {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoLocator {
    type Err = MalformedLocator;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        parse(url)
    }
}

/// Extract the owner and name of a repository from a URL.
///
/// Anything after the name, i.e. further path segments, a query or a
/// fragment, is dropped, as is a `.git` suffix. Whether the repository
/// exists is left to the hosting API.
///
/// # Examples
///
/// ```
/// use hub_surf::locator::{parse, RepoLocator};
///
/// let expected = RepoLocator::new("octocat", "Hello-World");
///
/// assert_eq!(parse("https://host.com/octocat/Hello-World"), Ok(expected.clone()));
/// assert_eq!(parse("https://host.com/octocat/Hello-World/issues/5"), Ok(expected.clone()));
/// assert_eq!(parse("github.com/octocat/Hello-World.git"), Ok(expected));
/// assert!(parse("not a url").is_err());
/// ```
pub fn parse(url: &str) -> Result<RepoLocator, MalformedLocator> {
    let malformed = || MalformedLocator(url.to_string());

    let captures = LOCATOR.captures(url).ok_or_else(malformed)?;
    let owner = captures.get(1).ok_or_else(malformed)?.as_str();
    let rest = captures.get(2).ok_or_else(malformed)?.as_str();

    let name = rest
        .split(|c: char| c == '/' || c == '#' || c == '?')
        .next()
        .unwrap_or_default();
    let name = name.strip_suffix(".git").unwrap_or(name);

    if owner.is_empty() || name.is_empty() {
        return Err(malformed());
    }

    Ok(RepoLocator::new(owner, name))
}
