#![warn(unused_import_braces, unused_qualifications)]

//! Welcome to `hub-surf`!
//!
//! `hub-surf` lets you browse the file tree of a repository hosted behind a
//! GitHub-compatible REST API. The API reports a tree as a flat list of
//! paths; we turn it into nested directories and files, keep track of which
//! directories are expanded, and render the result either as rows for an
//! interactive view or as plain text for the clipboard.
//!
//! Let's start surfing:
//!
//! ```
//! use hub_surf::file_system::PathEntry;
//! use hub_surf::locator;
//! use hub_surf::session::{Status, View};
//! use pretty_assertions::assert_eq;
//!
//! // The repository someone pasted a link to.
//! let locator = locator::parse("https://github.com/octocat/Hello-World/tree/main")
//!     .expect("Failed to parse locator");
//!
//! // Start loading it. A fetch through `api::Client` would happen here, we
//! // hand the listing over directly instead.
//! let mut view = View::default();
//! let ticket = view.begin(locator);
//! view.complete(ticket, Ok(vec![
//!     PathEntry::blob("README"),
//!     PathEntry::tree("src"),
//!     PathEntry::blob("src/main.rs"),
//! ]));
//! assert_eq!(view.status(), &Status::Loaded);
//!
//! // Directories come first and start out collapsed.
//! let rows: Vec<String> = view.rows().map(|row| row.to_string()).collect();
//! assert_eq!(rows, vec!["[+] src", "    README"]);
//!
//! view.toggle("src");
//! let rows: Vec<String> = view.rows().map(|row| row.to_string()).collect();
//! assert_eq!(rows, vec!["[-] src", "      main.rs", "    README"]);
//!
//! // The export always shows the whole tree.
//! assert_eq!(
//!     view.export().expect("Failed to export"),
//!     "octocat/Hello-World\n📁 src\n│   └── 📄 main.rs\n📄 README\n"
//! );
//! ```
pub mod api;
pub mod export;
pub mod file_system;
pub mod locator;
pub mod search;
pub mod session;
pub mod tree;
pub mod view;

pub use crate::locator::RepoLocator;
pub use crate::session::{Explorer, View};
