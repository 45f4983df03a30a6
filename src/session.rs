// This file is part of hub-surf
//
// Copyright (C) 2024 The hub-surf Team
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 or
// later as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Browsing one repository at a time.
//!
//! A [`View`] owns the tree of the repository being browsed together with
//! its [`ExpansionState`]. Switching to another repository discards both.
//!
//! Fetching a tree is the only operation that waits, and a newer fetch may
//! be started before an older one has finished. Each fetch is therefore
//! tagged with a [`Ticket`]: [`View::begin`] hands one out and
//! [`View::complete`] only applies the result of the most recent one.
//! [`Explorer`] drives this protocol against a [`Source`].

use crate::api::{self, Source};
use crate::export::{self, Clipboard, ClipboardError};
use crate::file_system::{PathEntry, TreeNode};
use crate::locator::{self, MalformedLocator, RepoLocator};
use crate::tree::Linking;
use crate::view::{self, ExpansionState, Rows};
use log::debug;
use tokio::sync::{Mutex, MutexGuard};

/// Where a [`View`] is in loading its repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No repository was asked for yet.
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the message is meant to be shown to the user, who
    /// may retry by opening the repository again.
    Failed(String),
}

/// Identifies one fetch started with [`View::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// The state of browsing a single repository.
#[derive(Debug, Default)]
pub struct View {
    linking: Linking,
    generation: u64,
    locator: Option<RepoLocator>,
    roots: Vec<TreeNode>,
    expansion: ExpansionState,
    status: Status,
}

impl Default for Status {
    fn default() -> Self {
        Status::Idle
    }
}

impl View {
    pub fn new(linking: Linking) -> Self {
        View {
            linking,
            ..View::default()
        }
    }

    /// Switch to the repository at `locator`.
    ///
    /// The current tree and expansion state are discarded straight away and
    /// any fetch still in flight becomes stale.
    pub fn begin(&mut self, locator: RepoLocator) -> Ticket {
        self.generation += 1;
        debug!("loading {} (generation {})", locator, self.generation);

        self.locator = Some(locator);
        self.roots.clear();
        self.expansion.clear();
        self.status = Status::Loading;

        Ticket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false`, leaving the view untouched, when another fetch was
    /// begun after this one.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<PathEntry>, api::Error>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "discarding the result of generation {}, now at {}",
                ticket.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(entries) => {
                self.roots = self.linking.build(entries);
                self.status = Status::Loaded;
            },
            Err(err) => {
                self.roots.clear();
                self.status = Status::Failed(err.to_string());
            },
        }
        true
    }

    pub fn locator(&self) -> Option<&RepoLocator> {
        self.locator.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn toggle(&mut self, path: &str) {
        self.expansion.toggle(path)
    }

    pub fn expand_all(&mut self) {
        self.expansion.set_all(&self.roots, true)
    }

    pub fn collapse_all(&mut self) {
        self.expansion.set_all(&self.roots, false)
    }

    /// The rows currently visible, see [`view::rows`].
    pub fn rows(&self) -> Rows<'_> {
        view::rows(&self.roots, &self.expansion)
    }

    /// The whole tree as text.
    ///
    /// `None` unless a tree is loaded: while loading, or after a failed
    /// fetch, there is no tree to export, not an empty one.
    pub fn export(&self) -> Option<String> {
        let locator = self.loaded()?;
        Some(export::serialize(locator, &self.roots))
    }

    /// Export the tree to `clipboard`. Nothing is copied, and `Ok(None)` is
    /// returned, unless a tree is loaded, see [`View::export`].
    pub fn copy<C>(&self, clipboard: &mut C) -> Result<Option<String>, ClipboardError>
    where
        C: Clipboard + ?Sized,
    {
        match self.loaded() {
            Some(locator) => export::copy(clipboard, locator, &self.roots).map(Some),
            None => Ok(None),
        }
    }

    fn loaded(&self) -> Option<&RepoLocator> {
        match self.status {
            Status::Loaded => self.locator.as_ref(),
            _ => None,
        }
    }
}

/// A [`View`] fed by a [`Source`].
///
/// The view is locked while a fetch is begun and completed, never while it
/// is in flight, so that opening another repository is never blocked by a
/// slow response.
pub struct Explorer<S> {
    source: S,
    view: Mutex<View>,
}

impl<S: Source> Explorer<S> {
    pub fn new(source: S) -> Self {
        Self::with_linking(source, Linking::default())
    }

    pub fn with_linking(source: S, linking: Linking) -> Self {
        Explorer {
            source,
            view: Mutex::new(View::new(linking)),
        }
    }

    /// Fetch and show the repository at `locator`.
    ///
    /// Returns whether the result was applied: `false` means another
    /// repository was opened while this one was loading.
    pub async fn open(&self, locator: RepoLocator) -> bool {
        let ticket = self.view.lock().await.begin(locator.clone());
        let result = self.source.fetch_tree(&locator).await;
        self.view.lock().await.complete(ticket, result)
    }

    /// Like [`Explorer::open`], for a URL typed by the user. A malformed URL
    /// leaves the current view as it is.
    pub async fn open_url(&self, url: &str) -> Result<bool, MalformedLocator> {
        let locator = locator::parse(url)?;
        Ok(self.open(locator).await)
    }

    pub async fn view(&self) -> MutexGuard<'_, View> {
        self.view.lock().await
    }
}
