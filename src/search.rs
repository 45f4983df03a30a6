//! Narrowing down a user's repository list as a search term is typed.

use crate::api::RepoSummary;
use log::trace;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// How long a term has to stay unchanged before it is applied.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// The repositories whose name, description or language contain `term`,
/// ignoring case. An empty term matches every repository.
///
/// # Examples
///
/// ```
/// use hub_surf::api::RepoSummary;
/// use hub_surf::search::filter_repositories;
///
/// let repos: Vec<RepoSummary> = serde_json::from_str(r#"[
///     { "name": "hub-surf", "full_name": "octocat/hub-surf", "description": null,
///       "language": "Rust", "html_url": "https://github.com/octocat/hub-surf",
///       "updated_at": "2024-05-01T10:00:00Z" },
///     { "name": "dotfiles", "full_name": "octocat/dotfiles", "description": "Shell setup",
///       "language": null, "html_url": "https://github.com/octocat/dotfiles",
///       "updated_at": "2024-04-01T10:00:00Z" }
/// ]"#).unwrap();
///
/// let names = |term| -> Vec<String> {
///     filter_repositories(&repos, term).iter().map(|repo| repo.name.clone()).collect()
/// };
/// assert_eq!(names("rust"), vec!["hub-surf"]);
/// assert_eq!(names("SHELL"), vec!["dotfiles"]);
/// assert_eq!(names(""), vec!["hub-surf", "dotfiles"]);
/// ```
pub fn filter_repositories<'a>(repos: &'a [RepoSummary], term: &str) -> Vec<&'a RepoSummary> {
    if term.is_empty() {
        return repos.iter().collect();
    }

    let term = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&term);
    repos
        .iter()
        .filter(|repo| {
            contains(&repo.name)
                || repo.description.as_deref().map_or(false, contains)
                || repo.language.as_deref().map_or(false, contains)
        })
        .collect()
}

/// Delivers the last value pushed to it once no other value followed for a
/// while.
///
/// Every [`Debouncer::push`] cancels the delivery still pending and
/// schedules a new one, so that a burst of keystrokes results in a single
/// update carrying the final term. Updates are observed through a
/// [`watch::Receiver`] from [`Debouncer::subscribe`].
///
/// Pushing spawns a task, so it must happen within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    sender: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DELAY)
    }

    pub fn with_delay(initial: T, delay: Duration) -> Self {
        let (sender, _) = watch::channel(initial);
        Debouncer {
            delay,
            sender: Arc::new(sender),
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// The last value delivered.
    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Whether a pushed value is still waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |pending| !pending.is_finished())
    }

    pub fn push(&mut self, value: T) {
        if let Some(pending) = self.pending.take() {
            trace!("cancelling pending delivery");
            pending.abort();
        }

        let sender = Arc::clone(&self.sender);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            sender.send_replace(value);
        }));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
