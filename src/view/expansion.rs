use crate::file_system::{directories, TreeNode};
use std::collections::HashMap;

/// Which directories of a tree are expanded.
///
/// Directories are keyed by their full path. A directory that was never
/// touched is collapsed. Files are never tracked: whether they are shown
/// depends on their parent alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the state of the directory at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hub_surf::view::ExpansionState;
    ///
    /// let mut state = ExpansionState::new();
    /// state.toggle("src");
    /// assert!(state.is_expanded("src"));
    /// state.toggle("src");
    /// assert!(!state.is_expanded("src"));
    /// ```
    pub fn toggle(&mut self, path: &str) {
        let expanded = self.expanded.entry(path.to_string()).or_insert(false);
        *expanded = !*expanded;
    }

    /// Set every directory reachable from `roots` to `expanded`.
    pub fn set_all(&mut self, roots: &[TreeNode], expanded: bool) {
        for path in directories(roots) {
            self.expanded.insert(path.to_string(), expanded);
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    /// Forget everything, collapsing all directories.
    pub fn clear(&mut self) {
        self.expanded.clear()
    }

    /// The paths currently expanded, sorted.
    pub fn expanded_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .expanded
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(path, _)| path.as_str())
            .collect();
        paths.sort_unstable();
        paths
    }
}
