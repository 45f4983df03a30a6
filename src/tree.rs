//! Building nested [`TreeNode`]s out of a flat tree listing.
//!
//! The hosting API reports a repository tree as a flat list of paths in no
//! particular order: a directory may be listed before its children, after
//! them, or not at all. [`build`] makes a single pass over the listing and
//! places an entry whose parent has not been seen yet directly under the
//! root. [`build_linked`] registers every entry first and links them in a
//! second pass, so that only entries whose parent is never listed end up
//! under the root.
//!
//! Neither builder de-duplicates: two entries with the same path become two
//! sibling nodes. The last one is the one later entries attach to.

use crate::file_system::{EntryKind, PathEntry, TreeNode};
use log::{debug, warn};
use std::cmp::Reverse;
use std::collections::HashMap;

const ROOT: usize = 0;

/// Which builder to use when a listing is turned into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linking {
    /// See [`build`].
    SinglePass,
    /// See [`build_linked`].
    Deferred,
}

impl Default for Linking {
    fn default() -> Self {
        Linking::SinglePass
    }
}

impl Linking {
    pub fn build<I>(self, entries: I) -> Vec<TreeNode>
    where
        I: IntoIterator<Item = PathEntry>,
    {
        match self {
            Linking::SinglePass => build(entries),
            Linking::Deferred => build_linked(entries),
        }
    }
}

/// Build the children of the repository root out of `entries`, in a single
/// pass and in listing order.
///
/// Each entry is attached to the node registered under its parent path at
/// the time it is processed. If there is none, or the parent is a file, the
/// entry is attached to the root instead and is never moved afterwards.
///
/// # Examples
///
/// ```
/// use hub_surf::file_system::PathEntry;
/// use hub_surf::tree;
///
/// let roots = tree::build(vec![PathEntry::tree("a"), PathEntry::blob("a/b")]);
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].children()[0].path, "a/b");
///
/// // The parent of `x/y` is never listed, so `x/y` ends up under the root.
/// let roots = tree::build(vec![PathEntry::blob("x/y")]);
/// assert_eq!(roots[0].path, "x/y");
/// assert_eq!(roots[0].name, "y");
/// ```
pub fn build<I>(entries: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = PathEntry>,
{
    let mut arena = Arena::new();
    for entry in entries {
        if let Some(index) = arena.register(entry) {
            let parent = arena.parent_of(index);
            arena.link(index, parent);
        }
    }
    arena.into_roots()
}

/// Build the children of the repository root out of `entries`, resolving
/// parents only after every entry has been registered.
///
/// # Examples
///
/// ```
/// use hub_surf::file_system::PathEntry;
/// use hub_surf::tree;
///
/// let roots = tree::build_linked(vec![PathEntry::blob("a/b"), PathEntry::tree("a")]);
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].children()[0].name, "b");
/// ```
pub fn build_linked<I>(entries: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = PathEntry>,
{
    let mut arena = Arena::new();
    let registered: Vec<usize> = entries
        .into_iter()
        .filter_map(|entry| arena.register(entry))
        .collect();

    for index in registered {
        let parent = arena.parent_of(index);
        arena.link(index, parent);
    }
    arena.into_roots()
}

/// Split a path into the path of its parent and its name.
fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

/// Nodes are kept flat while the listing is processed and only nested once
/// every link is known.
struct Arena {
    nodes: Vec<TreeNode>,
    links: Vec<Vec<usize>>,
    index: HashMap<String, usize>,
}

impl Arena {
    fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(String::new(), ROOT);
        Arena {
            nodes: vec![TreeNode::new(String::new(), String::new(), EntryKind::Tree)],
            links: vec![vec![]],
            index,
        }
    }

    fn register(&mut self, entry: PathEntry) -> Option<usize> {
        if entry.path.is_empty() {
            warn!("skipping tree entry with an empty path");
            return None;
        }

        let name = split(&entry.path).1.to_string();
        let index = self.nodes.len();
        self.index.insert(entry.path.clone(), index);
        self.nodes.push(TreeNode::new(entry.path, name, entry.kind));
        self.links.push(vec![]);
        Some(index)
    }

    fn parent_of(&self, index: usize) -> usize {
        let path = &self.nodes[index].path;
        let (parent_path, _) = split(path);

        match self.index.get(parent_path) {
            Some(&parent) if self.nodes[parent].is_tree() => parent,
            Some(_) => {
                debug!("parent of `{}` is not a directory, placing it under the root", path);
                ROOT
            },
            None => {
                debug!("parent of `{}` is not listed yet, placing it under the root", path);
                ROOT
            },
        }
    }

    fn link(&mut self, child: usize, parent: usize) {
        self.links[parent].push(child)
    }

    fn into_roots(self) -> Vec<TreeNode> {
        let Arena { nodes, links, .. } = self;

        // A parent's path is always strictly shorter than its children's, so
        // visiting longer paths first finishes every child before its parent.
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by_key(|&index| Reverse(nodes[index].path.len()));

        let mut nodes: Vec<Option<TreeNode>> = nodes.into_iter().map(Some).collect();
        for index in order {
            let children: Vec<TreeNode> = links[index]
                .iter()
                .filter_map(|&child| nodes[child].take())
                .collect();

            if let Some(node) = nodes[index].as_mut() {
                if let Some(slot) = node.children.as_mut() {
                    *slot = children;
                }
            }
        }

        nodes[ROOT]
            .take()
            .and_then(|root| root.children)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::{count, walk};
    use pretty_assertions::assert_eq;
    use proptest::collection;
    use proptest::prelude::*;

    fn tree(path: &str, name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            path: path.to_string(),
            name: name.to_string(),
            kind: EntryKind::Tree,
            children: Some(children),
        }
    }

    fn blob(path: &str, name: &str) -> TreeNode {
        TreeNode {
            path: path.to_string(),
            name: name.to_string(),
            kind: EntryKind::Blob,
            children: None,
        }
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(build(vec![]), vec![]);
        assert_eq!(build_linked(vec![]), vec![]);
    }

    #[test]
    fn test_nested_entry() {
        let roots = build(vec![PathEntry::tree("a"), PathEntry::blob("a/b")]);

        assert_eq!(roots, vec![tree("a", "a", vec![blob("a/b", "b")])]);
    }

    #[test]
    fn test_missing_parent_falls_back_to_root() {
        let roots = build(vec![PathEntry::blob("x/y")]);

        assert_eq!(roots, vec![blob("x/y", "y")]);
    }

    #[test]
    fn test_parent_listed_late_is_not_reparented() {
        let roots = build(vec![
            PathEntry::blob("a/b"),
            PathEntry::tree("a"),
            PathEntry::blob("a/c"),
        ]);

        assert_eq!(
            roots,
            vec![blob("a/b", "b"), tree("a", "a", vec![blob("a/c", "c")])]
        );
    }

    #[test]
    fn test_linked_build_resolves_late_parents() {
        let roots = build_linked(vec![
            PathEntry::blob("a/b/c.rs"),
            PathEntry::tree("a/b"),
            PathEntry::blob("a/d.rs"),
            PathEntry::tree("a"),
            PathEntry::blob("x/y"),
        ]);

        assert_eq!(
            roots,
            vec![
                tree(
                    "a",
                    "a",
                    vec![
                        tree("a/b", "b", vec![blob("a/b/c.rs", "c.rs")]),
                        blob("a/d.rs", "d.rs"),
                    ]
                ),
                blob("x/y", "y"),
            ]
        );
    }

    #[test]
    fn test_linking_selects_builder() {
        let entries = vec![PathEntry::blob("a/b"), PathEntry::tree("a")];

        assert_eq!(Linking::default(), Linking::SinglePass);
        assert_eq!(Linking::SinglePass.build(entries.clone()).len(), 2);
        assert_eq!(Linking::Deferred.build(entries).len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept_as_siblings() {
        let roots = build(vec![PathEntry::blob("a.txt"), PathEntry::blob("a.txt")]);

        assert_eq!(roots, vec![blob("a.txt", "a.txt"), blob("a.txt", "a.txt")]);
    }

    #[test]
    fn test_children_attach_to_last_duplicate_directory() {
        let roots = build(vec![
            PathEntry::tree("a"),
            PathEntry::blob("a/first"),
            PathEntry::tree("a"),
            PathEntry::blob("a/second"),
        ]);

        assert_eq!(
            roots,
            vec![
                tree("a", "a", vec![blob("a/first", "first")]),
                tree("a", "a", vec![blob("a/second", "second")]),
            ]
        );
    }

    #[test]
    fn test_file_parent_falls_back_to_root() {
        let roots = build(vec![PathEntry::blob("a"), PathEntry::blob("a/b")]);

        assert_eq!(roots, vec![blob("a", "a"), blob("a/b", "b")]);
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let roots = build(vec![
            PathEntry::tree(""),
            PathEntry::blob("top"),
            PathEntry::tree("dir"),
        ]);

        assert_eq!(roots, vec![blob("top", "top"), tree("dir", "dir", vec![])]);
    }

    #[test]
    fn test_children_keep_listing_order() {
        let roots = build(vec![
            PathEntry::tree("d"),
            PathEntry::blob("d/z"),
            PathEntry::blob("d/a"),
            PathEntry::tree("d/m"),
        ]);

        let names: Vec<&str> = roots[0]
            .children()
            .iter()
            .map(|node| node.name.as_str())
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    fn entry_strategy() -> impl Strategy<Value = PathEntry> {
        // A tiny alphabet so that listings share prefixes and collide.
        (collection::vec("[ab]{1,2}", 1..4), any::<bool>()).prop_map(|(labels, is_tree)| {
            let kind = if is_tree {
                EntryKind::Tree
            } else {
                EntryKind::Blob
            };
            PathEntry::new(labels.join("/"), kind)
        })
    }

    fn prop_parents_are_path_prefixes(roots: &[TreeNode]) -> bool {
        walk(roots).all(|parent| {
            parent
                .children()
                .iter()
                .all(|child| split(&child.path).0 == parent.path)
        })
    }

    proptest! {
        #[test]
        fn prop_node_count_matches_listing(entries in collection::vec(entry_strategy(), 0..40)) {
            let n = entries.len();
            prop_assert_eq!(count(&build(entries.clone())), n);
            prop_assert_eq!(count(&build_linked(entries)), n);
        }

        #[test]
        fn prop_nested_nodes_sit_under_their_parent(entries in collection::vec(entry_strategy(), 0..40)) {
            prop_assert!(prop_parents_are_path_prefixes(&build(entries.clone())));
            prop_assert!(prop_parents_are_path_prefixes(&build_linked(entries)));
        }

        #[test]
        fn prop_linked_build_nests_every_listed_parent(entries in collection::vec(entry_strategy(), 0..40)) {
            let listed: std::collections::HashSet<String> = entries
                .iter()
                .filter(|entry| entry.kind.is_tree())
                .map(|entry| entry.path.clone())
                .collect();
            let blobs: std::collections::HashSet<String> = entries
                .iter()
                .filter(|entry| !entry.kind.is_tree())
                .map(|entry| entry.path.clone())
                .collect();

            let roots = build_linked(entries.clone());
            for node in &roots {
                let parent = split(&node.path).0;
                // Only orphans, or entries whose last registered parent is a file, sit at the root.
                prop_assert!(parent.is_empty() || !listed.contains(parent) || blobs.contains(parent));
            }
        }
    }
}
