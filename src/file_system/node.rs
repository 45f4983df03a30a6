use crate::file_system::EntryKind;
use std::cmp::Ordering;
use std::slice;

#[cfg(feature = "serialize")]
use serde::Serialize;

/// A `TreeNode` is a named file or directory of a repository tree.
///
/// `path` is the full path from the repository root and `name` its last
/// segment. `children` is `Some` exactly when the node is a directory; it
/// keeps the order in which the entries were listed, see [`sorted`] for the
/// display order.
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    #[cfg_attr(
        feature = "serialize",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub(crate) fn new(path: String, name: String, kind: EntryKind) -> Self {
        let children = if kind.is_tree() { Some(vec![]) } else { None };
        TreeNode {
            path,
            name,
            kind,
            children,
        }
    }

    pub fn is_tree(&self) -> bool {
        self.kind.is_tree()
    }

    /// The children of this node, empty for files.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// The children of this node in display order.
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        sorted(self.children())
    }
}

/// The display order of siblings: directories before files, then by name,
/// comparing case-sensitively by Unicode scalar value.
///
/// # Examples
///
/// ```
/// use hub_surf::file_system::{compare, EntryKind, PathEntry};
/// use hub_surf::tree;
/// use std::cmp::Ordering;
///
/// let roots = tree::build(vec![PathEntry::blob("a.txt"), PathEntry::tree("Z")]);
/// assert_eq!(compare(&roots[1], &roots[0]), Ordering::Less);
/// ```
pub fn compare(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_tree()
        .cmp(&a.is_tree())
        .then_with(|| a.name.cmp(&b.name))
}

/// Siblings in display order. The sort is stable, so siblings that share a
/// kind and a name keep the order they were listed in.
pub fn sorted(nodes: &[TreeNode]) -> Vec<&TreeNode> {
    let mut sorted: Vec<&TreeNode> = nodes.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    sorted
}

/// Pre-order traversal over every node reachable from `roots`, in listing
/// order.
pub fn walk(roots: &[TreeNode]) -> Walk<'_> {
    Walk {
        stack: vec![roots.iter()],
    }
}

/// The number of nodes reachable from `roots`.
pub fn count(roots: &[TreeNode]) -> usize {
    walk(roots).count()
}

/// Find the node whose full path is `path`. A trailing `/` is ignored.
///
/// Full paths are compared rather than walking down segment by segment, so
/// nodes that were placed under the root because their parent was missing
/// are still found.
///
/// # Examples
///
/// ```
/// use hub_surf::file_system::{find, PathEntry};
/// use hub_surf::tree;
///
/// let roots = tree::build(vec![PathEntry::tree("src"), PathEntry::blob("src/lib.rs")]);
/// assert_eq!(find(&roots, "src/").map(|node| node.name.as_str()), Some("src"));
/// assert!(find(&roots, "lib.rs").is_none());
/// ```
pub fn find<'a>(roots: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return None;
    }
    walk(roots).find(|node| node.path == path)
}

/// The paths of every directory reachable from `roots`.
pub fn directories(roots: &[TreeNode]) -> impl Iterator<Item = &str> {
    walk(roots)
        .filter(|node| node.is_tree())
        .map(|node| node.path.as_str())
}

pub struct Walk<'a> {
    stack: Vec<slice::Iter<'a, TreeNode>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children().iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::PathEntry;
    use crate::tree;
    use pretty_assertions::assert_eq;

    fn names<'a>(nodes: impl IntoIterator<Item = &'a TreeNode>) -> Vec<&'a str> {
        nodes.into_iter().map(|node| node.name.as_str()).collect()
    }

    #[test]
    fn test_directories_first_then_case_sensitive_names() {
        let roots = tree::build(vec![
            PathEntry::blob("b.txt"),
            PathEntry::tree("A"),
            PathEntry::blob("a.txt"),
        ]);

        assert_eq!(names(sorted(&roots)), vec!["A", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let roots = tree::build(vec![
            PathEntry::blob("readme"),
            PathEntry::blob("README"),
            PathEntry::tree("src"),
            PathEntry::tree("Docs"),
        ]);

        assert_eq!(
            names(sorted(&roots)),
            vec!["Docs", "src", "README", "readme"]
        );
    }

    #[test]
    fn test_walk_is_pre_order() {
        let roots = tree::build(vec![
            PathEntry::tree("a"),
            PathEntry::tree("a/b"),
            PathEntry::blob("a/b/c"),
            PathEntry::blob("d"),
        ]);

        assert_eq!(names(walk(&roots)), vec!["a", "b", "c", "d"]);
        assert_eq!(count(&roots), 4);
        assert_eq!(directories(&roots).collect::<Vec<_>>(), vec!["a", "a/b"]);
    }

    #[test]
    fn test_find() {
        let roots = tree::build(vec![
            PathEntry::tree("src"),
            PathEntry::blob("src/lib.rs"),
            PathEntry::blob("orphan/file.rs"),
        ]);

        let lib = find(&roots, "src/lib.rs").expect("missing src/lib.rs");
        assert_eq!(lib.name, "lib.rs");

        let orphan =
            find(&roots, "orphan/file.rs").expect("missing orphan/file.rs");
        assert_eq!(orphan.name, "file.rs");

        assert_eq!(find(&roots, "src/main.rs"), None);
        assert_eq!(find(&roots, "src/").map(|node| node.name.as_str()), Some("src"));
        assert_eq!(find(&roots, ""), None);
    }

    #[test]
    fn test_blob_has_no_children() {
        let roots = tree::build(vec![PathEntry::blob("file")]);
        assert_eq!(roots[0].children, None);
        assert!(roots[0].children().is_empty());
    }
}
