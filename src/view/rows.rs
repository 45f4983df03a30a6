use crate::file_system::{sorted, EntryKind, TreeNode};
use crate::view::ExpansionState;
use std::fmt;
use std::vec;

#[cfg(feature = "serialize")]
use serde::Serialize;

/// What activating a directory row would do.
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// The directory is collapsed.
    Expand,
    /// The directory is expanded.
    Collapse,
}

/// A visible line of the interactive tree.
#[cfg_attr(
    feature = "serialize",
    derive(Serialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// Indentation level, `0` for the children of the root.
    pub depth: usize,
    pub kind: EntryKind,
    pub name: &'a str,
    pub path: &'a str,
    /// `Some` for directories, `None` for files.
    pub affordance: Option<Affordance>,
}

impl<'a> fmt::Display for Row<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.affordance {
            Some(Affordance::Expand) => "[+] ",
            Some(Affordance::Collapse) => "[-] ",
            None => "    ",
        };
        write!(f, "{}{}{}", "  ".repeat(self.depth), marker, self.name)
    }
}

/// The rows visible for `roots` under `state`.
///
/// Siblings are ordered with [`crate::file_system::compare`] at every level,
/// each time the rows are produced. The children of the root are always
/// visible; the children of a directory are visible when the directory is
/// visible and expanded.
///
/// # Examples
///
/// ```
/// use hub_surf::file_system::PathEntry;
/// use hub_surf::tree;
/// use hub_surf::view::{rows, ExpansionState};
///
/// let roots = tree::build(vec![
///     PathEntry::blob("b.txt"),
///     PathEntry::tree("A"),
///     PathEntry::blob("A/inner.txt"),
///     PathEntry::blob("a.txt"),
/// ]);
///
/// let mut state = ExpansionState::new();
/// let names: Vec<&str> = rows(&roots, &state).map(|row| row.name).collect();
/// assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
///
/// state.toggle("A");
/// let lines: Vec<String> = rows(&roots, &state).map(|row| row.to_string()).collect();
/// assert_eq!(lines, vec!["[-] A", "      inner.txt", "    a.txt", "    b.txt"]);
/// ```
pub fn rows<'a>(roots: &'a [TreeNode], state: &'a ExpansionState) -> Rows<'a> {
    Rows {
        state,
        stack: vec![(sorted(roots).into_iter(), 0)],
    }
}

/// Lazy iterator over visible rows, see [`rows`].
pub struct Rows<'a> {
    state: &'a ExpansionState,
    stack: Vec<(vec::IntoIter<&'a TreeNode>, usize)>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match self.stack.last_mut() {
                None => return None,
                Some((nodes, depth)) => nodes.next().map(|node| (node, *depth)),
            };

            let (node, depth) = match next {
                Some(next) => next,
                None => {
                    self.stack.pop();
                    continue;
                },
            };

            let affordance = if node.is_tree() {
                if self.state.is_expanded(&node.path) {
                    self.stack
                        .push((node.sorted_children().into_iter(), depth + 1));
                    Some(Affordance::Collapse)
                } else {
                    Some(Affordance::Expand)
                }
            } else {
                None
            };

            return Some(Row {
                depth,
                kind: node.kind,
                name: &node.name,
                path: &node.path,
                affordance,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::PathEntry;
    use crate::tree;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<TreeNode> {
        tree::build(vec![
            PathEntry::blob("README.md"),
            PathEntry::tree("src"),
            PathEntry::blob("src/lib.rs"),
            PathEntry::tree("src/view"),
            PathEntry::blob("src/view/rows.rs"),
            PathEntry::tree("docs"),
        ])
    }

    fn render(roots: &[TreeNode], state: &ExpansionState) -> Vec<String> {
        rows(roots, state).map(|row| row.to_string()).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_root_children() {
        let roots = sample();
        let state = ExpansionState::new();

        assert_eq!(
            render(&roots, &state),
            vec!["[+] docs", "[+] src", "    README.md"]
        );
    }

    #[test]
    fn test_expanded_directory_shows_children_one_level_deeper() {
        let roots = sample();
        let mut state = ExpansionState::new();
        state.toggle("src");

        let rows: Vec<Row> = rows(&roots, &state).collect();
        let src_view = &rows[2];

        assert_eq!(rows.len(), 5);
        assert_eq!(src_view.path, "src/view");
        assert_eq!(src_view.depth, 1);
        assert_eq!(src_view.affordance, Some(Affordance::Expand));
        assert_eq!(rows[3].path, "src/lib.rs");
        assert_eq!(rows[3].affordance, None);
    }

    #[test]
    fn test_descendants_hidden_by_collapsed_ancestor() {
        let roots = sample();
        let mut state = ExpansionState::new();
        state.toggle("src/view");

        // `src/view` is expanded, but `src` is not, so nothing changes.
        assert_eq!(
            render(&roots, &state),
            vec!["[+] docs", "[+] src", "    README.md"]
        );
    }

    #[test]
    fn test_fully_expanded() {
        let roots = sample();
        let mut state = ExpansionState::new();
        state.set_all(&roots, true);

        assert_eq!(
            render(&roots, &state),
            vec![
                "[-] docs",
                "[-] src",
                "  [-] view",
                "        rows.rs",
                "      lib.rs",
                "    README.md",
            ]
        );
    }

    #[test]
    fn test_rendering_does_not_reorder_tree() {
        let roots = sample();
        let mut state = ExpansionState::new();
        state.set_all(&roots, true);
        let _ = rows(&roots, &state).count();

        assert_eq!(roots[0].name, "README.md");
    }
}
