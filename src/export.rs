//! Plain-text export of a whole repository tree, e.g. for pasting into
//! documentation.
//!
//! ```text
//! octocat/Hello-World
//! 📁 src
//! │   ├── 📁 view
//! │   │   └── 📄 rows.rs
//! │   └── 📄 lib.rs
//! 📄 README.md
//! ```
//!
//! The export ignores the expansion state and always shows every node.
//! Entries directly under the root are written flush, without a connector;
//! every deeper level gets one.

use crate::file_system::{sorted, TreeNode};
use crate::locator::RepoLocator;
use log::debug;
use thiserror::Error;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

const DIRECTORY: &str = "📁 ";
const FILE: &str = "📄 ";

/// The system clipboard could not be written to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not copy to the clipboard: {0}")]
pub struct ClipboardError(pub String);

/// Somewhere exported text can be placed.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Serialize the tree under `roots` for the repository at `locator`.
///
/// The first line names the repository. Every line, including the last,
/// ends with `\n`. The output only depends on the tree, so exporting the
/// same tree twice yields identical text.
///
/// # Examples
///
/// ```
/// use hub_surf::export::serialize;
/// use hub_surf::file_system::PathEntry;
/// use hub_surf::locator::RepoLocator;
/// use hub_surf::tree;
///
/// let locator = RepoLocator::new("octocat", "Hello-World");
/// assert_eq!(serialize(&locator, &[]), "octocat/Hello-World\n");
///
/// let roots = tree::build(vec![
///     PathEntry::blob("README"),
///     PathEntry::tree("src"),
///     PathEntry::blob("src/main.rs"),
/// ]);
/// assert_eq!(
///     serialize(&locator, &roots),
///     "octocat/Hello-World\n📁 src\n│   └── 📄 main.rs\n📄 README\n"
/// );
/// ```
pub fn serialize(locator: &RepoLocator, roots: &[TreeNode]) -> String {
    let mut out = format!("{}\n", locator);

    let roots = sorted(roots);
    let last = roots.len().saturating_sub(1);
    for (index, node) in roots.into_iter().enumerate() {
        push_line(&mut out, "", node);
        let prefix = if index == last { SPACE } else { PIPE };
        serialize_children(&mut out, prefix, node);
    }

    out
}

/// Serialize the tree and hand the text to `clipboard`, returning the text
/// that was copied.
///
/// A refusing clipboard is reported as a [`ClipboardError`]; the tree is not
/// affected, so the export can simply be retried or done with
/// [`serialize`] instead.
pub fn copy<C>(
    clipboard: &mut C,
    locator: &RepoLocator,
    roots: &[TreeNode],
) -> Result<String, ClipboardError>
where
    C: Clipboard + ?Sized,
{
    let text = serialize(locator, roots);
    clipboard.set_text(&text)?;
    debug!("copied the tree of {} ({} bytes)", locator, text.len());
    Ok(text)
}

fn serialize_children(out: &mut String, prefix: &str, node: &TreeNode) {
    let children = node.sorted_children();
    let last = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate() {
        let (connector, extension) = if index == last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, PIPE)
        };

        push_line(out, &format!("{}{}", prefix, connector), child);
        serialize_children(out, &format!("{}{}", prefix, extension), child);
    }
}

fn push_line(out: &mut String, lead: &str, node: &TreeNode) {
    let glyph = if node.is_tree() { DIRECTORY } else { FILE };
    out.push_str(lead);
    out.push_str(glyph);
    out.push_str(&node.name);
    out.push('\n');
}

/// The clipboard of the desktop session, through `arboard`.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::PathEntry;
    use crate::tree;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Pasteboard {
        text: Option<String>,
    }

    impl Clipboard for Pasteboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct Denied;

    impl Clipboard for Denied {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError("permission denied".into()))
        }
    }

    fn locator() -> RepoLocator {
        RepoLocator::new("octocat", "Hello-World")
    }

    fn sample() -> Vec<TreeNode> {
        tree::build(vec![
            PathEntry::blob("README.md"),
            PathEntry::tree("src"),
            PathEntry::blob("src/lib.rs"),
            PathEntry::tree("src/view"),
            PathEntry::blob("src/view/rows.rs"),
            PathEntry::blob("src/view/mod.rs"),
            PathEntry::tree("docs"),
            PathEntry::blob("docs/guide.md"),
        ])
    }

    #[test]
    fn test_empty_tree_is_header_only() {
        assert_eq!(serialize(&locator(), &[]), "octocat/Hello-World\n");
    }

    #[test]
    fn test_box_drawing() {
        let expected = "\
octocat/Hello-World
📁 docs
│   └── 📄 guide.md
📁 src
│   ├── 📁 view
│   │   ├── 📄 mod.rs
│   │   └── 📄 rows.rs
│   └── 📄 lib.rs
📄 README.md
";
        assert_eq!(serialize(&locator(), &sample()), expected);
    }

    #[test]
    fn test_last_root_directory_is_padded_with_spaces() {
        let roots = tree::build(vec![
            PathEntry::tree("a"),
            PathEntry::tree("a/b"),
            PathEntry::blob("a/b/c"),
            PathEntry::blob("a/d"),
        ]);

        let expected = "\
octocat/Hello-World
📁 a
    ├── 📁 b
    │   └── 📄 c
    └── 📄 d
";
        assert_eq!(serialize(&locator(), &roots), expected);
    }

    #[test]
    fn test_ordering_matches_rows() {
        let roots = tree::build(vec![
            PathEntry::blob("b.txt"),
            PathEntry::tree("A"),
            PathEntry::blob("a.txt"),
        ]);

        assert_eq!(
            serialize(&locator(), &roots),
            "octocat/Hello-World\n📁 A\n📄 a.txt\n📄 b.txt\n"
        );
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let roots = sample();
        assert_eq!(serialize(&locator(), &roots), serialize(&locator(), &roots));
    }

    #[test]
    fn test_copy() {
        let mut clipboard = Pasteboard::default();
        let text = copy(&mut clipboard, &locator(), &sample()).expect("copy failed");

        assert_eq!(clipboard.text, Some(text));
    }

    #[test]
    fn test_copy_failure_is_reported() {
        assert_eq!(
            copy(&mut Denied, &locator(), &sample()),
            Err(ClipboardError("permission denied".into()))
        );
    }
}
