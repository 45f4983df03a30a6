//! Definitions for the files and directories of a repository tree.
//!
//! A tree listing arrives as a flat list of [`PathEntry`]s, which
//! [`crate::tree::build`] turns into nested [`TreeNode`]s.

mod entry;
pub use entry::{EntryKind, PathEntry};

mod node;
pub use node::{compare, count, directories, find, sorted, walk, TreeNode, Walk};
