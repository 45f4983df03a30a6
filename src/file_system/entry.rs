#[cfg(feature = "serialize")]
use serde::Serialize;

/// What kind of object an entry of a tree listing is.
///
/// The hosting API reports `"tree"` for directories and `"blob"` for files.
/// Anything else (e.g. `"commit"` for submodules) is not a directory and is
/// treated as a [`EntryKind::Blob`].
#[cfg_attr(
    feature = "serialize",
    derive(Serialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Tree,
    Blob,
}

impl EntryKind {
    /// Classify the `type` field of a tree listing entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hub_surf::file_system::EntryKind;
    ///
    /// assert_eq!(EntryKind::from_type("tree"), EntryKind::Tree);
    /// assert_eq!(EntryKind::from_type("blob"), EntryKind::Blob);
    /// assert_eq!(EntryKind::from_type("commit"), EntryKind::Blob);
    /// ```
    pub fn from_type(type_: &str) -> Self {
        if type_ == "tree" {
            EntryKind::Tree
        } else {
            EntryKind::Blob
        }
    }

    pub fn is_tree(self) -> bool {
        self == EntryKind::Tree
    }
}

/// One object of a flat, recursive tree listing: a slash separated path,
/// relative to the repository root, and its kind.
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        PathEntry {
            path: path.into(),
            kind,
        }
    }

    /// A directory entry.
    pub fn tree(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Tree)
    }

    /// A file entry.
    pub fn blob(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Blob)
    }
}
