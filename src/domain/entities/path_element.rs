//! PathElement entity - one node of an enumerated directory tree

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A file or directory and, for directories, its children.
///
/// Trees are built fresh for every enumeration and share nothing with the
/// watcher that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathElement {
    path: PathBuf,
    is_directory: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<PathElement>,
}

impl PathElement {
    /// Create a leaf node for a non-directory entry
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
            children: Vec::new(),
        }
    }

    /// Create a directory node with no children yet
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path for roots like `/`
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn children(&self) -> &[PathElement] {
        &self.children
    }

    /// Append a child node (directories only hold children)
    pub fn push_child(&mut self, child: PathElement) {
        debug_assert!(self.is_directory, "files have no children");
        self.children.push(child);
    }

    /// Direct child with the given file name
    pub fn find(&self, name: impl AsRef<OsStr>) -> Option<&PathElement> {
        let name = name.as_ref();
        self.children.iter().find(|child| child.name() == name)
    }

    /// Number of nodes in this subtree, including `self`
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        false
    }
}
