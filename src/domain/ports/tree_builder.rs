//! TreeBuilder port - enumerates a directory into a `PathElement` tree

use std::path::Path;

use crate::domain::entities::PathElement;

/// Builds the tree rooted at a path.
///
/// Called synchronously from the watcher's IO thread. A failure anywhere in
/// the walk fails the whole build; partial trees are never returned.
pub trait TreeBuilder: Send + Sync + 'static {
    fn build(&self, root: &Path) -> std::io::Result<PathElement>;
}
