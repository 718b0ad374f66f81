//! Local directory tree enumeration
//!
//! Walks depth-first with an explicit stack, so very deep trees cannot
//! overflow the IO thread's call stack.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::entities::PathElement;
use crate::domain::ports::TreeBuilder;

/// Builds `PathElement` trees from the local file system.
///
/// Within a directory, subdirectories come first, then every other entry;
/// both groups are sorted by file name. Symbolic links are reported as
/// leaves and never followed (the root itself is resolved).
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTreeBuilder;

impl FsTreeBuilder {
    pub fn new() -> Self {
        Self
    }
}

/// A directory being filled in, with the entries still to visit
struct Frame {
    node: PathElement,
    pending: std::vec::IntoIter<(PathBuf, bool)>,
}

impl Frame {
    fn open(dir: PathBuf) -> io::Result<Self> {
        let pending = sorted_entries(&dir)?.into_iter();
        Ok(Self {
            node: PathElement::directory(dir),
            pending,
        })
    }
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        entries.push((entry.path(), is_dir));
    }
    entries.sort_by(|(a, a_dir), (b, b_dir)| {
        b_dir
            .cmp(a_dir)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    Ok(entries)
}

impl TreeBuilder for FsTreeBuilder {
    fn build(&self, root: &Path) -> io::Result<PathElement> {
        if !fs::metadata(root)?.is_dir() {
            return Ok(PathElement::file(root));
        }

        let mut stack = vec![Frame::open(root.to_path_buf())?];
        while let Some(top) = stack.last_mut() {
            match top.pending.next() {
                Some((path, true)) => stack.push(Frame::open(path)?),
                Some((path, false)) => top.node.push_child(PathElement::file(path)),
                None => {
                    let Some(done) = stack.pop() else { break };
                    match stack.last_mut() {
                        Some(parent) => parent.node.push_child(done.node),
                        None => return Ok(done.node),
                    }
                }
            }
        }
        Err(io::Error::other("tree walk ended without a root"))
    }
}
