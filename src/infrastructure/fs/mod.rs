//! File System Implementations
//!
//! Concrete implementations of the TreeBuilder port.

mod tree;

pub use tree::FsTreeBuilder;
