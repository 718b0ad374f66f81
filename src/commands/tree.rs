use std::path::Path;

use anyhow::{Context, Result};
use dirwatch::{PathElement, WatcherConfig};

use super::start_watcher;

pub fn cmd_tree(root: &Path, config: &WatcherConfig, json: bool) -> Result<()> {
    let watcher = start_watcher(config)?;
    let tree = watcher.tree(root)?.wait();
    watcher.join();
    let tree = tree.with_context(|| format!("cannot list {}", root.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}

/// Indented listing, two spaces per level, directories end with `/`
pub(crate) fn render_tree(tree: &PathElement) -> String {
    let mut out = String::new();
    out.push_str(&tree.path().display().to_string());
    out.push('\n');

    let mut stack: Vec<(&PathElement, usize)> =
        tree.children().iter().rev().map(|c| (c, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.name().to_string_lossy());
        if node.is_directory() {
            out.push('/');
        }
        out.push('\n');
        stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
    }
    out
}
