//! Translation of `notify` events into per-entry `PathEvent`s

use std::path::PathBuf;

use notify::event::{EventKind as NotifyKind, ModifyKind, RenameMode};

use crate::domain::value_objects::EventKind;

/// Map one `notify` event to `(kind, absolute path)` pairs.
///
/// Renames become a `Delete` of the old name and a `Create` of the new one,
/// taken from the `From` and `To` halves only.
/// Access events and unclassified events are dropped.
pub(super) fn translate(event: &notify::Event) -> Vec<(EventKind, PathBuf)> {
    let all = |kind: EventKind| -> Vec<(EventKind, PathBuf)> {
        event.paths.iter().map(|p| (kind, p.clone())).collect()
    };

    match event.kind {
        NotifyKind::Create(_) => all(EventKind::Create),
        NotifyKind::Remove(_) => all(EventKind::Delete),
        NotifyKind::Modify(ModifyKind::Name(RenameMode::From)) => all(EventKind::Delete),
        NotifyKind::Modify(ModifyKind::Name(RenameMode::To)) => all(EventKind::Create),
        // Summary of a rename whose halves were already reported
        NotifyKind::Modify(ModifyKind::Name(RenameMode::Both)) => Vec::new(),
        // Backends that cannot tell the two halves of a rename apart
        NotifyKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|p| {
                let kind = if p.exists() {
                    EventKind::Create
                } else {
                    EventKind::Delete
                };
                (kind, p.clone())
            })
            .collect(),
        NotifyKind::Modify(_) => all(EventKind::Modify),
        NotifyKind::Access(_) | NotifyKind::Any | NotifyKind::Other => Vec::new(),
    }
}
