use super::types::{FileModification, FileUpdates};
use std::collections::HashMap;
use tracing::warn;

/// Join a target's path prefix with a repo-root-relative file path.
///
/// The target path may carry leading/trailing slashes (`/`, `/vscode/`);
/// they are normalized away so the result never contains doubled slashes
/// and never starts with `/`. A root target is the identity.
#[must_use]
pub fn join_target_path(target_path: &str, relative: &str) -> String {
    let prefix = target_path.trim_matches('/');
    let relative = relative.trim_start_matches('/');
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{prefix}/{relative}")
    }
}

/// Rewrite every path in `updates` under the target's path prefix.
///
/// Deployers emit repo-root-relative paths; applying the prefix here keeps
/// two targets on the same repo from ever colliding on disk, even when
/// their relative agent outputs are identical.
#[must_use]
pub fn apply_target_prefix(updates: FileUpdates, target_path: &str) -> FileUpdates {
    let mut prefixed = updates;
    for modification in &mut prefixed.create_or_update {
        modification.path = join_target_path(target_path, &modification.path);
    }
    for deletion in &mut prefixed.delete {
        deletion.path = join_target_path(target_path, &deletion.path);
    }
    prefixed
}

/// Merge per-(target, agent) update batches into one `FileUpdates`.
///
/// Writes are deduplicated by path, preserving first-seen order so repeated
/// runs over the same input produce byte-identical output. When two writes
/// hit the same path:
/// - both sectioned: section lists are merged by key (a later contribution
///   replaces the section with the same key, new keys are appended), so
///   recipes and standards sections can coexist in one host file;
/// - otherwise: the later write wins. Full-content collisions across agents
///   are a configuration smell, so they are logged.
///
/// Deletions are unioned by path, also order-preserving.
#[must_use]
pub fn merge_updates(batches: Vec<FileUpdates>) -> FileUpdates {
    let mut writes: Vec<FileModification> = Vec::new();
    let mut write_index: HashMap<String, usize> = HashMap::new();
    let mut deletions = Vec::new();
    let mut seen_deletions: HashMap<String, ()> = HashMap::new();

    for batch in batches {
        for incoming in batch.create_or_update {
            match write_index.get(&incoming.path) {
                Some(&idx) => {
                    let existing = &mut writes[idx];
                    if existing.is_sectioned() && incoming.is_sectioned() {
                        merge_sections(existing, incoming);
                    } else {
                        if !existing.is_sectioned() && !incoming.is_sectioned() {
                            warn!(
                                path = %incoming.path,
                                "full-content collision on path, last write wins"
                            );
                        }
                        *existing = incoming;
                    }
                }
                None => {
                    write_index.insert(incoming.path.clone(), writes.len());
                    writes.push(incoming);
                }
            }
        }
        for deletion in batch.delete {
            if seen_deletions.insert(deletion.path.clone(), ()).is_none() {
                deletions.push(deletion);
            }
        }
    }

    FileUpdates {
        create_or_update: writes,
        delete: deletions,
    }
}

fn merge_sections(existing: &mut FileModification, incoming: FileModification) {
    for section in incoming.sections {
        match existing
            .sections
            .iter_mut()
            .find(|s| s.key == section.key)
        {
            Some(slot) => *slot = section,
            None => existing.sections.push(section),
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
