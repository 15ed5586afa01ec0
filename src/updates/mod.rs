mod merge;
mod types;

pub use merge::{apply_target_prefix, join_target_path, merge_updates};
pub use types::{FileDeletion, FileModification, FileSection, FileUpdates};
