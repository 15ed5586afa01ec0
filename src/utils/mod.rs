mod hash;

pub use hash::compute_hash;

/// The folder holding canonical Packmind artifact files inside a repository
pub const PACKMIND_FOLDER: &str = ".packmind";

/// Derive a URL- and file-safe slug from a display name
#[must_use]
pub fn slugify(name: &str) -> String {
    slug::slugify(name)
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
