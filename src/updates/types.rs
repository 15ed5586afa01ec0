use serde::{Deserialize, Serialize};

/// A named, independently mergeable region within a host file.
///
/// Sections let several writers share one file (e.g. recipes and standards
/// both landing in `CLAUDE.md`) without clobbering user-authored content:
/// the external merge layer replaces only the named region. A section with
/// empty content clears that region without deleting the host file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSection {
    pub key: String,
    pub content: String,
}

impl FileSection {
    #[must_use]
    pub fn new(key: &str, content: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// One file write: either full content at a path, or a list of named
/// sections to be merged into whatever already exists at that path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileModification {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<FileSection>,
}

impl FileModification {
    /// Full-content write, overwriting the file
    #[must_use]
    pub fn full(path: &str, content: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            content: Some(content.into()),
            sections: Vec::new(),
        }
    }

    /// Section-based write, merged into the existing file by the commit layer
    #[must_use]
    pub fn with_sections(path: &str, sections: Vec<FileSection>) -> Self {
        Self {
            path: path.to_string(),
            content: None,
            sections,
        }
    }

    #[must_use]
    pub fn is_sectioned(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// A file to remove from the repository. A path with a trailing slash asks
/// the commit layer to remove a whole (now unmanaged) folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDeletion {
    pub path: String,
}

impl FileDeletion {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

/// The complete, idempotent description of the file-system effect of one
/// deployment or removal operation, applied by the git layer as one commit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdates {
    #[serde(default)]
    pub create_or_update: Vec<FileModification>,
    #[serde(default)]
    pub delete: Vec<FileDeletion>,
}

impl FileUpdates {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create_or_update.is_empty() && self.delete.is_empty()
    }

    /// Number of file writes plus deletions, for log lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.create_or_update
            .len()
            .saturating_add(self.delete.len())
    }
}
