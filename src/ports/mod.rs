//! Port traits for the external collaborators of the deployment core.
//!
//! The core never touches a git provider, an ORM, or the network directly;
//! everything flows through these traits so the whole subsystem stays
//! unit-testable with in-memory fakes.

use crate::model::{
    Distribution, GitRepo, GitRepoId, Package, PackageId, RecipeId, RecipeVersion,
    RecipeVersionId, StandardId, StandardVersion, StandardVersionId, Target, TargetId,
};
use crate::updates::FileUpdates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitPortError {
    #[error("Git provider error: {0}")]
    Provider(String),
    #[error("Commit rejected: {0}")]
    CommitRejected(String),
}

#[derive(Error, Debug)]
pub enum PortError {
    #[error("Store error: {0}")]
    Store(String),
}

/// A file fetched from the git provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitFile {
    pub content: String,
    pub sha: String,
}

/// A commit created by the git provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    pub sha: String,
    pub message: String,
}

/// The only I/O boundary of the subsystem: reading existing files and
/// committing the aggregated `FileUpdates` as one atomic commit.
#[async_trait]
pub trait GitPort: Send + Sync {
    /// Fetch one file from the repo's configured branch, `Ok(None)` when absent
    async fn get_file_from_repo(
        &self,
        repo: &GitRepo,
        path: &str,
    ) -> Result<Option<GitFile>, GitPortError>;

    /// Apply every write and deletion in `updates` as a single commit.
    /// The commit either fully lands or the whole operation fails.
    async fn commit_to_git(
        &self,
        repo: &GitRepo,
        message: &str,
        updates: &FileUpdates,
    ) -> Result<GitCommit, GitPortError>;
}

/// Resolve recipe versions by id
#[async_trait]
pub trait RecipesPort: Send + Sync {
    async fn get_version(&self, id: RecipeVersionId)
        -> Result<Option<RecipeVersion>, PortError>;
    async fn latest_version(&self, recipe_id: RecipeId)
        -> Result<Option<RecipeVersion>, PortError>;
}

/// Resolve standard versions by id
#[async_trait]
pub trait StandardsPort: Send + Sync {
    async fn get_version(
        &self,
        id: StandardVersionId,
    ) -> Result<Option<StandardVersion>, PortError>;
    async fn latest_version(
        &self,
        standard_id: StandardId,
    ) -> Result<Option<StandardVersion>, PortError>;
}

/// Resolve targets and their owning repositories
#[async_trait]
pub trait TargetsPort: Send + Sync {
    async fn get_target(&self, id: TargetId) -> Result<Option<Target>, PortError>;
    async fn get_repo(&self, id: GitRepoId) -> Result<Option<GitRepo>, PortError>;
}

/// Resolve packages by id
#[async_trait]
pub trait PackagesPort: Send + Sync {
    async fn get_package(&self, id: PackageId) -> Result<Option<Package>, PortError>;
}

/// Append-only distribution history per target
#[async_trait]
pub trait DistributionsPort: Send + Sync {
    async fn add_distribution(&self, distribution: Distribution) -> Result<(), PortError>;

    /// Most recent distribution with `Success` status, i.e. the current
    /// deployed state of the target
    async fn latest_successful(
        &self,
        target_id: TargetId,
    ) -> Result<Option<Distribution>, PortError>;

    async fn list_for_target(&self, target_id: TargetId)
        -> Result<Vec<Distribution>, PortError>;
}
