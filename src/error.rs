use crate::model::{GitRepoId, PackageId, TargetId};
use crate::ports::{GitPortError, PortError};
use thiserror::Error;

/// Errors raised by deployers, the deployer service, and the distribution
/// use cases.
///
/// `TargetNotFound` and `PackageNotFound` cover both genuine absence and
/// cross-organization access: callers can't distinguish a foreign tenant's
/// entity from a missing one. Any of these aborts the whole operation
/// before the commit call, so nothing is ever partially written.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Target {0} not found")]
    TargetNotFound(TargetId),

    #[error("Package {0} not found")]
    PackageNotFound(PackageId),

    #[error("Git repository {0} not found")]
    RepoNotFound(GitRepoId),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("No version found for artifact {0}")]
    ArtifactVersionMissing(String),

    #[error("Git error: {0}")]
    Git(#[from] GitPortError),

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}
