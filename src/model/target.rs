use super::ids::{GitRepoId, OrganizationId, TargetId};
use serde::{Deserialize, Serialize};

/// A git repository registered with an organization.
///
/// Access to the actual provider (GitHub, GitLab) goes through `GitPort`;
/// this type only carries identity and ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepo {
    pub id: GitRepoId,
    pub organization_id: OrganizationId,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl GitRepo {
    /// `owner/repo` form used in log lines and commit messages
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A named path prefix within a single repository that scopes a deployment.
///
/// A repo may carry several targets (e.g. `/`, `/jetbrains/`, `/vscode/`);
/// every file a deployment produces is prefixed with the owning target's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    /// Path prefix inside the repo, `/` for the repository root
    pub path: String,
    pub git_repo_id: GitRepoId,
}

impl Target {
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.path.trim_matches('/'), "")
    }
}
