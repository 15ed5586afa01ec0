use super::ids::{
    DistributionId, PackageId, RecipeId, RecipeVersionId, StandardId, StandardVersionId, TargetId,
    UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one publish or removal operation on one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionStatus {
    Success,
    Failure,
}

/// Snapshot of one package's member versions as distributed to a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedPackage {
    pub package_id: PackageId,
    #[serde(default)]
    pub recipe_versions: Vec<DistributedArtifact<RecipeId, RecipeVersionId>>,
    #[serde(default)]
    pub standard_versions: Vec<DistributedArtifact<StandardId, StandardVersionId>>,
}

/// Reference to one distributed artifact version, keeping the parent artifact
/// id so "is artifact X currently deployed" queries don't need to resolve
/// versions first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedArtifact<A, V> {
    pub artifact_id: A,
    pub version_id: V,
}

/// Historical record of one publish/remove event on one target.
///
/// Append-only. Each record snapshots the full post-operation package set for
/// the target, so the current deployed state is simply the most recent record
/// with `Success` status, no diff log replay needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub id: DistributionId,
    pub target_id: TargetId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub status: DistributionStatus,
    /// Full package set deployed to the target after this operation
    #[serde(default)]
    pub packages: Vec<DistributedPackage>,
}

impl Distribution {
    #[must_use]
    pub fn new(
        target_id: TargetId,
        author_id: UserId,
        status: DistributionStatus,
        packages: Vec<DistributedPackage>,
    ) -> Self {
        Self {
            id: DistributionId::new(),
            target_id,
            author_id,
            created_at: Utc::now(),
            status,
            packages,
        }
    }

    /// Whether the given recipe is part of this distribution's snapshot
    #[must_use]
    pub fn contains_recipe(&self, recipe_id: RecipeId) -> bool {
        self.packages
            .iter()
            .flat_map(|p| &p.recipe_versions)
            .any(|a| a.artifact_id == recipe_id)
    }

    /// Whether the given standard is part of this distribution's snapshot
    #[must_use]
    pub fn contains_standard(&self, standard_id: StandardId) -> bool {
        self.packages
            .iter()
            .flat_map(|p| &p.standard_versions)
            .any(|a| a.artifact_id == standard_id)
    }
}
