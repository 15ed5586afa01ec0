use crate::agents::AgentName;
use crate::model::{
    OrganizationId, PackageId, RecipeVersionId, StandardVersionId, TargetId, UserId,
};
use serde::Deserialize;

/// Publish one or more packages to one or more targets
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPackagesCommand {
    pub organization_id: OrganizationId,
    pub author_id: UserId,
    pub package_ids: Vec<PackageId>,
    pub target_ids: Vec<TargetId>,
    /// Explicit agent selection; defaults to the configured agent set
    #[serde(default)]
    pub agents: Option<Vec<AgentName>>,
}

/// Remove one or more packages from one or more targets
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePackagesCommand {
    pub organization_id: OrganizationId,
    pub author_id: UserId,
    pub package_ids: Vec<PackageId>,
    pub target_ids: Vec<TargetId>,
    #[serde(default)]
    pub agents: Option<Vec<AgentName>>,
}

/// Refresh specific artifact versions on targets where their artifact is
/// already deployed (the webhook re-sync path)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishArtifactsCommand {
    pub organization_id: OrganizationId,
    pub author_id: UserId,
    #[serde(default)]
    pub recipe_version_ids: Vec<RecipeVersionId>,
    #[serde(default)]
    pub standard_version_ids: Vec<StandardVersionId>,
    pub target_ids: Vec<TargetId>,
    #[serde(default)]
    pub agents: Option<Vec<AgentName>>,
}
