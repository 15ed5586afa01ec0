//! Package publish/remove use cases and the distribution history they write.
//!
//! Every entry point enforces the tenant boundary first: a target or package
//! that doesn't exist or belongs to another organization aborts the whole
//! operation before anything is rendered or committed. File updates for one
//! operation are flattened into one commit per affected repository, so a
//! publish either fully lands or leaves the repo untouched.

mod artifacts;
mod publish;
mod remove;
mod types;

pub use types::{PublishArtifactsCommand, PublishPackagesCommand, RemovePackagesCommand};

use crate::agents::{AgentName, AgentRegistry};
use crate::config::DeployerConfig;
use crate::deployer::DeployerService;
use crate::error::DeployError;
use crate::model::{
    DistributedArtifact, DistributedPackage, Distribution, DistributionStatus, GitRepo,
    OrganizationId, Package, PackageId, RecipeVersion, StandardVersion, Target, TargetId, UserId,
};
use crate::ports::{
    DistributionsPort, GitPort, PackagesPort, RecipesPort, StandardsPort, TargetsPort,
};
use crate::updates::{merge_updates, FileUpdates};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DistributionService {
    deployer: DeployerService,
    git: Arc<dyn GitPort>,
    recipes: Arc<dyn RecipesPort>,
    standards: Arc<dyn StandardsPort>,
    targets: Arc<dyn TargetsPort>,
    packages: Arc<dyn PackagesPort>,
    distributions: Arc<dyn DistributionsPort>,
    config: DeployerConfig,
}

impl DistributionService {
    #[must_use]
    pub fn new(
        git: Arc<dyn GitPort>,
        recipes: Arc<dyn RecipesPort>,
        standards: Arc<dyn StandardsPort>,
        targets: Arc<dyn TargetsPort>,
        packages: Arc<dyn PackagesPort>,
        distributions: Arc<dyn DistributionsPort>,
        config: DeployerConfig,
    ) -> Self {
        let registry = AgentRegistry::new(Arc::clone(&git), &config);
        Self {
            deployer: DeployerService::new(registry),
            git,
            recipes,
            standards,
            targets,
            packages,
            distributions,
            config,
        }
    }

    /// Package ids currently deployed to a target (tenant-checked)
    pub async fn list_deployed_packages(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> Result<Vec<PackageId>, DeployError> {
        self.resolve_target(organization_id, target_id).await?;
        self.deployed_package_ids(target_id).await
    }

    /// Full distribution history of a target (tenant-checked)
    pub async fn list_distributions(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> Result<Vec<Distribution>, DeployError> {
        self.resolve_target(organization_id, target_id).await?;
        Ok(self.distributions.list_for_target(target_id).await?)
    }

    // -----------------------------------------------------------------------
    // shared resolution helpers
    // -----------------------------------------------------------------------

    /// Resolve a target and its repo, enforcing the tenant boundary.
    /// A target owned by another organization is reported exactly like a
    /// missing one.
    pub(crate) async fn resolve_target(
        &self,
        organization_id: OrganizationId,
        target_id: TargetId,
    ) -> Result<(Target, GitRepo), DeployError> {
        let target = self
            .targets
            .get_target(target_id)
            .await?
            .ok_or(DeployError::TargetNotFound(target_id))?;
        let repo = self
            .targets
            .get_repo(target.git_repo_id)
            .await?
            .ok_or(DeployError::RepoNotFound(target.git_repo_id))?;
        if repo.organization_id != organization_id {
            return Err(DeployError::TargetNotFound(target_id));
        }
        Ok((target, repo))
    }

    pub(crate) async fn resolve_package(
        &self,
        organization_id: OrganizationId,
        package_id: PackageId,
    ) -> Result<Package, DeployError> {
        let package = self
            .packages
            .get_package(package_id)
            .await?
            .ok_or(DeployError::PackageNotFound(package_id))?;
        if package.organization_id != organization_id {
            return Err(DeployError::PackageNotFound(package_id));
        }
        Ok(package)
    }

    pub(crate) fn agents_for(&self, explicit: Option<&Vec<AgentName>>) -> Vec<AgentName> {
        match explicit {
            Some(agents) if !agents.is_empty() => agents.clone(),
            _ => self.config.default_agents.clone(),
        }
    }

    pub(crate) async fn deployed_package_ids(
        &self,
        target_id: TargetId,
    ) -> Result<Vec<PackageId>, DeployError> {
        let latest = self.distributions.latest_successful(target_id).await?;
        Ok(latest
            .map(|d| d.packages.iter().map(|p| p.package_id).collect())
            .unwrap_or_default())
    }

    /// Resolve every member artifact of the given packages to its latest
    /// version, deduplicated across packages and ordered by slug so renders
    /// stay deterministic. `lenient` skips artifacts without a resolvable
    /// version (removal flows tolerate hard-deleted artifacts); publishing
    /// treats that as an error.
    pub(crate) async fn collect_artifacts(
        &self,
        packages: &[Package],
        lenient: bool,
    ) -> Result<(Vec<RecipeVersion>, Vec<StandardVersion>), DeployError> {
        let mut recipes: BTreeMap<String, RecipeVersion> = BTreeMap::new();
        let mut standards: BTreeMap<String, StandardVersion> = BTreeMap::new();
        for package in packages {
            for &recipe_id in &package.recipe_ids {
                match self.recipes.latest_version(recipe_id).await? {
                    Some(version) => {
                        recipes.insert(version.slug.clone(), version);
                    }
                    None if lenient => {
                        warn!(recipe = %recipe_id, "skipping recipe without versions");
                    }
                    None => {
                        return Err(DeployError::ArtifactVersionMissing(recipe_id.to_string()))
                    }
                }
            }
            for &standard_id in &package.standard_ids {
                match self.standards.latest_version(standard_id).await? {
                    Some(version) => {
                        standards.insert(version.slug.clone(), version);
                    }
                    None if lenient => {
                        warn!(standard = %standard_id, "skipping standard without versions");
                    }
                    None => {
                        return Err(DeployError::ArtifactVersionMissing(standard_id.to_string()))
                    }
                }
            }
        }
        Ok((
            recipes.into_values().collect(),
            standards.into_values().collect(),
        ))
    }

    /// Build the post-operation package snapshot stored on a `Distribution`
    pub(crate) fn snapshot_packages(
        packages: &[Package],
        recipes: &[RecipeVersion],
        standards: &[StandardVersion],
    ) -> Vec<DistributedPackage> {
        packages
            .iter()
            .map(|package| DistributedPackage {
                package_id: package.id,
                recipe_versions: recipes
                    .iter()
                    .filter(|v| package.recipe_ids.contains(&v.recipe_id))
                    .map(|v| DistributedArtifact {
                        artifact_id: v.recipe_id,
                        version_id: v.id,
                    })
                    .collect(),
                standard_versions: standards
                    .iter()
                    .filter(|v| package.standard_ids.contains(&v.standard_id))
                    .map(|v| DistributedArtifact {
                        artifact_id: v.standard_id,
                        version_id: v.id,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Commit one repo's merged updates and persist one distribution per
    /// target. A failed commit persists `Failure` records (the attempted
    /// snapshot, so the history shows what was tried) and propagates.
    pub(crate) async fn commit_and_record(
        &self,
        repo: &GitRepo,
        message: &str,
        batches: Vec<FileUpdates>,
        author_id: UserId,
        per_target: Vec<(TargetId, Vec<DistributedPackage>)>,
    ) -> Result<Vec<Distribution>, DeployError> {
        let merged = merge_updates(batches);
        let commit_result = if merged.is_empty() {
            info!(repo = %repo.full_name(), "no file changes to commit");
            Ok(None)
        } else {
            self.git
                .commit_to_git(repo, message, &merged)
                .await
                .map(Some)
        };

        match commit_result {
            Ok(commit) => {
                if let Some(commit) = &commit {
                    info!(
                        repo = %repo.full_name(),
                        sha = %commit.sha,
                        files = merged.len(),
                        "committed deployment"
                    );
                }
                let mut records = Vec::new();
                for (target_id, snapshot) in per_target {
                    let record = Distribution::new(
                        target_id,
                        author_id,
                        DistributionStatus::Success,
                        snapshot,
                    );
                    self.distributions.add_distribution(record.clone()).await?;
                    records.push(record);
                }
                Ok(records)
            }
            Err(e) => {
                warn!(repo = %repo.full_name(), error = %e, "commit failed");
                for (target_id, snapshot) in per_target {
                    let record = Distribution::new(
                        target_id,
                        author_id,
                        DistributionStatus::Failure,
                        snapshot,
                    );
                    self.distributions.add_distribution(record).await?;
                }
                Err(e.into())
            }
        }
    }
}

/// Group per-target work by owning repository, preserving first-seen order
pub(crate) struct RepoBatch {
    pub repo: GitRepo,
    pub updates: Vec<FileUpdates>,
    pub per_target: Vec<(TargetId, Vec<DistributedPackage>)>,
}

pub(crate) fn push_to_repo_batch(
    batches: &mut Vec<RepoBatch>,
    repo: &GitRepo,
    updates: FileUpdates,
    target_id: TargetId,
    snapshot: Vec<DistributedPackage>,
) {
    match batches.iter_mut().find(|b| b.repo.id == repo.id) {
        Some(batch) => {
            batch.updates.push(updates);
            batch.per_target.push((target_id, snapshot));
        }
        None => batches.push(RepoBatch {
            repo: repo.clone(),
            updates: vec![updates],
            per_target: vec![(target_id, snapshot)],
        }),
    }
}
