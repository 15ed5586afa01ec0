use super::{push_to_repo_batch, DistributionService, PublishArtifactsCommand, RepoBatch};
use crate::error::DeployError;
use crate::model::{Distribution, Package, RecipeVersion, StandardVersion};
use crate::updates::merge_updates;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

impl DistributionService {
    /// Push specific artifact versions to targets where their artifact is
    /// already deployed.
    ///
    /// This is the re-sync path: a new recipe or standard version lands and
    /// every target carrying the artifact gets re-rendered with it. Targets
    /// that don't deploy any of the given artifacts are left untouched and
    /// get no distribution record.
    pub async fn publish_artifacts(
        &self,
        cmd: PublishArtifactsCommand,
    ) -> Result<Vec<Distribution>, DeployError> {
        let agents = self.agents_for(cmd.agents.as_ref());

        let resolved_targets = try_join_all(
            cmd.target_ids
                .iter()
                .map(|&id| self.resolve_target(cmd.organization_id, id)),
        )
        .await?;

        let mut refreshed_recipes: Vec<RecipeVersion> = Vec::new();
        for &version_id in &cmd.recipe_version_ids {
            let version = self
                .recipes
                .get_version(version_id)
                .await?
                .ok_or_else(|| DeployError::ArtifactVersionMissing(version_id.to_string()))?;
            refreshed_recipes.push(version);
        }
        let mut refreshed_standards: Vec<StandardVersion> = Vec::new();
        for &version_id in &cmd.standard_version_ids {
            let version = self
                .standards
                .get_version(version_id)
                .await?
                .ok_or_else(|| DeployError::ArtifactVersionMissing(version_id.to_string()))?;
            refreshed_standards.push(version);
        }

        let mut batches: Vec<RepoBatch> = Vec::new();
        for (target, repo) in &resolved_targets {
            let mut deployed: Vec<Package> = Vec::new();
            for package_id in self.deployed_package_ids(target.id).await? {
                match self.packages.get_package(package_id).await? {
                    Some(package) => deployed.push(package),
                    None => {
                        warn!(package = %package_id, "previously deployed package no longer exists, dropping");
                    }
                }
            }
            let (mut recipes, mut standards) = self.collect_artifacts(&deployed, true).await?;

            // substitute the requested versions for their artifacts; a target
            // is touched only if at least one artifact is deployed there
            let mut touched = false;
            for refreshed in &refreshed_recipes {
                if let Some(slot) = recipes
                    .iter_mut()
                    .find(|v| v.recipe_id == refreshed.recipe_id)
                {
                    *slot = refreshed.clone();
                    touched = true;
                }
            }
            for refreshed in &refreshed_standards {
                if let Some(slot) = standards
                    .iter_mut()
                    .find(|v| v.standard_id == refreshed.standard_id)
                {
                    *slot = refreshed.clone();
                    touched = true;
                }
            }
            if !touched {
                debug!(target = %target.name, "no refreshed artifact deployed here, skipping");
                continue;
            }

            let targets_slice = std::slice::from_ref(target);
            let recipe_updates = self
                .deployer
                .aggregate_recipe_deployments(&recipes, repo, targets_slice, &agents)
                .await?;
            let standard_updates = self
                .deployer
                .aggregate_standard_deployments(&standards, repo, targets_slice, &agents)
                .await?;
            let updates = merge_updates(vec![recipe_updates, standard_updates]);
            let snapshot = Self::snapshot_packages(&deployed, &recipes, &standards);
            push_to_repo_batch(&mut batches, repo, updates, target.id, snapshot);
        }

        let message = format!(
            "Packmind: refresh {} artifact version(s)",
            refreshed_recipes.len() + refreshed_standards.len()
        );
        let mut records = Vec::new();
        for batch in batches {
            let mut repo_records = self
                .commit_and_record(
                    &batch.repo,
                    &message,
                    batch.updates,
                    cmd.author_id,
                    batch.per_target,
                )
                .await?;
            records.append(&mut repo_records);
        }
        info!(
            recipes = refreshed_recipes.len(),
            standards = refreshed_standards.len(),
            "artifact refresh completed"
        );
        Ok(records)
    }
}
