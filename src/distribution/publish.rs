use super::{push_to_repo_batch, DistributionService, PublishPackagesCommand, RepoBatch};
use crate::error::DeployError;
use crate::model::{Distribution, Package};
use crate::updates::merge_updates;
use futures::future::try_join_all;
use tracing::{info, warn};

impl DistributionService {
    /// Publish packages to targets.
    ///
    /// For every target the full post-publish artifact set is re-rendered
    /// (currently deployed packages plus the newly published ones), since
    /// single-index agents rebuild their complete index on every write.
    /// One commit per affected repository.
    pub async fn publish_packages(
        &self,
        cmd: PublishPackagesCommand,
    ) -> Result<Vec<Distribution>, DeployError> {
        let agents = self.agents_for(cmd.agents.as_ref());

        // Tenant boundary first: every target and package must resolve
        // before anything is rendered
        let resolved_targets = try_join_all(
            cmd.target_ids
                .iter()
                .map(|&id| self.resolve_target(cmd.organization_id, id)),
        )
        .await?;
        let mut published: Vec<Package> = Vec::new();
        for &package_id in &cmd.package_ids {
            if published.iter().any(|p| p.id == package_id) {
                continue;
            }
            published.push(self.resolve_package(cmd.organization_id, package_id).await?);
        }

        let mut batches: Vec<RepoBatch> = Vec::new();
        for (target, repo) in &resolved_targets {
            // union of what's already deployed and what's being published
            let mut package_set: Vec<Package> = Vec::new();
            for package_id in self.deployed_package_ids(target.id).await? {
                if published.iter().any(|p| p.id == package_id) {
                    continue;
                }
                match self.packages.get_package(package_id).await? {
                    Some(package) => package_set.push(package),
                    None => {
                        warn!(package = %package_id, "previously deployed package no longer exists, dropping");
                    }
                }
            }
            package_set.extend(published.iter().cloned());

            let (recipes, standards) = self.collect_artifacts(&package_set, false).await?;
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
            let snapshot = Self::snapshot_packages(&package_set, &recipes, &standards);
            push_to_repo_batch(&mut batches, repo, updates, target.id, snapshot);
        }

        let message = format!(
            "Packmind: publish {} package(s) to {} target(s)",
            published.len(),
            resolved_targets.len()
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
            packages = published.len(),
            targets = resolved_targets.len(),
            "publish completed"
        );
        Ok(records)
    }
}
