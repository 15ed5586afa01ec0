use super::{push_to_repo_batch, DistributionService, RemovePackagesCommand, RepoBatch};
use crate::error::DeployError;
use crate::model::{Distribution, Package, RecipeId, StandardId};
use crate::updates::{apply_target_prefix, merge_updates, FileDeletion, FileUpdates};
use futures::future::try_join_all;
use std::collections::HashSet;
use tracing::{debug, info, warn};

impl DistributionService {
    /// Remove packages from targets.
    ///
    /// Only artifacts that become orphaned get their files deleted: an
    /// artifact also carried by a package that stays deployed is retained.
    /// Everything that remains is re-rendered in the same commit so indexes
    /// and shared sections reflect the reduced set, and single-file agents
    /// see their sections cleared rather than their files deleted.
    pub async fn remove_from_targets(
        &self,
        cmd: RemovePackagesCommand,
    ) -> Result<Vec<Distribution>, DeployError> {
        let agents = self.agents_for(cmd.agents.as_ref());

        let resolved_targets = try_join_all(
            cmd.target_ids
                .iter()
                .map(|&id| self.resolve_target(cmd.organization_id, id)),
        )
        .await?;
        let mut removed: Vec<Package> = Vec::new();
        for &package_id in &cmd.package_ids {
            if removed.iter().any(|p| p.id == package_id) {
                continue;
            }
            removed.push(self.resolve_package(cmd.organization_id, package_id).await?);
        }

        let mut batches: Vec<RepoBatch> = Vec::new();
        for (target, repo) in &resolved_targets {
            let current_ids = self.deployed_package_ids(target.id).await?;

            let removed_here: Vec<Package> = removed
                .iter()
                .filter(|p| current_ids.contains(&p.id))
                .cloned()
                .collect();
            if removed_here.is_empty() {
                debug!(target = %target.name, "none of the packages are deployed here, skipping");
                continue;
            }

            let mut remaining: Vec<Package> = Vec::new();
            for &package_id in &current_ids {
                if removed.iter().any(|p| p.id == package_id) {
                    continue;
                }
                match self.packages.get_package(package_id).await? {
                    Some(package) => remaining.push(package),
                    None => {
                        warn!(package = %package_id, "previously deployed package no longer exists, dropping");
                    }
                }
            }

            let (remaining_recipes, remaining_standards) =
                self.collect_artifacts(&remaining, true).await?;
            let (removed_recipes, removed_standards) =
                self.collect_artifacts(&removed_here, true).await?;

            // shared-artifact retention: only delete what no remaining
            // package still carries
            let kept_recipe_ids: HashSet<RecipeId> =
                remaining_recipes.iter().map(|v| v.recipe_id).collect();
            let kept_standard_ids: HashSet<StandardId> =
                remaining_standards.iter().map(|v| v.standard_id).collect();
            let orphan_recipes: Vec<_> = removed_recipes
                .iter()
                .filter(|v| !kept_recipe_ids.contains(&v.recipe_id))
                .collect();
            let orphan_standards: Vec<_> = removed_standards
                .iter()
                .filter(|v| !kept_standard_ids.contains(&v.standard_id))
                .collect();

            let mut deletions = FileUpdates::empty();
            for &agent in &agents {
                let deployer = self
                    .deployer
                    .registry()
                    .get(agent)
                    .ok_or_else(|| DeployError::UnknownAgent(agent.to_string()))?;
                for recipe in &orphan_recipes {
                    for path in deployer.recipe_file_paths(recipe) {
                        deletions.delete.push(FileDeletion::new(&path));
                    }
                }
                for standard in &orphan_standards {
                    for path in deployer.standard_file_paths(standard) {
                        deletions.delete.push(FileDeletion::new(&path));
                    }
                }
                if remaining_recipes.is_empty() && !orphan_recipes.is_empty() {
                    for path in deployer.recipes_cleanup_paths() {
                        deletions.delete.push(FileDeletion::new(&path));
                    }
                }
                if remaining_standards.is_empty() && !orphan_standards.is_empty() {
                    for path in deployer.standards_cleanup_paths() {
                        deletions.delete.push(FileDeletion::new(&path));
                    }
                }
            }
            let deletions = apply_target_prefix(deletions, &target.path);

            // re-render what stays so indexes and shared sections shrink
            let targets_slice = std::slice::from_ref(target);
            let recipe_updates = self
                .deployer
                .aggregate_recipe_deployments(&remaining_recipes, repo, targets_slice, &agents)
                .await?;
            let standard_updates = self
                .deployer
                .aggregate_standard_deployments(&remaining_standards, repo, targets_slice, &agents)
                .await?;
            let updates = merge_updates(vec![recipe_updates, standard_updates, deletions]);
            let snapshot =
                Self::snapshot_packages(&remaining, &remaining_recipes, &remaining_standards);
            push_to_repo_batch(&mut batches, repo, updates, target.id, snapshot);
        }

        let message = format!(
            "Packmind: remove {} package(s) from {} target(s)",
            removed.len(),
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
            packages = removed.len(),
            targets = resolved_targets.len(),
            "removal completed"
        );
        Ok(records)
    }
}
