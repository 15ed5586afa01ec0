//! Aggregation of per-agent deployments across targets.

use crate::agents::{AgentName, AgentRegistry};
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::updates::{apply_target_prefix, merge_updates, FileUpdates};
use tracing::debug;

/// Orchestrates every (target, agent) pair for a batch of artifact versions
/// and folds the results into one `FileUpdates` for the commit layer.
///
/// Each target's output is rewritten under its path prefix before merging,
/// so two targets on the same repo can never collide on a path even when
/// their relative agent outputs are identical. The whole computation is
/// pure apart from best-effort existing-file lookups inside some agents;
/// identical inputs always produce byte-identical output.
pub struct DeployerService {
    registry: AgentRegistry,
}

impl DeployerService {
    #[must_use]
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }

    pub async fn aggregate_recipe_deployments(
        &self,
        recipes: &[RecipeVersion],
        repo: &GitRepo,
        targets: &[Target],
        agents: &[AgentName],
    ) -> Result<FileUpdates, DeployError> {
        let mut batches = Vec::new();
        for target in targets {
            for &agent in agents {
                let deployer = self
                    .registry
                    .get(agent)
                    .ok_or_else(|| DeployError::UnknownAgent(agent.to_string()))?;
                let updates = deployer.deploy_recipes(recipes, repo, target).await?;
                debug!(
                    agent = %agent,
                    target = %target.name,
                    files = updates.len(),
                    "rendered recipe deployment"
                );
                batches.push(apply_target_prefix(updates, &target.path));
            }
        }
        Ok(merge_updates(batches))
    }

    pub async fn aggregate_standard_deployments(
        &self,
        standards: &[StandardVersion],
        repo: &GitRepo,
        targets: &[Target],
        agents: &[AgentName],
    ) -> Result<FileUpdates, DeployError> {
        let mut batches = Vec::new();
        for target in targets {
            for &agent in agents {
                let deployer = self
                    .registry
                    .get(agent)
                    .ok_or_else(|| DeployError::UnknownAgent(agent.to_string()))?;
                let updates = deployer.deploy_standards(standards, repo, target).await?;
                debug!(
                    agent = %agent,
                    target = %target.name,
                    files = updates.len(),
                    "rendered standard deployment"
                );
                batches.push(apply_target_prefix(updates, &target.path));
            }
        }
        Ok(merge_updates(batches))
    }

    /// Access to the per-agent deployers, used by removal flows to compute
    /// per-artifact deletions from an agent's file topology
    #[must_use]
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }
}

#[cfg(test)]
#[path = "deployer_tests.rs"]
mod tests;
