//! Per-agent deployers.
//!
//! Every supported coding agent implements [`AgentDeployer`]: given a list of
//! artifact versions, produce the `FileUpdates` describing that agent's file
//! topology. Deployers emit repo-root-relative paths and never perform the
//! target-path prefixing themselves; that belongs to the deployer service.
//! Selection is a name → implementation lookup table, not inheritance.

mod claude;
mod continue_dev;
mod copilot;
mod cursor;
mod junie;
mod packmind;

pub use claude::ClaudeDeployer;
pub use continue_dev::ContinueDeployer;
pub use copilot::CopilotDeployer;
pub use cursor::CursorDeployer;
pub use junie::JunieDeployer;
pub use packmind::PackmindDeployer;

use crate::config::DeployerConfig;
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::ports::GitPort;
use crate::updates::FileUpdates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Section key for recipe content in section-merged host files
pub const RECIPES_SECTION_KEY: &str = "Packmind recipes";
/// Section key for standard content in section-merged host files
pub const STANDARDS_SECTION_KEY: &str = "Packmind standards";

#[derive(Error, Debug)]
#[error("Unknown agent: {0}")]
pub struct UnknownAgentError(pub String);

/// The coding agents Packmind can deploy to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentName {
    Packmind,
    Claude,
    Cursor,
    Copilot,
    Continue,
    Junie,
}

impl AgentName {
    pub const ALL: [AgentName; 6] = [
        AgentName::Packmind,
        AgentName::Claude,
        AgentName::Cursor,
        AgentName::Copilot,
        AgentName::Continue,
        AgentName::Junie,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::Packmind => "packmind",
            AgentName::Claude => "claude",
            AgentName::Cursor => "cursor",
            AgentName::Copilot => "copilot",
            AgentName::Continue => "continue",
            AgentName::Junie => "junie",
        }
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentName {
    type Err = UnknownAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "packmind" => Ok(AgentName::Packmind),
            "claude" => Ok(AgentName::Claude),
            "cursor" => Ok(AgentName::Cursor),
            "copilot" => Ok(AgentName::Copilot),
            "continue" => Ok(AgentName::Continue),
            "junie" => Ok(AgentName::Junie),
            other => Err(UnknownAgentError(other.to_string())),
        }
    }
}

/// Capability contract implemented once per agent.
///
/// `deploy_*` must always return a defined `FileUpdates`, even for empty
/// input (per-artifact agents emit nothing, index agents emit an empty
/// index, section agents emit an empty-content section). The path methods
/// describe the agent's topology so removal flows can compute deletions
/// without re-deploying.
#[async_trait]
pub trait AgentDeployer: Send + Sync {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        repo: &GitRepo,
        target: &Target,
    ) -> Result<FileUpdates, DeployError>;

    async fn deploy_standards(
        &self,
        standards: &[StandardVersion],
        repo: &GitRepo,
        target: &Target,
    ) -> Result<FileUpdates, DeployError>;

    /// Per-artifact files this agent owns for one recipe (deleted on removal)
    fn recipe_file_paths(&self, recipe: &RecipeVersion) -> Vec<String> {
        let _ = recipe;
        Vec::new()
    }

    /// Per-artifact files this agent owns for one standard
    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        let _ = standard;
        Vec::new()
    }

    /// Agent-owned folders removable once the last recipe is gone
    fn recipes_cleanup_paths(&self) -> Vec<String> {
        Vec::new()
    }

    /// Agent-owned folders removable once the last standard is gone
    fn standards_cleanup_paths(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Name → deployer lookup table
pub struct AgentRegistry {
    agents: HashMap<AgentName, Arc<dyn AgentDeployer>>,
}

impl AgentRegistry {
    #[must_use]
    pub fn new(git: Arc<dyn GitPort>, config: &DeployerConfig) -> Self {
        let url = &config.app_web_url;
        let mut agents: HashMap<AgentName, Arc<dyn AgentDeployer>> = HashMap::new();
        agents.insert(
            AgentName::Packmind,
            Arc::new(PackmindDeployer::new(url)),
        );
        agents.insert(AgentName::Claude, Arc::new(ClaudeDeployer::new(url)));
        agents.insert(AgentName::Cursor, Arc::new(CursorDeployer::new()));
        agents.insert(
            AgentName::Copilot,
            Arc::new(CopilotDeployer::new(Arc::clone(&git), url)),
        );
        agents.insert(
            AgentName::Continue,
            Arc::new(ContinueDeployer::new(url)),
        );
        agents.insert(AgentName::Junie, Arc::new(JunieDeployer::new()));
        Self { agents }
    }

    #[must_use]
    pub fn get(&self, name: AgentName) -> Option<Arc<dyn AgentDeployer>> {
        self.agents.get(&name).map(Arc::clone)
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
