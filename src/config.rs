use crate::agents::AgentName;
use serde::Deserialize;
use std::str::FromStr as _;
use tracing::warn;

/// Runtime configuration for the deployment subsystem.
///
/// The app web URL is injected rather than hardcoded so self-hosted
/// installations render links to their own instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployerConfig {
    /// Base URL of the Packmind web app, used in rendered "managed by" links
    pub app_web_url: String,
    /// Agents deployed when a command doesn't name an explicit agent list
    pub default_agents: Vec<AgentName>,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            app_web_url: "https://app.packmind.com".to_string(),
            default_agents: AgentName::ALL.to_vec(),
        }
    }
}

impl DeployerConfig {
    /// Build from defaults with environment overrides applied:
    /// `PACKMIND_APP_WEB_URL` and `PACKMIND_DEFAULT_AGENTS` (comma-separated
    /// agent names; unknown names are skipped with a warning).
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("PACKMIND_APP_WEB_URL") {
            if !url.is_empty() {
                config.app_web_url = url;
            }
        }
        if let Ok(agents) = std::env::var("PACKMIND_DEFAULT_AGENTS") {
            let parsed: Vec<AgentName> = agents
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match AgentName::from_str(s) {
                    Ok(name) => Some(name),
                    Err(_) => {
                        warn!(agent = s, "ignoring unknown agent name in PACKMIND_DEFAULT_AGENTS");
                        None
                    }
                })
                .collect();
            if !parsed.is_empty() {
                config.default_agents = parsed;
            }
        }
        config
    }
}
