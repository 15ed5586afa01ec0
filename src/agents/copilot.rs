use super::AgentDeployer;
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::ports::GitPort;
use crate::render::{render_recipes_index_body, render_standard_rules, Frontmatter};
use crate::updates::{join_target_path, FileModification, FileUpdates};
use crate::utils::compute_hash;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const INSTRUCTIONS_DIR: &str = ".github/instructions/";
const RECIPES_INDEX_PATH: &str = ".github/instructions/packmind-recipes-index.instructions.md";

const INSTRUCTIONS_NESTING_DEPTH: usize = 2;

/// Copilot topology: everything lives in `.github/instructions/`, a single
/// recipes index plus one instructions file per standard, each carrying an
/// `applyTo` header. The recipes index is skipped when the repo already
/// holds a byte-identical copy; a failed lookup counts as "file absent" and
/// never aborts the deployment.
pub struct CopilotDeployer {
    git: Arc<dyn GitPort>,
    app_web_url: String,
}

impl CopilotDeployer {
    #[must_use]
    pub fn new(git: Arc<dyn GitPort>, app_web_url: &str) -> Self {
        Self {
            git,
            app_web_url: app_web_url.to_string(),
        }
    }

    fn instructions_path(slug: &str) -> String {
        format!("{INSTRUCTIONS_DIR}packmind-{slug}.instructions.md")
    }

    fn apply_to_frontmatter(scope: Option<&str>) -> String {
        let glob = match scope {
            Some(s) if !s.is_empty() => s,
            _ => "**",
        };
        Frontmatter::new()
            .field("applyTo", &format!("\"{glob}\""))
            .render()
    }

    /// Best-effort check against the currently committed index
    async fn index_already_current(&self, repo: &GitRepo, path: &str, rendered: &str) -> bool {
        match self.git.get_file_from_repo(repo, path).await {
            Ok(Some(existing)) => compute_hash(&existing.content) == compute_hash(rendered),
            Ok(None) => false,
            Err(e) => {
                warn!(path, error = %e, "existing-file lookup failed, treating as absent");
                false
            }
        }
    }
}

#[async_trait]
impl AgentDeployer for CopilotDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        repo: &GitRepo,
        target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let body = render_recipes_index_body(recipes, INSTRUCTIONS_NESTING_DEPTH, &self.app_web_url);
        let content = format!("{}\n{body}", Self::apply_to_frontmatter(None));

        // The lookup must use the path as committed, i.e. with the target prefix
        let committed_path = join_target_path(&target.path, RECIPES_INDEX_PATH);
        if self.index_already_current(repo, &committed_path, &content).await {
            debug!(path = %committed_path, "recipes index already current, skipping");
            return Ok(FileUpdates::empty());
        }

        Ok(FileUpdates {
            create_or_update: vec![FileModification::full(RECIPES_INDEX_PATH, content)],
            delete: vec![],
        })
    }

    async fn deploy_standards(
        &self,
        standards: &[StandardVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let mut updates = FileUpdates::empty();
        for standard in standards {
            let content = format!(
                "{}\n{}",
                Self::apply_to_frontmatter(standard.scope.as_deref()),
                render_standard_rules(standard, INSTRUCTIONS_NESTING_DEPTH)
            );
            updates.create_or_update.push(FileModification::full(
                &Self::instructions_path(&standard.slug),
                content,
            ));
        }
        Ok(updates)
    }

    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        vec![Self::instructions_path(&standard.slug)]
    }

    // `.github/instructions/` is shared with user instructions files, so no
    // folder cleanup; the recipes index is cleared by re-rendering it empty.
}
