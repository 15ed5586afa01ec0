use super::AgentDeployer;
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::render::{render_standard_rules, Frontmatter};
use crate::updates::{FileModification, FileUpdates};
use async_trait::async_trait;

const COMMANDS_DIR: &str = ".cursor/commands/";
const RULES_DIR: &str = ".cursor/rules/packmind/";

const RULES_NESTING_DEPTH: usize = 3;

/// Cursor topology: one command file per recipe (content verbatim, Cursor
/// renders its own chrome) and one `.mdc` rule file per standard. A scoped
/// standard declares its glob in `globs:` with `alwaysApply: false`; a
/// universal one declares `alwaysApply: true` and no glob line.
pub struct CursorDeployer;

impl CursorDeployer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn command_path(slug: &str) -> String {
        format!("{COMMANDS_DIR}{slug}.md")
    }

    fn rule_path(slug: &str) -> String {
        format!("{RULES_DIR}standard-{slug}.mdc")
    }

    fn rule_frontmatter(standard: &StandardVersion) -> String {
        let fm = Frontmatter::new().text_field("description", standard.display_summary());
        match standard.scope.as_deref() {
            Some(scope) if !scope.is_empty() => {
                fm.field("globs", scope).flag("alwaysApply", false)
            }
            _ => fm.flag("alwaysApply", true),
        }
        .render()
    }
}

impl Default for CursorDeployer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentDeployer for CursorDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let mut updates = FileUpdates::empty();
        for recipe in recipes {
            let mut content = recipe.content.trim_end().to_string();
            content.push('\n');
            updates
                .create_or_update
                .push(FileModification::full(&Self::command_path(&recipe.slug), content));
        }
        Ok(updates)
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
                Self::rule_frontmatter(standard),
                render_standard_rules(standard, RULES_NESTING_DEPTH)
            );
            updates
                .create_or_update
                .push(FileModification::full(&Self::rule_path(&standard.slug), content));
        }
        Ok(updates)
    }

    fn recipe_file_paths(&self, recipe: &RecipeVersion) -> Vec<String> {
        vec![Self::command_path(&recipe.slug)]
    }

    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        vec![Self::rule_path(&standard.slug)]
    }

    fn standards_cleanup_paths(&self) -> Vec<String> {
        // `.cursor/commands/` is shared with user commands and never removed
        vec![RULES_DIR.to_string()]
    }
}
