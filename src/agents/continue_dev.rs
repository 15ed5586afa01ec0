use super::AgentDeployer;
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::render::{render_recipes_index_body, render_standard_rules, Frontmatter};
use crate::updates::{FileModification, FileUpdates};
use async_trait::async_trait;

const RULES_DIR: &str = ".continue/rules/packmind/";
const RECIPES_INDEX_PATH: &str = ".continue/rules/packmind/recipes-index.md";

const RULES_NESTING_DEPTH: usize = 3;

/// Continue topology: a single recipes index rule plus one rule file per
/// standard, all under `.continue/rules/packmind/`.
pub struct ContinueDeployer {
    app_web_url: String,
}

impl ContinueDeployer {
    #[must_use]
    pub fn new(app_web_url: &str) -> Self {
        Self {
            app_web_url: app_web_url.to_string(),
        }
    }

    fn rule_path(slug: &str) -> String {
        format!("{RULES_DIR}standard-{slug}.md")
    }

    fn standard_frontmatter(standard: &StandardVersion) -> String {
        let fm = Frontmatter::new().text_field("name", &standard.name);
        match standard.scope.as_deref() {
            Some(scope) if !scope.is_empty() => {
                fm.field("globs", scope).flag("alwaysApply", false)
            }
            _ => fm.flag("alwaysApply", true),
        }
        .render()
    }
}

#[async_trait]
impl AgentDeployer for ContinueDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let frontmatter = Frontmatter::new()
            .text_field("name", "Packmind recipes index")
            .flag("alwaysApply", true)
            .render();
        let body = render_recipes_index_body(recipes, RULES_NESTING_DEPTH, &self.app_web_url);
        Ok(FileUpdates {
            create_or_update: vec![FileModification::full(
                RECIPES_INDEX_PATH,
                format!("{frontmatter}\n{body}"),
            )],
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
                Self::standard_frontmatter(standard),
                render_standard_rules(standard, RULES_NESTING_DEPTH)
            );
            updates
                .create_or_update
                .push(FileModification::full(&Self::rule_path(&standard.slug), content));
        }
        Ok(updates)
    }

    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        vec![Self::rule_path(&standard.slug)]
    }

    // The rules folder also hosts the recipes index, so neither artifact
    // kind emptying on its own justifies folder removal.
}
