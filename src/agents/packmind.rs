use super::AgentDeployer;
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::render::{
    canonical_recipe_path, canonical_standard_path, render_recipe_file,
    render_recipes_index_body, render_standard_file, render_standards_index_body,
};
use crate::updates::{FileModification, FileUpdates};
use async_trait::async_trait;

const RECIPES_INDEX_PATH: &str = ".packmind/recipes-index.md";
const STANDARDS_INDEX_PATH: &str = ".packmind/standards-index.md";

// Index files live one directory below the target root
const INDEX_NESTING_DEPTH: usize = 1;

/// The native Packmind topology: one canonical file per artifact under
/// `.packmind/`, plus an index file per artifact kind. Every other agent's
/// rendered output links back to these canonical files.
pub struct PackmindDeployer {
    app_web_url: String,
}

impl PackmindDeployer {
    #[must_use]
    pub fn new(app_web_url: &str) -> Self {
        Self {
            app_web_url: app_web_url.to_string(),
        }
    }
}

#[async_trait]
impl AgentDeployer for PackmindDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let mut updates = FileUpdates::empty();
        for recipe in recipes {
            updates.create_or_update.push(FileModification::full(
                &canonical_recipe_path(&recipe.slug),
                render_recipe_file(recipe),
            ));
        }
        updates.create_or_update.push(FileModification::full(
            RECIPES_INDEX_PATH,
            render_recipes_index_body(recipes, INDEX_NESTING_DEPTH, &self.app_web_url),
        ));
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
            updates.create_or_update.push(FileModification::full(
                &canonical_standard_path(&standard.slug),
                render_standard_file(standard),
            ));
        }
        updates.create_or_update.push(FileModification::full(
            STANDARDS_INDEX_PATH,
            render_standards_index_body(standards, INDEX_NESTING_DEPTH, &self.app_web_url),
        ));
        Ok(updates)
    }

    fn recipe_file_paths(&self, recipe: &RecipeVersion) -> Vec<String> {
        vec![canonical_recipe_path(&recipe.slug)]
    }

    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        vec![canonical_standard_path(&standard.slug)]
    }

    fn recipes_cleanup_paths(&self) -> Vec<String> {
        vec![".packmind/recipes/".to_string()]
    }

    fn standards_cleanup_paths(&self) -> Vec<String> {
        vec![".packmind/standards/".to_string()]
    }
}
