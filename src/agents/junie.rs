use super::{AgentDeployer, RECIPES_SECTION_KEY, STANDARDS_SECTION_KEY};
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::render::{render_recipe_link_list, render_standard_link_list, RECIPES_BANNER};
use crate::updates::{FileModification, FileSection, FileUpdates};
use async_trait::async_trait;

const GUIDELINES_PATH: &str = ".junie/guidelines.md";

// `.junie/guidelines.md` is one directory below the target root
const GUIDELINES_NESTING_DEPTH: usize = 1;

/// Junie topology: a single `guidelines.md` host file, written exclusively
/// through named sections. Junie users keep their own guidelines in the
/// same file, so the deployer never emits full content. An empty artifact
/// list becomes an empty-content section, which clears the region while
/// leaving the rest of the file intact.
pub struct JunieDeployer;

impl JunieDeployer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JunieDeployer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentDeployer for JunieDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let content = if recipes.is_empty() {
            String::new()
        } else {
            format!(
                "{RECIPES_BANNER}\n\n{}",
                render_recipe_link_list(recipes, GUIDELINES_NESTING_DEPTH)
            )
        };
        Ok(FileUpdates {
            create_or_update: vec![FileModification::with_sections(
                GUIDELINES_PATH,
                vec![FileSection::new(RECIPES_SECTION_KEY, content)],
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
        let content = if standards.is_empty() {
            String::new()
        } else {
            render_standard_link_list(standards, GUIDELINES_NESTING_DEPTH)
        };
        Ok(FileUpdates {
            create_or_update: vec![FileModification::with_sections(
                GUIDELINES_PATH,
                vec![FileSection::new(STANDARDS_SECTION_KEY, content)],
            )],
            delete: vec![],
        })
    }
}
