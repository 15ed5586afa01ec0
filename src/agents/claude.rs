use super::{AgentDeployer, RECIPES_SECTION_KEY, STANDARDS_SECTION_KEY};
use crate::error::DeployError;
use crate::model::{GitRepo, RecipeVersion, StandardVersion, Target};
use crate::render::{
    render_recipe_link_list, render_standard_link_list, render_standard_rules, Frontmatter,
    RECIPES_BANNER,
};
use crate::updates::{FileModification, FileSection, FileUpdates};
use async_trait::async_trait;

const COMMANDS_DIR: &str = ".claude/commands/packmind/";
const RULES_DIR: &str = ".claude/rules/packmind/";
const CLAUDE_MD_PATH: &str = "CLAUDE.md";

// `.claude/rules/packmind/standard-x.md` sits three directories deep
const RULES_NESTING_DEPTH: usize = 3;

/// Claude topology: one command file per recipe, one rule file per
/// standard, plus legacy `CLAUDE.md` sections kept in sync through the
/// section-merge mechanism. The sections are always emitted, with empty
/// content when the artifact list empties, so removals clear stale
/// listings without deleting a file that may hold user-authored content.
pub struct ClaudeDeployer {
    app_web_url: String,
}

impl ClaudeDeployer {
    #[must_use]
    pub fn new(app_web_url: &str) -> Self {
        Self {
            app_web_url: app_web_url.to_string(),
        }
    }

    fn command_path(slug: &str) -> String {
        format!("{COMMANDS_DIR}{slug}.md")
    }

    fn rule_path(slug: &str) -> String {
        format!("{RULES_DIR}standard-{slug}.md")
    }

    fn recipes_section(&self, recipes: &[RecipeVersion]) -> FileSection {
        if recipes.is_empty() {
            return FileSection::new(RECIPES_SECTION_KEY, "");
        }
        let content = format!(
            "{RECIPES_BANNER}\n\nRecipes are managed by [Packmind]({}).\n\n{}",
            self.app_web_url,
            render_recipe_link_list(recipes, 0)
        );
        FileSection::new(RECIPES_SECTION_KEY, content)
    }

    fn standards_section(standards: &[StandardVersion]) -> FileSection {
        if standards.is_empty() {
            return FileSection::new(STANDARDS_SECTION_KEY, "");
        }
        FileSection::new(
            STANDARDS_SECTION_KEY,
            render_standard_link_list(standards, 0),
        )
    }
}

#[async_trait]
impl AgentDeployer for ClaudeDeployer {
    async fn deploy_recipes(
        &self,
        recipes: &[RecipeVersion],
        _repo: &GitRepo,
        _target: &Target,
    ) -> Result<FileUpdates, DeployError> {
        let mut updates = FileUpdates::empty();
        for recipe in recipes {
            let frontmatter = Frontmatter::new()
                .text_field("description", recipe.display_summary())
                .render();
            let content = format!("{frontmatter}\n{}\n", recipe.content.trim_end());
            updates
                .create_or_update
                .push(FileModification::full(&Self::command_path(&recipe.slug), content));
        }
        updates.create_or_update.push(FileModification::with_sections(
            CLAUDE_MD_PATH,
            vec![self.recipes_section(recipes)],
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
                &Self::rule_path(&standard.slug),
                render_standard_rules(standard, RULES_NESTING_DEPTH),
            ));
        }
        updates.create_or_update.push(FileModification::with_sections(
            CLAUDE_MD_PATH,
            vec![Self::standards_section(standards)],
        ));
        Ok(updates)
    }

    fn recipe_file_paths(&self, recipe: &RecipeVersion) -> Vec<String> {
        vec![Self::command_path(&recipe.slug)]
    }

    fn standard_file_paths(&self, standard: &StandardVersion) -> Vec<String> {
        vec![Self::rule_path(&standard.slug)]
    }

    fn recipes_cleanup_paths(&self) -> Vec<String> {
        vec![COMMANDS_DIR.to_string()]
    }

    fn standards_cleanup_paths(&self) -> Vec<String> {
        vec![RULES_DIR.to_string()]
    }
}
