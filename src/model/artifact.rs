use super::ids::{RecipeId, RecipeVersionId, StandardId, StandardVersionId};
use crate::utils::slugify;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a recipe at a point in time.
///
/// Created on every edit to the parent recipe, never mutated afterwards.
/// Deployments reference versions by id, so a published recipe keeps
/// rendering the exact content it was published with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeVersion {
    pub id: RecipeVersionId,
    pub recipe_id: RecipeId,
    pub name: String,
    /// File-safe identifier derived from the name, unique within an organization
    pub slug: String,
    pub content: String,
    /// Monotonic per recipe
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RecipeVersion {
    /// Short description used in frontmatter and index entries
    #[must_use]
    pub fn display_summary(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => &self.name,
        }
    }
}

/// One free-text rule belonging to a standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardRule {
    pub content: String,
}

/// Immutable snapshot of a standard at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardVersion {
    pub id: StandardVersionId,
    pub standard_id: StandardId,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub rules: Vec<StandardRule>,
    /// Glob pattern restricting which files the standard applies to.
    /// `None` or empty means "all files".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Monotonic per standard
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl StandardVersion {
    /// A standard with no scope applies to every file
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.scope.as_deref().is_none_or(str::is_empty)
    }

    #[must_use]
    pub fn display_summary(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => &self.name,
        }
    }
}

/// Build the slug shared by all versions of an artifact with this name
#[must_use]
pub fn artifact_slug(name: &str) -> String {
    slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(scope: Option<&str>) -> StandardVersion {
        StandardVersion {
            id: StandardVersionId::new(),
            standard_id: StandardId::new(),
            name: "Error Handling".to_string(),
            slug: artifact_slug("Error Handling"),
            description: "How we handle errors".to_string(),
            rules: vec![],
            scope: scope.map(ToString::to_string),
            version: 1,
            summary: None,
        }
    }

    #[test]
    fn test_standard_without_scope_is_universal() {
        assert!(standard(None).is_universal());
    }

    #[test]
    fn test_standard_with_empty_scope_is_universal() {
        assert!(standard(Some("")).is_universal());
    }

    #[test]
    fn test_standard_with_glob_scope_is_not_universal() {
        assert!(!standard(Some("**/*.ts")).is_universal());
    }

    #[test]
    fn test_display_summary_falls_back_to_name() {
        let std_version = standard(None);
        assert_eq!(std_version.display_summary(), "Error Handling");
    }

    #[test]
    fn test_artifact_slug() {
        assert_eq!(artifact_slug("Test Recipe"), "test-recipe");
    }

    #[test]
    fn test_recipe_version_serde_camel_case() {
        let recipe = RecipeVersion {
            id: RecipeVersionId::new(),
            recipe_id: RecipeId::new(),
            name: "Test Recipe".to_string(),
            slug: "test-recipe".to_string(),
            content: "Step one".to_string(),
            version: 3,
            summary: Some("A test".to_string()),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert!(json.get("recipeId").is_some());
        assert_eq!(json["version"], 3);
    }
}
