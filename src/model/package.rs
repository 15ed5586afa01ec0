use super::ids::{OrganizationId, PackageId, RecipeId, StandardId};
use crate::utils::slugify;
use serde::{Deserialize, Serialize};

/// A named, organization-owned bundle of recipe and standard references.
///
/// Packages reference artifacts by id (not by version); publishing resolves
/// each member to its latest version at publish time. The same artifact may
/// belong to several packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub recipe_ids: Vec<RecipeId>,
    #[serde(default)]
    pub standard_ids: Vec<StandardId>,
}

impl Package {
    #[must_use]
    pub fn new(organization_id: OrganizationId, name: &str) -> Self {
        Self {
            id: PackageId::new(),
            organization_id,
            name: name.to_string(),
            slug: slugify(name),
            recipe_ids: Vec::new(),
            standard_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipe_ids.is_empty() && self.standard_ids.is_empty()
    }
}
