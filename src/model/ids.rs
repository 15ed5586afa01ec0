use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifies an organization (the tenant boundary)
    OrganizationId
);
entity_id!(
    /// Identifies a user (distribution author)
    UserId
);
entity_id!(
    /// Identifies a recipe across all of its versions
    RecipeId
);
entity_id!(
    /// Identifies one immutable recipe version snapshot
    RecipeVersionId
);
entity_id!(
    /// Identifies a standard across all of its versions
    StandardId
);
entity_id!(
    /// Identifies one immutable standard version snapshot
    StandardVersionId
);
entity_id!(
    /// Identifies a git repository registered with an organization
    GitRepoId
);
entity_id!(
    /// Identifies a deployment target (path prefix within a repo)
    TargetId
);
entity_id!(
    /// Identifies a package (bundle of recipe/standard references)
    PackageId
);
entity_id!(
    /// Identifies one distribution record (one publish event to one target)
    DistributionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(TargetId::new(), TargetId::new());
    }

    #[test]
    fn test_id_display_is_uuid() {
        let id = PackageId::new();
        assert_eq!(id.to_string(), id.0.to_string());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = RecipeVersionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: RecipeVersionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
