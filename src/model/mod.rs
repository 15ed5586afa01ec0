mod artifact;
mod distribution;
mod ids;
mod package;
mod target;

pub use artifact::{artifact_slug, RecipeVersion, StandardRule, StandardVersion};
pub use distribution::{
    DistributedArtifact, DistributedPackage, Distribution, DistributionStatus,
};
pub use ids::{
    DistributionId, GitRepoId, OrganizationId, PackageId, RecipeId, RecipeVersionId, StandardId,
    StandardVersionId, TargetId, UserId,
};
pub use package::Package;
pub use target::{GitRepo, Target};
