pub mod agents;
pub mod config;
pub mod deployer;
pub mod distribution;
pub mod error;
pub mod logging;
pub mod model;
pub mod ports;
pub mod render;
pub mod updates;
pub mod utils;

// Re-export commonly used types
pub use agents::{
    AgentDeployer, AgentName, AgentRegistry, RECIPES_SECTION_KEY, STANDARDS_SECTION_KEY,
};
pub use config::DeployerConfig;
pub use deployer::DeployerService;
pub use distribution::{
    DistributionService, PublishArtifactsCommand, PublishPackagesCommand, RemovePackagesCommand,
};
pub use error::DeployError;
pub use logging::{init_logging, LogConfig, LoggingError};
pub use model::{
    DistributedArtifact, DistributedPackage, Distribution, DistributionId, DistributionStatus,
    GitRepo, GitRepoId, OrganizationId, Package, PackageId, RecipeId, RecipeVersion,
    RecipeVersionId, StandardId, StandardRule, StandardVersion, StandardVersionId, Target,
    TargetId, UserId,
};
pub use ports::{
    DistributionsPort, GitCommit, GitFile, GitPort, GitPortError, PackagesPort, PortError,
    RecipesPort, StandardsPort, TargetsPort,
};
pub use updates::{
    apply_target_prefix, join_target_path, merge_updates, FileDeletion, FileModification,
    FileSection, FileUpdates,
};
