mod common;

use common::{written_paths, World};
use packmind_deploy::{
    DeployError, PublishArtifactsCommand, PublishPackagesCommand, RecipeId, RecipeVersionId,
    StandardId,
};

#[tokio::test]
async fn test_publish_artifacts_rerenders_targets_carrying_the_artifact() {
    let world = World::new();
    let repo = world.add_repo(world.organization_id);
    let target = world.add_target(&repo, "default", "/");
    let recipe_id = RecipeId::new();
    let v1 = world.add_recipe_version(recipe_id, "Test Recipe", "test-recipe", "Old steps", 1);
    let package = world.add_package(world.organization_id, "Recipes", vec![recipe_id], vec![]);
    world
        .service
        .publish_packages(PublishPackagesCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            package_ids: vec![package.id],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap();

    let v2 = world.add_recipe_version(recipe_id, "Test Recipe", "test-recipe", "New steps", 2);
    let records = world
        .service
        .publish_artifacts(PublishArtifactsCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            recipe_version_ids: vec![v2.id],
            standard_version_ids: vec![],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0]
        .packages
        .iter()
        .flat_map(|p| &p.recipe_versions)
        .any(|a| a.version_id == v2.id));
    assert!(!records[0]
        .packages
        .iter()
        .flat_map(|p| &p.recipe_versions)
        .any(|a| a.version_id == v1.id));

    let (_, _, updates) = world.git.last_commit();
    let canonical = updates
        .create_or_update
        .iter()
        .find(|m| m.path == ".packmind/recipes/test-recipe.md")
        .expect("canonical recipe rewrite");
    assert!(canonical.content.as_deref().unwrap().contains("New steps"));
}

#[tokio::test]
async fn test_publish_artifacts_skips_targets_without_the_artifact() {
    let world = World::new();
    let repo = world.add_repo(world.organization_id);
    let carrying = world.add_target(&repo, "carrying", "/carrying/");
    let other = world.add_target(&repo, "other", "/other/");
    let recipe_id = RecipeId::new();
    world.add_recipe_version(recipe_id, "Test Recipe", "test-recipe", "Old steps", 1);
    let unrelated = world.add_recipe_version(RecipeId::new(), "Unrelated", "unrelated", "U", 1);
    let package = world.add_package(world.organization_id, "Recipes", vec![recipe_id], vec![]);
    let other_package = world.add_package(
        world.organization_id,
        "Other",
        vec![unrelated.recipe_id],
        vec![],
    );
    world
        .service
        .publish_packages(PublishPackagesCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            package_ids: vec![package.id],
            target_ids: vec![carrying.id],
            agents: None,
        })
        .await
        .unwrap();
    world
        .service
        .publish_packages(PublishPackagesCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            package_ids: vec![other_package.id],
            target_ids: vec![other.id],
            agents: None,
        })
        .await
        .unwrap();

    let v2 = world.add_recipe_version(recipe_id, "Test Recipe", "test-recipe", "New steps", 2);
    let records = world
        .service
        .publish_artifacts(PublishArtifactsCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            recipe_version_ids: vec![v2.id],
            standard_version_ids: vec![],
            target_ids: vec![carrying.id, other.id],
            agents: None,
        })
        .await
        .unwrap();

    // only the carrying target gets a new record and new files
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target_id, carrying.id);
    let (_, _, updates) = world.git.last_commit();
    let paths = written_paths(&updates);
    assert!(paths.contains(&"carrying/.packmind/recipes/test-recipe.md"));
    assert!(!paths.iter().any(|p| p.starts_with("other/")));
}

#[tokio::test]
async fn test_publish_artifacts_refreshes_standard_version() {
    let world = World::new();
    let repo = world.add_repo(world.organization_id);
    let target = world.add_target(&repo, "default", "/");
    let standard_id = StandardId::new();
    world.add_standard_version(standard_id, "Error Handling", "error-handling", None, 1);
    let package = world.add_package(world.organization_id, "Standards", vec![], vec![standard_id]);
    world
        .service
        .publish_packages(PublishPackagesCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            package_ids: vec![package.id],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap();

    let v2 = world.add_standard_version(standard_id, "Error Handling", "error-handling", None, 2);
    let records = world
        .service
        .publish_artifacts(PublishArtifactsCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            recipe_version_ids: vec![],
            standard_version_ids: vec![v2.id],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0]
        .packages
        .iter()
        .flat_map(|p| &p.standard_versions)
        .any(|a| a.version_id == v2.id));
}

#[tokio::test]
async fn test_publish_artifacts_unknown_version_is_rejected() {
    let world = World::new();
    let repo = world.add_repo(world.organization_id);
    let target = world.add_target(&repo, "default", "/");

    let err = world
        .service
        .publish_artifacts(PublishArtifactsCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            recipe_version_ids: vec![RecipeVersionId::new()],
            standard_version_ids: vec![],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::ArtifactVersionMissing(_)));
    assert_eq!(world.git.commit_count(), 0);
}

#[tokio::test]
async fn test_publish_artifacts_rejects_cross_org_target() {
    let world = World::new();
    let other_org = packmind_deploy::OrganizationId::new();
    let repo = world.add_repo(other_org);
    let target = world.add_target(&repo, "default", "/");
    let recipe_id = RecipeId::new();
    let v1 = world.add_recipe_version(recipe_id, "Test Recipe", "test-recipe", "Steps", 1);

    let err = world
        .service
        .publish_artifacts(PublishArtifactsCommand {
            organization_id: world.organization_id,
            author_id: world.author_id,
            recipe_version_ids: vec![v1.id],
            standard_version_ids: vec![],
            target_ids: vec![target.id],
            agents: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::TargetNotFound(id) if id == target.id));
}
