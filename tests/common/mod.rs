//! In-memory fakes for every port, plus a small world builder the
//! integration tests share.
#![allow(dead_code)]

use async_trait::async_trait;
use packmind_deploy::{
    DeployerConfig, Distribution, DistributionStatus, DistributionsPort, DistributionService,
    FileUpdates, GitCommit, GitFile, GitPort, GitPortError, GitRepo, GitRepoId, OrganizationId,
    Package, PackageId, PackagesPort, PortError, RecipeId, RecipeVersion, RecipeVersionId,
    RecipesPort, StandardId, StandardRule, StandardVersion, StandardVersionId, StandardsPort,
    Target, TargetId, TargetsPort, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records commits and keeps a flat path -> file map so existing-file
/// lookups (the Copilot skip check) see what earlier commits wrote.
#[derive(Default)]
pub struct InMemoryGit {
    pub files: Mutex<HashMap<String, GitFile>>,
    pub commits: Mutex<Vec<(String, String, FileUpdates)>>,
    pub fail_commits: Mutex<bool>,
}

impl InMemoryGit {
    pub fn commit_count(&self) -> usize {
        self.commits.lock().unwrap().len()
    }

    pub fn last_commit(&self) -> (String, String, FileUpdates) {
        self.commits.lock().unwrap().last().cloned().unwrap()
    }

    pub fn set_fail_commits(&self, fail: bool) {
        *self.fail_commits.lock().unwrap() = fail;
    }
}

#[async_trait]
impl GitPort for InMemoryGit {
    async fn get_file_from_repo(
        &self,
        _repo: &GitRepo,
        path: &str,
    ) -> Result<Option<GitFile>, GitPortError> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn commit_to_git(
        &self,
        repo: &GitRepo,
        message: &str,
        updates: &FileUpdates,
    ) -> Result<GitCommit, GitPortError> {
        if *self.fail_commits.lock().unwrap() {
            return Err(GitPortError::CommitRejected("simulated failure".to_string()));
        }
        let mut files = self.files.lock().unwrap();
        for modification in &updates.create_or_update {
            if let Some(content) = &modification.content {
                let sha = format!("sha-{}", files.len());
                files.insert(
                    modification.path.clone(),
                    GitFile {
                        content: content.clone(),
                        sha,
                    },
                );
            }
        }
        for deletion in &updates.delete {
            if deletion.path.ends_with('/') {
                files.retain(|path, _| !path.starts_with(&deletion.path));
            } else {
                files.remove(&deletion.path);
            }
        }
        drop(files);
        let mut commits = self.commits.lock().unwrap();
        commits.push((repo.full_name(), message.to_string(), updates.clone()));
        Ok(GitCommit {
            sha: format!("commit-{}", commits.len()),
            message: message.to_string(),
        })
    }
}

#[derive(Default)]
pub struct InMemoryRecipes {
    pub versions: Mutex<Vec<RecipeVersion>>,
}

#[async_trait]
impl RecipesPort for InMemoryRecipes {
    async fn get_version(&self, id: RecipeVersionId) -> Result<Option<RecipeVersion>, PortError> {
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn latest_version(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<RecipeVersion>, PortError> {
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.recipe_id == recipe_id)
            .max_by_key(|v| v.version)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryStandards {
    pub versions: Mutex<Vec<StandardVersion>>,
}

#[async_trait]
impl StandardsPort for InMemoryStandards {
    async fn get_version(
        &self,
        id: StandardVersionId,
    ) -> Result<Option<StandardVersion>, PortError> {
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn latest_version(
        &self,
        standard_id: StandardId,
    ) -> Result<Option<StandardVersion>, PortError> {
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.standard_id == standard_id)
            .max_by_key(|v| v.version)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTargets {
    pub targets: Mutex<HashMap<TargetId, Target>>,
    pub repos: Mutex<HashMap<GitRepoId, GitRepo>>,
}

#[async_trait]
impl TargetsPort for InMemoryTargets {
    async fn get_target(&self, id: TargetId) -> Result<Option<Target>, PortError> {
        Ok(self.targets.lock().unwrap().get(&id).cloned())
    }

    async fn get_repo(&self, id: GitRepoId) -> Result<Option<GitRepo>, PortError> {
        Ok(self.repos.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPackages {
    pub packages: Mutex<HashMap<PackageId, Package>>,
}

#[async_trait]
impl PackagesPort for InMemoryPackages {
    async fn get_package(&self, id: PackageId) -> Result<Option<Package>, PortError> {
        Ok(self.packages.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryDistributions {
    pub records: Mutex<Vec<Distribution>>,
}

#[async_trait]
impl DistributionsPort for InMemoryDistributions {
    async fn add_distribution(&self, distribution: Distribution) -> Result<(), PortError> {
        self.records.lock().unwrap().push(distribution);
        Ok(())
    }

    async fn latest_successful(
        &self,
        target_id: TargetId,
    ) -> Result<Option<Distribution>, PortError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|d| d.target_id == target_id && d.status == DistributionStatus::Success)
            .cloned())
    }

    async fn list_for_target(&self, target_id: TargetId) -> Result<Vec<Distribution>, PortError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.target_id == target_id)
            .cloned()
            .collect())
    }
}

/// One fully wired service over in-memory ports
pub struct World {
    pub git: Arc<InMemoryGit>,
    pub recipes: Arc<InMemoryRecipes>,
    pub standards: Arc<InMemoryStandards>,
    pub targets: Arc<InMemoryTargets>,
    pub packages: Arc<InMemoryPackages>,
    pub distributions: Arc<InMemoryDistributions>,
    pub service: DistributionService,
    pub organization_id: OrganizationId,
    pub author_id: UserId,
}

impl World {
    pub fn new() -> Self {
        let git = Arc::new(InMemoryGit::default());
        let recipes = Arc::new(InMemoryRecipes::default());
        let standards = Arc::new(InMemoryStandards::default());
        let targets = Arc::new(InMemoryTargets::default());
        let packages = Arc::new(InMemoryPackages::default());
        let distributions = Arc::new(InMemoryDistributions::default());
        let service = DistributionService::new(
            git.clone(),
            recipes.clone(),
            standards.clone(),
            targets.clone(),
            packages.clone(),
            distributions.clone(),
            DeployerConfig::default(),
        );
        Self {
            git,
            recipes,
            standards,
            targets,
            packages,
            distributions,
            service,
            organization_id: OrganizationId::new(),
            author_id: UserId::new(),
        }
    }

    pub fn add_repo(&self, organization_id: OrganizationId) -> GitRepo {
        let repo = GitRepo {
            id: GitRepoId::new(),
            organization_id,
            owner: "packmind".to_string(),
            repo: "backend".to_string(),
            branch: "main".to_string(),
        };
        self.targets
            .repos
            .lock()
            .unwrap()
            .insert(repo.id, repo.clone());
        repo
    }

    pub fn add_target(&self, repo: &GitRepo, name: &str, path: &str) -> Target {
        let target = Target {
            id: TargetId::new(),
            name: name.to_string(),
            path: path.to_string(),
            git_repo_id: repo.id,
        };
        self.targets
            .targets
            .lock()
            .unwrap()
            .insert(target.id, target.clone());
        target
    }

    pub fn add_recipe_version(
        &self,
        recipe_id: RecipeId,
        name: &str,
        slug: &str,
        content: &str,
        version: u32,
    ) -> RecipeVersion {
        let recipe = RecipeVersion {
            id: RecipeVersionId::new(),
            recipe_id,
            name: name.to_string(),
            slug: slug.to_string(),
            content: content.to_string(),
            version,
            summary: None,
        };
        self.recipes.versions.lock().unwrap().push(recipe.clone());
        recipe
    }

    pub fn add_standard_version(
        &self,
        standard_id: StandardId,
        name: &str,
        slug: &str,
        scope: Option<&str>,
        version: u32,
    ) -> StandardVersion {
        let standard = StandardVersion {
            id: StandardVersionId::new(),
            standard_id,
            name: name.to_string(),
            slug: slug.to_string(),
            description: format!("{name} description"),
            rules: vec![StandardRule {
                content: "Always handle errors".to_string(),
            }],
            scope: scope.map(str::to_string),
            version,
            summary: None,
        };
        self.standards
            .versions
            .lock()
            .unwrap()
            .push(standard.clone());
        standard
    }

    pub fn add_package(
        &self,
        organization_id: OrganizationId,
        name: &str,
        recipe_ids: Vec<RecipeId>,
        standard_ids: Vec<StandardId>,
    ) -> Package {
        let package = Package {
            id: PackageId::new(),
            organization_id,
            name: name.to_string(),
            slug: packmind_deploy::utils::slugify(name),
            recipe_ids,
            standard_ids,
        };
        self.packages
            .packages
            .lock()
            .unwrap()
            .insert(package.id, package.clone());
        package
    }
}

/// Paths written (full content or sections) by the given updates
pub fn written_paths(updates: &FileUpdates) -> Vec<&str> {
    updates
        .create_or_update
        .iter()
        .map(|m| m.path.as_str())
        .collect()
}

/// Paths deleted by the given updates
pub fn deleted_paths(updates: &FileUpdates) -> Vec<&str> {
    updates.delete.iter().map(|m| m.path.as_str()).collect()
}
