//! Reactor discovery: follow `<modules>` from the root POM

use super::pom::{read_pom, RawPom};
use crate::core::constants::config_files::POM_XML;
use crate::core::errors::WorkspaceError;
use crate::model::{Project, ProjectKey, Workspace};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads every project reachable from `<root>/pom.xml`
pub struct WorkspaceLoader {
    root: PathBuf,
    filter: Vec<String>,
}

impl WorkspaceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: Vec::new(),
        }
    }

    /// Keep only projects matching one of `names`
    /// (`groupId:artifactId`, `groupId.artifactId` or bare `artifactId`)
    pub fn with_filter(mut self, names: Vec<String>) -> Self {
        self.filter = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self
    }

    pub fn load(&self) -> Result<Workspace, WorkspaceError> {
        let root_pom = self.root.join(POM_XML);
        if !root_pom.is_file() {
            return Err(WorkspaceError::NoProjects {
                root: self.root.clone(),
            });
        }

        // project roots are derived by stripping this prefix from absolute basedirs
        let root = self
            .root
            .canonicalize()
            .map_err(|source| WorkspaceError::RootUnresolved {
                root: self.root.clone(),
                source,
            })?;

        let mut projects = Vec::new();
        let mut visited = HashSet::new();
        self.collect(&root.join(POM_XML), None, &mut projects, &mut visited)?;

        let total = projects.len();
        if !self.filter.is_empty() {
            projects.retain(|project: &Project| self.matches_filter(&project.key));
            debug!("Project filter kept {} of {} projects", projects.len(), total);
        }

        if projects.is_empty() {
            return Err(WorkspaceError::NoProjects { root });
        }

        info!("Loaded {} projects from {}", projects.len(), root.display());
        Ok(Workspace::new(root, projects))
    }

    fn collect(
        &self,
        pom_path: &Path,
        aggregator: Option<&RawPom>,
        projects: &mut Vec<Project>,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<(), WorkspaceError> {
        let pom_path = pom_path
            .canonicalize()
            .map_err(|source| WorkspaceError::PomRead {
                path: pom_path.to_path_buf(),
                source,
            })?;
        if !visited.insert(pom_path.clone()) {
            return Ok(());
        }
        let pom_path = pom_path.as_path();

        let mut pom = read_pom(pom_path)?;
        if pom.group_id.is_none() && pom.parent_group_id.is_none() {
            pom.parent_group_id = aggregator.and_then(|a| a.effective_group_id().map(str::to_string));
        }
        if pom.version.is_none() && pom.parent_version.is_none() {
            pom.parent_version = aggregator.and_then(|a| a.effective_version().map(str::to_string));
        }
        if let Some(aggregator) = aggregator {
            for (name, value) in &aggregator.properties {
                pom.properties
                    .entry(name.clone())
                    .or_insert_with(|| value.clone());
            }
            pom.resolve_properties();
        }

        let basedir = pom_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        projects.push(to_project(&pom, pom_path, &basedir)?);

        for module in &pom.modules {
            let candidate = basedir.join(module);
            let module_pom = if module.ends_with(".xml") {
                candidate
            } else {
                candidate.join(POM_XML)
            };

            if !module_pom.is_file() {
                warn!(
                    "Module '{}' of {} has no POM at {}",
                    module,
                    pom_path.display(),
                    module_pom.display()
                );
                continue;
            }
            self.collect(&module_pom, Some(&pom), projects, visited)?;
        }

        Ok(())
    }

    fn matches_filter(&self, key: &ProjectKey) -> bool {
        self.filter.iter().any(|name| {
            *name == key.to_string() || *name == key.project_name() || *name == key.artifact_id
        })
    }
}

fn to_project(pom: &RawPom, pom_path: &Path, basedir: &Path) -> Result<Project, WorkspaceError> {
    let artifact_id = pom
        .artifact_id
        .clone()
        .ok_or_else(|| WorkspaceError::MissingArtifactId {
            path: pom_path.to_path_buf(),
        })?;
    let group_id = pom
        .effective_group_id()
        .map(str::to_string)
        .unwrap_or_else(|| artifact_id.clone());

    Ok(Project {
        key: ProjectKey::new(group_id, artifact_id),
        version: pom.effective_version().map(str::to_string),
        packaging: pom.packaging.clone().unwrap_or_else(|| "jar".to_string()),
        basedir: basedir.to_path_buf(),
        dependencies: pom.dependencies.clone(),
        plugins: pom.plugins.clone(),
    })
}

/// Load the workspace at `root`, optionally restricted to `filter`
pub fn load_workspace(root: &Path, filter: Vec<String>) -> Result<Workspace, WorkspaceError> {
    WorkspaceLoader::new(root).with_filter(filter).load()
}
