//! Workspace members as supplied by the build tool
//!
//! A [`Project`] is an immutable snapshot for the duration of one analysis run.

use crate::core::constants::{config_files, DEFAULT_PLUGIN_GROUP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a workspace member (`groupId:artifactId`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl ProjectKey {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Name used for the project in the emitted graph (`groupId.artifactId`)
    pub fn project_name(&self) -> String {
        format!("{}.{}", self.group_id, self.artifact_id)
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Identity of a build plugin (`groupId:artifactId`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PluginKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl PluginKey {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Plugin in the default `org.apache.maven.plugins` group
    pub fn maven(artifact_id: impl Into<String>) -> Self {
        Self::new(DEFAULT_PLUGIN_GROUP, artifact_id)
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A declared `<dependency>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDecl {
    pub group_id: String,
    pub artifact_id: String,
    pub scope: Option<String>,
}

impl DependencyDecl {
    pub fn key(&self) -> ProjectKey {
        ProjectKey::new(&self.group_id, &self.artifact_id)
    }
}

/// A declared `<execution>` of a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDecl {
    pub id: String,
    pub phase: Option<String>,
    pub goals: Vec<String>,
    pub configuration: BTreeMap<String, String>,
}

impl ExecutionDecl {
    pub fn new(id: impl Into<String>, phase: Option<&str>, goals: &[&str]) -> Self {
        Self {
            id: id.into(),
            phase: phase.map(str::to_string),
            goals: goals.iter().map(|g| g.to_string()).collect(),
            configuration: BTreeMap::new(),
        }
    }

    pub fn with_configuration(mut self, name: &str, value: &str) -> Self {
        self.configuration.insert(name.to_string(), value.to_string());
        self
    }
}

/// A declared build plugin with its executions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDecl {
    pub key: PluginKey,
    pub version: Option<String>,
    pub configuration: BTreeMap<String, String>,
    pub executions: Vec<ExecutionDecl>,
}

impl PluginDecl {
    pub fn new(key: PluginKey) -> Self {
        Self {
            key,
            version: None,
            configuration: BTreeMap::new(),
            executions: Vec::new(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionDecl) -> Self {
        self.executions.push(execution);
        self
    }

    pub fn with_configuration(mut self, name: &str, value: &str) -> Self {
        self.configuration.insert(name.to_string(), value.to_string());
        self
    }
}

/// A workspace member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: ProjectKey,
    pub version: Option<String>,
    pub packaging: String,
    pub basedir: PathBuf,
    pub dependencies: Vec<DependencyDecl>,
    pub plugins: Vec<PluginDecl>,
}

impl Project {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            key: ProjectKey::new(group_id, artifact_id),
            version: None,
            packaging: "jar".to_string(),
            basedir: PathBuf::from(artifact_id),
            dependencies: Vec::new(),
            plugins: Vec::new(),
        }
    }

    pub fn with_packaging(mut self, packaging: &str) -> Self {
        self.packaging = packaging.to_string();
        self
    }

    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = basedir.into();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_dependency(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.dependencies.push(DependencyDecl {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            scope: None,
        });
        self
    }

    pub fn with_plugin(mut self, plugin: PluginDecl) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn name(&self) -> String {
        self.key.project_name()
    }

    pub fn pom_file(&self) -> PathBuf {
        self.basedir.join(config_files::POM_XML)
    }

    pub fn plugin(&self, key: &PluginKey) -> Option<&PluginDecl> {
        self.plugins.iter().find(|p| &p.key == key)
    }

    /// Find a plugin by its artifactId, ignoring the group
    pub fn plugin_by_artifact(&self, artifact_id: &str) -> Option<&PluginDecl> {
        self.plugins.iter().find(|p| p.key.artifact_id == artifact_id)
    }

    /// Every `(plugin, execution, goal)` triple declared in the POM
    pub fn declared_goals(&self) -> impl Iterator<Item = (&PluginDecl, &ExecutionDecl, &str)> {
        self.plugins.iter().flat_map(|plugin| {
            plugin.executions.iter().flat_map(move |execution| {
                execution
                    .goals
                    .iter()
                    .map(move |goal| (plugin, execution, goal.as_str()))
            })
        })
    }

    /// Phase a declared execution binds `goal` of `plugin` to, if any
    pub fn declared_phase(&self, plugin: &PluginKey, goal: &str) -> Option<&str> {
        self.declared_goals()
            .find(|(p, _, g)| &p.key == plugin && *g == goal)
            .and_then(|(_, execution, _)| execution.phase.as_deref())
    }
}

/// The reactor: every project analyzed together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub root: PathBuf,
    pub projects: Vec<Project>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, projects: Vec<Project>) -> Self {
        Self {
            root: root.into(),
            projects,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn find(&self, key: &ProjectKey) -> Option<&Project> {
        self.projects.iter().find(|p| &p.key == key)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_goals_and_phase() {
        let project = Project::new("com.acme", "core").with_plugin(
            PluginDecl::new(PluginKey::maven("maven-compiler-plugin"))
                .with_execution(ExecutionDecl::new("default-compile", Some("compile"), &["compile"]))
                .with_execution(ExecutionDecl::new("extra", None, &["testCompile"])),
        );

        let goals: Vec<&str> = project.declared_goals().map(|(_, _, g)| g).collect();
        assert_eq!(goals, vec!["compile", "testCompile"]);

        let compiler = PluginKey::maven("maven-compiler-plugin");
        assert_eq!(project.declared_phase(&compiler, "compile"), Some("compile"));
        assert_eq!(project.declared_phase(&compiler, "testCompile"), None);
    }

    #[test]
    fn test_project_naming() {
        let project = Project::new("com.acme", "core");
        assert_eq!(project.key.to_string(), "com.acme:core");
        assert_eq!(project.name(), "com.acme.core");
        assert_eq!(project.pom_file(), PathBuf::from("core/pom.xml"));
    }
}
