//! Result document: node records and static dependency edges
//!
//! The shapes follow the task runner's `createNodesV2` / `createDependencies`
//! plugin contract so the document can be handed to it unchanged.

use super::target::{Target, TargetGroup};
use crate::core::errors::OutputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Build coordinates of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub packaging: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub target_groups: BTreeMap<String, TargetGroup>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub maven: MavenCoordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Application,
    Library,
}

/// One project as the task runner sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub name: String,
    pub root: String,
    pub source_root: String,
    pub project_type: ProjectType,
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,
    pub metadata: ProjectMetadata,
}

/// Projects contributed by one configuration file, keyed by project root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNodesResult {
    pub projects: BTreeMap<String, ProjectConfiguration>,
}

/// `[configFile, {projects: {...}}]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord(pub String, pub CreateNodesResult);

impl NodeRecord {
    pub fn new(config_file: String, root: String, project: ProjectConfiguration) -> Self {
        let mut result = CreateNodesResult::default();
        result.projects.insert(root, project);
        NodeRecord(config_file, result)
    }

    pub fn config_file(&self) -> &str {
        &self.0
    }

    pub fn projects(&self) -> &BTreeMap<String, ProjectConfiguration> {
        &self.1.projects
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Static,
}

/// Structural project-to-project dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub source_file: String,
}

impl DependencyEdge {
    pub fn new_static(source: String, target: String, source_file: String) -> Self {
        Self {
            source,
            target,
            kind: DependencyKind::Static,
            source_file,
        }
    }
}

/// The single document a run produces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub create_nodes_results: Vec<NodeRecord>,
    pub create_dependencies: Vec<DependencyEdge>,
}

impl AnalysisDocument {
    pub fn project_count(&self) -> usize {
        self.create_nodes_results
            .iter()
            .map(|node| node.projects().len())
            .sum()
    }

    /// Find a project configuration by name
    pub fn project(&self, name: &str) -> Option<&ProjectConfiguration> {
        self.create_nodes_results
            .iter()
            .flat_map(|node| node.projects().values())
            .find(|project| project.name == name)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, OutputError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, OutputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: &Path, pretty: bool) -> Result<(), OutputError> {
        let json = self.to_json(pretty)?;
        std::fs::write(path, json).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edge_shape() {
        let edge = DependencyEdge::new_static(
            "com.acme.b".to_string(),
            "com.acme.a".to_string(),
            "b/pom.xml".to_string(),
        );
        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({
                "source": "com.acme.b",
                "target": "com.acme.a",
                "type": "static",
                "sourceFile": "b/pom.xml"
            })
        );
    }

    #[test]
    fn test_node_record_is_a_pair() {
        let project = ProjectConfiguration {
            name: "com.acme.a".to_string(),
            root: "a".to_string(),
            source_root: "a/src/main/java".to_string(),
            project_type: ProjectType::Library,
            targets: BTreeMap::new(),
            metadata: ProjectMetadata {
                target_groups: BTreeMap::new(),
                technologies: vec!["maven".to_string()],
                maven: MavenCoordinates {
                    group_id: "com.acme".to_string(),
                    artifact_id: "a".to_string(),
                    version: None,
                    packaging: "jar".to_string(),
                },
            },
        };
        let node = NodeRecord::new("a/pom.xml".to_string(), "a".to_string(), project);

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value[0], json!("a/pom.xml"));
        assert_eq!(value[1]["projects"]["a"]["projectType"], json!("library"));
        assert_eq!(value[1]["projects"]["a"]["sourceRoot"], json!("a/src/main/java"));
    }
}
