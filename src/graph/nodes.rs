//! Node record assembly for one project

use crate::core::constants::config_files::POM_XML;
use crate::core::errors::ProjectError;
use crate::model::{
    MavenCoordinates, NodeRecord, Project, ProjectConfiguration, ProjectMetadata, ProjectType,
    Target, TargetGroup,
};
use crate::targets::generation::under_root;
use std::collections::BTreeMap;
use std::path::{Component, Path};

const APPLICATION_DEPENDENCY_PREFIXES: &[(&str, &str)] = &[
    ("org.springframework.boot", "spring-boot-starter"),
    ("io.quarkus", "quarkus-"),
];

/// Project directory relative to the workspace root, `/`-separated, `.` for
/// the root itself.
///
/// Relative basedirs are taken as relative to the workspace root already.
pub fn relative_root(workspace_root: &Path, project: &Project) -> Result<String, ProjectError> {
    let outside = || ProjectError::OutsideWorkspace {
        project: project.key.to_string(),
        path: project.basedir.clone(),
    };

    let relative = if project.basedir.is_absolute() {
        project
            .basedir
            .strip_prefix(workspace_root)
            .map_err(|_| outside())?
    } else {
        project.basedir.as_path()
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }

    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}

pub fn project_type(project: &Project) -> ProjectType {
    match project.packaging.as_str() {
        "war" | "ear" => ProjectType::Application,
        "jar" if looks_like_application(project) => ProjectType::Application,
        _ => ProjectType::Library,
    }
}

fn looks_like_application(project: &Project) -> bool {
    let framework = project.dependencies.iter().any(|dependency| {
        APPLICATION_DEPENDENCY_PREFIXES
            .iter()
            .any(|(group, prefix)| {
                dependency.group_id == *group && dependency.artifact_id.starts_with(prefix)
            })
    });
    let artifact = &project.key.artifact_id;
    framework || artifact.contains("app") || artifact.contains("main")
}

pub fn build_node(
    project: &Project,
    root: &str,
    targets: BTreeMap<String, Target>,
    target_groups: BTreeMap<String, TargetGroup>,
    technologies: &[String],
) -> NodeRecord {
    let configuration = ProjectConfiguration {
        name: project.name(),
        root: root.to_string(),
        source_root: under_root(root, "src/main/java"),
        project_type: project_type(project),
        targets,
        metadata: ProjectMetadata {
            target_groups,
            technologies: technologies.to_vec(),
            maven: MavenCoordinates {
                group_id: project.key.group_id.clone(),
                artifact_id: project.key.artifact_id.clone(),
                version: project.version.clone(),
                packaging: project.packaging.clone(),
            },
        },
    };
    NodeRecord::new(under_root(root, POM_XML), root.to_string(), configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_relative_root_forms() {
        let root = Path::new("/ws");
        let nested = Project::new("g", "core").with_basedir("/ws/modules/core");
        let top = Project::new("g", "parent").with_basedir("/ws");
        let relative = Project::new("g", "api");

        assert_eq!(relative_root(root, &nested).unwrap(), "modules/core");
        assert_eq!(relative_root(root, &top).unwrap(), ".");
        assert_eq!(relative_root(root, &relative).unwrap(), "api");
    }

    #[test]
    fn test_outside_workspace_is_an_error() {
        let root = Path::new("/ws");
        let escaped = Project::new("g", "x").with_basedir("/elsewhere/x");
        let dotted = Project::new("g", "y").with_basedir("../y");

        assert!(matches!(
            relative_root(root, &escaped),
            Err(ProjectError::OutsideWorkspace { .. })
        ));
        assert!(relative_root(root, &dotted).is_err());
    }

    #[test_case("pom", "lib" => ProjectType::Library ; "aggregator")]
    #[test_case("war", "web" => ProjectType::Application ; "war")]
    #[test_case("jar", "my-app" => ProjectType::Application ; "app name")]
    #[test_case("jar", "util" => ProjectType::Library ; "plain jar")]
    #[test_case("maven-plugin", "tooling" => ProjectType::Library ; "other packaging")]
    fn test_project_type(packaging: &str, artifact: &str) -> ProjectType {
        project_type(&Project::new("g", artifact).with_packaging(packaging))
    }

    #[test]
    fn test_framework_dependency_makes_application() {
        let project = Project::new("g", "svc")
            .with_dependency("org.springframework.boot", "spring-boot-starter-web");
        assert_eq!(project_type(&project), ProjectType::Application);
    }

    #[test]
    fn test_root_project_node_paths() {
        let node = build_node(
            &Project::new("g", "parent").with_packaging("pom"),
            ".",
            BTreeMap::new(),
            BTreeMap::new(),
            &["maven".to_string()],
        );

        assert_eq!(node.config_file(), "pom.xml");
        assert_eq!(node.projects()["."].source_root, "src/main/java");
        assert_eq!(node.projects()["."].name, "g.parent");
    }
}
