//! Static project-to-project dependencies derived from declared dependencies

use crate::model::{DependencyEdge, Workspace};
use std::collections::{BTreeMap, HashMap};

/// Project name → names of the workspace members it depends on.
///
/// Dependencies on artifacts outside the workspace and self-references are
/// dropped. Every project has an entry, possibly empty.
pub fn project_dependency_map(workspace: &Workspace) -> BTreeMap<String, Vec<String>> {
    let members: HashMap<String, String> = workspace
        .projects
        .iter()
        .map(|p| (p.key.to_string(), p.name()))
        .collect();

    workspace
        .projects
        .iter()
        .map(|project| {
            let own = project.name();
            let mut depends_on: Vec<String> = Vec::new();
            for dependency in &project.dependencies {
                let Some(name) = members.get(&dependency.key().to_string()) else {
                    continue;
                };
                if *name != own && !depends_on.contains(name) {
                    depends_on.push(name.clone());
                }
            }
            (own, depends_on)
        })
        .collect()
}

/// Flatten the dependency map into static edges.
///
/// `source_files` maps a project name to its POM path relative to the
/// workspace root.
pub fn dependency_edges(
    dependencies: &BTreeMap<String, Vec<String>>,
    source_files: &HashMap<String, String>,
) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    for (source, targets) in dependencies {
        let source_file = source_files.get(source).cloned().unwrap_or_default();
        for target in targets {
            edges.push(DependencyEdge::new_static(
                source.clone(),
                target.clone(),
                source_file.clone(),
            ));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    fn workspace() -> Workspace {
        Workspace::new(
            "/ws",
            vec![
                Project::new("com.acme", "a"),
                Project::new("com.acme", "b")
                    .with_dependency("com.acme", "a")
                    .with_dependency("com.acme", "a")
                    .with_dependency("com.acme", "b")
                    .with_dependency("org.slf4j", "slf4j-api"),
            ],
        )
    }

    #[test]
    fn test_only_members_without_self_edges() {
        let map = project_dependency_map(&workspace());

        assert_eq!(map["com.acme.a"], Vec::<String>::new());
        assert_eq!(map["com.acme.b"], vec!["com.acme.a"]);
    }

    #[test]
    fn test_edges_carry_source_file() {
        let map = project_dependency_map(&workspace());
        let files = HashMap::from([("com.acme.b".to_string(), "b/pom.xml".to_string())]);

        let edges = dependency_edges(&map, &files);

        assert_eq!(
            edges,
            vec![DependencyEdge::new_static(
                "com.acme.b".to_string(),
                "com.acme.a".to_string(),
                "b/pom.xml".to_string()
            )]
        );
    }
}
