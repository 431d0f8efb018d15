//! Target naming and fixed descriptions

/// Strip `-maven-plugin`, then `-plugin`, from a plugin artifactId
///
/// `maven-compiler-plugin` becomes `maven-compiler`, `quarkus-maven-plugin`
/// becomes `quarkus`.
pub fn normalize_plugin_name(artifact_id: &str) -> String {
    artifact_id
        .replace("-maven-plugin", "")
        .replace("-plugin", "")
}

/// `<normalized plugin>:<goal>`
pub fn goal_target_name(artifact_id: &str, goal: &str) -> String {
    format!("{}:{}", normalize_plugin_name(artifact_id), goal)
}

/// Text after the last `:`; the whole name when there is none
pub fn extract_goal_from_target_name(target_name: &str) -> &str {
    target_name
        .rsplit_once(':')
        .map(|(_, goal)| goal)
        .unwrap_or(target_name)
}

/// Split a possibly prefixed goal (`compiler:compile`) into prefix and goal
pub fn split_goal(goal: &str) -> (Option<&str>, &str) {
    match goal.rsplit_once(':') {
        Some((prefix, name)) if !prefix.is_empty() => (Some(prefix), name),
        Some((_, name)) => (None, name),
        None => (None, goal),
    }
}

pub fn goal_description(artifact_id: &str, goal: &str) -> String {
    let fixed = match goal {
        "compile" => "Compile main sources",
        "testCompile" => "Compile test sources",
        "test" => "Run tests",
        "integration-test" => "Run integration tests",
        "dev" => "Start development mode",
        "run" => "Run application",
        "build" => "Build application",
        "jar" => "Create JAR",
        "war" => "Create WAR",
        "site" => "Generate site documentation",
        "javadoc" => "Generate Javadoc",
        "enforce" => "Enforce build rules",
        "create" => "Create build metadata",
        _ => return format!("{} {}", normalize_plugin_name(artifact_id), goal),
    };
    fixed.to_string()
}

pub fn phase_description(phase: &str) -> String {
    format!("Maven lifecycle phase: {phase}")
}

/// Description of the group collecting a phase's targets
pub fn group_description(phase: &str) -> String {
    match phase {
        "clean" => "Clean up artifacts created by build".to_string(),
        "validate" => "Validate project structure and configuration".to_string(),
        "compile" => "Compile source code".to_string(),
        "test" => "Run unit tests".to_string(),
        "package" => "Package compiled code".to_string(),
        "verify" => "Verify package integrity".to_string(),
        "install" => "Install package to local repository".to_string(),
        "deploy" => "Deploy package to remote repository".to_string(),
        "site" => "Generate project documentation".to_string(),
        other => format!("Targets bound to the {other} phase"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plugin_name() {
        assert_eq!(normalize_plugin_name("maven-compiler-plugin"), "maven-compiler");
        assert_eq!(normalize_plugin_name("quarkus-maven-plugin"), "quarkus");
        assert_eq!(normalize_plugin_name("spring-boot-maven-plugin"), "spring-boot");
        assert_eq!(normalize_plugin_name("frontend"), "frontend");
    }

    #[test]
    fn test_target_names() {
        assert_eq!(goal_target_name("maven-surefire-plugin", "test"), "maven-surefire:test");
        assert_eq!(extract_goal_from_target_name("maven-surefire:test"), "test");
        assert_eq!(extract_goal_from_target_name("compile"), "compile");
        assert_eq!(split_goal("quarkus:dev"), (Some("quarkus"), "dev"));
        assert_eq!(split_goal("dev"), (None, "dev"));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(goal_description("maven-compiler-plugin", "testCompile"), "Compile test sources");
        assert_eq!(goal_description("exec-maven-plugin", "java"), "exec java");
        assert_eq!(phase_description("test"), "Maven lifecycle phase: test");
        assert_eq!(group_description("site"), "Generate project documentation");
    }
}
