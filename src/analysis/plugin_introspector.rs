//! Goal introspection against the build tool
//!
//! Locates where a goal is bound in a project, then reads the goal's declared
//! parameters to infer what it touches. Two independent signals feed the
//! resulting [`GoalBehavior`]: parameter names and descriptions, and the
//! family of the owning plugin. They are ORed together. When no binding can
//! be found the goal is classified from its literal name only.

use crate::build_tool::BuildTool;
use crate::core::cache::{AnalysisCache, CacheStats};
use crate::core::constants::STANDARD_PHASES;
use crate::core::errors::BuildToolError;
use crate::model::{
    ExecutionPlan, GoalBehavior, MojoDescriptor, MojoExecution, ParameterDescriptor, PluginKey,
    Project, ProjectKey,
};
use crate::targets::naming::{normalize_plugin_name, split_goal};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

const FILE_TYPES: &[&str] = &["java.io.File", "java.nio.file.Path", "File", "Path"];
const PATH_TOKENS: &[&str] = &[
    "dir",
    "file",
    "path",
    "output",
    "input",
    "source",
    "target",
    "destination",
];
/// Nouns suggesting production, then verb stems (generate, create, write, produce)
const OUTPUT_TOKENS: &[&str] = &[
    "output",
    "target",
    "destination",
    "generated",
    "build",
    "generat",
    "creat",
    "writ",
    "produc",
];

/// Maven expressions a parameter default may start with
const EXPRESSIONS: &[(&str, &str)] = &[
    ("${project.build.outputDirectory}", "target/classes"),
    ("${project.build.testOutputDirectory}", "target/test-classes"),
    ("${project.reporting.outputDirectory}", "target/site"),
    ("${project.build.directory}", "target"),
    ("${project.basedir}/", ""),
    ("${basedir}/", ""),
];

/// Where an introspection result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntrospectionSource {
    /// Found in a materialized execution plan
    ExecutionPlan,
    /// Declared plugin that provides the goal without binding it to a phase
    DeclaredPlugin,
    /// Classified from the goal name alone
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalIntrospectionResult {
    pub goal: String,
    pub plugin: Option<PluginKey>,
    pub phase: Option<String>,
    pub execution_id: Option<String>,
    pub source: IntrospectionSource,
    /// Names of the parameters classified as file or directory related
    pub file_parameters: Vec<String>,
    pub behavior: GoalBehavior,
}

impl GoalIntrospectionResult {
    fn fallback(goal: &str) -> Self {
        Self {
            goal: goal.to_string(),
            plugin: None,
            phase: None,
            execution_id: None,
            source: IntrospectionSource::Fallback,
            file_parameters: Vec::new(),
            behavior: literal_goal_behavior(goal),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == IntrospectionSource::Fallback
    }
}

pub struct PluginIntrospector {
    tool: Arc<dyn BuildTool>,
    verbose: bool,
    cache: AnalysisCache<(ProjectKey, String), GoalIntrospectionResult>,
    /// Per-project plans; unlike signature-shared analyses these keep each
    /// project's own configuration values
    plans: AnalysisCache<(ProjectKey, &'static str), Result<ExecutionPlan, BuildToolError>>,
}

impl PluginIntrospector {
    pub fn new(tool: Arc<dyn BuildTool>, verbose: bool) -> Self {
        Self {
            tool,
            verbose,
            cache: AnalysisCache::new("goal-introspection"),
            plans: AnalysisCache::new("introspection-plans"),
        }
    }

    /// Introspect `goal` (bare, or prefixed with a plugin name) within `project`
    pub fn analyze_goal(&self, goal: &str, project: &Project) -> Arc<GoalIntrospectionResult> {
        let key = (project.key.clone(), goal.to_string());
        self.cache
            .get_or_compute(&key, || self.introspect(goal, project))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        self.plans.clear();
    }

    fn introspect(&self, goal: &str, project: &Project) -> GoalIntrospectionResult {
        let (prefix, goal_name) = split_goal(goal);

        if let Some(execution) = self.locate_binding(prefix, goal_name, project) {
            let descriptor = self.describe(project, &execution.plugin, goal_name);
            return self.build_result(
                goal,
                &execution.plugin,
                execution.lifecycle_phase.clone(),
                Some(execution.execution_id.clone()),
                IntrospectionSource::ExecutionPlan,
                descriptor.as_ref(),
                &execution.configuration,
            );
        }

        // Goals such as `dev` are provided by a declared plugin but never bound.
        if let Some(prefix) = prefix {
            let declared = project
                .plugins
                .iter()
                .find(|p| p.key.artifact_id == prefix || normalize_plugin_name(&p.key.artifact_id) == prefix);
            if let Some(plugin) = declared {
                if let Some(descriptor) = self.describe(project, &plugin.key, goal_name) {
                    return self.build_result(
                        goal,
                        &plugin.key,
                        descriptor.default_phase.clone(),
                        None,
                        IntrospectionSource::DeclaredPlugin,
                        Some(&descriptor),
                        &plugin.configuration,
                    );
                }
            }
        }

        debug!("{}: no binding found for goal {}, using fallback", project.key, goal);
        GoalIntrospectionResult::fallback(goal_name)
    }

    fn locate_binding(
        &self,
        prefix: Option<&str>,
        goal_name: &str,
        project: &Project,
    ) -> Option<MojoExecution> {
        for &phase in STANDARD_PHASES {
            let plan = self
                .plans
                .get_or_compute(&(project.key.clone(), phase), || {
                    self.tool.calculate_execution_plan(project, phase)
                });
            match plan.as_ref() {
                Ok(plan) => {
                    let found = plan.executions.iter().find(|e| {
                        e.goal == goal_name
                            && prefix.map_or(true, |p| {
                                e.plugin.artifact_id == p
                                    || normalize_plugin_name(&e.plugin.artifact_id) == p
                            })
                    });
                    if let Some(execution) = found {
                        return Some(execution.clone());
                    }
                }
                Err(e) => self.report(project, &format!("plan for {phase}"), &e.to_string()),
            }
        }
        None
    }

    fn describe(&self, project: &Project, plugin: &PluginKey, goal: &str) -> Option<MojoDescriptor> {
        match self.tool.describe_goal(project, plugin, goal) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                self.report(project, &format!("descriptor of {plugin}:{goal}"), &e.to_string());
                None
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        goal: &str,
        plugin: &PluginKey,
        phase: Option<String>,
        execution_id: Option<String>,
        source: IntrospectionSource,
        descriptor: Option<&MojoDescriptor>,
        configuration: &BTreeMap<String, String>,
    ) -> GoalIntrospectionResult {
        let (_, goal_name) = split_goal(goal);
        let mut behavior = GoalBehavior::new();
        let mut file_parameters = Vec::new();

        if let Some(descriptor) = descriptor {
            for parameter in &descriptor.parameters {
                let parameter_behavior = classify_parameter(parameter, configuration);
                if is_file_parameter(parameter) {
                    file_parameters.push(parameter.name.clone());
                }
                behavior = behavior.merge(&parameter_behavior);
            }
        }

        behavior = behavior.merge(&plugin_family_behavior(&plugin.artifact_id, goal_name));

        GoalIntrospectionResult {
            goal: goal_name.to_string(),
            plugin: Some(plugin.clone()),
            phase,
            execution_id,
            source,
            file_parameters,
            behavior,
        }
    }

    fn report(&self, project: &Project, what: &str, reason: &str) {
        if self.verbose {
            warn!("{}: introspection of {} failed: {}", project.key, what, reason);
        } else {
            debug!("{}: introspection of {} failed: {}", project.key, what, reason);
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn is_file_parameter(parameter: &ParameterDescriptor) -> bool {
    let name = parameter.name.to_lowercase();
    let description = parameter.description.to_lowercase();
    FILE_TYPES.contains(&parameter.type_name.as_str())
        || contains_any(&name, PATH_TOKENS)
        || contains_any(&description, PATH_TOKENS)
}

/// Flags and path hints contributed by one declared parameter
fn classify_parameter(
    parameter: &ParameterDescriptor,
    configuration: &BTreeMap<String, String>,
) -> GoalBehavior {
    let name = parameter.name.to_lowercase();
    let description = parameter.description.to_lowercase();
    let text = format!("{name} {description}");

    let mut behavior = GoalBehavior {
        processes_sources: text.contains("source"),
        test_related: text.contains("test"),
        needs_resources: text.contains("resource"),
        ..GoalBehavior::default()
    };

    if is_file_parameter(parameter) {
        let value = configuration
            .get(&parameter.name)
            .or(parameter.default_value.as_ref())
            .and_then(|v| resolve_path_hint(v));

        if let Some(path) = value {
            if contains_any(&name, OUTPUT_TOKENS) || contains_any(&description, OUTPUT_TOKENS) {
                behavior.output_patterns.insert(path);
            } else {
                behavior.input_patterns.insert(path);
            }
        }
    }

    behavior
}

/// Turn a parameter value into a project-relative path, if it is one
fn resolve_path_hint(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut resolved = value.to_string();
    for (expression, replacement) in EXPRESSIONS {
        if let Some(rest) = resolved.strip_prefix(expression) {
            resolved = format!("{replacement}{rest}");
            break;
        }
    }

    if resolved.contains("${") || resolved.is_empty() {
        return None;
    }
    Some(resolved.trim_start_matches("./").to_string())
}

/// Known plugin families, independent of parameter metadata
fn plugin_family_behavior(artifact_id: &str, goal: &str) -> GoalBehavior {
    let mut behavior = GoalBehavior::new();
    let goal = goal.to_lowercase();

    if artifact_id.contains("compiler") {
        behavior.processes_sources = true;
        behavior.test_related |= goal.contains("test");
    }
    if artifact_id.contains("surefire") || artifact_id.contains("failsafe") {
        behavior.processes_sources = true;
        behavior.test_related = true;
    }
    if artifact_id.contains("resources") {
        behavior.needs_resources = true;
        behavior.test_related |= goal.contains("test");
    }
    if (artifact_id.contains("quarkus") || artifact_id.contains("spring-boot"))
        && matches!(goal.as_str(), "dev" | "run")
    {
        behavior.processes_sources = true;
        behavior.needs_resources = true;
    }

    behavior
}

/// Conservative classification from the goal name alone
fn literal_goal_behavior(goal: &str) -> GoalBehavior {
    let mut behavior = GoalBehavior::new();
    match goal {
        "compile" => behavior.processes_sources = true,
        "testCompile" => {
            behavior.processes_sources = true;
            behavior.test_related = true;
        }
        "test" | "integration-test" => behavior.test_related = true,
        "resources" => behavior.needs_resources = true,
        "testResources" => {
            behavior.needs_resources = true;
            behavior.test_related = true;
        }
        _ => {}
    }
    behavior
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tool::MavenModelTool;
    use crate::model::{ExecutionDecl, LifecycleRegistry, PluginDecl};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Tool that knows nothing: every plan is empty
    struct EmptyTool {
        registry: LifecycleRegistry,
        plan_calls: AtomicUsize,
    }

    impl BuildTool for EmptyTool {
        fn lifecycles(&self) -> &LifecycleRegistry {
            &self.registry
        }

        fn calculate_execution_plan(
            &self,
            _project: &Project,
            phase: &str,
        ) -> Result<ExecutionPlan, BuildToolError> {
            self.plan_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExecutionPlan::new(phase, Vec::new()))
        }

        fn describe_goal(
            &self,
            _project: &Project,
            _plugin: &PluginKey,
            _goal: &str,
        ) -> Result<Option<MojoDescriptor>, BuildToolError> {
            Ok(None)
        }
    }

    /// Tool whose every call fails
    struct BrokenTool(LifecycleRegistry);

    impl BuildTool for BrokenTool {
        fn lifecycles(&self) -> &LifecycleRegistry {
            &self.0
        }

        fn calculate_execution_plan(
            &self,
            project: &Project,
            phase: &str,
        ) -> Result<ExecutionPlan, BuildToolError> {
            Err(BuildToolError::PlanFailed {
                project: project.key.to_string(),
                phase: phase.to_string(),
                reason: "resolution failed".to_string(),
            })
        }

        fn describe_goal(
            &self,
            _project: &Project,
            plugin: &PluginKey,
            goal: &str,
        ) -> Result<Option<MojoDescriptor>, BuildToolError> {
            Err(BuildToolError::DescriptorUnavailable {
                plugin: plugin.to_string(),
                goal: goal.to_string(),
                reason: "class not found".to_string(),
            })
        }
    }

    fn maven() -> PluginIntrospector {
        PluginIntrospector::new(Arc::new(MavenModelTool::new()), false)
    }

    #[test]
    fn test_missing_binding_falls_back_on_literal_name() {
        let introspector = PluginIntrospector::new(
            Arc::new(EmptyTool {
                registry: LifecycleRegistry::maven(),
                plan_calls: AtomicUsize::new(0),
            }),
            false,
        );
        let project = Project::new("com.acme", "core");

        let result = introspector.analyze_goal("compile", &project);

        assert!(result.is_fallback());
        assert!(result.behavior.processes_sources);
        assert!(!result.behavior.test_related);
        assert!(!result.behavior.needs_resources);
        assert!(result.behavior.input_patterns.is_empty());
        assert!(result.behavior.output_patterns.is_empty());
    }

    #[test]
    fn test_unknown_goal_gets_empty_behavior() {
        let introspector = PluginIntrospector::new(Arc::new(BrokenTool(LifecycleRegistry::maven())), true);
        let result = introspector.analyze_goal("frobnicate", &Project::new("com.acme", "core"));
        assert!(result.is_fallback());
        assert!(result.behavior.is_empty());
    }

    #[test]
    fn test_surefire_binding_is_introspected() {
        let result = maven().analyze_goal("test", &Project::new("com.acme", "core"));

        assert_eq!(result.source, IntrospectionSource::ExecutionPlan);
        assert_eq!(result.phase.as_deref(), Some("test"));
        assert_eq!(result.execution_id.as_deref(), Some("default-test"));
        assert!(result.behavior.test_related);
        assert!(result.behavior.processes_sources);
        assert!(result.file_parameters.contains(&"reportsDirectory".to_string()));
        assert!(result.behavior.output_patterns.contains("target/surefire-reports"));
    }

    #[test]
    fn test_configuration_value_overrides_default() {
        let project = Project::new("com.acme", "core").with_plugin(
            PluginDecl::new(PluginKey::maven("maven-compiler-plugin"))
                .with_configuration("outputDirectory", "${project.build.directory}/custom-classes"),
        );

        let result = maven().analyze_goal("compile", &project);

        assert!(result.behavior.output_patterns.contains("target/custom-classes"));
        assert!(!result.behavior.output_patterns.contains("target/classes"));
    }

    #[test]
    fn test_declared_unbound_goal_is_described() {
        let project = Project::new("com.acme", "web")
            .with_plugin(PluginDecl::new(PluginKey::new("io.quarkus", "quarkus-maven-plugin")));

        let result = maven().analyze_goal("quarkus:dev", &project);

        assert_eq!(result.source, IntrospectionSource::DeclaredPlugin);
        assert!(result.phase.is_none());
        assert!(result.behavior.processes_sources);
        assert!(result.behavior.needs_resources);
    }

    #[test]
    fn test_prefix_must_match_plugin() {
        let project = Project::new("com.acme", "core").with_plugin(
            PluginDecl::new(PluginKey::maven("maven-failsafe-plugin"))
                .with_execution(ExecutionDecl::new("it", None, &["integration-test", "verify"])),
        );

        let failsafe = maven().analyze_goal("maven-failsafe:verify", &project);
        assert_eq!(failsafe.plugin, Some(PluginKey::maven("maven-failsafe-plugin")));
        assert!(failsafe.behavior.test_related);
    }

    #[test]
    fn test_results_cached_per_project_and_goal() {
        let tool = Arc::new(EmptyTool {
            registry: LifecycleRegistry::maven(),
            plan_calls: AtomicUsize::new(0),
        });
        let introspector = PluginIntrospector::new(tool.clone(), false);
        let project = Project::new("com.acme", "core");

        let first = introspector.analyze_goal("compile", &project);
        let calls = tool.plan_calls.load(Ordering::SeqCst);
        let second = introspector.analyze_goal("compile", &project);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(tool.plan_calls.load(Ordering::SeqCst), calls);

        introspector.analyze_goal("compile", &Project::new("com.acme", "other"));
        assert_eq!(introspector.cache_stats().entries, 2);
    }

    #[test]
    fn test_plans_materialized_once_per_project_and_phase() {
        let tool = Arc::new(EmptyTool {
            registry: LifecycleRegistry::maven(),
            plan_calls: AtomicUsize::new(0),
        });
        let introspector = PluginIntrospector::new(tool.clone(), false);
        let project = Project::new("com.acme", "core");

        for goal in ["compile", "testCompile", "maven-jar:jar", "install"] {
            introspector.analyze_goal(goal, &project);
        }
        assert_eq!(tool.plan_calls.load(Ordering::SeqCst), STANDARD_PHASES.len());

        introspector.analyze_goal("compile", &Project::new("com.acme", "other"));
        assert_eq!(tool.plan_calls.load(Ordering::SeqCst), 2 * STANDARD_PHASES.len());

        introspector.clear_cache();
        introspector.analyze_goal("compile", &project);
        assert_eq!(tool.plan_calls.load(Ordering::SeqCst), 3 * STANDARD_PHASES.len());
    }

    #[test]
    fn test_resolve_path_hint() {
        assert_eq!(resolve_path_hint("${project.build.outputDirectory}").as_deref(), Some("target/classes"));
        assert_eq!(resolve_path_hint("${basedir}/src/docs").as_deref(), Some("src/docs"));
        assert_eq!(resolve_path_hint("${settings.localRepository}"), None);
        assert_eq!(resolve_path_hint("  "), None);
    }
}
