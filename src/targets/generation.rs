//! Target generation: one target per discovered goal and per standard phase

use super::naming::{
    goal_description, goal_target_name, normalize_plugin_name, phase_description,
};
use crate::analysis::{ExecutionPlanAnalysisService, GoalAnalysisService};
use crate::core::config::{HasAnalysisConfig, HasTargetConfig, TargetConfig};
use crate::core::errors::ProjectError;
use crate::model::{
    GoalBehavior, PluginKey, Project, Target, TargetKind, TargetMetadata, TargetOptions,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Goals added for well-known plugins even when no execution declares them
fn common_goals(artifact_id: &str) -> &'static [&'static str] {
    if artifact_id.contains("compiler") {
        &["compile", "testCompile"]
    } else if artifact_id.contains("surefire") {
        &["test"]
    } else if artifact_id.contains("quarkus") {
        &["dev", "build"]
    } else if artifact_id.contains("spring-boot") {
        &["run", "repackage"]
    } else {
        &[]
    }
}

/// Fixed outputs of a lifecycle phase, relative to the project root
fn phase_outputs(phase: &str) -> &'static [&'static str] {
    match phase {
        "compile" => &["target/classes/**/*"],
        "test" => &["target/surefire-reports/**/*", "target/test-classes/**/*"],
        "package" | "verify" | "install" | "deploy" => &["target/*.jar", "target/*.war"],
        "site" => &["target/site/**/*"],
        _ => &[],
    }
}

/// `path` placed under the project root; absolute paths and the workspace
/// root (`.`) leave it untouched
pub fn under_root(root: &str, path: &str) -> String {
    if path.starts_with('/') || root == "." || root.is_empty() {
        path.to_string()
    } else {
        format!("{root}/{path}")
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

struct GoalRef<'a> {
    plugin: &'a PluginKey,
    goal: &'a str,
    phase: Option<String>,
    execution_id: Option<&'a str>,
}

pub struct TargetGenerationService {
    goals: Arc<GoalAnalysisService>,
    plans: Arc<ExecutionPlanAnalysisService>,
    targets: TargetConfig,
    standard_phases: Vec<String>,
    include_common_goals: bool,
}

impl TargetGenerationService {
    pub fn new<C>(
        goals: Arc<GoalAnalysisService>,
        plans: Arc<ExecutionPlanAnalysisService>,
        config: &C,
    ) -> Self
    where
        C: HasAnalysisConfig + HasTargetConfig,
    {
        Self {
            goals,
            plans,
            targets: config.target_config().clone(),
            standard_phases: config.analysis_config().standard_phases.clone(),
            include_common_goals: config.analysis_config().include_common_goals,
        }
    }

    /// Targets of `project`, keyed by target name, with empty `dependsOn`.
    ///
    /// `project_root` is the project directory relative to the workspace root.
    pub fn generate_targets(
        &self,
        project: &Project,
        project_root: &str,
    ) -> Result<BTreeMap<String, Target>, ProjectError> {
        let mut targets = BTreeMap::new();

        for phase in &self.standard_phases {
            if !self.plans.lifecycles().contains(phase) {
                return Err(ProjectError::TargetGeneration {
                    project: project.key.to_string(),
                    reason: format!("standard phase '{phase}' is not part of any lifecycle"),
                });
            }
            targets.insert(phase.clone(), self.phase_target(phase, project_root));
        }

        let analysis = self.plans.get_analysis(project);
        for binding in analysis.bindings() {
            self.insert_goal_target(
                &mut targets,
                project,
                project_root,
                GoalRef {
                    plugin: &binding.plugin,
                    goal: &binding.goal,
                    phase: Some(binding.phase.clone()),
                    execution_id: Some(&binding.execution_id),
                },
            );
        }

        for (plugin, execution, goal) in project.declared_goals() {
            let phase = execution.phase.clone().or_else(|| {
                analysis
                    .phase_for_goal(&goal_target_name(&plugin.key.artifact_id, goal))
                    .map(str::to_string)
            });
            self.insert_goal_target(
                &mut targets,
                project,
                project_root,
                GoalRef {
                    plugin: &plugin.key,
                    goal,
                    phase,
                    execution_id: Some(&execution.id),
                },
            );
        }

        if self.include_common_goals {
            for plugin in &project.plugins {
                for goal in common_goals(&plugin.key.artifact_id) {
                    let phase = analysis
                        .phase_for_goal(&goal_target_name(&plugin.key.artifact_id, goal))
                        .map(str::to_string);
                    self.insert_goal_target(
                        &mut targets,
                        project,
                        project_root,
                        GoalRef {
                            plugin: &plugin.key,
                            goal,
                            phase,
                            execution_id: None,
                        },
                    );
                }
            }
        }

        Ok(targets)
    }

    fn insert_goal_target(
        &self,
        targets: &mut BTreeMap<String, Target>,
        project: &Project,
        project_root: &str,
        goal_ref: GoalRef<'_>,
    ) {
        let name = goal_target_name(&goal_ref.plugin.artifact_id, goal_ref.goal);
        if targets.contains_key(&name) {
            return;
        }
        let target = self.goal_target(project, project_root, &goal_ref);
        targets.insert(name, target);
    }

    fn goal_target(&self, project: &Project, root: &str, goal_ref: &GoalRef<'_>) -> Target {
        let qualified = format!("{}:{}", normalize_plugin_name(&goal_ref.plugin.artifact_id), goal_ref.goal);
        let behavior = self
            .goals
            .analyze_goal(&qualified, project, goal_ref.phase.as_deref());

        Target {
            executor: self.targets.executor.clone(),
            options: TargetOptions {
                command: format!(
                    "{} {}:{}:{}",
                    self.targets.command, goal_ref.plugin.group_id, goal_ref.plugin.artifact_id, goal_ref.goal
                ),
                cwd: root.to_string(),
            },
            inputs: goal_inputs(root, &behavior),
            outputs: behavior
                .output_patterns
                .iter()
                .map(|path| under_root(root, path))
                .collect(),
            depends_on: Vec::new(),
            metadata: TargetMetadata {
                kind: TargetKind::Goal,
                description: goal_description(&goal_ref.plugin.artifact_id, goal_ref.goal),
                plugin: Some(goal_ref.plugin.to_string()),
                goal: Some(goal_ref.goal.to_string()),
                execution_id: goal_ref.execution_id.map(str::to_string),
                phase: goal_ref.phase.clone(),
                technologies: self.targets.technologies.clone(),
            },
        }
    }

    fn phase_target(&self, phase: &str, root: &str) -> Target {
        let behavior = self.goals.phase_analyzer().to_goal_behavior(phase);

        let mut inputs = vec![under_root(root, "pom.xml")];
        if behavior.processes_sources {
            inputs.push(under_root(root, "src/**/*"));
        }

        Target {
            executor: self.targets.executor.clone(),
            options: TargetOptions {
                command: format!("{} {}", self.targets.command, phase),
                cwd: root.to_string(),
            },
            inputs,
            outputs: phase_outputs(phase)
                .iter()
                .map(|path| under_root(root, path))
                .collect(),
            depends_on: Vec::new(),
            metadata: TargetMetadata {
                kind: TargetKind::Phase,
                description: phase_description(phase),
                plugin: None,
                goal: None,
                execution_id: None,
                phase: Some(phase.to_string()),
                technologies: self.targets.technologies.clone(),
            },
        }
    }
}

fn goal_inputs(root: &str, behavior: &GoalBehavior) -> Vec<String> {
    let mut inputs = vec![under_root(root, "pom.xml")];
    if behavior.processes_sources {
        push_unique(&mut inputs, under_root(root, "src/**/*"));
    }
    if behavior.needs_resources {
        push_unique(&mut inputs, under_root(root, "src/main/resources/**/*"));
    }
    for path in &behavior.input_patterns {
        push_unique(&mut inputs, under_root(root, path));
    }
    inputs
}
