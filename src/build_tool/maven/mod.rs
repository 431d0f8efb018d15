//! Offline Maven adapter
//!
//! Materializes execution plans from the project model alone: packaging
//! default bindings, the clean and site lifecycle bindings, and explicit
//! `<execution>` declarations. Nothing is downloaded and no Maven process is
//! started.

pub mod bindings;
pub mod descriptors;

use super::BuildTool;
use crate::core::errors::BuildToolError;
use crate::model::{
    ExecutionPlan, LifecycleRegistry, MojoDescriptor, MojoExecution, PluginKey, Project,
};
use bindings::default_bindings;
use descriptors::DescriptorCatalog;
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

pub struct MavenModelTool {
    registry: LifecycleRegistry,
    catalog: &'static DescriptorCatalog,
}

impl MavenModelTool {
    pub fn new() -> Self {
        Self::with_registry(LifecycleRegistry::maven())
    }

    pub fn with_registry(registry: LifecycleRegistry) -> Self {
        Self {
            registry,
            catalog: DescriptorCatalog::standard(),
        }
    }

    fn default_execution_id(goal: &str) -> String {
        format!("default-{goal}")
    }
}

impl Default for MavenModelTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for MavenModelTool {
    fn lifecycles(&self) -> &LifecycleRegistry {
        &self.registry
    }

    fn calculate_execution_plan(
        &self,
        project: &Project,
        phase: &str,
    ) -> Result<ExecutionPlan, BuildToolError> {
        let lifecycle = self
            .registry
            .lifecycle_for_phase(phase)
            .ok_or_else(|| BuildToolError::UnknownPhase {
                phase: phase.to_string(),
            })?;
        let phases = lifecycle
            .phases_through(phase)
            .ok_or_else(|| BuildToolError::UnknownPhase {
                phase: phase.to_string(),
            })?;
        let position = |bound: &str| phases.iter().position(|p| p == bound);

        // Declared executions named `default-<goal>` replace the packaging binding.
        let overridden: HashSet<(&PluginKey, &str)> = project
            .declared_goals()
            .map(|(plugin, execution, _)| (&plugin.key, execution.id.as_str()))
            .collect();

        let mut executions: Vec<(usize, MojoExecution)> = Vec::new();

        for binding in default_bindings(&lifecycle.id, &project.packaging) {
            let Some(pos) = position(binding.phase) else {
                continue;
            };
            let key = PluginKey::new(binding.group_id, binding.artifact_id);
            let execution_id = Self::default_execution_id(binding.goal);
            if overridden.contains(&(&key, execution_id.as_str())) {
                continue;
            }

            let mut mojo =
                MojoExecution::new(key, binding.goal, Some(binding.phase), &execution_id);
            if let Some(declared) = project.plugin(&mojo.plugin) {
                mojo.configuration = declared.configuration.clone();
            }
            executions.push((pos, mojo));
        }

        for (plugin, execution, goal) in project.declared_goals() {
            let bound = execution
                .phase
                .as_deref()
                .or_else(|| self.catalog.default_phase(&plugin.key.artifact_id, goal));
            let Some(bound) = bound else {
                trace!(
                    "{}: execution {} of {} has no phase, skipping",
                    project.key,
                    execution.id,
                    plugin.key
                );
                continue;
            };
            let Some(pos) = position(bound) else {
                continue;
            };

            let mut configuration: BTreeMap<String, String> = plugin.configuration.clone();
            configuration.extend(execution.configuration.clone());

            let mut mojo =
                MojoExecution::new(plugin.key.clone(), goal, Some(bound), &execution.id);
            mojo.configuration = configuration;
            executions.push((pos, mojo));
        }

        executions.sort_by_key(|(pos, _)| *pos);

        Ok(ExecutionPlan::new(
            phase,
            executions.into_iter().map(|(_, mojo)| mojo).collect(),
        ))
    }

    fn describe_goal(
        &self,
        _project: &Project,
        plugin: &PluginKey,
        goal: &str,
    ) -> Result<Option<MojoDescriptor>, BuildToolError> {
        if !self.catalog.knows_plugin(&plugin.artifact_id) {
            return Ok(None);
        }
        self.catalog
            .lookup(&plugin.artifact_id, goal)
            .cloned()
            .map(Some)
            .ok_or_else(|| BuildToolError::DescriptorUnavailable {
                plugin: plugin.to_string(),
                goal: goal.to_string(),
                reason: "goal is not declared by the plugin".to_string(),
            })
    }
}
