//! Execution plans and goal descriptors reported by the build tool

use super::project::PluginKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One goal invocation within an execution plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MojoExecution {
    pub plugin: PluginKey,
    pub goal: String,
    pub lifecycle_phase: Option<String>,
    pub execution_id: String,
    /// Resolved configuration values for this execution
    pub configuration: BTreeMap<String, String>,
}

impl MojoExecution {
    pub fn new(plugin: PluginKey, goal: &str, phase: Option<&str>, execution_id: &str) -> Self {
        Self {
            plugin,
            goal: goal.to_string(),
            lifecycle_phase: phase.map(str::to_string),
            execution_id: execution_id.to_string(),
            configuration: BTreeMap::new(),
        }
    }
}

/// Ordered goal invocations the build tool would perform for one phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub phase: String,
    pub executions: Vec<MojoExecution>,
}

impl ExecutionPlan {
    pub fn new(phase: &str, executions: Vec<MojoExecution>) -> Self {
        Self {
            phase: phase.to_string(),
            executions,
        }
    }

    pub fn len(&self) -> usize {
        self.executions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// First execution of `goal`, matched by bare goal name
    pub fn find_goal(&self, goal: &str) -> Option<&MojoExecution> {
        self.executions.iter().find(|e| e.goal == goal)
    }
}

/// Declared parameter of a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_name: String,
    pub description: String,
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: &str, type_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}

/// Metadata describing a goal of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MojoDescriptor {
    pub goal: String,
    pub default_phase: Option<String>,
    pub description: String,
    pub parameters: Vec<ParameterDescriptor>,
}

impl MojoDescriptor {
    pub fn new(goal: &str, default_phase: Option<&str>, description: &str) -> Self {
        Self {
            goal: goal.to_string(),
            default_phase: default_phase.map(str::to_string),
            description: description.to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}
