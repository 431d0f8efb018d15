//! Targets: the executable units emitted for the task runner

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a target was derived from a goal or a lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Goal,
    Phase,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Goal => write!(f, "goal"),
            TargetKind::Phase => write!(f, "phase"),
        }
    }
}

/// An edge in a target's `dependsOn` list
///
/// Serializes as a bare target name for same-project edges and as
/// `{"target", "projects"}` for cross-project edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetDependency {
    Local(String),
    Projects { target: String, projects: Vec<String> },
}

impl TargetDependency {
    pub fn local(target: impl Into<String>) -> Self {
        TargetDependency::Local(target.into())
    }

    pub fn projects(target: impl Into<String>, projects: Vec<String>) -> Self {
        TargetDependency::Projects {
            target: target.into(),
            projects,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            TargetDependency::Local(target) => target,
            TargetDependency::Projects { target, .. } => target,
        }
    }
}

/// Command the executor runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOptions {
    pub command: String,
    pub cwd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMetadata {
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// A named, executable unit within one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub executor: String,
    pub options: TargetOptions,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<TargetDependency>,
    pub metadata: TargetMetadata,
}

impl Target {
    pub fn phase(&self) -> Option<&str> {
        self.metadata.phase.as_deref()
    }

    pub fn kind(&self) -> TargetKind {
        self.metadata.kind
    }
}

/// Targets of one project grouped under a lifecycle phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub phase: String,
    pub description: String,
    pub order: usize,
    pub targets: Vec<String>,
}

impl TargetGroup {
    pub fn new(phase: &str, description: &str, order: usize) -> Self {
        Self {
            phase: phase.to_string(),
            description: description.to_string(),
            order,
            targets: Vec::new(),
        }
    }

    pub fn add_target(&mut self, name: &str) {
        if !self.targets.iter().any(|t| t == name) {
            self.targets.push(name.to_string());
        }
    }
}
