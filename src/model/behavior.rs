//! Derived value objects: goal behavior and phase semantics

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a goal does to the project, as far as target inputs are concerned
///
/// Combining partial analyses with [`GoalBehavior::merge`] is associative and
/// commutative: flags are ORed and path hints are unioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalBehavior {
    pub processes_sources: bool,
    pub test_related: bool,
    pub needs_resources: bool,
    pub input_patterns: BTreeSet<String>,
    pub output_patterns: BTreeSet<String>,
}

impl GoalBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources() -> Self {
        Self {
            processes_sources: true,
            ..Self::default()
        }
    }

    pub fn merge(&self, other: &GoalBehavior) -> GoalBehavior {
        GoalBehavior {
            processes_sources: self.processes_sources || other.processes_sources,
            test_related: self.test_related || other.test_related,
            needs_resources: self.needs_resources || other.needs_resources,
            input_patterns: self
                .input_patterns
                .union(&other.input_patterns)
                .cloned()
                .collect(),
            output_patterns: self
                .output_patterns
                .union(&other.output_patterns)
                .cloned()
                .collect(),
        }
    }

    /// True when no flag is set and no path hint is known
    pub fn is_empty(&self) -> bool {
        !self.processes_sources
            && !self.test_related
            && !self.needs_resources
            && self.input_patterns.is_empty()
            && self.output_patterns.is_empty()
    }
}

/// Semantic category of a lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseCategory {
    SourceProcessing,
    Compilation,
    TestRelated,
    ResourceProcessing,
    Generation,
    Processing,
    Packaging,
    Verification,
    Installation,
    Deployment,
    Validation,
    Integration,
    EarlyPhase,
    MiddlePhase,
    LatePhase,
    Cleanup,
    Documentation,
    Build,
}

/// Semantics of a phase; depends on the phase name only, never on a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseAnalysis {
    pub phase: String,
    pub lifecycle: Option<String>,
    /// Index within the owning lifecycle, `None` for unknown phases
    pub position: Option<usize>,
    pub categories: BTreeSet<PhaseCategory>,
}

impl PhaseAnalysis {
    pub fn unknown(phase: &str) -> Self {
        Self {
            phase: phase.to_string(),
            lifecycle: None,
            position: None,
            categories: BTreeSet::new(),
        }
    }

    pub fn has(&self, category: PhaseCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Position as a signed index, `-1` when the phase is unknown
    pub fn position_index(&self) -> i64 {
        self.position.map(|p| p as i64).unwrap_or(-1)
    }
}
