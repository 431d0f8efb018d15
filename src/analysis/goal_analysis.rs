//! Combined goal behavior from phase semantics and plugin introspection

use super::phase_analyzer::LifecyclePhaseAnalyzer;
use super::plugin_introspector::PluginIntrospector;
use crate::model::{GoalBehavior, Project};
use std::sync::Arc;

pub struct GoalAnalysisService {
    phases: Arc<LifecyclePhaseAnalyzer>,
    introspector: Arc<PluginIntrospector>,
}

impl GoalAnalysisService {
    pub fn new(phases: Arc<LifecyclePhaseAnalyzer>, introspector: Arc<PluginIntrospector>) -> Self {
        Self {
            phases,
            introspector,
        }
    }

    /// Behavior of `goal` in `project`.
    ///
    /// `bound_phase` takes precedence over the phase introspection finds.
    pub fn analyze_goal(
        &self,
        goal: &str,
        project: &Project,
        bound_phase: Option<&str>,
    ) -> GoalBehavior {
        let introspection = self.introspector.analyze_goal(goal, project);
        let phase = bound_phase.or(introspection.phase.as_deref());

        match phase {
            Some(phase) => introspection
                .behavior
                .merge(&self.phases.to_goal_behavior(phase)),
            None => introspection.behavior.clone(),
        }
    }

    pub fn phase_analyzer(&self) -> &LifecyclePhaseAnalyzer {
        &self.phases
    }

    pub fn introspector(&self) -> &PluginIntrospector {
        &self.introspector
    }
}
