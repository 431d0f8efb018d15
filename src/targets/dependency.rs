//! `dependsOn` edges between targets
//!
//! Goal targets depend on the goals completed by the phase preceding their own
//! bound phase. Phase targets depend on the nearest preceding phase that has a
//! target. Both also depend on the same-named target of every project the
//! owning project depends on.

use crate::analysis::ExecutionPlanAnalysisService;
use crate::model::{Project, Target, TargetDependency, TargetKind};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct TargetDependencyService {
    plans: Arc<ExecutionPlanAnalysisService>,
}

impl TargetDependencyService {
    pub fn new(plans: Arc<ExecutionPlanAnalysisService>) -> Self {
        Self { plans }
    }

    /// Dependencies of one goal target bound to `phase`
    pub fn calculate_goal_dependencies(
        &self,
        project: &Project,
        target_name: &str,
        phase: Option<&str>,
        actual_dependencies: &[String],
        known_targets: &BTreeMap<String, Target>,
    ) -> Vec<TargetDependency> {
        let mut depends_on = Vec::new();

        let preceding = phase.and_then(|phase| self.plans.lifecycles().preceding_phase(phase));
        if let Some(preceding) = preceding {
            for goal in self.plans.get_goals_completed_by_phase(project, preceding) {
                if goal != target_name && known_targets.contains_key(&goal) {
                    depends_on.push(TargetDependency::local(goal));
                }
            }
        }

        if !actual_dependencies.is_empty() {
            depends_on.push(TargetDependency::projects(
                target_name,
                actual_dependencies.to_vec(),
            ));
        }
        depends_on
    }

    /// Dependencies of the synthetic target for `phase`
    pub fn calculate_phase_dependencies(
        &self,
        phase: &str,
        known_targets: &BTreeMap<String, Target>,
        actual_dependencies: &[String],
    ) -> Vec<TargetDependency> {
        let mut depends_on = Vec::new();

        let registry = self.plans.lifecycles();
        let mut current = registry.preceding_phase(phase);
        while let Some(candidate) = current {
            let is_phase_target = known_targets
                .get(candidate)
                .map_or(false, |t| t.kind() == TargetKind::Phase);
            if is_phase_target {
                depends_on.push(TargetDependency::local(candidate));
                break;
            }
            current = registry.preceding_phase(candidate);
        }

        if !actual_dependencies.is_empty() {
            depends_on.push(TargetDependency::projects(phase, actual_dependencies.to_vec()));
        }
        depends_on
    }

    /// Fill `dependsOn` on every target once the complete target set is known
    pub fn apply(
        &self,
        project: &Project,
        targets: &mut BTreeMap<String, Target>,
        actual_dependencies: &[String],
    ) {
        let known: &BTreeMap<String, Target> = targets;
        let computed: Vec<(String, Vec<TargetDependency>)> = known
            .iter()
            .map(|(name, target)| {
                let depends_on = match target.kind() {
                    TargetKind::Goal => self.calculate_goal_dependencies(
                        project,
                        name,
                        target.phase(),
                        actual_dependencies,
                        known,
                    ),
                    TargetKind::Phase => self.calculate_phase_dependencies(
                        target.phase().unwrap_or(name),
                        known,
                        actual_dependencies,
                    ),
                };
                (name.clone(), depends_on)
            })
            .collect();

        for (name, depends_on) in computed {
            if let Some(target) = targets.get_mut(&name) {
                target.depends_on = depends_on;
            }
        }
    }
}
