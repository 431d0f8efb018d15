//! Presentation groups: one per lifecycle phase that has targets

use super::naming::group_description;
use crate::analysis::ExecutionPlanAnalysisService;
use crate::model::{Project, Target, TargetGroup};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

pub struct TargetGroupService {
    plans: Arc<ExecutionPlanAnalysisService>,
}

impl TargetGroupService {
    pub fn new(plans: Arc<ExecutionPlanAnalysisService>) -> Self {
        Self { plans }
    }

    /// Assign every target to the group of its phase.
    ///
    /// The target's own metadata phase wins; otherwise the phase is looked up
    /// in the project's execution analysis. Targets with no resolvable phase
    /// are left out of every group.
    pub fn generate_target_groups(
        &self,
        project: &Project,
        targets: &BTreeMap<String, Target>,
    ) -> BTreeMap<String, TargetGroup> {
        let registry = self.plans.lifecycles();
        let unknown_order = registry.all_phases().len();
        let mut groups: BTreeMap<String, TargetGroup> = BTreeMap::new();

        for (name, target) in targets {
            let phase = match target.phase() {
                Some(phase) => Some(phase.to_string()),
                None => self.plans.find_phase_for_goal(project, name),
            };
            let Some(phase) = phase else {
                trace!("{}: target {} has no phase, not grouped", project.key, name);
                continue;
            };

            groups
                .entry(phase.clone())
                .or_insert_with(|| {
                    TargetGroup::new(
                        &phase,
                        &group_description(&phase),
                        registry.global_order(&phase).unwrap_or(unknown_order),
                    )
                })
                .add_target(name);
        }

        groups
    }
}
