//! Per-project phase/goal mapping materialized from execution plans
//!
//! Plans are requested from the build tool for the essential phases only and
//! merged into one [`ProjectExecutionAnalysis`] per project signature. Projects
//! with the same packaging, plugin set and declared executions share a single
//! analysis object; the goal-to-phase mapping does not depend on anything else.
//!
//! Plans are also cached individually under `signature|phase:<phase>`.

use crate::build_tool::BuildTool;
use crate::core::cache::{AnalysisCache, CacheStats};
use crate::core::config::{HasAnalysisConfig, HasPerformanceConfig};
use crate::core::errors::BuildToolError;
use crate::model::{ExecutionPlan, LifecycleRegistry, PluginKey, Project};
use crate::targets::naming::{extract_goal_from_target_name, goal_target_name};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace, warn};

type PlanOutcome = Result<ExecutionPlan, BuildToolError>;

/// A goal discovered in a plan, with the binding it was first seen under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalBinding {
    pub target_name: String,
    pub plugin: PluginKey,
    pub goal: String,
    pub phase: String,
    pub execution_id: String,
}

/// Phase/goal mapping shared by every project with the same signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectExecutionAnalysis {
    pub signature: String,
    /// Goal target names per bound phase, in plan order
    phase_goals: HashMap<String, Vec<String>>,
    goal_phases: HashMap<String, String>,
    bindings: Vec<GoalBinding>,
    /// Essential phases whose plan could not be materialized
    failed_phases: BTreeSet<String>,
}

impl ProjectExecutionAnalysis {
    fn new(signature: &str) -> Self {
        Self {
            signature: signature.to_string(),
            phase_goals: HashMap::new(),
            goal_phases: HashMap::new(),
            bindings: Vec::new(),
            failed_phases: BTreeSet::new(),
        }
    }

    fn record_plan(&mut self, plan: &ExecutionPlan) {
        for execution in &plan.executions {
            let Some(phase) = execution.lifecycle_phase.as_deref() else {
                continue;
            };
            let target = goal_target_name(&execution.plugin.artifact_id, &execution.goal);

            let goals = self.phase_goals.entry(phase.to_string()).or_default();
            if !goals.contains(&target) {
                goals.push(target.clone());
            }
            if self.goal_phases.contains_key(&target) {
                continue;
            }
            self.goal_phases.insert(target.clone(), phase.to_string());
            self.bindings.push(GoalBinding {
                target_name: target,
                plugin: execution.plugin.clone(),
                goal: execution.goal.clone(),
                phase: phase.to_string(),
                execution_id: execution.execution_id.clone(),
            });
        }
    }

    /// Phase `goal` is bound to; `goal` may be a target name or a bare goal
    pub fn phase_for_goal(&self, goal: &str) -> Option<&str> {
        if let Some(phase) = self.goal_phases.get(goal) {
            return Some(phase);
        }
        let mut candidates: Vec<(&String, &String)> = self
            .goal_phases
            .iter()
            .filter(|(target, _)| extract_goal_from_target_name(target) == goal)
            .collect();
        candidates.sort();
        candidates.first().map(|(_, phase)| phase.as_str())
    }

    pub fn goals_for_phase(&self, phase: &str) -> &[String] {
        self.phase_goals
            .get(phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bound_phases(&self) -> impl Iterator<Item = &str> {
        self.phase_goals.keys().map(String::as_str)
    }

    pub fn goal_count(&self) -> usize {
        self.goal_phases.len()
    }

    /// Every discovered goal in discovery order
    pub fn bindings(&self) -> &[GoalBinding] {
        &self.bindings
    }

    pub fn failed_phases(&self) -> &BTreeSet<String> {
        &self.failed_phases
    }

    /// False when any essential phase failed to materialize
    pub fn is_complete(&self) -> bool {
        self.failed_phases.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlanCacheStats {
    pub analyses: CacheStats,
    pub plans: CacheStats,
    /// Lookups answered from the analysis cache, including ones shared by signature
    pub shared_lookups: usize,
}

pub struct ExecutionPlanAnalysisService {
    tool: Arc<dyn BuildTool>,
    essential_phases: Vec<String>,
    share_by_signature: bool,
    plan_fanout: bool,
    verbose: bool,
    analyses: AnalysisCache<String, ProjectExecutionAnalysis>,
    plans: AnalysisCache<String, PlanOutcome>,
}

impl ExecutionPlanAnalysisService {
    pub fn new<C>(tool: Arc<dyn BuildTool>, config: &C) -> Self
    where
        C: HasAnalysisConfig + HasPerformanceConfig,
    {
        let analysis = config.analysis_config();
        Self {
            tool,
            essential_phases: analysis.essential_phases.clone(),
            share_by_signature: analysis.share_analysis_by_signature,
            plan_fanout: config.performance_config().plan_fanout,
            verbose: analysis.verbose,
            analyses: AnalysisCache::new("execution-analysis"),
            plans: AnalysisCache::new("execution-plan"),
        }
    }

    pub fn lifecycles(&self) -> &LifecycleRegistry {
        self.tool.lifecycles()
    }

    /// Fingerprint deciding which projects share an analysis
    pub fn signature(&self, project: &Project) -> String {
        if !self.share_by_signature {
            return format!("project:{}", project.key);
        }

        let mut plugins: Vec<String> = project
            .plugins
            .iter()
            .map(|plugin| {
                let mut executions: Vec<String> = plugin
                    .executions
                    .iter()
                    .map(|e| {
                        format!(
                            "{}@{}[{}]",
                            e.id,
                            e.phase.as_deref().unwrap_or("-"),
                            e.goals.join(",")
                        )
                    })
                    .collect();
                executions.sort();
                format!("{}{{{}}}", plugin.key, executions.join(";"))
            })
            .collect();
        plugins.sort();

        let mut hasher = Sha256::new();
        hasher.update(project.packaging.as_bytes());
        for plugin in &plugins {
            hasher.update(b"\n");
            hasher.update(plugin.as_bytes());
        }
        format!("{}:{:x}", project.packaging, hasher.finalize())
    }

    /// Cached analysis for `project`, computed at most once per signature
    pub fn get_analysis(&self, project: &Project) -> Arc<ProjectExecutionAnalysis> {
        let signature = self.signature(project);
        self.analyses
            .get_or_compute(&signature, || self.analyze_project(project, &signature))
    }

    pub fn find_phase_for_goal(&self, project: &Project, goal: &str) -> Option<String> {
        self.get_analysis(project)
            .phase_for_goal(goal)
            .map(str::to_string)
    }

    pub fn get_goals_for_phase(&self, project: &Project, phase: &str) -> Vec<String> {
        self.get_analysis(project).goals_for_phase(phase).to_vec()
    }

    /// Goals of every phase up to and including `target_phase`, in lifecycle order
    pub fn get_goals_completed_by_phase(&self, project: &Project, target_phase: &str) -> Vec<String> {
        let Some(lifecycle) = self.lifecycles().lifecycle_for_phase(target_phase) else {
            return Vec::new();
        };
        let Some(phases) = lifecycle.phases_through(target_phase) else {
            return Vec::new();
        };

        let analysis = self.get_analysis(project);
        let mut completed: Vec<String> = Vec::new();
        for phase in phases {
            for goal in analysis.goals_for_phase(phase) {
                if !completed.contains(goal) {
                    completed.push(goal.clone());
                }
            }
        }
        completed
    }

    pub fn get_all_lifecycle_phases(&self) -> Vec<String> {
        self.lifecycles().all_phases()
    }

    pub fn get_phases_for_lifecycle(&self, lifecycle_id: &str) -> Vec<String> {
        self.lifecycles().phases_for_lifecycle(lifecycle_id)
    }

    pub fn cache_stats(&self) -> ExecutionPlanCacheStats {
        let analyses = self.analyses.stats();
        ExecutionPlanCacheStats {
            shared_lookups: analyses.hits,
            analyses,
            plans: self.plans.stats(),
        }
    }

    /// Drop analyses but keep materialized plans
    pub fn clear_analyses(&self) {
        self.analyses.clear();
    }

    pub fn clear_cache(&self) {
        self.analyses.clear();
        self.plans.clear();
    }

    fn analyze_project(&self, project: &Project, signature: &str) -> ProjectExecutionAnalysis {
        debug!(
            "Materializing {} essential phases for {} (signature {})",
            self.essential_phases.len(),
            project.key,
            signature
        );

        let outcomes = if self.plan_fanout && self.essential_phases.len() > 1 {
            self.materialize_concurrently(project, signature)
        } else {
            self.essential_phases
                .iter()
                .map(|phase| self.plan(project, signature, phase))
                .collect()
        };

        let mut analysis = ProjectExecutionAnalysis::new(signature);
        for (phase, outcome) in self.essential_phases.iter().zip(outcomes) {
            match &*outcome {
                Ok(plan) => analysis.record_plan(plan),
                Err(e) => {
                    if self.verbose {
                        warn!("{}: no execution plan for phase {}: {}", project.key, phase, e);
                    } else {
                        debug!("{}: no execution plan for phase {}: {}", project.key, phase, e);
                    }
                    analysis.failed_phases.insert(phase.clone());
                }
            }
        }

        trace!(
            "{}: {} goals across {} phases",
            project.key,
            analysis.goal_count(),
            analysis.phase_goals.len()
        );
        analysis
    }

    /// One scoped thread per essential phase, joined before returning.
    ///
    /// Runs inside a cache initializer, so it must not block on rayon jobs:
    /// a stolen job could wait on the cell being initialized.
    fn materialize_concurrently(&self, project: &Project, signature: &str) -> Vec<Arc<PlanOutcome>> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .essential_phases
                .iter()
                .map(|phase| (phase, scope.spawn(move || self.plan(project, signature, phase))))
                .collect();

            handles
                .into_iter()
                .map(|(phase, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        Arc::new(Err(BuildToolError::PlanFailed {
                            project: project.key.to_string(),
                            phase: phase.clone(),
                            reason: "plan materialization panicked".to_string(),
                        }))
                    })
                })
                .collect()
        })
    }

    fn plan(&self, project: &Project, signature: &str, phase: &str) -> Arc<PlanOutcome> {
        let key = format!("{signature}|phase:{phase}");
        self.plans
            .get_or_compute(&key, || self.tool.calculate_execution_plan(project, phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tool::MavenModelTool;
    use crate::core::config::AnalyzerConfig;
    use crate::model::{ExecutionDecl, MojoDescriptor, PluginDecl, PluginKey};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(config: &AnalyzerConfig) -> ExecutionPlanAnalysisService {
        ExecutionPlanAnalysisService::new(Arc::new(MavenModelTool::new()), config)
    }

    fn jar(artifact: &str) -> Project {
        Project::new("com.acme", artifact)
    }

    /// Counts plan calls and fails the `site` phase
    struct CountingTool {
        inner: MavenModelTool,
        calls: AtomicUsize,
    }

    impl BuildTool for CountingTool {
        fn lifecycles(&self) -> &LifecycleRegistry {
            self.inner.lifecycles()
        }

        fn calculate_execution_plan(&self, project: &Project, phase: &str) -> PlanOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if phase == "site" {
                return Err(BuildToolError::PlanFailed {
                    project: project.key.to_string(),
                    phase: phase.to_string(),
                    reason: "site plugin unavailable".to_string(),
                });
            }
            self.inner.calculate_execution_plan(project, phase)
        }

        fn describe_goal(
            &self,
            project: &Project,
            plugin: &PluginKey,
            goal: &str,
        ) -> Result<Option<MojoDescriptor>, BuildToolError> {
            self.inner.describe_goal(project, plugin, goal)
        }
    }

    #[test]
    fn test_goal_and_phase_lookups() {
        let service = service(&AnalyzerConfig::testing());
        let project = jar("core");

        assert_eq!(
            service.find_phase_for_goal(&project, "maven-compiler:compile").as_deref(),
            Some("compile")
        );
        assert_eq!(service.find_phase_for_goal(&project, "testCompile").as_deref(), Some("test-compile"));
        assert_eq!(service.find_phase_for_goal(&project, "frobnicate"), None);

        assert_eq!(service.get_goals_for_phase(&project, "test"), vec!["maven-surefire:test"]);
        assert_eq!(service.get_goals_for_phase(&project, "clean"), vec!["maven-clean:clean"]);
    }

    #[test]
    fn test_goals_completed_by_phase_respects_lifecycle_order() {
        let service = service(&AnalyzerConfig::testing());
        let project = jar("core");

        let completed = service.get_goals_completed_by_phase(&project, "test");
        assert_eq!(
            completed,
            vec![
                "maven-resources:resources",
                "maven-compiler:compile",
                "maven-resources:testResources",
                "maven-compiler:testCompile",
                "maven-surefire:test",
            ]
        );

        for goal in service.get_goals_for_phase(&project, "test") {
            assert!(completed.contains(&goal));
        }
        assert!(!completed.contains(&"maven-jar:jar".to_string()));
        assert!(!completed.contains(&"maven-clean:clean".to_string()));
        assert!(service.get_goals_completed_by_phase(&project, "frobnicate").is_empty());
    }

    #[test]
    fn test_same_signature_shares_one_analysis() {
        let service = service(&AnalyzerConfig::testing());
        let a = jar("a");
        let b = jar("b");
        let c = jar("c").with_packaging("war");

        let first = service.get_analysis(&a);
        let second = service.get_analysis(&b);
        let third = service.get_analysis(&c);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &third));
        assert_ne!(first.signature, third.signature);

        let stats = service.cache_stats();
        assert_eq!(stats.analyses.entries, 2);
        assert_eq!(stats.shared_lookups, 1);
    }

    #[test]
    fn test_declared_executions_widen_signature() {
        let service = service(&AnalyzerConfig::testing());
        let plain = jar("a").with_plugin(PluginDecl::new(PluginKey::maven("maven-failsafe-plugin")));
        let bound = jar("b").with_plugin(
            PluginDecl::new(PluginKey::maven("maven-failsafe-plugin"))
                .with_execution(ExecutionDecl::new("it", None, &["integration-test", "verify"])),
        );

        assert_ne!(service.signature(&plain), service.signature(&bound));
        assert_eq!(
            service.find_phase_for_goal(&bound, "maven-failsafe:integration-test").as_deref(),
            Some("integration-test")
        );
        assert_eq!(service.find_phase_for_goal(&plain, "maven-failsafe:integration-test"), None);
    }

    #[test]
    fn test_sharing_disabled_uses_project_identity() {
        let mut config = AnalyzerConfig::testing();
        config.analysis.share_analysis_by_signature = false;
        let service = service(&config);

        let first = service.get_analysis(&jar("a"));
        let second = service.get_analysis(&jar("b"));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first.phase_goals.get("compile").unwrap(), *second.phase_goals.get("compile").unwrap());
    }

    #[test]
    fn test_failed_phase_is_recorded_and_cached_once() {
        let tool = Arc::new(CountingTool {
            inner: MavenModelTool::new(),
            calls: AtomicUsize::new(0),
        });
        let service = ExecutionPlanAnalysisService::new(tool.clone(), &AnalyzerConfig::default());

        let analysis = service.get_analysis(&jar("a"));
        assert!(!analysis.is_complete());
        assert!(analysis.failed_phases().contains("site"));
        assert!(analysis.goals_for_phase("site").is_empty());
        assert_eq!(analysis.goals_for_phase("compile"), ["maven-compiler:compile"]);

        let calls = tool.calls.load(Ordering::SeqCst);
        assert_eq!(calls, 9);
        service.get_analysis(&jar("b"));
        assert_eq!(tool.calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn test_plans_survive_clearing_analyses() {
        let tool = Arc::new(CountingTool {
            inner: MavenModelTool::new(),
            calls: AtomicUsize::new(0),
        });
        let service = ExecutionPlanAnalysisService::new(tool.clone(), &AnalyzerConfig::testing());

        service.get_analysis(&jar("a"));
        service.clear_analyses();
        service.get_analysis(&jar("a"));
        assert_eq!(tool.calls.load(Ordering::SeqCst), 9);

        service.clear_cache();
        service.get_analysis(&jar("a"));
        assert_eq!(tool.calls.load(Ordering::SeqCst), 18);
    }

    #[test]
    fn test_lifecycle_accessors() {
        let service = service(&AnalyzerConfig::testing());
        assert_eq!(service.get_all_lifecycle_phases().len(), 30);
        assert_eq!(service.get_phases_for_lifecycle("clean"), vec!["pre-clean", "clean", "post-clean"]);
    }
}
