//! The whole-workspace pipeline.
//!
//! A run goes through four stages:
//! 1. derive the static dependency map from declared dependencies
//! 2. process every project on the worker pool (targets, `dependsOn`, groups)
//! 3. join, then assemble node records and edges in workspace order
//! 4. summarize
//!
//! A failing project (error or panic) is logged and emitted with empty
//! targets and groups; only an empty workspace aborts the run.

use super::dependencies::{dependency_edges, project_dependency_map};
use super::nodes::{build_node, relative_root};
use super::progress::{ProgressTracker, RunSummary};
use crate::analysis::{
    ExecutionPlanAnalysisService, GoalAnalysisService, LifecyclePhaseAnalyzer, PluginIntrospector,
};
use crate::build_tool::{BuildTool, MavenModelTool};
use crate::core::config::{AnalyzerConfig, HasPerformanceConfig};
use crate::core::errors::{GraphResult, ProjectError, WorkspaceError};
use crate::model::{AnalysisDocument, NodeRecord, Project, Target, TargetGroup, Workspace};
use crate::targets::generation::under_root;
use crate::targets::{TargetDependencyService, TargetGenerationService, TargetGroupService};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub document: AnalysisDocument,
    pub summary: RunSummary,
}

struct ProjectOutput {
    targets: BTreeMap<String, Target>,
    groups: BTreeMap<String, TargetGroup>,
}

pub struct WorkspaceAnalyzer {
    config: AnalyzerConfig,
    phases: Arc<LifecyclePhaseAnalyzer>,
    introspector: Arc<PluginIntrospector>,
    plans: Arc<ExecutionPlanAnalysisService>,
    generation: TargetGenerationService,
    dependencies: TargetDependencyService,
    groups: TargetGroupService,
}

impl WorkspaceAnalyzer {
    /// Analyzer over the offline Maven model
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_tool(config, Arc::new(MavenModelTool::new()))
    }

    pub fn with_tool(config: AnalyzerConfig, tool: Arc<dyn BuildTool>) -> Self {
        let verbose = config.analysis.verbose;
        let phases = Arc::new(LifecyclePhaseAnalyzer::new(tool.lifecycles().clone()));
        let introspector = Arc::new(PluginIntrospector::new(Arc::clone(&tool), verbose));
        let goals = Arc::new(GoalAnalysisService::new(
            Arc::clone(&phases),
            Arc::clone(&introspector),
        ));
        let plans = Arc::new(ExecutionPlanAnalysisService::new(tool, &config));

        Self {
            generation: TargetGenerationService::new(goals, Arc::clone(&plans), &config),
            dependencies: TargetDependencyService::new(Arc::clone(&plans)),
            groups: TargetGroupService::new(Arc::clone(&plans)),
            config,
            phases,
            introspector,
            plans,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn plans(&self) -> &ExecutionPlanAnalysisService {
        &self.plans
    }

    pub fn phase_analyzer(&self) -> &LifecyclePhaseAnalyzer {
        &self.phases
    }

    pub fn introspector(&self) -> &PluginIntrospector {
        &self.introspector
    }

    /// Analyze every project of `workspace` and build the result document
    pub fn analyze(&self, workspace: &Workspace) -> GraphResult<AnalysisReport> {
        let started = Instant::now();
        if workspace.is_empty() {
            return Err(WorkspaceError::NoProjects {
                root: workspace.root().to_path_buf(),
            }
            .into());
        }

        self.phases.warm();
        info!("Analyzing {} projects", workspace.len());

        let dependency_map = project_dependency_map(workspace);
        debug!(
            "Derived {} static dependencies",
            dependency_map.values().map(Vec::len).sum::<usize>()
        );

        let analysis_started = Instant::now();
        let progress = ProgressTracker::new(
            workspace.len(),
            self.config.performance_config().progress_interval,
        );
        let outcomes = self.process_all(workspace, &dependency_map, &progress);
        let analysis_time = analysis_started.elapsed();

        let mut nodes: Vec<NodeRecord> = Vec::with_capacity(workspace.len());
        let mut source_files: HashMap<String, String> = HashMap::new();
        let mut failed_projects = Vec::new();

        for (project, (root, outcome)) in workspace.projects.iter().zip(outcomes) {
            let output = match outcome {
                Ok(output) => output,
                Err(e) => {
                    error!("Error processing project {}: {}", project.key, e);
                    failed_projects.push(project.name());
                    ProjectOutput {
                        targets: BTreeMap::new(),
                        groups: BTreeMap::new(),
                    }
                }
            };
            source_files.insert(project.name(), under_root(&root, "pom.xml"));
            nodes.push(build_node(
                project,
                &root,
                output.targets,
                output.groups,
                &self.config.targets.technologies,
            ));
        }

        let edges = dependency_edges(&dependency_map, &source_files);

        let summary = RunSummary {
            total_time: started.elapsed(),
            analysis_time,
            projects_analyzed: workspace.len(),
            failed_projects,
            cached_analysis_lookups: self.plans.cache_stats().shared_lookups,
        };
        summary.log();

        Ok(AnalysisReport {
            document: AnalysisDocument {
                create_nodes_results: nodes,
                create_dependencies: edges,
            },
            summary,
        })
    }

    /// Root of every project plus its outcome, in workspace order
    fn process_all(
        &self,
        workspace: &Workspace,
        dependency_map: &BTreeMap<String, Vec<String>>,
        progress: &ProgressTracker,
    ) -> Vec<(String, Result<ProjectOutput, ProjectError>)> {
        let run = || -> Vec<_> {
            workspace
                .projects
                .par_iter()
                .map(|project| {
                    let outcome = self.guarded(workspace, project, dependency_map);
                    progress.record();
                    outcome
                })
                .collect()
        };

        let threads = self.config.performance.effective_threads();
        match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("reactor-graph-{i}"))
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!("Could not build a {}-thread pool, using the global pool: {}", threads, e);
                run()
            }
        }
    }

    fn guarded(
        &self,
        workspace: &Workspace,
        project: &Project,
        dependency_map: &BTreeMap<String, Vec<String>>,
    ) -> (String, Result<ProjectOutput, ProjectError>) {
        let root = match relative_root(workspace.root(), project) {
            Ok(root) => root,
            Err(e) => return (project.basedir.to_string_lossy().into_owned(), Err(e)),
        };

        let actual_dependencies = dependency_map
            .get(&project.name())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.process_project(project, &root, actual_dependencies)
        }))
        .unwrap_or_else(|payload| {
            Err(ProjectError::Panicked {
                project: project.key.to_string(),
                message: panic_message(payload.as_ref()),
            })
        });

        (root, outcome)
    }

    /// Targets first, then `dependsOn` over the complete set, then groups
    fn process_project(
        &self,
        project: &Project,
        root: &str,
        actual_dependencies: &[String],
    ) -> Result<ProjectOutput, ProjectError> {
        let mut targets = self.generation.generate_targets(project, root)?;
        self.dependencies
            .apply(project, &mut targets, actual_dependencies);
        let groups = self.groups.generate_target_groups(project, &targets);

        debug!(
            "{}: {} targets in {} groups",
            project.key,
            targets.len(),
            groups.len()
        );
        Ok(ProjectOutput { targets, groups })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TargetDependency, TargetKind};

    fn analyzer() -> WorkspaceAnalyzer {
        WorkspaceAnalyzer::new(AnalyzerConfig::testing())
    }

    #[test]
    fn test_empty_workspace_is_fatal() {
        let err = analyzer()
            .analyze(&Workspace::new("/ws", Vec::new()))
            .unwrap_err();
        assert!(err.to_string().contains("Workspace"));
    }

    #[test]
    fn test_cross_project_edges_follow_declared_dependencies() {
        let workspace = Workspace::new(
            "/ws",
            vec![
                Project::new("com.acme", "a"),
                Project::new("com.acme", "b").with_dependency("com.acme", "a"),
            ],
        );

        let report = analyzer().analyze(&workspace).unwrap();
        let document = &report.document;

        let b = document.project("com.acme.b").unwrap();
        assert!(b.targets["maven-compiler:compile"]
            .depends_on
            .contains(&TargetDependency::projects(
                "maven-compiler:compile",
                vec!["com.acme.a".to_string()]
            )));

        let a = document.project("com.acme.a").unwrap();
        assert!(a.targets["maven-compiler:compile"]
            .depends_on
            .iter()
            .all(|d| matches!(d, TargetDependency::Local(_))));

        assert_eq!(document.create_dependencies.len(), 1);
        assert_eq!(document.create_dependencies[0].source_file, "b/pom.xml");
        assert!(report.summary.is_clean());
    }

    #[test]
    fn test_outside_project_degrades_to_empty_node() {
        let workspace = Workspace::new(
            "/ws",
            vec![
                Project::new("com.acme", "a").with_basedir("/ws/a"),
                Project::new("com.acme", "stray").with_basedir("/tmp/stray"),
            ],
        );

        let report = analyzer().analyze(&workspace).unwrap();

        assert_eq!(report.document.project_count(), 2);
        let stray = report.document.project("com.acme.stray").unwrap();
        assert!(stray.targets.is_empty());
        assert!(stray.metadata.target_groups.is_empty());
        assert_eq!(report.summary.failed_projects, vec!["com.acme.stray"]);

        let a = report.document.project("com.acme.a").unwrap();
        assert_eq!(a.targets["compile"].kind(), TargetKind::Phase);
        assert!(a.metadata.target_groups.contains_key("compile"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
