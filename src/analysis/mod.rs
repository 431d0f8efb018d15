//! Analysis services: phase semantics, goal introspection and execution plans
//!
//! Every service owns its caches and is shared across worker threads behind an
//! `Arc`; none of them holds a lock while calling into the build tool.

pub mod execution_plan;
pub mod goal_analysis;
pub mod phase_analyzer;
pub mod plugin_introspector;

pub use execution_plan::{
    ExecutionPlanAnalysisService, ExecutionPlanCacheStats, GoalBinding, ProjectExecutionAnalysis,
};
pub use goal_analysis::GoalAnalysisService;
pub use phase_analyzer::LifecyclePhaseAnalyzer;
pub use plugin_introspector::{GoalIntrospectionResult, IntrospectionSource, PluginIntrospector};
