//! Data model shared by the build-tool adapter, the analysis services and
//! the output writer

pub mod behavior;
pub mod lifecycle;
pub mod output;
pub mod plan;
pub mod project;
pub mod target;

pub use behavior::{GoalBehavior, PhaseAnalysis, PhaseCategory};
pub use lifecycle::{Lifecycle, LifecycleRegistry};
pub use output::{
    AnalysisDocument, CreateNodesResult, DependencyEdge, DependencyKind, MavenCoordinates,
    NodeRecord, ProjectConfiguration, ProjectMetadata, ProjectType,
};
pub use plan::{ExecutionPlan, MojoDescriptor, MojoExecution, ParameterDescriptor};
pub use project::{
    DependencyDecl, ExecutionDecl, PluginDecl, PluginKey, Project, ProjectKey, Workspace,
};
pub use target::{Target, TargetDependency, TargetGroup, TargetKind, TargetMetadata, TargetOptions};
