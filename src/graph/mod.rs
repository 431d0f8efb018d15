//! Workspace-level orchestration: dependency map, parallel per-project
//! processing and result document assembly

pub mod dependencies;
pub mod nodes;
pub mod orchestrator;
pub mod progress;

pub use dependencies::{dependency_edges, project_dependency_map};
pub use nodes::{build_node, project_type, relative_root};
pub use orchestrator::{AnalysisReport, WorkspaceAnalyzer};
pub use progress::{ProgressTracker, RunSummary};
