//! # reactor-graph
//!
//! Build-graph analysis for Maven reactors.
//!
//! reactor-graph reads a multi-module workspace, asks a build tool which goals
//! each lifecycle phase would run, and turns the result into a task graph:
//! one node per project with a target per goal and per phase, `dependsOn`
//! edges between targets, and static project-to-project dependencies.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reactor_graph::{load_workspace, AnalyzerConfig, WorkspaceAnalyzer};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workspace = load_workspace(Path::new("."), Vec::new())?;
//!     let report = WorkspaceAnalyzer::new(AnalyzerConfig::default()).analyze(&workspace)?;
//!     println!("{}", report.document.to_json(true)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`analysis`] - Phase semantics, goal introspection and cached execution plans
//! - [`build_tool`] - The build-tool capability interface and the offline Maven model
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Configuration, errors, caches and constants
//! - [`graph`] - Whole-workspace orchestration and result assembly
//! - [`model`] - Projects, lifecycles, plans, targets and output records
//! - [`project`] - POM parsing and workspace loading
//! - [`targets`] - Target generation, dependencies and groups

/// Phase semantics, goal introspection and cached execution plans
pub mod analysis;
/// Build-tool capability interface and adapters
pub mod build_tool;
/// Command-line interface and argument parsing
pub mod cli;
/// Configuration, errors, caches and constants
pub mod core;
/// Whole-workspace orchestration
pub mod graph;
/// Domain and output types
pub mod model;
/// POM parsing and workspace loading
pub mod project;
/// Per-project target generation
pub mod targets;

pub use crate::core::*;
pub use build_tool::{BuildTool, MavenModelTool};
pub use graph::{AnalysisReport, RunSummary, WorkspaceAnalyzer};
pub use model::{AnalysisDocument, Project, Workspace};
pub use project::load_workspace;
