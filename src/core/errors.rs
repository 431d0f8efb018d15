/// Domain-specific error types for reactor-graph using thiserror
///
/// Most failures inside the engine are recovered locally (an introspection or
/// plan failure degrades to "no data"), so these types mostly travel between
/// the external build-tool adapter and the recovery points, and up to the CLI
/// for the few cases that are fatal.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reactor-graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Workspace loading failed")]
    Workspace(#[from] WorkspaceError),

    #[error("Build tool interrogation failed")]
    BuildTool(#[from] BuildToolError),

    #[error("Project processing failed")]
    Project(#[from] ProjectError),

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("Output generation failed")]
    Output(#[from] OutputError),
}

/// Errors raised while reading the reactor (POM files, module layout)
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("No projects found in workspace {root}")]
    NoProjects { root: PathBuf },

    #[error("Failed to resolve workspace root {root}")]
    RootUnresolved {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read POM {path}")]
    PomRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse POM {path}: {message}")]
    PomParse { path: PathBuf, message: String },

    #[error("POM {path} does not declare an artifactId")]
    MissingArtifactId { path: PathBuf },
}

/// Errors reported by a [`crate::build_tool::BuildTool`] adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildToolError {
    #[error("Unknown lifecycle phase '{phase}'")]
    UnknownPhase { phase: String },

    #[error("Could not calculate execution plan for {phase} in {project}: {reason}")]
    PlanFailed {
        project: String,
        phase: String,
        reason: String,
    },

    #[error("Descriptor for {plugin}:{goal} unavailable: {reason}")]
    DescriptorUnavailable {
        plugin: String,
        goal: String,
        reason: String,
    },
}

/// Per-project failures, caught by the orchestrator and replaced by empty output
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Project {project} at {path} is outside the workspace root")]
    OutsideWorkspace { project: String, path: PathBuf },

    #[error("Target generation failed for {project}: {reason}")]
    TargetGeneration { project: String, reason: String },

    #[error("Processing of {project} panicked: {message}")]
    Panicked { project: String, message: String },
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Result document serialization and writing errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize result document")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write result document to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for reactor-graph operations
pub type GraphResult<T> = Result<T, GraphError>;
