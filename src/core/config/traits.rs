/// Configuration sections and accessor traits for reactor-graph
///
/// Each section is owned by [`super::AnalyzerConfig`]; services that only need
/// one section take it through the matching `Has*Config` trait.
use crate::core::constants::{
    DEFAULT_COMMAND, DEFAULT_EXECUTOR, DEFAULT_PROGRESS_INTERVAL, DEFAULT_TECHNOLOGY,
    ESSENTIAL_PHASES, STANDARD_PHASES,
};
use std::path::PathBuf;

/// Trait for components that need analysis configuration
pub trait HasAnalysisConfig {
    fn analysis_config(&self) -> &AnalysisConfig;
}

/// Trait for components that need performance configuration
pub trait HasPerformanceConfig {
    fn performance_config(&self) -> &PerformanceConfig;
}

/// Trait for components that need target descriptor configuration
pub trait HasTargetConfig {
    fn target_config(&self) -> &TargetConfig;
}

/// What the engine analyzes and how much it shares between projects
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub verbose: bool,
    /// Phases whose execution plans are materialized per project signature
    pub essential_phases: Vec<String>,
    /// Phases that always get a phase-level target
    pub standard_phases: Vec<String>,
    pub share_analysis_by_signature: bool,
    pub include_common_goals: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            essential_phases: ESSENTIAL_PHASES.iter().map(|p| p.to_string()).collect(),
            standard_phases: STANDARD_PHASES.iter().map(|p| p.to_string()).collect(),
            share_analysis_by_signature: true,
            include_common_goals: true,
        }
    }
}

/// Worker pool and progress reporting settings
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub parallel_processing: bool,
    /// `None` sizes the pool to the host's available parallelism
    pub max_threads: Option<usize>,
    /// Materialize essential phases concurrently within one project
    pub plan_fanout: bool,
    pub progress_interval: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_processing: true,
            max_threads: None,
            plan_fanout: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl PerformanceConfig {
    pub fn effective_threads(&self) -> usize {
        if !self.parallel_processing {
            return 1;
        }
        self.max_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// How emitted targets invoke the build tool
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub executor: String,
    pub command: String,
    pub technologies: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            executor: DEFAULT_EXECUTOR.to_string(),
            command: DEFAULT_COMMAND.to_string(),
            technologies: vec![DEFAULT_TECHNOLOGY.to_string()],
        }
    }
}

/// Where and how the result document is written
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_file: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_file: None,
            pretty: true,
        }
    }
}
