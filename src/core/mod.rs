pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;

pub use cache::{AnalysisCache, CacheStats};
pub use config::{
    AnalysisConfig, AnalyzerConfig, HasAnalysisConfig, HasPerformanceConfig, HasTargetConfig,
    OutputConfig, PerformanceConfig, TargetConfig,
};
pub use errors::{
    BuildToolError, ConfigError, GraphError, GraphResult, OutputError, ProjectError,
    WorkspaceError,
};
