/// Configuration system for reactor-graph
///
/// - Sectioned configuration structure with serde defaults
/// - Accessor traits for components that only need one section
/// - TOML loading and validation
pub mod traits;
pub mod unified;

pub use traits::{
    AnalysisConfig, HasAnalysisConfig, HasPerformanceConfig, HasTargetConfig, OutputConfig,
    PerformanceConfig, TargetConfig,
};

pub use unified::{verbose_requested_by_env, AnalyzerConfig, CONFIG_FILE_NAME, VERBOSE_ENV_VAR};
