/// Unified configuration for a reactor-graph run
///
/// Mirrors the TOML layout:
///
/// ```toml
/// [analysis]
/// verbose = false
/// essential_phases = ["validate", "compile", "test", "package"]
///
/// [performance]
/// max_threads = 8
///
/// [targets]
/// command = "./mvnw"
///
/// [output]
/// pretty = true
/// ```
use super::traits::*;
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up at the workspace root
pub const CONFIG_FILE_NAME: &str = "reactor-graph.toml";

/// Environment variable that forces verbose analysis
pub const VERBOSE_ENV_VAR: &str = "REACTOR_GRAPH_VERBOSE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub analysis: AnalysisConfig,
    pub performance: PerformanceConfig,
    pub targets: TargetConfig,
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic, single-threaded configuration for tests
    pub fn testing() -> Self {
        Self {
            performance: PerformanceConfig {
                parallel_processing: false,
                plan_fanout: false,
                ..PerformanceConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from file, falling back to defaults if it doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            field: "<root>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply the verbose environment override
    pub fn with_env_overrides(mut self) -> Self {
        if verbose_requested_by_env() {
            self.analysis.verbose = true;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.essential_phases.is_empty() {
            return Err(invalid(
                "analysis.essential_phases",
                "at least one phase is required",
            ));
        }

        if self.performance.progress_interval == 0 {
            return Err(invalid(
                "performance.progress_interval",
                "must be greater than zero",
            ));
        }

        if self.performance.max_threads == Some(0) {
            return Err(invalid("performance.max_threads", "must be greater than zero"));
        }

        if self.targets.executor.trim().is_empty() {
            return Err(invalid("targets.executor", "must not be empty"));
        }

        if self.targets.command.trim().is_empty() {
            return Err(invalid("targets.command", "must not be empty"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl HasAnalysisConfig for AnalyzerConfig {
    fn analysis_config(&self) -> &AnalysisConfig {
        &self.analysis
    }
}

impl HasPerformanceConfig for AnalyzerConfig {
    fn performance_config(&self) -> &PerformanceConfig {
        &self.performance
    }
}

impl HasTargetConfig for AnalyzerConfig {
    fn target_config(&self) -> &TargetConfig {
        &self.targets
    }
}

/// Whether [`VERBOSE_ENV_VAR`] forces verbose output
pub fn verbose_requested_by_env() -> bool {
    is_enabled(std::env::var(VERBOSE_ENV_VAR).ok().as_deref())
}

fn is_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.essential_phases.len(), 9);
        assert_eq!(config.targets.executor, "@nx/run-commands:run-commands");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[performance]\nmax_threads = 3\n\n[targets]\ncommand = \"./mvnw\"\n",
        )
        .unwrap();

        let config = AnalyzerConfig::load(&path).unwrap();

        assert_eq!(config.performance.max_threads, Some(3));
        assert_eq!(config.performance.effective_threads(), 3);
        assert_eq!(config.targets.command, "./mvnw");
        assert!(config.analysis.share_analysis_by_signature);
    }

    #[test]
    fn test_rejects_zero_progress_interval() {
        let mut config = AnalyzerConfig::default();
        config.performance.progress_interval = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("performance.progress_interval"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AnalyzerConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert!(config.performance.parallel_processing);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::testing();
        let text = config.to_toml().unwrap();
        let parsed: AnalyzerConfig = toml::from_str(&text).unwrap();
        assert!(!parsed.performance.parallel_processing);
        assert_eq!(parsed.performance.effective_threads(), 1);
    }

    #[test]
    fn test_verbose_env_value_parsing() {
        assert!(is_enabled(Some("true")));
        assert!(is_enabled(Some("TRUE ")));
        assert!(!is_enabled(Some("1")));
        assert!(!is_enabled(Some("")));
        assert!(!is_enabled(None));
    }
}
