use anyhow::Result;

pub mod analyze;
pub mod config;

/// Trait for CLI command implementations
pub trait Command {
    /// Execute the command with the given arguments
    fn execute(&self) -> Result<()>;
}

/// Common utilities for command implementations
pub mod utils {
    use crate::core::config::{AnalyzerConfig, CONFIG_FILE_NAME};
    use anyhow::{Context, Result};
    use std::path::Path;

    /// Explicit file, else `<root>/reactor-graph.toml` when present, else
    /// defaults; environment and `--verbose` overrides applied last
    pub fn resolve_config(
        root: &Path,
        explicit: Option<&Path>,
        verbose: bool,
    ) -> Result<AnalyzerConfig> {
        let mut config = match explicit {
            Some(path) => AnalyzerConfig::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => AnalyzerConfig::load_or_default(&root.join(CONFIG_FILE_NAME))
                .context("Failed to load workspace configuration")?,
        }
        .with_env_overrides();

        if verbose {
            config.analysis.verbose = true;
        }
        Ok(config)
    }
}
