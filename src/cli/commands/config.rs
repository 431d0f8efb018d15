use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use super::utils::resolve_config;
use super::Command;
use crate::cli::args::ConfigAction;
use crate::core::config::{AnalyzerConfig, CONFIG_FILE_NAME};

pub struct ConfigCommand {
    action: ConfigAction,
    root: PathBuf,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, root: PathBuf) -> Self {
        Self { action, root }
    }
}

impl Command for ConfigCommand {
    fn execute(&self) -> Result<()> {
        let config_path = self.root.join(CONFIG_FILE_NAME);

        match self.action {
            ConfigAction::Init => {
                if config_path.exists() {
                    bail!("{} already exists", config_path.display());
                }
                let toml_content = AnalyzerConfig::default().to_toml()?;
                std::fs::write(&config_path, toml_content)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("Configuration initialized at {}", config_path.display());
            }

            ConfigAction::Show => {
                let config = resolve_config(&self.root, None, false)?;
                print!("{}", config.to_toml()?);
            }
        }

        Ok(())
    }
}
