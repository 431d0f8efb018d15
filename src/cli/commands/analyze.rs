use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use super::utils::resolve_config;
use super::Command;
use crate::cli::args::AnalyzeArgs;
use crate::graph::WorkspaceAnalyzer;
use crate::project::load_workspace;

pub struct AnalyzeCommand {
    args: AnalyzeArgs,
    verbose: bool,
}

impl AnalyzeCommand {
    pub fn new(args: AnalyzeArgs, verbose: bool) -> Self {
        Self { args, verbose }
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> Result<()> {
        let config = resolve_config(&self.args.root, self.args.config.as_deref(), self.verbose)?;
        let pretty = config.output.pretty && !self.args.compact;
        let output = self
            .args
            .output
            .clone()
            .or_else(|| config.output.output_file.clone());

        let workspace = load_workspace(&self.args.root, self.args.projects.clone())
            .with_context(|| format!("Failed to load workspace {}", self.args.root.display()))?;

        let report = WorkspaceAnalyzer::new(config).analyze(&workspace)?;

        match output {
            Some(path) => {
                report
                    .document
                    .write_to(&path, pretty)
                    .context("Failed to write result document")?;
                info!("Result written to {}", path.display());
            }
            None => {
                let json = report.document.to_json(pretty)?;
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}").context("Failed to write result document")?;
            }
        }

        Ok(())
    }
}
