pub mod args;
pub mod commands;

pub use args::{AnalyzeArgs, Cli, Commands, ConfigAction};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::config::verbose_requested_by_env;

use commands::analyze::AnalyzeCommand;
use commands::config::ConfigCommand;
use commands::Command;

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let verbose = cli.verbose || verbose_requested_by_env();

    // stdout carries the result document, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command: Box<dyn Command> = match cli.command {
        Commands::Analyze(args) => Box::new(AnalyzeCommand::new(args, verbose)),
        Commands::Config { action, root } => Box::new(ConfigCommand::new(action, root)),
    };

    command.execute()
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("reactor_graph={level}")
}
