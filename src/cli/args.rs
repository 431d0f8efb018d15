use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface of reactor-graph.
///
/// Reads a Maven reactor and prints the task graph (project nodes with their
/// targets, plus static project dependencies) as one JSON document.
///
/// # Examples
///
/// ```bash
/// # Analyze the reactor in the current directory
/// reactor-graph analyze
///
/// # Only two modules, written to a file
/// reactor-graph analyze --root ../shop --projects com.acme:api,web --output graph.json
/// ```
#[derive(Parser, Debug)]
#[command(name = "reactor-graph")]
#[command(about = "Derive a task graph from a Maven reactor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a workspace and emit the result document
    Analyze(AnalyzeArgs),

    /// Manage the workspace configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,

        /// Workspace root holding the configuration file
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Workspace root containing the aggregator pom.xml
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Projects to include (comma-separated groupId:artifactId or artifactId)
    #[arg(short, long, value_delimiter = ',')]
    pub projects: Vec<String>,

    /// Configuration file (default: <root>/reactor-graph.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write the default configuration file
    Init,
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_project_list() {
        let cli = Cli::parse_from([
            "reactor-graph",
            "analyze",
            "--root",
            "/ws",
            "--projects",
            "com.acme:a,b",
            "--compact",
            "-v",
        ]);

        assert!(cli.verbose);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.root, PathBuf::from("/ws"));
        assert_eq!(args.projects, vec!["com.acme:a", "b"]);
        assert!(args.compact);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::parse_from(["reactor-graph", "config", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigAction::Show, .. }
        ));
    }
}
