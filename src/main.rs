use anyhow::Result;
use reactor_graph::cli;

fn main() -> Result<()> {
    cli::run_cli()
}
