//! Keyward CLI entry point.

use clap::Parser;
use keyward_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the command
    run(cli)
}
