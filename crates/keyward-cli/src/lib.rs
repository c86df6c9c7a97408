//! Keyward command-line interface.

pub mod commands;
pub mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyward_core::{Config, ConfigError};

/// Keyward - store secrets in the OS credential store
#[derive(Parser)]
#[command(name = "keyward")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "KEYWARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store a secret (prompts for the value)
    Save(commands::secrets::SaveArgs),

    /// Print a stored secret
    Load(commands::secrets::LoadArgs),

    /// Delete every secret stored for a service and user
    Delete(commands::secrets::DeleteArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Load the configuration named on the command line, or the default one.
///
/// A named file that does not exist yet yields the defaults so that
/// `config init` can create it.
pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::load_or_default());
    };

    let mut config = match Config::load(path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => Config::default(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load config from {}", path.display()))
        }
    };
    config.apply_env_overrides();
    Ok(config)
}

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    logging::init(cli.verbose, &config.logging)?;

    match cli.command {
        Commands::Save(args) => commands::secrets::save(&config, args),
        Commands::Load(args) => commands::secrets::load(&config, args),
        Commands::Delete(args) => commands::secrets::delete(&config, args),
        Commands::Config(args) => commands::config::run(&config, cli.config.as_ref(), args),
        Commands::Version => {
            println!("keyward {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
