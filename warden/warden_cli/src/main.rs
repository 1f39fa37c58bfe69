use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use warden_core::{init_logging, LogLevel};

mod commands;
mod config;

use config::CliConfig;

/// Warden Command Line Interface
///
/// Checks whether a role may perform an action against a set of
/// role-based access policies.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Policy definition file to load (repeatable); replaces the files
    /// named in the configuration
    #[clap(long = "policy", global = true)]
    policies: Vec<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a request and print the decision message
    Check {
        /// Role making the request
        role: String,

        /// Action being attempted
        action: String,
    },

    /// Evaluate a request and print the structured decision as JSON
    Evaluate {
        /// Role making the request
        role: String,

        /// Action being attempted
        action: String,

        /// Reject roles and actions outside the configured vocabulary
        #[clap(long)]
        strict: bool,
    },

    /// Run the demo requests
    Demo,

    /// List the loaded policies
    Policies,

    /// Validate a policy definition file
    Validate {
        /// Path to the policy file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(cli.log_level.unwrap_or(config.log_level));

    if let Some(path) = cli.config.as_deref() {
        if path.exists() {
            debug!("Loaded configuration from {}", path.display());
        } else {
            warn!("Configuration file not found: {}, using defaults", path.display());
        }
    }

    let mut out = io::stdout().lock();

    // Built lazily; `validate` needs no policies loaded
    let controller = || config.build_controller(&cli.policies);

    match cli.command {
        Commands::Check { role, action } => {
            commands::execute_check(&controller()?, &role, &action, &mut out)?;
        }
        Commands::Evaluate {
            role,
            action,
            strict,
        } => {
            return commands::execute_evaluate(&controller()?, &role, &action, strict, &mut out);
        }
        Commands::Demo => commands::execute_demo(&controller()?, &mut out)?,
        Commands::Policies => commands::execute_policies(&controller()?, &mut out)?,
        Commands::Validate { file } => commands::execute_validate(&file, &mut out)?,
    }

    Ok(0)
}
