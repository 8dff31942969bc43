//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Commands are organized by service domain.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod cloud;
mod completions;
pub mod project;

/// st - Stratus cloud CLI client
///
/// A command-line interface for OpenStack-compatible cloud services.
#[derive(Parser, Debug)]
#[command(name = "st")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Cloud profile to use
    #[arg(long, global = true, env = "OS_CLOUD")]
    pub cloud: Option<String>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage cloud profiles
    #[command(subcommand)]
    Cloud(cloud::CloudCommands),

    /// Manage projects, including cleanup and purge
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Cloud(cmd) => cloud::execute(cmd, cli.json).await,
        Commands::Project(cmd) => {
            project::execute(cmd, cli.cloud.as_deref(), output_config).await
        }
        Commands::Completions(args) => completions::execute(args),
    }
}
