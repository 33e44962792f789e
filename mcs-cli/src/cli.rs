//! CLI structure and command definitions.
//!
//! The root command takes global options only; subcommands are optional and
//! limited to inspecting the resolved configuration.

use crate::commands::{CompletionsCommand, ConfigCommand};
use clap::{Parser, Subcommand};
use mcs::ConfigFormat;

/// PMF MCS (Motion Control Software).
#[derive(Parser)]
#[command(name = "mcs-cli")]
#[command(version, about = "PMF MCS (Motion Control Software).", long_about = None)]
pub struct Cli {
    /// Config file (default is mcs.json next to the executable)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Format of the config file
    #[arg(long, value_name = "FORMAT", global = true, value_enum, default_value_t)]
    pub config_format: ConfigFormat,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the resolved configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
