//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Binary name from Cargo.toml package name
const BIN_NAME: &str = env!("CARGO_PKG_NAME");

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, _global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        match self.shell {
            Shell::Bash => {
                eprintln!("# eval \"$({BIN_NAME} completions bash)\"");
            }
            Shell::Zsh => {
                eprintln!("# {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}");
            }
            Shell::Fish => {
                eprintln!("# {BIN_NAME} completions fish | source");
            }
            _ => {}
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
