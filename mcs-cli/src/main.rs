//! Main entry point for the mcs CLI.
//!
//! Startup order: parse flags, set up logging, resolve configuration once,
//! then dispatch. The resolved configuration is passed to commands by
//! reference.

mod cli;
mod commands;
mod error;
mod utils;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(CliError::from(e).exit_code());
        }
    };

    let logger = mcs::init_logger(cli.verbose, cli.quiet);
    // Only fails if a backend is already installed.
    let _ = logger.install();

    let global = GlobalOptions::new(cli.verbose, cli.quiet, cli.config, cli.config_format);

    let result = utils::resolve_configuration(&global).and_then(|resolution| {
        utils::report_resolution(&logger, &resolution);

        match cli.command {
            Some(cli::Command::Config(cmd)) => cmd.execute(&global, &resolution),
            Some(cli::Command::Completions(cmd)) => cmd.execute(&global),
            None => Cli::command().print_help().map_err(CliError::from),
        }
    });

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
