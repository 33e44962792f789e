//! Build script for mcs-cli.
//!
//! Generates the man page into OUT_DIR with clap_mangen. The command is
//! rebuilt here because a build script cannot depend on the crate it builds.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("mcs-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("PMF MCS (Motion Control Software).")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default is mcs.json next to the executable)")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("config-format")
                .long("config-format")
                .help("Format of the config file")
                .value_name("FORMAT")
                .value_parser(["json", "yaml", "toml"])
                .default_value("json")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("config")
                .about("Show the resolved configuration")
                .long_about("Print the configuration after merging the file and the environment"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer).unwrap();
    fs::write(man_dir.join("mcs-cli.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
