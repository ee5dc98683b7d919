//! Command line definition.
use clap::{Arg, ArgAction, ArgMatches, Command};

/// The binary name.
pub const BIN_NAME: &str = "ckb-rosetta";

/// Subcommand `run`.
pub const CMD_RUN: &str = "run";
/// Subcommand `init`.
pub const CMD_INIT: &str = "init";

/// Runs as if started in the given directory.
pub const ARG_CONFIG_DIR: &str = "config-dir";
/// Explicit config file, overrides `<config-dir>/rosetta.toml`.
pub const ARG_CONFIG: &str = "config";
/// Overwrites an existing config file on init.
pub const ARG_FORCE: &str = "force";

/// The full command line application.
pub fn basic_app() -> Command {
    Command::new(BIN_NAME)
        .author("Nervos Core Dev <dev@nervos.org>")
        .about("Rosetta API server for Nervos CKB")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_CONFIG_DIR)
                .global(true)
                .short('C')
                .value_name("path")
                .action(ArgAction::Set)
                .help(
                    "Runs as if ckb-rosetta was started in <path> instead of the current working directory.",
                ),
        )
        .subcommand(run())
        .subcommand(init())
}

/// Parses the process arguments.
pub fn get_matches(version: &str) -> ArgMatches {
    basic_app().version(version.to_owned()).get_matches()
}

fn run() -> Command {
    Command::new(CMD_RUN).about("Runs the Rosetta server").arg(
        Arg::new(ARG_CONFIG)
            .long(ARG_CONFIG)
            .value_name("file")
            .action(ArgAction::Set)
            .help("Loads the config from <file> instead of <path>/rosetta.toml"),
    )
}

fn init() -> Command {
    Command::new(CMD_INIT)
        .about("Creates a rosetta.toml config file in the directory")
        .arg(
            Arg::new(ARG_FORCE)
                .long(ARG_FORCE)
                .action(ArgAction::SetTrue)
                .help("Overwrites the existing config file"),
        )
}
