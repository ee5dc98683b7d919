//! Config and command line arguments of `ckb-rosetta`.
mod app_config;
mod args;
pub mod cli;
mod configs;
mod exit_code;

pub use app_config::{export_bundled_config, RosettaAppConfig, BUNDLED_CONFIG, CONFIG_FILE_NAME};
pub use args::{InitArgs, RunArgs};
pub use configs::*;
pub use exit_code::ExitCode;

use clap::ArgMatches;
use std::path::PathBuf;

/// The parsed command line, before any config is loaded.
pub struct Setup {
    /// The root dir, `-C` or the current working directory.
    pub root_dir: PathBuf,
}

impl Setup {
    pub fn from_matches(matches: &ArgMatches) -> Result<Setup, ExitCode> {
        Ok(Setup {
            root_dir: Self::root_dir_from_matches(matches)?,
        })
    }

    /// Loads the config for `ckb-rosetta run`.
    pub fn run(self, matches: &ArgMatches) -> Result<RunArgs, ExitCode> {
        let config_file = match matches.get_one::<String>(cli::ARG_CONFIG) {
            Some(file) => self.root_dir.join(file),
            None => self.root_dir.join(CONFIG_FILE_NAME),
        };
        let config = RosettaAppConfig::load(&config_file)?;
        Ok(RunArgs {
            config: Box::new(config),
            config_file,
        })
    }

    pub fn init(self, matches: &ArgMatches) -> Result<InitArgs, ExitCode> {
        Ok(InitArgs {
            root_dir: self.root_dir,
            force: matches.get_flag(cli::ARG_FORCE),
        })
    }

    /// Resolves `-C`, defaulting to the current directory.
    pub fn root_dir_from_matches(matches: &ArgMatches) -> Result<PathBuf, ExitCode> {
        let config_dir = match matches.get_one::<String>(cli::ARG_CONFIG_DIR) {
            Some(arg_config_dir) => PathBuf::from(arg_config_dir),
            None => ::std::env::current_dir()?,
        };
        Ok(config_dir)
    }
}
