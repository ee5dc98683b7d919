use crate::RosettaAppConfig;
use std::path::PathBuf;

/// Parsed command line arguments for `ckb-rosetta run`.
pub struct RunArgs {
    /// The loaded config.
    pub config: Box<RosettaAppConfig>,
    /// Where the config was loaded from.
    pub config_file: PathBuf,
}

/// Parsed command line arguments for `ckb-rosetta init`.
pub struct InitArgs {
    /// The directory to write `rosetta.toml` into.
    pub root_dir: PathBuf,
    /// Overwrites an existing config file.
    pub force: bool,
}
