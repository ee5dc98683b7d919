//! # CKB Rosetta AppConfig
//!
//! The whole config is one file, `rosetta.toml`. A documented template is bundled with the
//! binary and written out by `ckb-rosetta init`.
use std::fs;
use std::path::Path;

use ckb_rosetta_logger::Config as LogConfig;
use serde::{Deserialize, Serialize};

use crate::{ConstructionConfig, ExitCode, Network, NodeConfig, RpcConfig, ScriptsConfig};

/// The config file name looked up in the config dir.
pub const CONFIG_FILE_NAME: &str = "rosetta.toml";

/// The bundled `rosetta.toml` template.
pub const BUNDLED_CONFIG: &str = include_str!("../resource/rosetta.toml");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosettaAppConfig {
    pub network: Network,
    pub rpc: RpcConfig,
    pub node: NodeConfig,
    #[serde(default)]
    pub construction: ConstructionConfig,
    #[serde(default)]
    pub logger: LogConfig,
    pub scripts: ScriptsConfig,
}

impl RosettaAppConfig {
    pub fn load_from_slice(slice: &[u8]) -> Result<Self, ExitCode> {
        let config: RosettaAppConfig = toml::from_slice(slice)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ExitCode> {
        let content = fs::read(path).map_err(|err| {
            eprintln!("failed to read config file {}: {err}", path.display());
            ExitCode::Config
        })?;
        Self::load_from_slice(&content)
    }

    fn check(&self) -> Result<(), ExitCode> {
        if self.construction.fee_rate == 0 {
            eprintln!("Config Error: construction.fee_rate must be positive");
            return Err(ExitCode::Config);
        }
        if self.scripts.secp256k1_blake160.cell_deps.is_empty() {
            eprintln!("Config Error: scripts.secp256k1_blake160.cell_deps must not be empty");
            return Err(ExitCode::Config);
        }
        Ok(())
    }
}

/// Writes the bundled template into `root_dir`.
pub fn export_bundled_config(root_dir: &Path, force: bool) -> Result<(), ExitCode> {
    let target = root_dir.join(CONFIG_FILE_NAME);
    if target.exists() && !force {
        eprintln!(
            "{} already exists, use --force to overwrite",
            target.display()
        );
        return Err(ExitCode::Failure);
    }
    fs::create_dir_all(root_dir)?;
    fs::write(&target, BUNDLED_CONFIG)?;
    Ok(())
}
