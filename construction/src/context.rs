use ckb_rosetta_address::NetworkType;
use ckb_rosetta_app_config::{RosettaAppConfig, ScriptsConfig};

/// The configuration every construction step reads.
#[derive(Clone, Copy, Debug)]
pub struct ConstructionContext<'a> {
    /// The network addresses must belong to.
    pub network: NetworkType,
    pub scripts: &'a ScriptsConfig,
    /// The least capacity of a single signature output, in shannons.
    pub min_capacity: u64,
    /// Shannons per 1000 bytes.
    pub fee_rate: u64,
}

impl<'a> ConstructionContext<'a> {
    pub fn new(config: &'a RosettaAppConfig) -> Self {
        ConstructionContext {
            network: config.network.address_network(),
            scripts: &config.scripts,
            min_capacity: config.construction.min_capacity,
            fee_rate: config.construction.fee_rate,
        }
    }
}
