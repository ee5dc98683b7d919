use ckb_rosetta_types::constants::DEFAULT_MIN_CAPACITY;
use serde::{Deserialize, Serialize};

/// Transaction construction config options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The least capacity in shannons of an output locked by the single signature lock.
    #[serde(default = "default_min_capacity")]
    pub min_capacity: u64,
    /// Fee rate in shannons per 1000 bytes.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_capacity: default_min_capacity(),
            fee_rate: default_fee_rate(),
        }
    }
}

const fn default_min_capacity() -> u64 {
    DEFAULT_MIN_CAPACITY
}

const fn default_fee_rate() -> u64 {
    1_000
}
