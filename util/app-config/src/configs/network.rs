use ckb_rosetta_address::NetworkType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The chain the adapter serves, also the `network` of the Rosetta network identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Dev,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Dev => "dev",
        }
    }

    /// Dev chains share the testnet address prefix.
    pub fn address_network(self) -> NetworkType {
        match self {
            Network::Mainnet => NetworkType::Mainnet,
            Network::Testnet | Network::Dev => NetworkType::Testnet,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
