use serde::{Deserialize, Serialize};

/// The CKB node serving chain data. Its RPC must enable the `Indexer` module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON-RPC endpoint, e.g. `http://127.0.0.1:8114`.
    pub rpc_url: String,
}
