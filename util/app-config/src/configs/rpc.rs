use serde::{Deserialize, Serialize};

/// Rosetta HTTP server config options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server listen address, e.g. `0.0.0.0:8080`.
    pub listen_address: String,
    /// Requests running longer than this many seconds are aborted.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    30
}
