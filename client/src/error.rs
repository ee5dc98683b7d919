use thiserror::Error;

/// Failures talking to the node.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid node url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The node answered with a JSON-RPC error.
    #[error("node error: {0}")]
    Rpc(jsonrpc_core::Error),
    #[error("no response to request {0}")]
    MissingResponse(u64),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
