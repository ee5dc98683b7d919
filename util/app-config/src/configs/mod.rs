mod construction;
mod network;
mod node;
mod rpc;
mod scripts;

pub use construction::Config as ConstructionConfig;
pub use network::Network;
pub use node::Config as NodeConfig;
pub use rpc::Config as RpcConfig;
pub use scripts::{ScriptConfig, ScriptsConfig, SudtConfig, TokenConfig};
