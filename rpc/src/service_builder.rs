use crate::module::{AccountRpcImpl, BlockRpcImpl, ConstructionRpcImpl, NetworkRpcImpl};
use axum::Router;
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_client::ChainClient;
use std::sync::Arc;

/// Assembles the router of the enabled API modules.
pub struct ServiceBuilder {
    config: Arc<RosettaAppConfig>,
    client: Arc<dyn ChainClient>,
    router: Router,
}

impl ServiceBuilder {
    pub fn new(config: Arc<RosettaAppConfig>, client: Arc<dyn ChainClient>) -> Self {
        Self {
            config,
            client,
            router: Router::new(),
        }
    }

    pub fn enable_network(mut self) -> Self {
        let rpc = NetworkRpcImpl {
            config: Arc::clone(&self.config),
            client: Arc::clone(&self.client),
        };
        self.router = self.router.merge(rpc.into_router());
        self
    }

    pub fn enable_account(mut self) -> Self {
        let rpc = AccountRpcImpl {
            config: Arc::clone(&self.config),
            client: Arc::clone(&self.client),
        };
        self.router = self.router.merge(rpc.into_router());
        self
    }

    pub fn enable_block(mut self) -> Self {
        let rpc = BlockRpcImpl {
            config: Arc::clone(&self.config),
            client: Arc::clone(&self.client),
        };
        self.router = self.router.merge(rpc.into_router());
        self
    }

    pub fn enable_construction(mut self) -> Self {
        let rpc = ConstructionRpcImpl {
            config: Arc::clone(&self.config),
            client: Arc::clone(&self.client),
        };
        self.router = self.router.merge(rpc.into_router());
        self
    }

    /// Enables every module.
    pub fn enable_all(self) -> Self {
        self.enable_network()
            .enable_account()
            .enable_block()
            .enable_construction()
    }

    pub fn build(self) -> Router {
        self.router
    }
}
