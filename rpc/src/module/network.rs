use crate::error::node_error;
use crate::module::{block_identifier, check_network};
use async_trait::async_trait;
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_client::ChainClient;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::debug;
use ckb_rosetta_types::{
    constants::{BLOCKCHAIN, OPERATION_TYPES, ROSETTA_VERSION, SUCCESS_STATUS},
    Allow, ErrorObject, MetadataRequest, NetworkIdentifier, NetworkListResponse,
    NetworkOptionsResponse, NetworkRequest, NetworkStatusResponse, OperationStatus, Version,
};
use std::sync::Arc;

/// The CKB node release the adapter is built against.
pub const NODE_VERSION: &str = "0.119.0";

/// RPC Module Network, the Rosetta network API.
#[async_trait]
pub trait NetworkRpc {
    // curl -d '{"metadata": {}}' -H 'content-type:application/json' 'http://localhost:8080/network/list'
    /// The single network this instance serves.
    async fn network_list(&self, request: MetadataRequest) -> Result<NetworkListResponse, Error>;

    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}}' -H 'content-type:application/json' 'http://localhost:8080/network/options'
    /// Versions, operation types and statuses and the error table.
    async fn network_options(&self, request: NetworkRequest)
        -> Result<NetworkOptionsResponse, Error>;

    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}}' -H 'content-type:application/json' 'http://localhost:8080/network/status'
    /// The tip and genesis blocks as seen by the node.
    async fn network_status(&self, request: NetworkRequest) -> Result<NetworkStatusResponse, Error>;
}

pub struct NetworkRpcImpl {
    pub config: Arc<RosettaAppConfig>,
    pub client: Arc<dyn ChainClient>,
}

rosetta_routes!(NetworkRpcImpl {
    "/network/list" => network_list(MetadataRequest),
    "/network/options" => network_options(NetworkRequest),
    "/network/status" => network_status(NetworkRequest),
});

#[async_trait]
impl NetworkRpc for NetworkRpcImpl {
    async fn network_list(&self, _request: MetadataRequest) -> Result<NetworkListResponse, Error> {
        Ok(NetworkListResponse {
            network_identifiers: vec![NetworkIdentifier {
                blockchain: BLOCKCHAIN.to_owned(),
                network: self.config.network.as_str().to_owned(),
                sub_network_identifier: None,
            }],
        })
    }

    async fn network_options(
        &self,
        request: NetworkRequest,
    ) -> Result<NetworkOptionsResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        Ok(NetworkOptionsResponse {
            version: Version {
                rosetta_version: ROSETTA_VERSION.to_owned(),
                node_version: NODE_VERSION.to_owned(),
                middleware_version: Some(env!("CARGO_PKG_VERSION").to_owned()),
            },
            allow: Allow {
                operation_statuses: vec![OperationStatus {
                    status: SUCCESS_STATUS.to_owned(),
                    successful: true,
                }],
                operation_types: OPERATION_TYPES.iter().map(|t| (*t).to_owned()).collect(),
                errors: ErrorObject::all(),
                historical_balance_lookup: false,
                call_methods: Vec::new(),
                mempool_coins: false,
            },
        })
    }

    async fn network_status(&self, request: NetworkRequest) -> Result<NetworkStatusResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        debug!("network status");
        let tip = self
            .client
            .get_tip_header()
            .await
            .map_err(|err| node_error("get_tip_header", err))?;
        let genesis = self
            .client
            .get_block_by_number(0)
            .await
            .map_err(|err| node_error("get_block_by_number", err))?
            .ok_or_else(|| ErrorKind::RpcError.reason("genesis block not found"))?;
        Ok(NetworkStatusResponse {
            current_block_identifier: block_identifier(&tip),
            current_block_timestamp: tip.inner.timestamp.value() as i64,
            genesis_block_identifier: block_identifier(&genesis.header),
            peers: Vec::new(),
        })
    }
}
