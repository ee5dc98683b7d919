use crate::{Cell, ChainClient, Error, Order, Pagination, SearchKey};
use async_trait::async_trait;
use ckb_jsonrpc_types::{
    BlockNumber, BlockView, HeaderView, JsonBytes, Transaction, TransactionView, Uint32,
};
use ckb_rosetta_logger::debug;
use ckb_types::H256;
use jsonrpc_core::{Id, MethodCall, Output, Params, Response, Version};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// The outputs validator of `send_transaction` which accepts any lock and type script.
const PASSTHROUGH_VALIDATOR: &str = "passthrough";

#[derive(Default)]
pub(crate) struct IdGenerator {
    state: AtomicU64,
}

impl IdGenerator {
    pub(crate) fn next(&self) -> u64 {
        self.state.fetch_add(1, Ordering::Relaxed)
    }
}

pub(crate) fn method_call(id: u64, method: &str, params: Vec<Value>) -> MethodCall {
    MethodCall {
        jsonrpc: Some(Version::V2),
        method: method.to_owned(),
        params: Params::Array(params),
        id: Id::Num(id),
    }
}

pub(crate) fn decode_output<T: DeserializeOwned>(output: Output) -> Result<T, Error> {
    match output {
        Output::Success(success) => serde_json::from_value(success.result).map_err(Into::into),
        Output::Failure(failure) => Err(Error::Rpc(failure.error)),
    }
}

/// Matches the answers of a batch to the calls by id, a node may answer out of order.
pub(crate) fn decode_batch<T: DeserializeOwned>(
    ids: &[u64],
    response: Response,
) -> Result<Vec<T>, Error> {
    let outputs = match response {
        Response::Batch(outputs) => outputs,
        // The whole batch was rejected.
        Response::Single(Output::Failure(failure)) => return Err(Error::Rpc(failure.error)),
        Response::Single(output) => vec![output],
    };
    let mut by_id: HashMap<u64, Output> = outputs
        .into_iter()
        .filter_map(|output| {
            let id = match output.id() {
                Id::Num(id) => *id,
                _ => return None,
            };
            Some((id, output))
        })
        .collect();
    ids.iter()
        .map(|id| {
            let output = by_id.remove(id).ok_or(Error::MissingResponse(*id))?;
            decode_output(output)
        })
        .collect()
}

/// The `get_transaction` result, only the part the adapter reads.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionWithStatus {
    #[serde(default)]
    pub transaction: Option<TransactionView>,
}

jsonrpc!(pub struct Inner {
    pub fn get_tip_header(&self) -> HeaderView;
    pub fn get_block(&self, hash: H256) -> Option<BlockView>;
    pub fn get_block_by_number(&self, number: BlockNumber) -> Option<BlockView>;
    pub fn get_transaction(&self, hash: H256) -> Option<TransactionWithStatus>;
    pub fn get_cells(
        &self,
        search_key: SearchKey,
        order: Order,
        limit: Uint32,
        after: Option<JsonBytes>
    ) -> Pagination<Cell>;
    pub fn send_transaction(&self, tx: Transaction, outputs_validator: Option<String>) -> H256;
});

/// [`ChainClient`] over the node HTTP JSON-RPC.
pub struct RpcClient {
    inner: Inner,
}

impl RpcClient {
    /// Creates a client of the node at `url`, e.g. `http://127.0.0.1:8114`.
    ///
    /// Calls running longer than `timeout` fail.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let parsed = reqwest::Url::parse(url).map_err(|err| Error::InvalidUrl {
            url: url.to_owned(),
            reason: err.to_string(),
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RpcClient {
            inner: Inner::new(client, parsed),
        })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.inner.url
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn get_tip_header(&self) -> Result<HeaderView, Error> {
        self.inner.get_tip_header().await
    }

    async fn get_block(&self, hash: H256) -> Result<Option<BlockView>, Error> {
        self.inner.get_block(hash).await
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Option<BlockView>, Error> {
        self.inner.get_block_by_number(number.into()).await
    }

    async fn get_transaction(&self, hash: H256) -> Result<Option<TransactionView>, Error> {
        let result = self.inner.get_transaction(hash).await?;
        Ok(result.and_then(|with_status| with_status.transaction))
    }

    async fn get_transactions(
        &self,
        hashes: Vec<H256>,
    ) -> Result<Vec<Option<TransactionView>>, Error> {
        if hashes.is_empty() {
            return Ok(Vec::new());
        }
        debug!("batch get_transaction of {} transactions", hashes.len());
        let mut ids = Vec::with_capacity(hashes.len());
        let mut calls = Vec::with_capacity(hashes.len());
        for hash in &hashes {
            let id = self.inner.id_generator.next();
            ids.push(id);
            calls.push(method_call(
                id,
                "get_transaction",
                vec![serde_json::to_value(hash)?],
            ));
        }
        let response: Response = self
            .inner
            .client
            .post(self.inner.url.clone())
            .json(&calls)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let results: Vec<Option<TransactionWithStatus>> = decode_batch(&ids, response)?;
        Ok(results
            .into_iter()
            .map(|result| result.and_then(|with_status| with_status.transaction))
            .collect())
    }

    async fn get_cells(
        &self,
        search_key: SearchKey,
        order: Order,
        limit: u32,
        after: Option<JsonBytes>,
    ) -> Result<Pagination<Cell>, Error> {
        self.inner
            .get_cells(search_key, order, limit.into(), after)
            .await
    }

    async fn send_transaction(&self, tx: Transaction) -> Result<H256, Error> {
        self.inner
            .send_transaction(tx, Some(PASSTHROUGH_VALIDATOR.to_owned()))
            .await
    }
}
