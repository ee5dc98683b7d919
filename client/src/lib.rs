//! Client of the CKB node JSON-RPC, including the `Indexer` module.
//!
//! The Rosetta services only see the [`ChainClient`] trait, [`RpcClient`] implements it over
//! HTTP.
#[macro_use]
mod macros;
mod error;
mod indexer;
mod rpc;
#[cfg(test)]
mod tests;

pub use error::Error;
pub use indexer::{Cell, Order, Pagination, ScriptType, SearchKey, SearchMode};
pub use rpc::{RpcClient, TransactionWithStatus};

use async_trait::async_trait;
use ckb_jsonrpc_types::{BlockView, HeaderView, JsonBytes, Transaction, TransactionView};
use ckb_types::H256;

/// The most `get_transaction` calls sent in one batch.
pub const BATCH_LIMIT: usize = 2000;

/// The page size of `get_cells`.
pub const SEARCH_LIMIT: u32 = 100;

/// The node calls the Rosetta services depend on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_tip_header(&self) -> Result<HeaderView, Error>;

    async fn get_block(&self, hash: H256) -> Result<Option<BlockView>, Error>;

    async fn get_block_by_number(&self, number: u64) -> Result<Option<BlockView>, Error>;

    async fn get_transaction(&self, hash: H256) -> Result<Option<TransactionView>, Error>;

    /// Fetches all `hashes` in a single batch request, answers follow the order of `hashes`.
    ///
    /// Callers keep batches within [`BATCH_LIMIT`].
    async fn get_transactions(
        &self,
        hashes: Vec<H256>,
    ) -> Result<Vec<Option<TransactionView>>, Error>;

    /// One page of live cells, starting after the cursor `after`.
    async fn get_cells(
        &self,
        search_key: SearchKey,
        order: Order,
        limit: u32,
        after: Option<JsonBytes>,
    ) -> Result<Pagination<Cell>, Error>;

    /// Submits a transaction with the outputs validator disabled.
    async fn send_transaction(&self, tx: Transaction) -> Result<H256, Error>;
}
