use async_trait::async_trait;
use ckb_jsonrpc_types::{self as json, JsonBytes};
use ckb_rosetta_address::{Address, NetworkType};
use ckb_rosetta_app_config::{RosettaAppConfig, BUNDLED_CONFIG};
use ckb_rosetta_client::{Cell, ChainClient, Error as ClientError, Order, Pagination, SearchKey};
use ckb_rosetta_types::{constants::BLOCKCHAIN, NetworkIdentifier};
use ckb_types::{
    bytes::Bytes,
    core::{self, Capacity},
    packed,
    prelude::*,
    H256,
};
use std::{collections::HashMap, sync::Arc, sync::Mutex};


pub(crate) fn config() -> RosettaAppConfig {
    RosettaAppConfig::load_from_slice(BUNDLED_CONFIG.as_bytes()).expect("bundled config")
}

pub(crate) fn mainnet() -> NetworkIdentifier {
    NetworkIdentifier {
        blockchain: BLOCKCHAIN.to_owned(),
        network: "mainnet".to_owned(),
        sub_network_identifier: None,
    }
}

pub(crate) fn secp_lock(config: &RosettaAppConfig, seed: u8) -> packed::Script {
    config
        .scripts
        .secp256k1_blake160
        .build_script(Bytes::from(vec![seed; 20]))
}

pub(crate) fn address_of(lock: &packed::Script) -> String {
    Address::new(NetworkType::Mainnet, lock.clone())
        .encode()
        .expect("encode address")
}

/// `0x` prefixed hex of a hash.
pub(crate) fn hex_hash(hash: &packed::Byte32) -> String {
    let hash: H256 = hash.unpack();
    format!("{hash:#x}")
}

pub(crate) fn cell_output(capacity: u64, lock: packed::Script) -> packed::CellOutput {
    packed::CellOutput::new_builder()
        .capacity(Capacity::shannons(capacity).pack())
        .lock(lock)
        .build()
}

pub(crate) fn cellbase(number: u64, outputs: Vec<packed::CellOutput>) -> core::TransactionView {
    let outputs_data = vec![Bytes::new().pack(); outputs.len()];
    core::TransactionBuilder::default()
        .input(packed::CellInput::new_cellbase_input(number))
        .outputs(outputs)
        .outputs_data(outputs_data)
        .witness(Bytes::new().pack())
        .build()
}

/// A transaction spending `inputs` into `outputs`.
pub(crate) fn transfer(
    inputs: Vec<packed::OutPoint>,
    outputs: Vec<packed::CellOutput>,
) -> core::TransactionView {
    let outputs_data = vec![Bytes::new().pack(); outputs.len()];
    core::TransactionBuilder::default()
        .inputs(
            inputs
                .into_iter()
                .map(|out_point| packed::CellInput::new(out_point, 0)),
        )
        .outputs(outputs)
        .outputs_data(outputs_data)
        .build()
}

/// An in memory chain.
#[derive(Default)]
pub(crate) struct MockChain {
    pub blocks: Vec<json::BlockView>,
    pub transactions: HashMap<H256, json::TransactionView>,
    pub cells: Vec<Cell>,
    pub reject_submit: bool,
    /// Size of every `get_transaction` batch.
    pub batches: Mutex<Vec<usize>>,
    /// Number of `get_cells` pages served.
    pub pages: Mutex<usize>,
    pub sent: Mutex<Vec<json::Transaction>>,
}

impl MockChain {
    /// Appends a block on top of the tip.
    pub fn push_block(&mut self, transactions: Vec<core::TransactionView>) -> core::BlockView {
        let number = self.blocks.len() as u64;
        let mut builder = core::BlockBuilder::default()
            .number(number.pack())
            .epoch(core::EpochNumberWithFraction::new(0, number, 1000).pack())
            .timestamp((1_600_000_000_000 + number).pack());
        if let Some(parent) = self.blocks.last() {
            builder = builder.parent_hash(parent.header.hash.pack());
        }
        let block = builder.transactions(transactions).build();
        for tx in block.transactions() {
            self.add_transaction(&tx);
        }
        self.blocks.push(block.clone().into());
        block
    }

    pub fn add_transaction(&mut self, tx: &core::TransactionView) {
        self.transactions
            .insert(tx.hash().unpack(), json::TransactionView::from(tx.clone()));
    }

    pub fn add_cell(&mut self, output: packed::CellOutput, data: Bytes, tx_hash: H256, index: u32) {
        self.cells.push(Cell {
            output: output.into(),
            output_data: Some(JsonBytes::from_bytes(data)),
            out_point: json::OutPoint {
                tx_hash,
                index: index.into(),
            },
            block_number: 1u64.into(),
            tx_index: 1u32.into(),
        });
    }

    pub fn into_client(self) -> Arc<Self> {
        Arc::new(self)
    }
}

fn missing(what: &str) -> ClientError {
    ClientError::UnexpectedResponse(format!("{what} not found"))
}

fn decode_cursor(cursor: Option<JsonBytes>) -> usize {
    cursor.map_or(0, |cursor| {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(cursor.as_bytes());
        u64::from_le_bytes(raw) as usize
    })
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_tip_header(&self) -> Result<json::HeaderView, ClientError> {
        self.blocks
            .last()
            .map(|block| block.header.clone())
            .ok_or_else(|| missing("tip"))
    }

    async fn get_block(&self, hash: H256) -> Result<Option<json::BlockView>, ClientError> {
        Ok(self
            .blocks
            .iter()
            .find(|block| block.header.hash == hash)
            .cloned())
    }

    async fn get_block_by_number(
        &self,
        number: u64,
    ) -> Result<Option<json::BlockView>, ClientError> {
        Ok(self.blocks.get(number as usize).cloned())
    }

    async fn get_transaction(
        &self,
        hash: H256,
    ) -> Result<Option<json::TransactionView>, ClientError> {
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn get_transactions(
        &self,
        hashes: Vec<H256>,
    ) -> Result<Vec<Option<json::TransactionView>>, ClientError> {
        self.batches.lock().expect("lock").push(hashes.len());
        Ok(hashes
            .iter()
            .map(|hash| self.transactions.get(hash).cloned())
            .collect())
    }

    async fn get_cells(
        &self,
        search_key: SearchKey,
        _order: Order,
        limit: u32,
        after: Option<JsonBytes>,
    ) -> Result<Pagination<Cell>, ClientError> {
        *self.pages.lock().expect("lock") += 1;
        let start = decode_cursor(after);
        let objects: Vec<Cell> = self
            .cells
            .iter()
            .filter(|cell| cell.output.lock == search_key.script)
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let last_cursor = if objects.is_empty() {
            JsonBytes::default()
        } else {
            let end = (start + objects.len()) as u64;
            JsonBytes::from_vec(end.to_le_bytes().to_vec())
        };
        Ok(Pagination {
            objects,
            last_cursor,
        })
    }

    async fn send_transaction(&self, tx: json::Transaction) -> Result<H256, ClientError> {
        if self.reject_submit {
            return Err(ClientError::UnexpectedResponse(
                "TransactionFailedToResolve".to_owned(),
            ));
        }
        let hash = packed::Transaction::from(tx.clone()).calc_tx_hash().unpack();
        self.sent.lock().expect("lock").push(tx);
        Ok(hash)
    }
}
