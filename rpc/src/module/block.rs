use crate::error::node_error;
use crate::module::{account_of, block_identifier, check_network};
use async_trait::async_trait;
use ckb_jsonrpc_types::{BlockView, TransactionView};
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_client::{ChainClient, BATCH_LIMIT};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::debug;
use ckb_rosetta_types::{
    constants::{
        ckb_currency, INPUT_OPERATION_TYPE, OUTPUT_OPERATION_TYPE, REWARD_OPERATION_TYPE,
        SUCCESS_STATUS,
    },
    format_coin_identifier, AccountIdentifier, Amount, Block, BlockIdentifier, BlockRequest,
    BlockResponse, BlockTransactionRequest, BlockTransactionResponse, CoinAction, CoinChange,
    CoinIdentifier, Operation, OperationIdentifier, PartialBlockIdentifier, Transaction,
    TransactionIdentifier,
};
use ckb_types::{packed, H256};
use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::Arc,
};

/// RPC Module Block, blocks and transactions as Rosetta operations.
#[async_trait]
pub trait BlockRpc {
    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}, "block_identifier": {"index": 1}}' -H 'content-type:application/json' 'http://localhost:8080/block'
    /// Looks up a block by hash, or by index when the hash is absent, or the tip when both are.
    ///
    /// A negative index reads the genesis block.
    async fn block(&self, request: BlockRequest) -> Result<BlockResponse, Error>;

    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}, "block_identifier": {"index": 1, "hash": "0x..."}, "transaction_identifier": {"hash": "0x..."}}' -H 'content-type:application/json' 'http://localhost:8080/block/transaction'
    async fn block_transaction(
        &self,
        request: BlockTransactionRequest,
    ) -> Result<BlockTransactionResponse, Error>;
}

pub struct BlockRpcImpl {
    pub config: Arc<RosettaAppConfig>,
    pub client: Arc<dyn ChainClient>,
}

rosetta_routes!(BlockRpcImpl {
    "/block" => block(BlockRequest),
    "/block/transaction" => block_transaction(BlockTransactionRequest),
});

fn parse_hash(hash: &str) -> Result<H256, Error> {
    H256::from_str(hash.trim_start_matches("0x"))
        .map_err(|err| ErrorKind::DataParseError.reason(format!("hash {hash}: {err}")))
}

fn is_cellbase(tx: &TransactionView) -> bool {
    tx.inner.inputs.first().map_or(false, |input| {
        packed::OutPoint::from(input.previous_output.clone()).is_null()
    })
}

fn ckb_amount(value: String) -> Amount {
    Amount {
        value,
        currency: ckb_currency(),
        metadata: None,
    }
}

fn operation(
    index: usize,
    type_: &str,
    account: AccountIdentifier,
    amount: Amount,
    coin_change: Option<CoinChange>,
) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier {
            index: index as i64,
            network_index: None,
        },
        related_operations: Vec::new(),
        type_: type_.to_owned(),
        status: Some(SUCCESS_STATUS.to_owned()),
        account: Some(account),
        amount: Some(amount),
        coin_change,
        metadata: None,
    }
}

fn coin_change(tx_hash: &H256, index: u32, coin_action: CoinAction) -> CoinChange {
    CoinChange {
        coin_identifier: CoinIdentifier {
            identifier: format_coin_identifier(tx_hash, index),
        },
        coin_action,
    }
}

impl BlockRpcImpl {
    async fn fetch_block(&self, identifier: &PartialBlockIdentifier) -> Result<BlockView, Error> {
        let block = match (identifier.hash.as_deref(), identifier.index) {
            (Some(hash), _) if !hash.is_empty() => self
                .client
                .get_block(parse_hash(hash)?)
                .await
                .map_err(|err| node_error("get_block", err))?,
            (_, Some(index)) => self
                .client
                .get_block_by_number(index.max(0) as u64)
                .await
                .map_err(|err| node_error("get_block_by_number", err))?,
            _ => {
                let tip = self
                    .client
                    .get_tip_header()
                    .await
                    .map_err(|err| node_error("get_tip_header", err))?;
                self.client
                    .get_block(tip.hash)
                    .await
                    .map_err(|err| node_error("get_block", err))?
            }
        };
        block.ok_or_else(|| ErrorKind::RpcError.reason("block not found"))
    }

    /// Fetches the transactions creating the cells `txs` spend, in batches of [`BATCH_LIMIT`].
    async fn previous_transactions<'a, I>(
        &self,
        txs: I,
    ) -> Result<HashMap<H256, TransactionView>, Error>
    where
        I: IntoIterator<Item = &'a TransactionView>,
    {
        let mut seen = HashSet::new();
        let hashes: Vec<H256> = txs
            .into_iter()
            .flat_map(|tx| tx.inner.inputs.iter())
            .map(|input| input.previous_output.tx_hash.clone())
            .filter(|hash| seen.insert(hash.clone()))
            .collect();

        let mut previous = HashMap::with_capacity(hashes.len());
        for chunk in hashes.chunks(BATCH_LIMIT) {
            let found = self
                .client
                .get_transactions(chunk.to_vec())
                .await
                .map_err(|err| node_error("get_transaction", err))?;
            for (hash, tx) in chunk.iter().zip(found) {
                let tx = tx.ok_or_else(|| {
                    ErrorKind::RpcError.reason(format!("transaction {hash:#x} not found"))
                })?;
                previous.insert(hash.clone(), tx);
            }
        }
        Ok(previous)
    }

    /// The outputs of a cellbase as `REWARD` operations, `None` when it has no output.
    fn reward_transaction(&self, tx: &TransactionView) -> Result<Option<Transaction>, Error> {
        if tx.inner.outputs.is_empty() {
            return Ok(None);
        }
        let operations = tx
            .inner
            .outputs
            .iter()
            .enumerate()
            .map(|(i, output)| {
                let lock = packed::Script::from(output.lock.clone());
                Ok(operation(
                    i,
                    REWARD_OPERATION_TYPE,
                    account_of(&lock, &self.config)?,
                    ckb_amount(output.capacity.value().to_string()),
                    None,
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Some(Transaction {
            transaction_identifier: TransactionIdentifier {
                hash: format!("{:#x}", tx.hash),
            },
            operations,
            metadata: None,
        }))
    }

    /// Spent cells as `INPUT` operations followed by the created cells as `OUTPUT` operations.
    fn transfer_transaction(
        &self,
        tx: &TransactionView,
        previous: &HashMap<H256, TransactionView>,
    ) -> Result<Transaction, Error> {
        let mut operations = Vec::with_capacity(tx.inner.inputs.len() + tx.inner.outputs.len());
        for input in &tx.inner.inputs {
            let out_point = &input.previous_output;
            let index = out_point.index.value();
            let spent = previous
                .get(&out_point.tx_hash)
                .and_then(|prev| prev.inner.outputs.get(index as usize))
                .ok_or_else(|| {
                    ErrorKind::ServerError.reason(format!(
                        "previous output {:#x}:{} not found",
                        out_point.tx_hash, index
                    ))
                })?;
            let lock = packed::Script::from(spent.lock.clone());
            operations.push(operation(
                operations.len(),
                INPUT_OPERATION_TYPE,
                account_of(&lock, &self.config)?,
                ckb_amount(format!("-{}", spent.capacity.value())),
                Some(coin_change(&out_point.tx_hash, index, CoinAction::CoinSpent)),
            ));
        }
        for (i, output) in tx.inner.outputs.iter().enumerate() {
            let lock = packed::Script::from(output.lock.clone());
            operations.push(operation(
                operations.len(),
                OUTPUT_OPERATION_TYPE,
                account_of(&lock, &self.config)?,
                ckb_amount(output.capacity.value().to_string()),
                Some(coin_change(&tx.hash, i as u32, CoinAction::CoinCreated)),
            ));
        }
        Ok(Transaction {
            transaction_identifier: TransactionIdentifier {
                hash: format!("{:#x}", tx.hash),
            },
            operations,
            metadata: None,
        })
    }
}

#[async_trait]
impl BlockRpc for BlockRpcImpl {
    async fn block(&self, request: BlockRequest) -> Result<BlockResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let block = self.fetch_block(&request.block_identifier).await?;
        let header = &block.header;
        let number = header.inner.number.value();
        debug!("block {number} with {} transactions", block.transactions.len());

        let previous = self
            .previous_transactions(block.transactions.iter().skip(1))
            .await?;
        let mut transactions = Vec::with_capacity(block.transactions.len());
        for (i, tx) in block.transactions.iter().enumerate() {
            if i == 0 {
                transactions.extend(self.reward_transaction(tx)?);
            } else {
                transactions.push(self.transfer_transaction(tx, &previous)?);
            }
        }

        let parent_block_identifier = if number == 0 {
            block_identifier(header)
        } else {
            BlockIdentifier {
                index: number as i64 - 1,
                hash: format!("{:#x}", header.inner.parent_hash),
            }
        };
        Ok(BlockResponse {
            block: Some(Block {
                block_identifier: block_identifier(header),
                parent_block_identifier,
                timestamp: header.inner.timestamp.value() as i64,
                transactions,
                metadata: None,
            }),
            other_transactions: Vec::new(),
        })
    }

    async fn block_transaction(
        &self,
        request: BlockTransactionRequest,
    ) -> Result<BlockTransactionResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let hash = parse_hash(&request.transaction_identifier.hash)?;
        debug!("block transaction {hash:#x}");
        let tx = self
            .client
            .get_transaction(hash)
            .await
            .map_err(|err| node_error("get_transaction", err))?
            .ok_or_else(|| ErrorKind::RpcError.reason("transaction not found"))?;

        let transaction = if is_cellbase(&tx) {
            self.reward_transaction(&tx)?.unwrap_or_else(|| Transaction {
                transaction_identifier: TransactionIdentifier {
                    hash: format!("{:#x}", tx.hash),
                },
                operations: Vec::new(),
                metadata: None,
            })
        } else {
            let previous = self.previous_transactions([&tx]).await?;
            self.transfer_transaction(&tx, &previous)?
        };
        Ok(BlockTransactionResponse { transaction })
    }
}

