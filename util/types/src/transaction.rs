use crate::{AccountIdentifier, Amount};
use ckb_jsonrpc_types::{self as json, CellDep, CellInput, CellOutput, JsonBytes, Version};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_types::{core::TransactionView, packed, prelude::*, H256};
use serde::{Deserialize, Serialize};

/// The opaque transaction string handed to and received from Rosetta callers.
///
/// It is the CKB JSON-RPC transaction extended with the operation context the transaction was
/// built from: the amount and account of every input and output, the operation index each of
/// them came from and, once known, the accounts which must sign. A plain CKB JSON-RPC
/// transaction decodes as well, with empty context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosettaTransaction {
    pub version: Version,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<H256>,
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    pub outputs_data: Vec<JsonBytes>,
    pub witnesses: Vec<JsonBytes>,
    #[serde(default)]
    pub input_amounts: Vec<Amount>,
    #[serde(default)]
    pub input_accounts: Vec<AccountIdentifier>,
    #[serde(default)]
    pub output_amounts: Vec<Amount>,
    #[serde(default)]
    pub output_accounts: Vec<AccountIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_indices: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_indices: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub account_identifier_signers: Vec<AccountIdentifier>,
}

impl RosettaTransaction {
    /// Wraps a transaction without any operation context.
    pub fn from_view(tx: &TransactionView) -> Self {
        let json::Transaction {
            version,
            cell_deps,
            header_deps,
            inputs,
            outputs,
            outputs_data,
            witnesses,
        } = tx.data().into();
        RosettaTransaction {
            version,
            cell_deps,
            header_deps,
            inputs,
            outputs,
            outputs_data,
            witnesses,
            input_amounts: Vec::new(),
            input_accounts: Vec::new(),
            output_amounts: Vec::new(),
            output_accounts: Vec::new(),
            input_indices: Vec::new(),
            output_indices: Vec::new(),
            account_identifier_signers: Vec::new(),
        }
    }

    /// The bare CKB transaction, as sent to the node.
    pub fn to_json(&self) -> json::Transaction {
        json::Transaction {
            version: self.version,
            cell_deps: self.cell_deps.clone(),
            header_deps: self.header_deps.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            outputs_data: self.outputs_data.clone(),
            witnesses: self.witnesses.clone(),
        }
    }

    pub fn to_packed(&self) -> packed::Transaction {
        self.to_json().into()
    }

    pub fn to_view(&self) -> TransactionView {
        self.to_packed().into_view()
    }

    /// The transaction hash, which excludes witnesses.
    pub fn hash(&self) -> H256 {
        self.to_packed().calc_tx_hash().unpack()
    }

    pub fn encode(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|err| ErrorKind::ServerError.reason(err))
    }

    /// Decodes the opaque transaction string, failing with `kind`.
    pub fn decode(encoded: &str, kind: ErrorKind) -> Result<Self, Error> {
        serde_json::from_str(encoded).map_err(|err| kind.reason(err))
    }
}

/// Formats the coin identifier of an out point, `"0x<tx hash>:<index>"`.
pub fn format_coin_identifier(tx_hash: &H256, index: u32) -> String {
    format!("{tx_hash:#x}:{index}")
}

/// Parses a coin identifier `"0x<64 hex>:<decimal u32>"` into the out point it names.
pub fn parse_coin_identifier(identifier: &str) -> Result<packed::OutPoint, Error> {
    let invalid = || ErrorKind::InvalidCoinChange.reason(identifier);
    let (hash, index) = identifier.split_once(':').ok_or_else(invalid)?;
    let hash = hash.strip_prefix("0x").ok_or_else(invalid)?;
    if hash.len() != 64 {
        return Err(invalid());
    }
    let tx_hash: H256 = hash.parse().map_err(|_| invalid())?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let index: u32 = index.parse().map_err(|_| invalid())?;
    Ok(packed::OutPoint::new(tx_hash.pack(), index))
}
