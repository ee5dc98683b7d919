//! Closed schemas of the opaque `metadata` and `options` objects.
//!
//! Each object travels as free-form JSON and is decoded strictly at the point of use, so unknown
//! or malformed content surfaces as a specific error kind instead of being ignored.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ckb_jsonrpc_types as json;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_types::{bytes::Bytes, packed};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

fn decode<T: DeserializeOwned>(value: &Value, kind: ErrorKind) -> Result<T, Error> {
    serde_json::from_value(value.clone()).map_err(|err| kind.reason(err))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|err| ErrorKind::ServerError.reason(err))
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

/// The lock script family of an account, told apart by code hash and hash type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockType {
    Secp256k1Blake160,
    Secp256k1Blake160Multisig,
    AnyoneCanPay,
}

impl LockType {
    pub fn as_str(self) -> &'static str {
        match self {
            LockType::Secp256k1Blake160 => "Secp256k1Blake160",
            LockType::Secp256k1Blake160Multisig => "Secp256k1Blake160Multisig",
            LockType::AnyoneCanPay => "AnyoneCanPay",
        }
    }
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `AccountIdentifier.metadata`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountMetadata {
    pub lock_type: LockType,
}

impl AccountMetadata {
    pub fn new(lock_type: LockType) -> Self {
        AccountMetadata { lock_type }
    }

    /// Absent metadata decodes to `None`.
    pub fn decode(value: Option<&Value>) -> Result<Option<Self>, Error> {
        non_null(value)
            .map(|value| decode(value, ErrorKind::InvalidAccountIdentifierMetadata))
            .transpose()
    }

    pub fn to_value(self) -> Result<Value, Error> {
        to_value(&self)
    }
}

/// `Operation.metadata`
///
/// Every field is base64:
///
/// * `cell_dep`: a JSON encoded `CellDep` the transaction must carry;
/// * `type_script`: a JSON encoded `Script`, the type script of an output;
/// * `output_data`: the raw data of an output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_dep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data: Option<String>,
}

impl OperationMetadata {
    /// Absent metadata decodes to the empty metadata.
    pub fn decode(value: Option<&Value>) -> Result<Self, Error> {
        match non_null(value) {
            Some(value) => decode(value, ErrorKind::InvalidOperationMetadata),
            None => Ok(OperationMetadata::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cell_dep.is_none() && self.type_script.is_none() && self.output_data.is_none()
    }

    pub fn cell_dep(&self) -> Result<Option<packed::CellDep>, Error> {
        self.cell_dep
            .as_deref()
            .map(|encoded| {
                let cell_dep: json::CellDep = decode_json(encoded, ErrorKind::InvalidCellDep)?;
                Ok(cell_dep.into())
            })
            .transpose()
    }

    pub fn type_script(&self) -> Result<Option<packed::Script>, Error> {
        self.type_script
            .as_deref()
            .map(|encoded| {
                let script: json::Script = decode_json(encoded, ErrorKind::InvalidTypeScript)?;
                Ok(script.into())
            })
            .transpose()
    }

    pub fn output_data(&self) -> Result<Option<Bytes>, Error> {
        self.output_data
            .as_deref()
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map(Bytes::from)
                    .map_err(|err| ErrorKind::InvalidOutputData.reason(err))
            })
            .transpose()
    }

    /// Describes an existing output, the reverse of the decoders above.
    pub fn from_output(type_script: Option<packed::Script>, data: &[u8]) -> Result<Self, Error> {
        let type_script = type_script
            .map(|script| {
                serde_json::to_vec(&json::Script::from(script))
                    .map(|encoded| BASE64.encode(encoded))
                    .map_err(|err| ErrorKind::ServerError.reason(err))
            })
            .transpose()?;
        let output_data = (!data.is_empty()).then(|| BASE64.encode(data));
        Ok(OperationMetadata {
            cell_dep: None,
            type_script,
            output_data,
        })
    }

    /// `None` when empty, so operations without metadata serialize without the field.
    pub fn to_value(&self) -> Result<Option<Value>, Error> {
        if self.is_empty() {
            Ok(None)
        } else {
            to_value(self).map(Some)
        }
    }
}

fn decode_json<T: DeserializeOwned>(encoded: &str, kind: ErrorKind) -> Result<T, Error> {
    let raw = BASE64.decode(encoded).map_err(|err| kind.reason(err))?;
    serde_json::from_slice(&raw).map_err(|err| kind.reason(err))
}

/// Options returned by `/construction/preprocess` and echoed back to `/construction/metadata`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    pub lock_type: LockType,
    pub estimated_tx_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fee_multiplier: Option<f64>,
}

impl PreprocessOptions {
    pub fn decode(value: Option<&Value>) -> Result<Self, Error> {
        let value = non_null(value).ok_or(ErrorKind::MissingOption)?;
        decode(value, ErrorKind::InvalidPreprocessOptions)
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        to_value(self)
    }
}

/// Metadata returned by `/construction/metadata` and passed to `/construction/payloads`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionMetadata {
    pub lock_type: LockType,
}

impl ConstructionMetadata {
    /// Absent metadata decodes to `None`.
    pub fn decode(value: Option<&Value>) -> Result<Option<Self>, Error> {
        non_null(value)
            .map(|value| decode(value, ErrorKind::InvalidConstructionMetadata))
            .transpose()
    }

    pub fn to_value(self) -> Result<Value, Error> {
        to_value(&self)
    }
}

/// `Amount.metadata` of the CKB balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMetadata {
    /// Capacity not occupied by cell data, type scripts or the lock itself.
    pub available_ckb_balance: u64,
}

impl AmountMetadata {
    pub fn to_value(self) -> Result<Value, Error> {
        to_value(&self)
    }
}
