//! Fixed values of the Rosetta API surface.
use crate::Currency;

/// The Rosetta API version implemented.
pub const ROSETTA_VERSION: &str = "1.4.10";
/// `blockchain` field of every network identifier.
pub const BLOCKCHAIN: &str = "CKB";

pub const INPUT_OPERATION_TYPE: &str = "INPUT";
pub const OUTPUT_OPERATION_TYPE: &str = "OUTPUT";
/// Cellbase outputs. Never accepted by the construction API.
pub const REWARD_OPERATION_TYPE: &str = "REWARD";
pub const OPERATION_TYPES: [&str; 3] = [
    INPUT_OPERATION_TYPE,
    OUTPUT_OPERATION_TYPE,
    REWARD_OPERATION_TYPE,
];

pub const SUCCESS_STATUS: &str = "SUCCESS";

pub const CKB_SYMBOL: &str = "CKB";
pub const CKB_DECIMALS: i32 = 8;

/// One CKB in shannons.
pub const SHANNONS_PER_CKB: u64 = 100_000_000;
/// 61 CKB, the occupied capacity of a cell locked by the single signature lock.
pub const DEFAULT_MIN_CAPACITY: u64 = 61 * SHANNONS_PER_CKB;

/// The native currency.
pub fn ckb_currency() -> Currency {
    Currency {
        symbol: CKB_SYMBOL.to_owned(),
        decimals: CKB_DECIMALS,
        metadata: None,
    }
}
