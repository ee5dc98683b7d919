//! Transaction size and fee, computed from the operations without building the transaction.
//!
//! The sizes follow the molecule layout of `Transaction`: tables start with a 4 bytes total size
//! and a 4 bytes offset per field, fixed vectors with a 4 bytes item count, dynamic vectors with
//! a 4 bytes total size and a 4 bytes offset per item, and byte vectors with a 4 bytes length.
use crate::{
    collect_cell_deps, group_by_lock, placeholder_witness, ConstructionContext,
    ValidatedOperations,
};
use ckb_types::{packed, prelude::*};

/// `Transaction` with empty vectors.
pub(crate) const EMPTY_TX_SIZE: u64 = 68;
pub(crate) const HEADER_DEP_SIZE: u64 = 32;
pub(crate) const CELL_DEP_SIZE: u64 = 37;
pub(crate) const CELL_INPUT_SIZE: u64 = 44;
/// Offset of an item in a dynamic vector, or length of a byte vector.
pub(crate) const NUMBER_SIZE: u64 = 4;
/// `CellOutput` without the scripts: header, capacity.
const CELL_OUTPUT_FIXED_SIZE: u64 = 16 + 8;
/// `Script` without args: header, code hash, hash type, args length.
const SCRIPT_FIXED_SIZE: u64 = 16 + 32 + 1 + 4;

fn script_size(script: &packed::Script) -> u64 {
    SCRIPT_FIXED_SIZE + script.args().raw_data().len() as u64
}

fn bytes_item_size(len: u64) -> u64 {
    NUMBER_SIZE + NUMBER_SIZE + len
}

/// The size the transaction built from `operations` takes in a block.
pub fn estimate_tx_size(operations: &ValidatedOperations, ctx: &ConstructionContext) -> u64 {
    let cell_deps =
        collect_cell_deps(ctx.scripts.secp256k1_blake160.cell_deps(), operations).len() as u64;
    let header_deps = 0;
    let inputs = operations.inputs.len() as u64;

    let outputs: u64 = operations
        .outputs
        .iter()
        .map(|output| {
            let type_size = output.type_script.as_ref().map_or(0, script_size);
            NUMBER_SIZE + CELL_OUTPUT_FIXED_SIZE + script_size(&output.lock) + type_size
        })
        .sum();
    let outputs_data: u64 = operations
        .outputs
        .iter()
        .map(|output| bytes_item_size(output.data.len() as u64))
        .sum();

    let placeholder = placeholder_witness().as_slice().len() as u64;
    let groups = group_by_lock(operations.inputs.iter().map(|input| &input.lock)).len() as u64;
    let witnesses = inputs * bytes_item_size(0) + groups * placeholder;

    EMPTY_TX_SIZE
        + header_deps * HEADER_DEP_SIZE
        + cell_deps * CELL_DEP_SIZE
        + inputs * CELL_INPUT_SIZE
        + outputs
        + outputs_data
        + witnesses
        // offset of the transaction in the block
        + NUMBER_SIZE
}

/// `fee_rate` shannons per 1000 bytes, scaled by `multiplier` and rounded down.
pub fn estimate_fee(fee_rate: u64, multiplier: f64, tx_size: u64) -> u64 {
    (fee_rate as f64 * multiplier * tx_size as f64 / 1000.0).floor() as u64
}
