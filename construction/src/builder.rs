use crate::{group_by_lock, ConstructionContext, ValidatedOperations};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_types::{
    bytes::Bytes,
    core::{TransactionBuilder, TransactionView},
    packed,
    prelude::*,
};
use std::collections::HashSet;

/// Length of a recoverable secp256k1 signature.
pub const SIGNATURE_SIZE: usize = 65;

/// The witness at the first input of a lock group before it is signed.
///
/// It is a `WitnessArgs` whose lock is a zeroed signature, so the unsigned transaction already
/// has the size of the signed one.
pub fn placeholder_witness() -> packed::WitnessArgs {
    packed::WitnessArgs::new_builder()
        .lock(Some(Bytes::from(vec![0u8; SIGNATURE_SIZE])).pack())
        .build()
}

/// The configured cell deps followed by the deps attached to the inputs, then to the outputs,
/// keeping the first dep of each out point.
pub fn collect_cell_deps(
    configured: Vec<packed::CellDep>,
    operations: &ValidatedOperations,
) -> Vec<packed::CellDep> {
    let attached = operations
        .inputs
        .iter()
        .filter_map(|input| input.cell_dep.clone())
        .chain(
            operations
                .outputs
                .iter()
                .filter_map(|output| output.cell_dep.clone()),
        );
    let mut seen = HashSet::new();
    configured
        .into_iter()
        .chain(attached)
        .filter(|cell_dep| seen.insert(cell_dep.out_point()))
        .collect()
}

/// Assembles the unsigned transaction spending the inputs of `operations` into its outputs.
pub fn build_unsigned_tx(
    operations: &ValidatedOperations,
    ctx: &ConstructionContext,
) -> Result<TransactionView, Error> {
    let cell_deps = collect_cell_deps(ctx.scripts.secp256k1_blake160.cell_deps(), operations);
    if cell_deps.is_empty() {
        return Err(ErrorKind::UnsignedTxBuildError.reason("no cell deps for the lock script"));
    }

    let mut witnesses = vec![Bytes::new(); operations.inputs.len()];
    let placeholder = placeholder_witness().as_bytes();
    for group in group_by_lock(operations.inputs.iter().map(|input| &input.lock)) {
        witnesses[group.first()] = placeholder.clone();
    }

    let tx = TransactionBuilder::default()
        .version(0u32.pack())
        .cell_deps(cell_deps)
        .inputs(
            operations
                .inputs
                .iter()
                .map(|input| packed::CellInput::new(input.out_point.clone(), 0)),
        )
        .outputs(operations.outputs.iter().map(|output| output.cell_output()))
        .outputs_data(operations.outputs.iter().map(|output| output.data.pack()))
        .witnesses(witnesses.into_iter().map(|witness| witness.pack()))
        .build();
    Ok(tx)
}
