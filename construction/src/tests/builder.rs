use super::*;
use crate::{
    build_unsigned_tx, group_by_lock, placeholder_witness, validate_operations,
    ConstructionContext,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ckb_jsonrpc_types as json;
use ckb_types::core::{DepType, ScriptHashType};
use serde_json::json;

fn attach_cell_dep(operation: &mut Operation, cell_dep: packed::CellDep) {
    let encoded = serde_json::to_vec(&json::CellDep::from(cell_dep)).expect("json");
    let mut metadata = operation.metadata.take().unwrap_or_else(|| json!({}));
    metadata["cell_dep"] = json!(BASE64.encode(encoded));
    operation.metadata = Some(metadata);
}

fn code_dep(seed: u8) -> packed::CellDep {
    packed::CellDep::new_builder()
        .out_point(packed::OutPoint::new(H256::from([seed; 32]).pack(), 0))
        .dep_type(DepType::Code.into())
        .build()
}

#[test]
fn test_transfer_layout() {
    let config = config();
    let ctx = ConstructionContext::new(&config);
    let operations = transfer(&config);
    let validated = validate_operations(&operations, &ctx).expect("valid");
    let tx = build_unsigned_tx(&validated, &ctx).expect("build");

    let version: u32 = tx.data().raw().version().unpack();
    assert_eq!(version, 0);
    assert!(tx.header_deps().is_empty());
    assert_eq!(
        tx.cell_deps().into_iter().collect::<Vec<_>>(),
        config.scripts.secp256k1_blake160.cell_deps()
    );

    assert_eq!(tx.inputs().len(), 1);
    let cell_input = tx.inputs().get(0).expect("input");
    let since: u64 = cell_input.since().unpack();
    assert_eq!(since, 0);
    assert_eq!(cell_input.previous_output(), validated.inputs[0].out_point);

    let output = tx.outputs().get(0).expect("output");
    let capacity: u64 = output.capacity().unpack();
    assert_eq!(capacity, 6_100_000_000);
    assert_eq!(output.lock(), secp_lock(&config, &privkey(2)));
    assert!(output.type_().to_opt().is_none());
    assert_eq!(tx.outputs_data().len(), 1);
    assert!(tx.outputs_data().get(0).expect("data").raw_data().is_empty());

    assert_eq!(tx.witnesses().len(), 1);
    assert_eq!(
        tx.witnesses().get(0).expect("witness").raw_data(),
        placeholder_witness().as_bytes()
    );
    assert_eq!(placeholder_witness().as_slice().len(), 85);
}

#[test]
fn test_witness_sparsity() {
    let config = config();
    let ctx = ConstructionContext::new(&config);
    let a = secp_address(&config, 1);
    let b = secp_address(&config, 2);
    let operations = vec![
        input(0, &a, -10_000_000_000, &coin(1, 0)),
        input(1, &b, -10_000_000_000, &coin(1, 1)),
        input(2, &a, -10_000_000_000, &coin(2, 0)),
        input(3, &a, -10_000_000_000, &coin(2, 1)),
        output(4, &secp_address(&config, 3), 39_000_000_000),
    ];
    let validated = validate_operations(&operations, &ctx).expect("valid");
    let tx = build_unsigned_tx(&validated, &ctx).expect("build");
    let groups = group_by_lock(validated.inputs.iter().map(|input| &input.lock));
    let firsts: Vec<usize> = groups.iter().map(|group| group.first()).collect();
    assert_eq!(firsts, vec![0, 1]);

    let witnesses = tx.witnesses();
    assert_eq!(witnesses.len(), 4);
    for index in 0..witnesses.len() {
        let witness = witnesses.get(index).expect("witness").raw_data();
        assert_eq!(
            !witness.is_empty(),
            firsts.contains(&index),
            "witness #{index}"
        );
    }
}

#[test]
fn test_attached_scripts_and_data() {
    let config = config();
    let ctx = ConstructionContext::new(&config);
    let sudt = config.scripts.sudt.as_ref().expect("sudt");
    let type_script = packed::Script::new_builder()
        .code_hash(sudt.code_hash.pack())
        .hash_type(ScriptHashType::Type.into())
        .args(Bytes::from(vec![9u8; 32]).pack())
        .build();
    let type_json = serde_json::to_vec(&json::Script::from(type_script.clone())).expect("json");

    let mut operations = vec![
        input(0, &secp_address(&config, 1), -15_000_000_000, &coin(1, 0)),
        input(1, &secp_address(&config, 1), -15_000_000_000, &coin(1, 1)),
        output(2, &secp_address(&config, 2), 14_200_000_000),
        output(3, &secp_address(&config, 1), 0),
    ];
    let sudt_dep: packed::CellDep = sudt.cell_deps[0].clone().into();
    attach_cell_dep(&mut operations[0], sudt_dep.clone());
    attach_cell_dep(&mut operations[1], sudt_dep.clone());
    attach_cell_dep(&mut operations[2], code_dep(5));
    attach_cell_dep(
        &mut operations[3],
        config.scripts.secp256k1_blake160.cell_deps()[0].clone(),
    );
    operations[2].metadata.as_mut().unwrap()["type_script"] = json!(BASE64.encode(type_json));
    operations[2].metadata.as_mut().unwrap()["output_data"] =
        json!(BASE64.encode(1000u128.to_le_bytes()));

    let validated = validate_operations(&operations, &ctx).expect("valid");
    let tx = build_unsigned_tx(&validated, &ctx).expect("build");
    // Inputs first, then outputs, each out point once.
    assert_eq!(
        tx.cell_deps().into_iter().collect::<Vec<_>>(),
        vec![
            config.scripts.secp256k1_blake160.cell_deps()[0].clone(),
            sudt_dep,
            code_dep(5),
        ]
    );
    let output = tx.outputs().get(0).expect("output");
    assert_eq!(output.type_().to_opt(), Some(type_script));
    assert_eq!(
        tx.outputs_data().get(0).expect("data").raw_data(),
        Bytes::from(1000u128.to_le_bytes().to_vec())
    );
    assert!(tx.outputs_data().get(1).expect("data").raw_data().is_empty());
}
