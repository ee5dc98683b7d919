use crate::{AccountMetadata, ConstructionMetadata, LockType, OperationMetadata, PreprocessOptions};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ckb_rosetta_error::{util::assert_error_kind, ErrorKind};
use ckb_types::{bytes::Bytes, core::DepType, h256, packed, prelude::*};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_account_metadata() {
    assert_eq!(AccountMetadata::decode(None), Ok(None));
    assert_eq!(AccountMetadata::decode(Some(&json!(null))), Ok(None));
    assert_eq!(
        AccountMetadata::decode(Some(&json!({ "lock_type": "AnyoneCanPay" }))),
        Ok(Some(AccountMetadata::new(LockType::AnyoneCanPay)))
    );
    assert_error_kind(
        AccountMetadata::decode(Some(&json!({ "lock_type": "Unknown" }))),
        ErrorKind::InvalidAccountIdentifierMetadata,
    );
    assert_error_kind(
        AccountMetadata::decode(Some(&json!({ "lock_type": "AnyoneCanPay", "extra": 1 }))),
        ErrorKind::InvalidAccountIdentifierMetadata,
    );
}

#[test]
fn test_operation_metadata_rejects_unknown_keys() {
    assert_eq!(
        OperationMetadata::decode(None),
        Ok(OperationMetadata::default())
    );
    assert_error_kind(
        OperationMetadata::decode(Some(&json!({ "data": "AA==" }))),
        ErrorKind::InvalidOperationMetadata,
    );
    assert_error_kind(
        OperationMetadata::decode(Some(&json!({ "output_data": 1 }))),
        ErrorKind::InvalidOperationMetadata,
    );
}

#[test]
fn test_operation_metadata_cell_dep() {
    let cell_dep = json!({
        "out_point": {
            "tx_hash": "0x71a7ba8fc96349fea0ed3a5c47992e3b4084b031a42264a018e0072e8172e46c",
            "index": "0x0"
        },
        "dep_type": "dep_group"
    });
    let metadata = OperationMetadata::decode(Some(&json!({
        "cell_dep": BASE64.encode(cell_dep.to_string()),
    })))
    .unwrap();
    let expected = packed::CellDep::new_builder()
        .out_point(packed::OutPoint::new(
            h256!("0x71a7ba8fc96349fea0ed3a5c47992e3b4084b031a42264a018e0072e8172e46c").pack(),
            0,
        ))
        .dep_type(DepType::DepGroup.into())
        .build();
    assert_eq!(metadata.cell_dep().unwrap(), Some(expected));

    let metadata = OperationMetadata {
        cell_dep: Some("not base64!".to_owned()),
        ..Default::default()
    };
    assert_error_kind(metadata.cell_dep(), ErrorKind::InvalidCellDep);

    let metadata = OperationMetadata {
        cell_dep: Some(BASE64.encode("{}")),
        ..Default::default()
    };
    assert_error_kind(metadata.cell_dep(), ErrorKind::InvalidCellDep);
}

#[test]
fn test_operation_metadata_output() {
    let type_script = packed::Script::new_builder()
        .code_hash(h256!("0x5e7a36a77e68eecc013dfa2fe6a23f3b6c344b04005808694ae6dd45eea4cfd5").pack())
        .hash_type(ckb_types::core::ScriptHashType::Type.into())
        .args(Bytes::from(vec![1u8; 32]).pack())
        .build();
    let data = 1000u128.to_le_bytes();
    let metadata = OperationMetadata::from_output(Some(type_script.clone()), &data).unwrap();
    let value = metadata.to_value().unwrap();
    let decoded = OperationMetadata::decode(value.as_ref()).unwrap();
    assert_eq!(decoded.type_script().unwrap(), Some(type_script));
    assert_eq!(
        decoded.output_data().unwrap().map(|data| data.to_vec()),
        Some(data.to_vec())
    );

    let empty = OperationMetadata::from_output(None, &[]).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.to_value(), Ok(None));

    let metadata = OperationMetadata {
        type_script: Some(BASE64.encode("[]")),
        output_data: Some("%%".to_owned()),
        ..Default::default()
    };
    assert_error_kind(metadata.type_script(), ErrorKind::InvalidTypeScript);
    assert_error_kind(metadata.output_data(), ErrorKind::InvalidOutputData);
}

#[test]
fn test_preprocess_options() {
    assert_error_kind(PreprocessOptions::decode(None), ErrorKind::MissingOption);
    assert_error_kind(
        PreprocessOptions::decode(Some(&json!({ "lock_type": "Secp256k1Blake160" }))),
        ErrorKind::InvalidPreprocessOptions,
    );
    let options = PreprocessOptions {
        lock_type: LockType::Secp256k1Blake160,
        estimated_tx_size: 464,
        suggested_fee_multiplier: Some(1.5),
    };
    let value = options.to_value().unwrap();
    assert_eq!(
        value,
        json!({
            "lock_type": "Secp256k1Blake160",
            "estimated_tx_size": 464,
            "suggested_fee_multiplier": 1.5
        })
    );
    assert_eq!(PreprocessOptions::decode(Some(&value)), Ok(options));
}

#[test]
fn test_construction_metadata() {
    assert_eq!(ConstructionMetadata::decode(None), Ok(None));
    assert_error_kind(
        ConstructionMetadata::decode(Some(&json!({ "tx_type": "Secp256k1Tx" }))),
        ErrorKind::InvalidConstructionMetadata,
    );
}
