mod node;

use crate::rpc::{decode_batch, method_call};
use crate::{Error, Order, SearchKey};
use ckb_jsonrpc_types as json;
use jsonrpc_core::Response;
use pretty_assertions::assert_eq;
use serde_json::json;

fn response(value: serde_json::Value) -> Response {
    serde_json::from_value(value).expect("response")
}

#[test]
fn test_method_call_shape() {
    let call = method_call(7, "get_tip_header", Vec::new());
    assert_eq!(
        serde_json::to_value(call).expect("json"),
        json!({"jsonrpc": "2.0", "method": "get_tip_header", "params": [], "id": 7})
    );
}

#[test]
fn test_search_key_shape() {
    let lock = json::Script {
        code_hash: Default::default(),
        hash_type: json::ScriptHashType::Type,
        args: json::JsonBytes::from_vec(vec![1, 2]),
    };
    let value = serde_json::to_value(SearchKey::by_lock(lock)).expect("json");
    assert_eq!(value["script_type"], json!("lock"));
    assert_eq!(value["script_search_mode"], json!("exact"));
    assert_eq!(value["with_data"], json!(true));
    assert_eq!(value["script"]["args"], json!("0x0102"));
    assert_eq!(serde_json::to_value(Order::Asc).expect("json"), json!("asc"));
}

#[test]
fn test_decode_batch_by_id() {
    let batch = response(json!([
        {"jsonrpc": "2.0", "id": 2, "result": "b"},
        {"jsonrpc": "2.0", "id": 1, "result": "a"},
        {"jsonrpc": "2.0", "id": 3, "result": null},
    ]));
    let decoded: Vec<Option<String>> = decode_batch(&[1, 2, 3], batch).expect("decode");
    assert_eq!(
        decoded,
        vec![Some("a".to_owned()), Some("b".to_owned()), None]
    );
}

#[test]
fn test_decode_batch_failures() {
    let batch = response(json!([{"jsonrpc": "2.0", "id": 1, "result": "a"}]));
    assert!(matches!(
        decode_batch::<String>(&[1, 2], batch),
        Err(Error::MissingResponse(2))
    ));

    let batch = response(json!([
        {"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "boom"}},
    ]));
    match decode_batch::<String>(&[1], batch) {
        Err(Error::Rpc(err)) => assert_eq!(err.message, "boom"),
        other => panic!("unexpected {other:?}"),
    }

    let rejected = response(json!(
        {"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Invalid request"}}
    ));
    assert!(matches!(
        decode_batch::<String>(&[1], rejected),
        Err(Error::Rpc(_))
    ));
}
