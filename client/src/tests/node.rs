//! `RpcClient` against a fake node served by axum.
use crate::{ChainClient, Error, RpcClient};
use axum::{routing::post, Json, Router};
use ckb_jsonrpc_types as json;
use ckb_types::{core, packed, prelude::*, H256};
use serde_json::{json, Value};
use std::time::Duration;

fn sample_tx() -> core::TransactionView {
    core::TransactionBuilder::default()
        .output(packed::CellOutput::new_builder().build())
        .output_data(Default::default())
        .build()
}

fn unknown_hash() -> H256 {
    H256::from([0xee; 32])
}

fn answer(call: &Value) -> Value {
    let id = call["id"].clone();
    let result = match call["method"].as_str() {
        Some("get_tip_header") => {
            let header = core::HeaderBuilder::default()
                .number(42u64.pack())
                .epoch(core::EpochNumberWithFraction::new(0, 42, 1000).pack())
                .build();
            json!(json::HeaderView::from(header))
        }
        Some("get_transaction") => {
            if call["params"][0] == json!(unknown_hash()) {
                Value::Null
            } else {
                json!({
                    "transaction": json::TransactionView::from(sample_tx()),
                    "tx_status": {"status": "committed"},
                })
            }
        }
        Some("send_transaction") if call["params"][1] == json!("passthrough") => {
            json!(H256::from([1u8; 32]))
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32601, "message": "Method not found"},
            })
        }
    };
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

// Batches are answered in reverse order.
async fn node(Json(body): Json<Value>) -> Json<Value> {
    match body {
        Value::Array(calls) => Json(Value::Array(calls.iter().rev().map(answer).collect())),
        call => Json(answer(&call)),
    }
}

async fn start_node() -> RpcClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, Router::new().route("/", post(node)))
            .await
            .expect("serve");
    });
    RpcClient::new(&format!("http://{address}/"), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn test_single_calls() {
    let client = start_node().await;

    let tip = client.get_tip_header().await.expect("tip");
    assert_eq!(tip.inner.number.value(), 42);
    let epoch = core::EpochNumberWithFraction::from_full_value(tip.inner.epoch.value());
    assert_eq!((epoch.number(), epoch.index()), (0, 42));

    let tx = sample_tx();
    let found = client
        .get_transaction(tx.hash().unpack())
        .await
        .expect("get_transaction");
    assert_eq!(found.expect("found").hash, tx.hash().unpack());
    assert!(client
        .get_transaction(unknown_hash())
        .await
        .expect("get_transaction")
        .is_none());

    let hash = client
        .send_transaction(tx.data().into())
        .await
        .expect("send_transaction");
    assert_eq!(hash, H256::from([1u8; 32]));

    match client.get_block_by_number(1).await {
        Err(Error::Rpc(err)) => assert_eq!(err.message, "Method not found"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_keeps_request_order() {
    let client = start_node().await;
    let tx = sample_tx();
    let hashes = vec![unknown_hash(), tx.hash().unpack(), unknown_hash()];
    let found = client.get_transactions(hashes).await.expect("batch");
    assert_eq!(
        found.iter().map(Option::is_some).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert!(client
        .get_transactions(Vec::new())
        .await
        .expect("empty batch")
        .is_empty());
}

#[test]
fn test_invalid_url() {
    assert!(matches!(
        RpcClient::new("not a url", Duration::from_secs(1)),
        Err(Error::InvalidUrl { .. })
    ));
}
