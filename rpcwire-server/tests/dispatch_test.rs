//! Request dispatch integration tests
//!
//! Every test ingests one packet and asserts on the exact response packet
//! the server hands to its sender.

mod common;

use common::{failing_sender, request_packet, RecordingSender};
use rpcwire_core::{Error, HandledError};
use rpcwire_server::{from_fn, from_typed_fn, Router, Server};
use serde::Deserialize;
use serde_json::{json, Value};

fn test_router() -> Router<u32> {
    let mut router = Router::new();
    router.register(
        "sum",
        from_typed_fn(|numbers: Vec<i64>, _ctx: u32| async move {
            Ok(numbers.iter().sum::<i64>())
        }),
    );
    router.register(
        "explode",
        from_fn(|_, _ctx: u32| async { Err(Error::handler("boom")) }),
    );
    router.register(
        "refuse",
        from_fn(|_, _ctx: u32| async {
            Err(HandledError::with_data(31415, "everything went wrong", json!([1, 2, 3])).into())
        }),
    );
    router.register(
        "whoami",
        from_fn(|_, ctx: u32| async move { Ok(json!({"connection": ctx})) }),
    );
    router
}

fn test_server() -> (Server<u32>, RecordingSender) {
    let recorder = RecordingSender::new();
    let server = Server::new(test_router(), recorder.sender());
    (server, recorder)
}

#[tokio::test]
async fn test_result_response() {
    let (server, recorder) = test_server();

    server
        .ingest_request(
            &request_packet("sum", Some(json!([1, 2, 3])), json!("some-uuid")),
            1,
        )
        .await
        .unwrap();

    assert_eq!(
        recorder.packets(),
        vec![r#"{"jsonrpc":"2.0","result":6,"id":"some-uuid"}"#.to_string()]
    );
}

#[tokio::test]
async fn test_method_not_found() {
    let (server, recorder) = test_server();

    server
        .ingest_request(&request_packet("doesntExist", None, json!(5)), 1)
        .await
        .unwrap();

    assert_eq!(
        recorder.packets(),
        vec![
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found","data":"doesntExist"},"id":5}"#
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_unplanned_failure_sends_internal_error_and_returns_original() {
    let (server, recorder) = test_server();

    let err = server
        .ingest_request(&request_packet("explode", None, json!(5)), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Handler(_)));
    assert!(err.to_string().contains("boom"));
    assert_eq!(
        recorder.packets(),
        vec![r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"},"id":5}"#.to_string()]
    );
}

#[tokio::test]
async fn test_parse_error() {
    let (server, recorder) = test_server();

    server
        .ingest_request("This is not a valid request", 1)
        .await
        .unwrap();

    assert_eq!(
        recorder.packets(),
        vec![
            r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error","data":"This is not a valid request"},"id":null}"#
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_invalid_request_carries_decoded_value() {
    let (server, recorder) = test_server();
    let bogus = json!({"jsonrpc": "2.0", "method": 5, "id": 1});

    server.ingest_request(&bogus.to_string(), 1).await.unwrap();

    let response = recorder.single();
    assert_eq!(response["error"]["code"], json!(-32600));
    assert_eq!(response["error"]["message"], json!("Invalid Request"));
    assert_eq!(response["error"]["data"], bogus);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn test_request_without_id_is_invalid() {
    let (server, recorder) = test_server();

    server
        .ingest_request(r#"{"jsonrpc":"2.0","method":"sum","params":[1]}"#, 1)
        .await
        .unwrap();

    assert_eq!(recorder.single()["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn test_handled_error_sent_verbatim() {
    let (server, recorder) = test_server();

    server
        .ingest_request(&request_packet("refuse", None, json!(7)), 1)
        .await
        .unwrap();

    assert_eq!(
        recorder.packets(),
        vec![
            r#"{"jsonrpc":"2.0","error":{"code":31415,"message":"everything went wrong","data":[1,2,3]},"id":7}"#
                .to_string()
        ]
    );
}

#[derive(Deserialize)]
struct GetUser {
    id: u64,
}

#[tokio::test]
async fn test_typed_params_mismatch_is_invalid_params() {
    let mut router = Router::new();
    router.register(
        "getUser",
        from_typed_fn(|p: GetUser, _ctx: u32| async move { Ok(p.id) }),
    );
    let recorder = RecordingSender::new();
    let server = Server::new(router, recorder.sender());

    server
        .ingest_request(
            &request_packet("getUser", Some(json!({"name": "jsc"})), json!(3)),
            1,
        )
        .await
        .unwrap();

    let response = recorder.single();
    assert_eq!(response["error"]["code"], json!(-32602));
    assert_eq!(response["error"]["message"], json!("Invalid params"));
    assert_eq!(response["error"]["data"], json!({"name": "jsc"}));
    assert_eq!(response["id"], json!(3));
}

#[tokio::test]
async fn test_context_reaches_handler_and_sender() {
    let (server, recorder) = test_server();

    server
        .ingest_request(&request_packet("whoami", None, json!(1)), 42)
        .await
        .unwrap();
    server
        .ingest_request(&request_packet("whoami", None, json!(2)), 43)
        .await
        .unwrap();

    assert_eq!(recorder.contexts(), vec![42, 43]);
    let first: Value = serde_json::from_str(&recorder.packets()[0]).unwrap();
    assert_eq!(first["result"], json!({"connection": 42}));
}

#[tokio::test]
async fn test_send_failure_is_transport_error() {
    let server = Server::new(test_router(), failing_sender());

    let err = server
        .ingest_request(&request_packet("sum", Some(json!([1])), json!(1)), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_unplanned_failure_survives_failed_internal_error_send() {
    let server = Server::new(test_router(), failing_sender());

    let err = server
        .ingest_request(&request_packet("explode", None, json!(5)), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Handler(_)));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let (server, recorder) = test_server();

    let mut handles = Vec::new();
    for i in 0..10u32 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            server
                .ingest_request(&request_packet("sum", Some(json!([i, i])), json!(i)), i)
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let packets = recorder.packets();
    assert_eq!(packets.len(), 10);
    for packet in packets {
        let response: Value = serde_json::from_str(&packet).unwrap();
        let id = response["id"].as_i64().unwrap();
        assert_eq!(response["result"], json!(id * 2));
    }
}
