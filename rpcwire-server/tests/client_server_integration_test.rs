//! Client/server integration tests
//!
//! A call engine and a dispatch engine are wired back to back through two
//! in-memory channels, with pump tasks standing in for the transport.

use rpcwire_client::Client;
use rpcwire_core::{BoxError, Error, ErrorKind};
use rpcwire_server::{from_fn, from_typed_fn, Router, Server};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;

#[derive(Debug, Serialize, Deserialize)]
struct AddParams {
    a: i32,
    b: i32,
}

/// Connect a client to a server, returning the client
fn connect(router: Router<()>) -> Client<()> {
    let (to_server, mut server_rx) = mpsc::unbounded_channel::<String>();
    let (to_client, mut client_rx) = mpsc::unbounded_channel::<String>();

    let client = Client::new(move |packet: String, _: ()| {
        let tx = to_server.clone();
        async move { tx.send(packet).map_err(|e| Box::new(e) as BoxError) }
    });
    let server = Server::new(router, move |packet: String, _: ()| {
        let tx = to_client.clone();
        async move { tx.send(packet).map_err(|e| Box::new(e) as BoxError) }
    });

    tokio::spawn(async move {
        while let Some(packet) = server_rx.recv().await {
            let server = server.clone();
            tokio::spawn(async move {
                let _ = server.ingest_request(&packet, ()).await;
            });
        }
    });

    let inbound = client.clone();
    tokio::spawn(async move {
        while let Some(packet) = client_rx.recv().await {
            let _ = inbound.ingest_response(&packet).await;
        }
    });

    client
}

fn router() -> Router<()> {
    let mut router = Router::new();
    router.register(
        "add",
        from_typed_fn(|p: AddParams, _: ()| async move { Ok(p.a + p.b) }),
    );
    router.register(
        "echo",
        from_fn(|params, _: ()| async move {
            Ok(params.map(serde_json::Value::from).unwrap_or_default())
        }),
    );
    router.register(
        "fail",
        from_fn(|_, _: ()| async { Err(Error::handler("disk on fire")) }),
    );
    router
}

#[tokio::test]
async fn test_typed_round_trip() {
    let client = connect(router());

    let sum: i32 = client
        .request("add", AddParams { a: 5, b: 3 }, ())
        .await
        .unwrap();

    assert_eq!(sum, 8);
    assert_eq!(client.pending_count().await, 0);
}

#[tokio::test]
async fn test_many_concurrent_calls() {
    let client = connect(router());

    let calls = (0..20).map(|i| {
        let client = client.clone();
        async move {
            let echoed: Vec<i32> = client.request("echo", vec![i], ()).await?;
            Ok::<_, Error>((i, echoed))
        }
    });

    for result in futures::future::join_all(calls).await {
        let (i, echoed) = result.unwrap();
        assert_eq!(echoed, vec![i]);
    }
}

#[tokio::test]
async fn test_remote_errors_surface_as_handled() {
    let client = connect(router());

    let err = client.call("nope", None, ()).await.unwrap_err();
    let handled = err.as_handled().expect("expected a handled error");
    assert_eq!(handled.kind(), ErrorKind::MethodNotFound);
    assert_eq!(handled.data, Some(json!("nope")));

    let err = client
        .request::<_, i32>("add", json!({"a": "five"}), ())
        .await
        .unwrap_err();
    assert_eq!(err.as_handled().map(|e| e.kind()), Some(ErrorKind::InvalidParams));

    let err = client.call("fail", None, ()).await.unwrap_err();
    let handled = err.as_handled().expect("expected a handled error");
    assert_eq!(handled.kind(), ErrorKind::Internal);
    assert_eq!(handled.message, "Internal error");
    assert!(handled.data.is_none());
}
