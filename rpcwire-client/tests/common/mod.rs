//! Common test utilities for rpcwire-client integration tests
//!
//! Provides an in-memory transport that captures every packet the client
//! sends, so tests can play the remote peer by hand.

#![allow(dead_code)]

use rpcwire_core::{BoxError, PacketSender};
use serde_json::Value;
use tokio::sync::mpsc;

/// Captured outbound packets, in send order
pub struct MockTransport {
    rx: mpsc::UnboundedReceiver<(String, u32)>,
}

impl MockTransport {
    /// Create a sender and the transport observing it
    pub fn new() -> (impl PacketSender<u32> + Clone + 'static, Self) {
        let (tx, rx) = mpsc::unbounded_channel::<(String, u32)>();
        let sender = move |packet: String, context: u32| {
            let tx = tx.clone();
            async move {
                tx.send((packet, context))
                    .map_err(|e| Box::new(e) as BoxError)
            }
        };
        (sender, Self { rx })
    }

    /// Wait for the next packet the client sent, decoded, with its context
    ///
    /// Panics if nothing is sent within five seconds.
    pub async fn next_packet(&mut self) -> (Value, u32) {
        let (packet, context) = tokio::time::timeout(
            tokio::time::Duration::from_secs(5),
            self.rx.recv(),
        )
        .await
        .expect("timed out waiting for a packet")
        .expect("sender dropped");
        (serde_json::from_str(&packet).expect("client sent invalid JSON"), context)
    }

    /// Number of packets sent but not yet consumed
    pub fn queued(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

/// A sender that always fails
pub fn failing_sender() -> impl PacketSender<u32> + 'static {
    |_packet: String, _context: u32| async { Err::<(), BoxError>("connection reset".into()) }
}

/// Helper to create a JSON-RPC result response
pub fn mock_response(id: &Value, result: Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
    .to_string()
}

/// Helper to create a JSON-RPC error response
pub fn mock_error_response(id: &Value, code: i64, message: &str, data: Option<Value>) -> String {
    let mut error = serde_json::json!({
        "code": code,
        "message": message
    });
    if let Some(data) = data {
        error["data"] = data;
    }
    serde_json::json!({
        "jsonrpc": "2.0",
        "error": error,
        "id": id
    })
    .to_string()
}
