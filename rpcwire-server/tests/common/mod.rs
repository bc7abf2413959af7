//! Common test utilities for rpcwire-server integration tests
//!
//! Provides a sender that records every packet the server emits, so tests
//! can assert on the exact bytes sent back to the peer.

#![allow(dead_code)]

use rpcwire_core::{BoxError, PacketSender};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Packets sent by a server, in send order, with their context
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<(String, u32)>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender appending to this recorder
    pub fn sender(&self) -> impl PacketSender<u32> + 'static {
        let sent = Arc::clone(&self.sent);
        move |packet: String, context: u32| {
            let sent = Arc::clone(&sent);
            async move {
                sent.lock().unwrap().push((packet, context));
                Ok::<(), BoxError>(())
            }
        }
    }

    /// Raw packets sent so far
    pub fn packets(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Contexts the packets were sent with
    pub fn contexts(&self) -> Vec<u32> {
        self.sent.lock().unwrap().iter().map(|(_, c)| *c).collect()
    }

    /// The only packet sent, decoded
    ///
    /// Panics unless exactly one packet was sent.
    pub fn single(&self) -> Value {
        let packets = self.packets();
        assert_eq!(packets.len(), 1, "expected exactly one packet, got {:?}", packets);
        serde_json::from_str(&packets[0]).expect("server sent invalid JSON")
    }
}

/// A sender that always fails
pub fn failing_sender() -> impl PacketSender<u32> + 'static {
    |_packet: String, _context: u32| async { Err::<(), BoxError>("connection reset".into()) }
}

/// Helper to create a JSON-RPC request packet
pub fn request_packet(method: &str, params: Option<Value>, id: Value) -> String {
    let mut request = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "id": id
    });
    if let Some(params) = params {
        request["params"] = params;
    }
    request.to_string()
}
