//! Common test utilities for duplex integration tests

#![allow(dead_code)]

use rpcwire::core::{BoxError, PacketSender};
use serde_json::Value;
use tokio::sync::mpsc;

/// Captured outbound packets, in send order
pub struct MockTransport {
    rx: mpsc::UnboundedReceiver<(String, u32)>,
}

impl MockTransport {
    /// Create a sender and the transport observing it
    pub fn new() -> (impl PacketSender<u32> + 'static, Self) {
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

    /// Wait for the next packet sent, decoded, with its context
    pub async fn next_packet(&mut self) -> (Value, u32) {
        let (packet, context) = tokio::time::timeout(
            tokio::time::Duration::from_secs(5),
            self.rx.recv(),
        )
        .await
        .expect("timed out waiting for a packet")
        .expect("sender dropped");
        (serde_json::from_str(&packet).expect("peer sent invalid JSON"), context)
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
