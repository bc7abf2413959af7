//! Packet sender abstraction
//!
//! rpcwire never owns a transport. Whoever hosts an engine supplies a
//! [`PacketSender`] that pushes one encoded packet onto the channel: a socket
//! write, a pipe, an in-process queue. The engines call it exactly once per
//! outbound packet and propagate its failure to the operation that
//! triggered the send.
//!
//! Plain async closures implement the trait:
//!
//! ```rust
//! use rpcwire_core::{BoxError, PacketSender};
//!
//! let sender = |packet: String, conn_id: u64| async move {
//!     println!("[{conn_id}] -> {packet}");
//!     Ok::<(), BoxError>(())
//! };
//!
//! fn assert_sender<S: PacketSender<u64>>(_: &S) {}
//! assert_sender(&sender);
//! ```

use crate::error::BoxError;
use async_trait::async_trait;
use std::future::Future;

/// Sends a single encoded packet across the transport
///
/// `C` is the caller-defined context threaded through every operation,
/// typically identifying the logical connection.
#[async_trait]
pub trait PacketSender<C>: Send + Sync {
    async fn send(&self, packet: String, context: C) -> Result<(), BoxError>;
}

#[async_trait]
impl<C, F, Fut> PacketSender<C> for F
where
    C: Send + 'static,
    F: Fn(String, C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    async fn send(&self, packet: String, context: C) -> Result<(), BoxError> {
        (self)(packet, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_closure_sender() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let log = sent.clone();
        let sender = move |packet: String, context: u32| {
            let log = log.clone();
            async move {
                log.lock().await.push((packet, context));
                Ok::<(), BoxError>(())
            }
        };

        sender.send("hello".to_string(), 7).await.unwrap();
        assert_eq!(sent.lock().await.as_slice(), &[("hello".to_string(), 7)]);
    }

    #[tokio::test]
    async fn test_closure_sender_failure() {
        let sender = |_packet: String, _context: ()| async {
            Err::<(), BoxError>("pipe closed".into())
        };

        let err = sender.send("x".to_string(), ()).await.unwrap_err();
        assert_eq!(err.to_string(), "pipe closed");
    }
}
