//! Call engine: issues outbound calls and settles them when responses arrive
//!
//! A [`Client`] never reads from a transport. Whoever hosts it delivers each
//! inbound response packet through [`Client::ingest_response`]; outbound
//! requests leave through the injected [`PacketSender`].
//!
//! # Example
//!
//! ```rust
//! use rpcwire_client::Client;
//! use rpcwire_core::BoxError;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rpcwire_core::Result<()> {
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
//! let client = Client::new(move |packet: String, _ctx: ()| {
//!     let tx = tx.clone();
//!     async move { tx.send(packet).map_err(|e| Box::new(e) as BoxError) }
//! });
//!
//! let call = client.call("ping", None, ());
//! let answer = async {
//!     let request: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
//!     let response = json!({"jsonrpc": "2.0", "result": "pong", "id": request["id"]});
//!     client.ingest_response(&response.to_string()).await
//! };
//!
//! let (result, ingested) = tokio::join!(call, answer);
//! ingested?;
//! assert_eq!(result?, json!("pong"));
//! # Ok(())
//! # }
//! ```

use crate::metrics::ClientMetrics;
use crate::request::RequestManager;
use rpcwire_core::{
    codec, validate, Error, HandledError, Id, PacketSender, Params, Request, Response, Result,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC call engine for one logical connection
///
/// Cloning is cheap and every clone shares the same pending-call registry.
pub struct Client<C> {
    pub(crate) sender: Arc<dyn PacketSender<C>>,
    pub(crate) request_manager: RequestManager,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            request_manager: self.request_manager.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<C: Send + 'static> Client<C> {
    /// Create a client that sends packets through `sender`
    pub fn new(sender: impl PacketSender<C> + 'static) -> Self {
        Self::from_shared(Arc::new(sender))
    }

    /// Create a client around an already shared sender
    pub fn from_shared(sender: Arc<dyn PacketSender<C>>) -> Self {
        Self {
            sender,
            request_manager: RequestManager::new(),
            metrics: None,
        }
    }

    /// Start configuring a client
    pub fn builder(sender: impl PacketSender<C> + 'static) -> crate::ClientBuilder<C> {
        crate::ClientBuilder::new(sender)
    }

    /// Perform a single call and wait for its outcome
    ///
    /// The request gets a fresh UUID id and is registered before it is sent.
    /// The returned future settles once a response with that id is ingested.
    ///
    /// # Errors
    ///
    /// - `Error::Handled` with the remote code, message and data when the
    ///   peer answers with an error response
    /// - `Error::Transport` when the sender fails; the pending entry is
    ///   evicted so it cannot leak
    /// - `Error::CallAbandoned` when the client is closed first
    #[tracing::instrument(skip(self, params, context), fields(method = %method))]
    pub async fn call(&self, method: &str, params: Option<Params>, context: C) -> Result<Value> {
        let start = Instant::now();
        let id = self.request_manager.next_id();
        let request = Request::new(method, params, id.clone());
        let packet = codec::encode_request(&request)?;

        let rx = self.request_manager.register(id.clone()).await;

        if let Err(e) = self.sender.send(packet, context).await {
            self.request_manager.evict(&id).await;
            if let Some(ref m) = self.metrics {
                m.record_error("transport");
            }
            tracing::error!(id = %id, error = %e, "Failed to send request");
            return Err(Error::Transport(e));
        }

        tracing::debug!(id = %id, "Request sent, waiting for response");

        let outcome = rx.await.map_err(|_| Error::CallAbandoned(id.clone()))?;
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(method, "success", duration);
                }
                tracing::debug!(id = %id, duration_secs = duration, "Call completed successfully");
            }
            Err(e) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(method, "error", duration);
                    m.record_error("json_rpc");
                }
                tracing::debug!(id = %id, error = %e, "Call failed");
            }
        }

        outcome
    }

    /// Typed variant of [`Client::call`]
    ///
    /// `params` must serialize to an array, an object, or `null` (sent without
    /// params). The result is deserialized into `R`.
    pub async fn request<P, R>(&self, method: &str, params: P, context: C) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = match serde_json::to_value(params)
            .map_err(|e| Error::Serialization(e.to_string()))?
        {
            Value::Null => None,
            value => Some(Params::from_value(value).ok_or_else(|| {
                Error::Serialization("params must serialize to an array or object".to_string())
            })?),
        };

        let result = self.call(method, params, context).await?;
        serde_json::from_value(result).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Handle a single inbound response packet
    ///
    /// The pending entry for the response id is removed before the outcome is
    /// settled, so a second response with the same id is unmatched.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResponse` if the packet is not JSON or not response-shaped
    /// - `Error::UnmatchedResponse` if no call is pending under the response id
    pub async fn ingest_response(&self, packet: &str) -> Result<()> {
        let value = codec::decode(packet).map_err(|_| {
            tracing::warn!("Received undecodable response packet");
            Error::InvalidResponse(packet.to_string())
        })?;

        if !validate::is_response(&value) {
            tracing::warn!(packet = %value, "Received packet that is not a response");
            return Err(Error::InvalidResponse(value.to_string()));
        }
        let response = Response::from_value(value)
            .ok_or_else(|| Error::InvalidResponse(packet.to_string()))?;

        let (id, outcome) = settle(response);
        if self.request_manager.complete(&id, outcome).await {
            tracing::debug!(id = %id, "Response matched");
            Ok(())
        } else {
            if let Some(ref m) = self.metrics {
                m.record_unmatched();
            }
            tracing::warn!(id = %id, "Response matched no pending call");
            Err(Error::UnmatchedResponse(id))
        }
    }

    /// Number of calls still waiting for a response
    pub async fn pending_count(&self) -> usize {
        self.request_manager.pending_count().await
    }

    /// Discard every pending call
    ///
    /// Waiting callers fail with `Error::CallAbandoned`. Use this when the
    /// hosting connection goes away.
    pub async fn close(&self) {
        let abandoned = self.request_manager.abandon_all().await;
        tracing::info!(abandoned = abandoned, "Client closed");
    }
}

/// Turn a response into the id it answers and the outcome for that call
fn settle(response: Response) -> (Id, Result<Value>) {
    match response {
        Response::Result(r) => (r.id, Ok(r.result)),
        Response::Error(e) => {
            let error = HandledError::from_code(e.error.code, e.error.message, e.error.data);
            (e.id, Err(Error::Handled(error)))
        }
    }
}
