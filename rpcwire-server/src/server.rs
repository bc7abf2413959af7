//! Dispatch engine: answers inbound requests through the router
//!
//! A [`Server`] never reads from a transport. The host delivers each inbound
//! request packet through [`Server::ingest_request`], together with a context
//! value identifying where it came from. Exactly one response packet leaves
//! through the injected [`PacketSender`] for every ingested packet, carrying
//! the same context.
//!
//! # Error reporting
//!
//! - Undecodable packet: parse error, id `null`, data is the raw packet
//! - Decoded but not a request: invalid request, id `null`, data is the value
//! - Unknown method: method not found, data is the method name
//! - Handler returned `Error::Handled`: sent verbatim
//! - Handler returned any other error: internal error sent, then the original
//!   error is returned to the caller of `ingest_request`

use crate::builder::ServerBuilder;
use crate::metrics::ServerMetrics;
use crate::router::Router;
use rpcwire_core::{
    codec, validate, Error, ErrorKind, HandledError, Id, PacketSender, Request, Response, Result,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC dispatch engine
///
/// Cloning is cheap; clones share the router, sender and metrics.
pub struct Server<C> {
    pub(crate) router: Router<C>,
    pub(crate) sender: Arc<dyn PacketSender<C>>,
    pub(crate) metrics: Option<Arc<ServerMetrics>>,
}

impl<C> Clone for Server<C> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            sender: Arc::clone(&self.sender),
            metrics: self.metrics.clone(),
        }
    }
}

impl<C: Clone + Send + Sync + 'static> Server<C> {
    /// Create a server answering through `sender`
    pub fn new(router: Router<C>, sender: impl PacketSender<C> + 'static) -> Self {
        Self::from_shared(router, Arc::new(sender))
    }

    /// Create a server around an already shared sender
    pub fn from_shared(router: Router<C>, sender: Arc<dyn PacketSender<C>>) -> Self {
        Self {
            router,
            sender,
            metrics: None,
        }
    }

    /// Start configuring a server
    pub fn builder() -> ServerBuilder<C> {
        ServerBuilder::new()
    }

    pub fn router(&self) -> &Router<C> {
        &self.router
    }

    /// Handle a single inbound request packet
    ///
    /// # Errors
    ///
    /// - `Error::Transport` if the response could not be sent
    /// - the handler's own error, after an internal error response was sent,
    ///   when the handler failed with anything other than `Error::Handled`
    ///
    /// Protocol failures (parse, shape, unknown method, handled errors) are
    /// answered on the wire and return `Ok(())`.
    #[tracing::instrument(
        skip(self, packet, context),
        fields(method = tracing::field::Empty, id = tracing::field::Empty)
    )]
    pub async fn ingest_request(&self, packet: &str, context: C) -> Result<()> {
        let start = Instant::now();
        let mut id = Id::Null;
        let mut method = None;

        let outcome = self
            .dispatch(packet, context.clone(), &mut id, &mut method)
            .await;
        let method = method.as_deref().unwrap_or("unknown");

        match outcome {
            Ok(result) => {
                self.send_response(Response::success(result, id), context)
                    .await?;
                self.record(method, "success", start, None);
                Ok(())
            }
            Err(Error::Handled(error)) => {
                tracing::debug!(id = %id, code = error.code, "Answering with handled error");
                let kind = error.kind();
                self.send_response(Response::error(error, id), context)
                    .await?;
                self.record(method, "error", start, Some(kind));
                Ok(())
            }
            Err(failure) => {
                tracing::error!(id = %id, error = %failure, "Handler failed");
                let response = Response::error(HandledError::internal_error(), id);
                if let Err(e) = self.send_response(response, context).await {
                    tracing::error!(error = %e, "Failed to send internal error response");
                }
                self.record(method, "error", start, Some(ErrorKind::Internal));
                Err(failure)
            }
        }
    }

    /// Decode, validate and route one packet
    ///
    /// `id` and `method` are filled in as soon as they are known, so the
    /// response can be addressed even when a later step fails.
    async fn dispatch(
        &self,
        packet: &str,
        context: C,
        id: &mut Id,
        method: &mut Option<String>,
    ) -> Result<Value> {
        let value = codec::decode(packet)?;

        if !validate::is_request(&value) {
            return Err(HandledError::invalid_request(value).into());
        }
        let request: Request = serde_json::from_value(value)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let span = tracing::Span::current();
        span.record("method", request.method.as_str());
        span.record("id", tracing::field::display(&request.id));

        *id = request.id;
        let method = method.insert(request.method);
        self.router.route(method, request.params, context).await
    }

    async fn send_response(&self, response: Response, context: C) -> Result<()> {
        let packet = codec::encode_response(&response)?;
        tracing::debug!(packet = %packet, "Sending response");
        self.sender
            .send(packet, context)
            .await
            .map_err(Error::Transport)
    }

    fn record(&self, method: &str, status: &str, start: Instant, error: Option<ErrorKind>) {
        let Some(ref m) = self.metrics else {
            return;
        };
        m.record_request(method, status, start.elapsed().as_secs_f64());
        if let Some(kind) = error {
            m.record_error(error_type(kind));
        }
    }
}

fn error_type(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Parse => "parse_error",
        ErrorKind::InvalidRequest => "invalid_request",
        ErrorKind::MethodNotFound => "method_not_found",
        ErrorKind::InvalidParams => "invalid_params",
        ErrorKind::Internal => "internal_error",
        ErrorKind::Other(_) => "application",
    }
}
