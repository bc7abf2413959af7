//! Duplex peer: one endpoint acting as both call engine and dispatch engine
//!
//! Many transports carry requests in both directions over the same channel.
//! A [`Duplex`] owns a [`Client`] and a [`Server`] that share one sender and
//! routes every inbound packet to whichever of the two it belongs to.

use rpcwire_client::Client;
use rpcwire_core::{codec, validate, Error, MessageKind, PacketSender, Params, Result};
use rpcwire_server::{Router, Server};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Both JSON-RPC roles over one channel
///
/// Cloning is cheap; clones share pending calls, handlers and the sender.
pub struct Duplex<C> {
    client: Client<C>,
    server: Server<C>,
}

impl<C> Clone for Duplex<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            server: self.server.clone(),
        }
    }
}

impl<C: Clone + Send + Sync + 'static> Duplex<C> {
    /// Create a peer answering requests with `router` and sending through `sender`
    pub fn new(router: Router<C>, sender: impl PacketSender<C> + 'static) -> Self {
        let sender: Arc<dyn PacketSender<C>> = Arc::new(sender);
        Self {
            client: Client::from_shared(Arc::clone(&sender)),
            server: Server::from_shared(router, sender),
        }
    }

    /// Assemble a peer from engines configured separately
    ///
    /// The two engines normally share one sender; nothing here enforces it.
    pub fn from_parts(client: Client<C>, server: Server<C>) -> Self {
        Self { client, server }
    }

    pub fn client(&self) -> &Client<C> {
        &self.client
    }

    pub fn server(&self) -> &Server<C> {
        &self.server
    }

    /// Handle a single inbound packet of either kind
    ///
    /// Requests go to the server with the original packet, responses to the
    /// client. Nothing is sent for a packet that is neither.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidDuplexPacket` if the packet is not JSON, or is JSON
    ///   but neither a request nor a response
    /// - whatever [`Server::ingest_request`] or [`Client::ingest_response`]
    ///   returns for the packet
    #[tracing::instrument(skip(self, packet, context))]
    pub async fn ingest_packet(&self, packet: &str, context: C) -> Result<()> {
        let value = codec::decode(packet).map_err(|_| {
            tracing::warn!("Received undecodable duplex packet");
            Error::InvalidDuplexPacket(packet.to_string())
        })?;

        match validate::classify(&value) {
            Some(MessageKind::Request) => self.server.ingest_request(packet, context).await,
            Some(MessageKind::ResultResponse | MessageKind::ErrorResponse) => {
                self.client.ingest_response(packet).await
            }
            None => {
                tracing::warn!(packet = %value, "Packet is neither request nor response");
                Err(Error::InvalidDuplexPacket(value.to_string()))
            }
        }
    }

    /// Perform a call through the owned client
    pub async fn call(&self, method: &str, params: Option<Params>, context: C) -> Result<Value> {
        self.client.call(method, params, context).await
    }

    /// Typed call through the owned client, see [`Client::request`]
    pub async fn request<P, R>(&self, method: &str, params: P, context: C) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.client.request(method, params, context).await
    }
}
