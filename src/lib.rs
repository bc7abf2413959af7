//! rpcwire - transport-agnostic JSON-RPC 2.0
//!
//! This is the main convenience crate that re-exports all rpcwire sub-crates
//! and adds the duplex peer that combines them.
//!
//! # Architecture
//!
//! rpcwire is organized into modular crates:
//!
//! - **rpcwire-core**: Core types, validators, codec, error taxonomy, observability
//! - **rpcwire-client**: Call engine correlating responses with pending calls
//! - **rpcwire-server**: Dispatch engine routing requests to handlers
//!
//! None of them owns a transport. Inbound packets are handed to an engine as
//! strings; outbound packets leave through a caller-supplied
//! [`PacketSender`](core::PacketSender) together with an opaque context value
//! (a connection id, a socket handle, anything `Clone`).
//!
//! # Quick Start
//!
//! ```rust
//! use rpcwire::server::{from_typed_fn, Router};
//! use rpcwire::core::BoxError;
//! use rpcwire::Duplex;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i32, b: i32 }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rpcwire::core::Result<()> {
//! let mut router = Router::new();
//! router.register("add", from_typed_fn(|p: AddParams, _conn: u64| async move {
//!     Ok(p.a + p.b)
//! }));
//!
//! let peer = Duplex::new(router, |packet: String, conn: u64| async move {
//!     // write `packet` to connection `conn`
//!     let _ = (packet, conn);
//!     Ok::<(), BoxError>(())
//! });
//!
//! // Feed every inbound packet, request or response, to the peer
//! peer.ingest_packet(r#"{"jsonrpc":"2.0","method":"add","params":{"a":1,"b":2},"id":1}"#, 7)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod duplex;

pub use rpcwire_client as client;
pub use rpcwire_core as core;
pub use rpcwire_server as server;

pub use duplex::Duplex;
pub use rpcwire_client::Client;
pub use rpcwire_server::Server;
