//! JSON-RPC 2.0 dispatch engine for rpcwire
//!
//! This crate provides the server role: inbound request packets are decoded,
//! validated and routed to registered handlers, and exactly one response
//! packet per request leaves through an injected packet sender.
//!
//! # Core Features
//!
//! - **Method Routing**: Register handlers for JSON-RPC methods
//! - **Typed Handlers**: `from_typed_fn` deserializes params and serializes results
//! - **Context Threading**: a caller-defined value follows each request into
//!   its handler and onto its response
//! - **Observability**: tracing spans and optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rpcwire_core::BoxError;
//! use rpcwire_server::{from_typed_fn, Server};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i32, b: i32 }
//!
//! # async fn example(incoming: String) -> rpcwire_core::Result<()> {
//! let server = Server::builder()
//!     .handler("add", from_typed_fn(|p: AddParams, _conn: u64| async move {
//!         Ok(p.a + p.b)
//!     }))
//!     .sender(|packet: String, conn: u64| async move {
//!         // write `packet` back to connection `conn`
//!         let _ = (packet, conn);
//!         Ok::<(), BoxError>(())
//!     })
//!     .build()?;
//!
//! // The transport's read loop hands every request packet over:
//! server.ingest_request(&incoming, 1).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod handler;
mod metrics;
mod router;
mod server;

pub use builder::ServerBuilder;
pub use handler::{from_fn, from_typed_fn, AsyncHandler, Handler, HandlerResult};
pub use metrics::ServerMetrics;
pub use router::{Router, RouterBuilder};
pub use server::Server;
