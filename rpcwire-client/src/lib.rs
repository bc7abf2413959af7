//! JSON-RPC 2.0 call engine for rpcwire
//!
//! This crate provides the client role: it issues calls through an injected
//! packet sender and matches the responses that the hosting transport feeds
//! back in.
//!
//! # Features
//!
//! - **Correlation**: every call gets a UUID id and its own pending slot;
//!   responses may arrive in any order
//! - **Typed calls**: `request()` serializes params and deserializes results
//! - **Error taxonomy**: remote error responses surface as `HandledError`s
//!   with the peer's code, message and data
//! - **Observability**: tracing spans and optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rpcwire_client::Client;
//! use rpcwire_core::BoxError;
//!
//! # async fn example() -> rpcwire_core::Result<()> {
//! let client = Client::new(|packet: String, _conn: u64| async move {
//!     // write `packet` to your socket here
//!     let _ = packet;
//!     Ok::<(), BoxError>(())
//! });
//!
//! // Elsewhere, the transport's read loop feeds responses back:
//! // client.ingest_response(&incoming).await?;
//!
//! let user: serde_json::Value = client.request("getUser", serde_json::json!({"id": 5}), 1).await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

mod client;
mod client_builder;
mod metrics;
mod request;

pub use client::Client;
pub use client_builder::ClientBuilder;
pub use metrics::ClientMetrics;
