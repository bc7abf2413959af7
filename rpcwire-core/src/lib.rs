//! Core JSON-RPC 2.0 types, validators and error taxonomy for rpcwire
//!
//! This crate holds everything the client, server and duplex engines share:
//!
//! - **Types**: requests, responses and ids
//! - **Validators**: predicates deciding whether a decoded value is wire-legal
//! - **Error handling**: the protocol error taxonomy plus local failure conditions
//! - **Codec**: packet encoding and decoding
//! - **Sender**: the trait a transport implements to push packets
//! - **Observability**: tracing and OpenTelemetry setup
//!
//! # Architecture
//!
//! rpcwire is transport-agnostic. Engines receive packets as strings from
//! whatever channel hosts them and hand outbound packets to a caller-supplied
//! [`PacketSender`]. Sockets, pipes and in-process queues all work the same.
//!
//! # Example
//!
//! ```rust
//! use rpcwire_core::{codec, validate, Id, Request};
//!
//! let request = Request::new("add", None, Id::from(1i64));
//! let json = codec::encode_request(&request).unwrap();
//!
//! let value = codec::decode(&json).unwrap();
//! assert!(validate::is_request(&value));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod send;
pub mod types;
pub mod validate;

pub use codec::Message;
pub use error::{BoxError, Error, ErrorKind, HandledError, Result};
pub use observability::{init_observability, ObservabilityConfig};
pub use send::PacketSender;
pub use types::{ErrorResponse, Id, Params, Request, Response, ResultResponse, JSONRPC_VERSION};
pub use validate::MessageKind;
