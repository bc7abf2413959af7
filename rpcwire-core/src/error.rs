//! Error types for rpcwire
//!
//! Two disjoint error families exist:
//!
//! - **HandledError**: wire-representable errors as defined by JSON-RPC 2.0.
//!   These are the only errors ever serialized into an error response,
//!   and the only errors a remote peer can make a call fail with.
//! - **Error**: everything that can go wrong locally, wrapping `HandledError`
//!   as one of its variants (uses thiserror).
//!
//! # Reserved Error Codes
//!
//! JSON-RPC 2.0 reserves five codes, each with its own constructor and
//! default message:
//! - `-32700`: Parse error
//! - `-32600`: Invalid Request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! Any other code is carried verbatim as [`ErrorKind::Other`].
//!
//! # Local Conditions
//!
//! `InvalidResponse`, `UnmatchedResponse` and `InvalidDuplexPacket` are never
//! put on the wire. They fail the ingestion call that detected them.
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_core::{ErrorKind, HandledError};
//!
//! let error = HandledError::method_not_found("unknownMethod");
//! assert_eq!(error.code, -32601);
//! assert_eq!(error.kind(), ErrorKind::MethodNotFound);
//! ```

use crate::types::Id;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Result type for rpcwire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for transport and handler failures of arbitrary type
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid JSON was received
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist or is not available
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters
pub const INVALID_PARAMS: i64 = -32602;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i64 = -32603;

/// Application-level error type for rpcwire operations
#[derive(Debug, Error)]
pub enum Error {
    /// Protocol error that can be represented on the wire
    #[error("JSON-RPC error: {0}")]
    Handled(#[from] HandledError),

    /// A response packet could not be decoded or is not response-shaped
    #[error("Invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    /// A response carried an id that belongs to no pending call
    #[error("The JSON-RPC response {0} could not be matched with its request")]
    UnmatchedResponse(Id),

    /// A duplex packet was neither a request nor a response
    #[error("Invalid JSON-RPC duplex packet: {0}")]
    InvalidDuplexPacket(String),

    /// The injected packet sender failed
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// A value could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The call engine went away before the response for this id arrived
    #[error("Call {0} abandoned before a response arrived")]
    CallAbandoned(Id),

    /// A handler failed with an error outside the protocol taxonomy
    #[error("Handler error: {0}")]
    Handler(#[source] BoxError),

    /// An engine could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an arbitrary handler failure
    ///
    /// The server reports these to the peer as an opaque internal error and
    /// hands the original back to the caller of `ingest_request`.
    pub fn handler(error: impl Into<BoxError>) -> Self {
        Error::Handler(error.into())
    }

    /// Wrap a transport failure
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Error::Transport(error.into())
    }

    /// The wire error, if this is one
    pub fn as_handled(&self) -> Option<&HandledError> {
        match self {
            Error::Handled(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Error::Handled(_))
    }
}

/// Classification of a handled error by its code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    Internal,
    /// Any code outside the reserved set
    Other(i64),
}

impl ErrorKind {
    /// Map a wire code onto its kind
    pub fn from_code(code: i64) -> Self {
        match code {
            PARSE_ERROR => ErrorKind::Parse,
            INVALID_REQUEST => ErrorKind::InvalidRequest,
            METHOD_NOT_FOUND => ErrorKind::MethodNotFound,
            INVALID_PARAMS => ErrorKind::InvalidParams,
            INTERNAL_ERROR => ErrorKind::Internal,
            other => ErrorKind::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ErrorKind::Parse => PARSE_ERROR,
            ErrorKind::InvalidRequest => INVALID_REQUEST,
            ErrorKind::MethodNotFound => METHOD_NOT_FOUND,
            ErrorKind::InvalidParams => INVALID_PARAMS,
            ErrorKind::Internal => INTERNAL_ERROR,
            ErrorKind::Other(code) => code,
        }
    }

    /// Default message for the reserved kinds, `None` for [`ErrorKind::Other`]
    pub fn default_message(self) -> Option<&'static str> {
        match self {
            ErrorKind::Parse => Some("Parse error"),
            ErrorKind::InvalidRequest => Some("Invalid Request"),
            ErrorKind::MethodNotFound => Some("Method not found"),
            ErrorKind::InvalidParams => Some("Invalid params"),
            ErrorKind::Internal => Some("Internal error"),
            ErrorKind::Other(_) => None,
        }
    }
}

/// JSON-RPC error object as it appears on the wire
///
/// ```json
/// {"code": -32601, "message": "Method not found", "data": "doesntExist"}
/// ```
///
/// `data` is omitted from the wire when absent. A `data` member that is
/// present but `null` deserializes to `Some(Value::Null)` and is sent back
/// as `"data":null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandledError {
    /// Numeric error code
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,

    /// Short human-readable description
    pub message: String,

    /// Optional additional information
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
}

/// Convert any JSON number into an error code
///
/// Integral values convert exactly, including floats such as `-32000.0`.
/// Other floats truncate toward zero and integers above `i64::MAX` saturate.
fn code_from_number(number: &Number) -> i64 {
    if let Some(code) = number.as_i64() {
        return code;
    }
    if number.is_u64() {
        return i64::MAX;
    }
    // `as` truncates toward zero and saturates at the i64 bounds
    number.as_f64().map_or(0, |code| code as i64)
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Number::deserialize(deserializer).map(|number| code_from_number(&number))
}

// Only called when the member exists, so an explicit null stays `Some`
fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl HandledError {
    /// Create an error without data
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error with data
    pub fn with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    fn reserved(kind: ErrorKind, data: Option<Value>) -> Self {
        Self {
            code: kind.code(),
            message: kind.default_message().unwrap_or_default().to_string(),
            data,
        }
    }

    /// Parse error (-32700) carrying the raw packet that failed to decode
    pub fn parse_error(packet: impl Into<String>) -> Self {
        Self::reserved(ErrorKind::Parse, Some(Value::String(packet.into())))
    }

    /// Invalid Request (-32600) carrying the decoded value
    pub fn invalid_request(request: Value) -> Self {
        Self::reserved(ErrorKind::InvalidRequest, Some(request))
    }

    /// Method not found (-32601) carrying the method name
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::reserved(ErrorKind::MethodNotFound, Some(Value::String(method.into())))
    }

    /// Invalid params (-32602), optionally carrying the rejected parameters
    pub fn invalid_params(params: Option<Value>) -> Self {
        Self::reserved(ErrorKind::InvalidParams, params)
    }

    /// Internal error (-32603) without data
    pub fn internal_error() -> Self {
        Self::reserved(ErrorKind::Internal, None)
    }

    /// Replace the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Build the error a remote error response describes
    ///
    /// Reserved codes map onto their kind, anything else becomes
    /// [`ErrorKind::Other`]. The remote message and data are kept verbatim.
    pub fn from_code(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        let kind = ErrorKind::from_code(code);
        Self::reserved(kind, data).with_message(message)
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code)
    }
}

impl std::fmt::Display for HandledError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for HandledError {}
