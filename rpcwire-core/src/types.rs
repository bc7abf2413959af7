//! JSON-RPC 2.0 message types
//!
//! This module defines the typed form of every message that can travel over
//! an rpcwire channel. Only two message families exist:
//!
//! - **Request**: a method invocation carrying an id, expecting exactly one response
//! - **Response**: either a result or an error, never both
//!
//! Notifications and batches are deliberately absent, every packet holds
//! exactly one of these objects.
//!
//! # Typed vs. untyped
//!
//! Incoming packets are first decoded to a `serde_json::Value` and classified
//! with the predicates in [`crate::validate`]. The `from_value` constructors
//! below only succeed for values that pass the matching predicate, so a typed
//! `Request` or `Response` is always wire-legal.
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_core::{Id, Params, Request};
//! use serde_json::json;
//!
//! let params = Params::from_value(json!({"user": 5})).unwrap();
//! let request = Request::new("getUser", Some(params), Id::from("abc"));
//! assert_eq!(request.jsonrpc, "2.0");
//! ```

use crate::error::HandledError;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Protocol version marker carried by every message
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request identifier
///
/// Ids correlate a response with the request that caused it. `Id::Null` is
/// reserved for responses to requests whose id could not be determined
/// (parse errors, invalid requests).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier, used for every id the call engine generates
    String(String),
    /// Numeric identifier, integral or not
    Number(Number),
    /// Null identifier
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n.into())
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Number(n.into())
    }
}

impl From<Number> for Id {
    fn from(n: Number) -> Self {
        Id::Number(n)
    }
}

/// Structured request parameters
///
/// JSON-RPC only allows parameters by position (array) or by name (object).
/// Scalars and explicit `null` can never be represented as `Params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Positional parameters
    Array(Vec<Value>),
    /// Named parameters
    Object(Map<String, Value>),
}

impl Params {
    /// Convert a JSON value into parameters
    ///
    /// Returns `None` for anything that is not an array or an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Params::Array(items)),
            Value::Object(map) => Some(Params::Object(map)),
            _ => None,
        }
    }

    /// Convert the parameters back into a plain JSON value
    pub fn into_value(self) -> Value {
        match self {
            Params::Array(items) => Value::Array(items),
            Params::Object(map) => Value::Object(map),
        }
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Name of the method to invoke
    pub method: String,
    /// Optional structured parameters, omitted from the wire when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// Request identifier copied into the response
    pub id: Id,
}

impl Request {
    /// Create a new request with the `"2.0"` version marker
    pub fn new(method: impl Into<String>, params: Option<Params>, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Build a typed request from a decoded value
    ///
    /// Returns `None` unless the value satisfies [`validate::is_request`].
    pub fn from_value(value: Value) -> Option<Self> {
        if !validate::is_request(&value) {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Response variant carrying a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultResponse {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Result value, `null` included
    pub result: Value,
    /// Id of the request being answered
    pub id: Id,
}

/// Response variant carrying an error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Wire error object
    pub error: HandledError,
    /// Id of the request being answered, `null` when it could not be determined
    pub id: Id,
}

/// JSON-RPC 2.0 response
///
/// The two variants are mutually exclusive on the wire: a result response
/// never carries `error` and an error response never carries `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Successful response
    Result(ResultResponse),
    /// Error response
    Error(ErrorResponse),
}

impl Response {
    /// Create a result response
    pub fn success(result: Value, id: Id) -> Self {
        Response::Result(ResultResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            id,
        })
    }

    /// Create an error response
    pub fn error(error: HandledError, id: Id) -> Self {
        Response::Error(ErrorResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error,
            id,
        })
    }

    /// Build a typed response from a decoded value
    ///
    /// Returns `None` unless the value satisfies [`validate::is_response`].
    pub fn from_value(value: Value) -> Option<Self> {
        if validate::is_result_response(&value) {
            serde_json::from_value(value).ok().map(Response::Result)
        } else if validate::is_error_response(&value) {
            serde_json::from_value(value).ok().map(Response::Error)
        } else {
            None
        }
    }

    /// Id of the request this response answers
    pub fn id(&self) -> &Id {
        match self {
            Response::Result(r) => &r.id,
            Response::Error(e) => &e.id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Result(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}
