//! Wire-shape validators
//!
//! Pure predicates that classify an already decoded `serde_json::Value` as a
//! request, a result response or an error response. They are the single
//! source of truth for what a legal packet looks like: every inbound packet
//! is run through [`is_request`] or [`is_response`] before any typed
//! conversion happens.
//!
//! Decoding itself is the caller's concern; a string that is not JSON never
//! reaches these functions.
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_core::validate::{classify, MessageKind};
//! use serde_json::json;
//!
//! let value = json!({"jsonrpc": "2.0", "result": 42, "id": 1});
//! assert_eq!(classify(&value), Some(MessageKind::ResultResponse));
//! assert_eq!(classify(&json!({"not": 5})), None);
//! ```

use crate::types::JSONRPC_VERSION;
use serde_json::Value;

/// Shape of a classified message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    ResultResponse,
    ErrorResponse,
}

/// True iff the value is a string, a number or null
pub fn is_id(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Null)
}

/// Shape shared by every message: an object with the version marker and an id
///
/// A missing `id` is not an id; notifications are not supported.
pub fn is_base_message(value: &Value) -> bool {
    let Some(record) = value.as_object() else {
        return false;
    };
    if record.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return false;
    }
    record.get("id").is_some_and(is_id)
}

/// Request shape: base message, string `method`, `params` absent or structured
///
/// An explicit `"params": null` is rejected while an absent `params` is
/// accepted. Existing peers rely on this distinction.
pub fn is_request(value: &Value) -> bool {
    if !is_base_message(value) {
        return false;
    }
    let Some(record) = value.as_object() else {
        return false;
    };
    if !record.get("method").is_some_and(Value::is_string) {
        return false;
    }
    match record.get("params") {
        None => true,
        Some(params) => params.is_array() || params.is_object(),
    }
}

/// Result response shape: base message with `result` present and no `error`
pub fn is_result_response(value: &Value) -> bool {
    if !is_base_message(value) {
        return false;
    }
    let Some(record) = value.as_object() else {
        return false;
    };
    record.contains_key("result") && !record.contains_key("error")
}

/// Error response shape: base message with a well-formed `error` and no `result`
///
/// `error.code` must be a number, integral or not, and `error.message` must
/// be a string.
pub fn is_error_response(value: &Value) -> bool {
    if !is_base_message(value) {
        return false;
    }
    let Some(record) = value.as_object() else {
        return false;
    };
    if record.contains_key("result") {
        return false;
    }
    let Some(error) = record.get("error").and_then(Value::as_object) else {
        return false;
    };
    let code_ok = error.get("code").is_some_and(Value::is_number);
    code_ok && error.get("message").is_some_and(Value::is_string)
}

/// True iff the value is either response shape
pub fn is_response(value: &Value) -> bool {
    is_result_response(value) || is_error_response(value)
}

/// Classify a decoded value
///
/// Requests are checked first, mirroring how a duplex peer routes packets.
pub fn classify(value: &Value) -> Option<MessageKind> {
    if is_request(value) {
        Some(MessageKind::Request)
    } else if is_result_response(value) {
        Some(MessageKind::ResultResponse)
    } else if is_error_response(value) {
        Some(MessageKind::ErrorResponse)
    } else {
        None
    }
}
