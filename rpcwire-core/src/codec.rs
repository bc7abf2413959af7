//! Codec for JSON-RPC packets
//!
//! Packets are UTF-8 text holding exactly one JSON object. Decoding happens
//! in two steps: the text is parsed into a `serde_json::Value`, then the
//! value is classified with [`crate::validate`] and converted into a typed
//! message. Keeping the steps apart lets each engine report its own failure
//! for each stage (a server answers with a Parse error or an Invalid Request
//! error, a client raises a local invalid-response condition).
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_core::{codec, Id, Request};
//!
//! let request = Request::new("ping", None, Id::from(1i64));
//! let json = codec::encode_request(&request).unwrap();
//! assert_eq!(json, r#"{"jsonrpc":"2.0","method":"ping","id":1}"#);
//!
//! let value = codec::decode(&json).unwrap();
//! assert_eq!(Request::from_value(value), Some(request));
//! ```

use crate::error::{Error, HandledError, Result};
use crate::types::{Request, Response};
use crate::validate::{self, MessageKind};
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable message to a JSON string
///
/// # Errors
///
/// Returns `Error::Serialization` if the message cannot be serialized.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request packet
pub fn encode_request(req: &Request) -> Result<String> {
    encode(req)
}

/// Encode a response packet
pub fn encode_response(resp: &Response) -> Result<String> {
    encode(resp)
}

/// Decode a packet into an untyped JSON value
///
/// # Errors
///
/// Returns a Parse error (-32700) carrying the raw packet when the text is
/// not valid JSON.
pub fn decode(data: &str) -> Result<Value> {
    serde_json::from_str(data).map_err(|_e| Error::Handled(HandledError::parse_error(data)))
}

/// A decoded and classified packet
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Request(Request),
    Response(Response),
}

impl Message {
    /// Classify and convert a decoded value
    ///
    /// Returns `None` when the value is neither request- nor response-shaped.
    pub fn from_value(value: Value) -> Option<Self> {
        match validate::classify(&value)? {
            MessageKind::Request => Request::from_value(value).map(Message::Request),
            MessageKind::ResultResponse | MessageKind::ErrorResponse => {
                Response::from_value(value).map(Message::Response)
            }
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{Id, Params};
    use serde_json::json;

    #[test]
    fn test_encode_request_with_params() {
        let params = Params::from_value(json!({"id": 5})).unwrap();
        let req = Request::new("getUser", Some(params), Id::from("abc"));
        assert_eq!(
            encode_request(&req).unwrap(),
            r#"{"jsonrpc":"2.0","method":"getUser","params":{"id":5},"id":"abc"}"#
        );
    }

    #[test]
    fn test_encode_result_response() {
        let resp = Response::success(json!(6), Id::from("some-uuid"));
        assert_eq!(
            encode_response(&resp).unwrap(),
            r#"{"jsonrpc":"2.0","result":6,"id":"some-uuid"}"#
        );
    }

    #[test]
    fn test_decode_invalid_json_is_parse_error() {
        let err = decode("This is not a valid request").unwrap_err();
        let handled = err.as_handled().unwrap();
        assert_eq!(handled.kind(), ErrorKind::Parse);
        assert_eq!(handled.data, Some(json!("This is not a valid request")));
    }

    #[test]
    fn test_message_classification() {
        let request = decode(r#"{"jsonrpc":"2.0","method":"m","params":[1],"id":1}"#).unwrap();
        assert!(Message::from_value(request).unwrap().is_request());

        let response = decode(r#"{"jsonrpc":"2.0","result":"jsc","id":"a"}"#).unwrap();
        assert!(Message::from_value(response).unwrap().is_response());

        let neither = decode(r#"{"not":5}"#).unwrap();
        assert!(Message::from_value(neither).is_none());
    }
}
