//! Handler traits and types for JSON-RPC methods
//!
//! A handler receives the request params (absent when the request carried
//! none) and the caller-supplied context value, and produces either a result
//! value or an error.
//!
//! Returning `Error::Handled` sends that error to the peer verbatim. Any other
//! error is answered with an opaque internal error and returned to whoever
//! called [`crate::Server::ingest_request`].
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_server::{from_fn, from_typed_fn, Handler};
//! use serde::Deserialize;
//!
//! // Raw JSON handler
//! let ping = from_fn(|_params, _ctx: ()| async move {
//!     Ok(serde_json::json!({"pong": true}))
//! });
//!
//! // Typed handler
//! #[derive(Deserialize)]
//! struct AddParams { a: i32, b: i32 }
//!
//! let add = from_typed_fn(|p: AddParams, _ctx: ()| async move {
//!     Ok(p.a + p.b)
//! });
//! # let _ = (ping, add);
//! ```

use rpcwire_core::{Error, HandledError, Params, Result};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by every handler
pub type HandlerResult = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// Trait for JSON-RPC method handlers
///
/// You typically don't implement this trait directly; use [`from_fn`] or
/// [`from_typed_fn`].
pub trait Handler<C>: Send + Sync {
    /// Handle one request for the method this handler is registered under
    fn handle(&self, params: Option<Params>, context: C) -> HandlerResult;
}

/// Handler backed by an async closure over raw params
pub struct AsyncHandler<F> {
    func: F,
}

impl<F> AsyncHandler<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<C, F, Fut> Handler<C> for AsyncHandler<F>
where
    F: Fn(Option<Params>, C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn handle(&self, params: Option<Params>, context: C) -> HandlerResult {
        Box::pin((self.func)(params, context))
    }
}

/// Create a handler from an async function over raw params
pub fn from_fn<C, F, Fut>(func: F) -> Box<dyn Handler<C>>
where
    C: 'static,
    F: Fn(Option<Params>, C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Box::new(AsyncHandler::new(func))
}

/// Create a handler with typed params and result
///
/// Absent params deserialize from `null`, so `()` and `Option<T>` params
/// accept requests without a `params` member. Params that do not deserialize
/// into `P` are answered with an invalid params error carrying the offending
/// params as data.
pub fn from_typed_fn<C, P, R, F, Fut>(func: F) -> Box<dyn Handler<C>>
where
    C: Send + 'static,
    P: serde::de::DeserializeOwned + Send + 'static,
    R: serde::Serialize + Send + 'static,
    F: Fn(P, C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    let func = Arc::new(func);
    from_fn(move |params: Option<Params>, context: C| {
        let func = Arc::clone(&func);
        async move {
            let raw = params.map(Value::from).unwrap_or(Value::Null);
            let typed: P = match serde_json::from_value(raw.clone()) {
                Ok(typed) => typed,
                Err(e) => {
                    tracing::debug!(error = %e, "Params did not match handler signature");
                    let data = (!raw.is_null()).then_some(raw);
                    return Err(HandledError::invalid_params(data).into());
                }
            };

            let result = func(typed, context).await?;
            serde_json::to_value(result).map_err(|e| Error::Serialization(e.to_string()))
        }
    })
}
