//! Method dispatch table
//!
//! The router maps method names to handlers. It is built once and then
//! shared: clones are cheap (`Arc`-based) and registering on a clone does not
//! affect routers that were cloned earlier.
//!
//! # Examples
//!
//! ```rust
//! use rpcwire_server::{from_fn, Router};
//!
//! let mut router: Router<()> = Router::new();
//!
//! router.register("ping", from_fn(|_, _| async {
//!     Ok(serde_json::json!({"pong": true}))
//! }));
//!
//! router.register("echo", from_fn(|params, _| async move {
//!     Ok(params.map(serde_json::Value::from).unwrap_or_default())
//! }));
//!
//! assert!(router.has_method("echo"));
//! ```

use crate::handler::Handler;
use rpcwire_core::{HandledError, Params, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Router for JSON-RPC methods
pub struct Router<C> {
    handlers: Arc<HashMap<String, Arc<dyn Handler<C>>>>,
}

impl<C> Clone for Router<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<C> Router<C> {
    /// Create a new empty router
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(HashMap::new()),
        }
    }

    /// Register a handler for a method, replacing any previous one
    pub fn register(&mut self, method: impl Into<String>, handler: Box<dyn Handler<C>>) {
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.insert(method.into(), Arc::from(handler));
    }

    pub fn get(&self, method: &str) -> Option<Arc<dyn Handler<C>>> {
        self.handlers.get(method).cloned()
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    pub fn methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Invoke the handler registered for `method`
    ///
    /// # Errors
    ///
    /// A method-not-found handled error (carrying the method name) when no
    /// handler is registered, otherwise whatever the handler returns.
    pub async fn route(&self, method: &str, params: Option<Params>, context: C) -> Result<Value> {
        let handler = self
            .get(method)
            .ok_or_else(|| HandledError::method_not_found(method))?;

        handler.handle(params, context).await
    }
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating routers
pub struct RouterBuilder<C> {
    router: Router<C>,
}

impl<C> RouterBuilder<C> {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn handler(mut self, method: impl Into<String>, handler: Box<dyn Handler<C>>) -> Self {
        self.router.register(method, handler);
        self
    }

    pub fn build(self) -> Router<C> {
        self.router
    }
}

impl<C> Default for RouterBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
