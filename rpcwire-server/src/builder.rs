//! Builder pattern for constructing a [`Server`]
//!
//! ```rust
//! use rpcwire_core::BoxError;
//! use rpcwire_server::{from_typed_fn, ServerBuilder};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AddParams { a: i32, b: i32 }
//!
//! let server = ServerBuilder::new()
//!     .handler("add", from_typed_fn(|p: AddParams, _conn: u64| async move {
//!         Ok(p.a + p.b)
//!     }))
//!     .sender(|_packet: String, _conn: u64| async { Ok::<(), BoxError>(()) })
//!     .build()
//!     .unwrap();
//! assert!(server.router().has_method("add"));
//! ```

use crate::{Handler, Router, Server, ServerMetrics};
use rpcwire_core::{Error, ObservabilityConfig, PacketSender, Result};
use std::sync::Arc;

/// Builder for [`Server`]
pub struct ServerBuilder<C> {
    router: Router<C>,
    sender: Option<Arc<dyn PacketSender<C>>>,
    observability_config: Option<ObservabilityConfig>,
    metrics: Option<Arc<ServerMetrics>>,
    service_name: Option<String>,
}

impl<C: Clone + Send + Sync + 'static> ServerBuilder<C> {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            sender: None,
            observability_config: None,
            metrics: None,
            service_name: None,
        }
    }

    /// Register a handler for a method
    pub fn handler(mut self, method: impl Into<String>, handler: Box<dyn Handler<C>>) -> Self {
        self.router.register(method, handler);
        self
    }

    /// Replace the router wholesale
    pub fn router(mut self, router: Router<C>) -> Self {
        self.router = router;
        self
    }

    /// Set the sender responses leave through
    pub fn sender(mut self, sender: impl PacketSender<C> + 'static) -> Self {
        self.sender = Some(Arc::new(sender));
        self
    }

    pub fn shared_sender(mut self, sender: Arc<dyn PacketSender<C>>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Initialize observability with `config` when the server is built
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Record metrics on instruments the caller created
    pub fn with_metrics(mut self, metrics: Arc<ServerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Override the service name used for observability
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the server
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no sender was set or observability
    /// initialization fails.
    pub fn build(self) -> Result<Server<C>> {
        let sender = self
            .sender
            .ok_or_else(|| Error::Config("No packet sender specified".to_string()))?;

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            rpcwire_core::init_observability(config.clone()).map_err(|e| {
                Error::Config(format!("Failed to initialize observability: {}", e))
            })?;

            Some(
                self.metrics
                    .unwrap_or_else(|| Arc::new(ServerMetrics::new(config.service_name))),
            )
        } else {
            self.metrics
        };

        let mut server = Server::from_shared(self.router, sender);
        server.metrics = metrics;
        Ok(server)
    }
}

impl<C: Clone + Send + Sync + 'static> Default for ServerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
