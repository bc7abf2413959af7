//! Builder for configuring a [`Client`]
//!
//! ```rust
//! use rpcwire_client::ClientBuilder;
//! use rpcwire_core::BoxError;
//!
//! let client = ClientBuilder::new(|_packet: String, _ctx: u64| async { Ok::<(), BoxError>(()) })
//!     .service_name("inventory-bridge")
//!     .build()
//!     .unwrap();
//! # let _ = client;
//! ```

use crate::{Client, ClientMetrics};
use rpcwire_core::{Error, ObservabilityConfig, PacketSender, Result};
use std::sync::Arc;

/// Builder for [`Client`]
pub struct ClientBuilder<C> {
    sender: Arc<dyn PacketSender<C>>,
    observability_config: Option<ObservabilityConfig>,
    metrics: Option<Arc<ClientMetrics>>,
    service_name: Option<String>,
}

impl<C: Send + 'static> ClientBuilder<C> {
    pub fn new(sender: impl PacketSender<C> + 'static) -> Self {
        Self::from_shared(Arc::new(sender))
    }

    pub fn from_shared(sender: Arc<dyn PacketSender<C>>) -> Self {
        Self {
            sender,
            observability_config: None,
            metrics: None,
            service_name: None,
        }
    }

    /// Initialize observability with `config` when the client is built
    ///
    /// Metrics are recorded on the global meter provider afterwards.
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Record metrics on instruments the caller created
    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Override the service name used for observability
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if observability initialization fails.
    pub fn build(self) -> Result<Client<C>> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            rpcwire_core::init_observability(config.clone()).map_err(|e| {
                Error::Config(format!("Failed to initialize observability: {}", e))
            })?;

            Some(
                self.metrics
                    .unwrap_or_else(|| Arc::new(ClientMetrics::new(config.service_name))),
            )
        } else {
            self.metrics
        };

        let mut client = Client::from_shared(self.sender);
        client.metrics = metrics;
        Ok(client)
    }
}
