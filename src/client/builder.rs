//! Client builder for constructing A2A clients with composable layers

use std::{sync::Arc, time::Duration};

use tower_layer::Layer;
use url::Url;

use crate::{
    client::{AgentClient, ClientConfig},
    codec::{Codec, JsonRpcCodec},
    layer::{A2AValidationLayer, A2AValidationService},
    protocol::error::A2AError,
    service::A2AProtocolService,
    transport::{HttpTransport, Transport},
};

/// Builder for constructing A2A clients
///
/// Provides a fluent API for configuring and building an A2A client with a
/// customizable transport, codec, and timeout. Requests pass through the
/// validation layer before reaching the wire.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_kit::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "http://localhost:8000".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url)
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let agent_card = client.discover().await?;
/// println!("Connected to: {}", agent_card.name);
/// # Ok(())
/// # }
/// ```
pub struct A2AClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    timeout: Option<Duration>,
}

impl<T: Transport> A2AClientBuilder<T> {
    /// Create a builder with no transport configured yet
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            codec: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Use a custom transport
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the A2A client
    ///
    /// # Errors
    ///
    /// Returns an error if no transport has been configured
    pub fn build(
        self,
    ) -> Result<AgentClient<A2AValidationService<A2AProtocolService<T>>>, A2AError> {
        let transport = self.transport.ok_or_else(|| {
            A2AError::Protocol(
                "Transport not configured. Call new_http() or with_transport()".into(),
            )
        })?;

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonRpcCodec));

        // Core protocol service, wrapped in the validation layer.
        let service = A2AProtocolService::new(transport, codec);
        let service = A2AValidationLayer::new().layer(service);

        let config = ClientConfig::new(self.agent_url)
            .with_timeout(self.timeout.unwrap_or(Duration::from_secs(30)));

        Ok(AgentClient::new(service, config))
    }
}

impl A2AClientBuilder<HttpTransport> {
    /// Create a new client builder with HTTP transport and the JSON-RPC codec
    ///
    /// # Arguments
    ///
    /// * `agent_url` - The base URL of the agent (e.g., "<http://localhost:8000>")
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self {
            agent_url,
            transport: Some(transport),
            codec: Some(Arc::new(JsonRpcCodec)),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}
