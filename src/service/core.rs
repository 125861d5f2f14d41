//! Core A2A protocol service implementation

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::BoxFuture;
use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::{error::A2AError, operation::A2AOperation},
    service::{A2ARequest, A2AResponse},
    transport::{Transport, TransportRequest},
};

/// Core A2A protocol service that wraps a transport
///
/// This service implements the Tower `Service` trait and provides the core
/// logic for executing A2A operations over any transport.
pub struct A2AProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> A2AProtocolService<T>
where
    T: Transport,
{
    /// Create a new A2A protocol service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from an A2A operation
    fn build_transport_request(
        req: &A2ARequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, A2AError> {
        let endpoint = req.operation.endpoint();
        let method = req.operation.method();

        let mut transport_req = TransportRequest::new(endpoint, method);

        // Add required A2A protocol headers
        transport_req = transport_req.header("Content-Type", codec.content_type());
        transport_req = transport_req.header("Accept", codec.content_type());

        // Add custom metadata headers
        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        // Encode request body (if needed)
        let body = codec.encode_request(&req.operation)?;
        if !body.is_empty() && method != "GET" {
            transport_req = transport_req.body(body);
        }

        Ok(transport_req)
    }

    /// Parse a transport response into an A2A response
    fn parse_transport_response(
        transport_resp: crate::transport::TransportResponse,
        codec: &dyn Codec,
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        // Check for error status codes
        if !transport_resp.is_success() {
            return Err(A2AError::Transport(format!(
                "HTTP error: {}",
                transport_resp.status
            )));
        }

        // Decode the response body
        codec.decode_response(&transport_resp.body, operation)
    }
}

impl<T> Service<A2ARequest> for A2AProtocolService<T>
where
    T: Transport + Clone,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            // Convert A2A request to transport request
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            // Execute via transport
            let transport_resp = transport.execute(transport_req).await?;

            // Parse transport response to A2A response
            let response =
                Self::parse_transport_response(transport_resp, codec.as_ref(), &req.operation)?;

            Ok(response)
        })
    }
}

impl<T> Clone for A2AProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}
