//! Serialization codecs for the A2A protocol binding

pub mod jsonrpc;

pub use jsonrpc::JsonRpcCodec;

use crate::{
    protocol::{error::A2AError, operation::A2AOperation},
    service::response::A2AResponse,
};
use bytes::Bytes;

/// Codec trait for encoding and decoding A2A protocol messages
///
/// A codec implements one protocol binding. The baseline binding is JSON-RPC
/// 2.0 over HTTP; the trait is the seam where others would plug in.
pub trait Codec: Send + Sync {
    /// Serialize an A2A operation to bytes for transport
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError>;

    /// Deserialize transport response bytes to an A2A response
    ///
    /// The original operation is passed for context, since the wire shape of
    /// the response depends on what was asked.
    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}
