//! Error types for A2A protocol operations

use thiserror::Error;

/// JSON-RPC error code: malformed JSON payload
pub const CODE_PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code: unknown method
pub const CODE_METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code: malformed params for a known method
pub const CODE_INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code: internal error during execution
pub const CODE_INTERNAL_ERROR: i64 = -32603;
/// A2A error code: referenced task does not exist
pub const CODE_TASK_NOT_FOUND: i64 = -32001;

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level error (invalid envelope, unexpected response shape, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or response)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested JSON-RPC method is not supported
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// The params of a known method failed to parse
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Task not found error
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// An executor's business logic failed
    #[error("Execution error: {0}")]
    Execution(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// Internal invariant violation inside the dispatcher
    #[error("Internal error: {0}")]
    Internal(String),
}

impl A2AError {
    /// The JSON-RPC error code this error surfaces as
    pub fn rpc_code(&self) -> i64 {
        match self {
            A2AError::MethodNotFound(_) => CODE_METHOD_NOT_FOUND,
            A2AError::InvalidParams(_) | A2AError::Validation(_) => CODE_INVALID_PARAMS,
            A2AError::TaskNotFound { .. } => CODE_TASK_NOT_FOUND,
            A2AError::Serialization(_) => CODE_PARSE_ERROR,
            _ => CODE_INTERNAL_ERROR,
        }
    }
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}
