//! JSON-RPC 2.0 envelope types for the A2A protocol binding
//!
//! These types are shared by both halves of the crate: the server dispatcher
//! decodes requests and encodes responses, the client codec does the reverse.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::A2AError;
use super::message::Message;
use super::task::Task;

/// JSON-RPC method for sending a message to an agent
pub const METHOD_MESSAGE_SEND: &str = "message/send";
/// JSON-RPC method for fetching a task by id
pub const METHOD_TASKS_GET: &str = "tasks/get";
/// JSON-RPC method for canceling a task
pub const METHOD_TASKS_CANCEL: &str = "tasks/cancel";

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Create a request envelope with the given id
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result` and `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Build a success response carrying `result`
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response from an [`A2AError`]
    pub fn error(id: Value, err: &A2AError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: err.rpc_code(),
                message: err.to_string(),
            }),
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Params of `message/send`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSendParams {
    /// The message to deliver to the agent
    pub message: Message,
}

/// Params of `tasks/get` and `tasks/cancel`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskIdParams {
    /// The task id being referenced
    pub id: String,
}

/// The polymorphic `result` of `message/send`
///
/// Deployments that track history return the full [`Task`]; minimal
/// deployments return the produced [`Message`] directly. Callers must accept
/// both shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SendMessageResult {
    /// The full task, history included
    Task(Task),

    /// A bare reply message
    Message(Message),
}
