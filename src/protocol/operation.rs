//! A2A protocol operations

use super::message::Message;
use super::rpc::{METHOD_MESSAGE_SEND, METHOD_TASKS_CANCEL, METHOD_TASKS_GET};

/// A2A protocol operations
///
/// This enum represents the abstract operations a client can perform against
/// an agent. Operations are binding-independent; the JSON-RPC binding maps
/// them onto a single `POST /` endpoint, while discovery is a plain GET.
#[derive(Debug, Clone)]
pub enum A2AOperation {
    /// Send a message to an agent
    SendMessage {
        /// The message to send
        message: Message,
    },

    /// Get a task by ID
    GetTask {
        /// The task ID to retrieve
        task_id: String,
    },

    /// Cancel a task
    CancelTask {
        /// The task ID to cancel
        task_id: String,
    },

    /// Discover agent capabilities (fetch Agent Card)
    DiscoverAgent,
}

impl A2AOperation {
    /// Get the HTTP endpoint path for this operation
    pub fn endpoint(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => "/.well-known/agent-card.json",
            _ => "/",
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => "GET",
            _ => "POST",
        }
    }

    /// The JSON-RPC method name, for operations carried in an RPC envelope
    pub fn rpc_method(&self) -> Option<&'static str> {
        match self {
            A2AOperation::SendMessage { .. } => Some(METHOD_MESSAGE_SEND),
            A2AOperation::GetTask { .. } => Some(METHOD_TASKS_GET),
            A2AOperation::CancelTask { .. } => Some(METHOD_TASKS_CANCEL),
            A2AOperation::DiscoverAgent => None,
        }
    }
}
