//! JSON-RPC 2.0 codec for the A2A protocol
//!
//! Wraps operations in JSON-RPC request envelopes and unwraps the polymorphic
//! responses. Discovery is the one operation outside the envelope: it is a
//! plain GET returning the agent card.

use bytes::Bytes;
use serde_json::json;
use uuid::Uuid;

use crate::{
    codec::Codec,
    protocol::{
        agent::AgentCard,
        error::{A2AError, CODE_INVALID_PARAMS, CODE_METHOD_NOT_FOUND, CODE_TASK_NOT_FOUND},
        operation::A2AOperation,
        rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, SendMessageResult},
        task::Task,
    },
    service::response::A2AResponse,
};

/// JSON-RPC 2.0 codec
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }

    /// Map a JSON-RPC error object back onto the error taxonomy
    fn map_rpc_error(error: JsonRpcError) -> A2AError {
        match error.code {
            CODE_METHOD_NOT_FOUND => A2AError::MethodNotFound(error.message),
            CODE_INVALID_PARAMS => A2AError::InvalidParams(error.message),
            CODE_TASK_NOT_FOUND => A2AError::TaskNotFound {
                task_id: error.message,
            },
            code => A2AError::Protocol(format!("JSON-RPC error {code}: {}", error.message)),
        }
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError> {
        let Some(method) = operation.rpc_method() else {
            // Discovery has no body.
            return Ok(Bytes::new());
        };

        let params = match operation {
            A2AOperation::SendMessage { message } => json!({ "message": message }),
            A2AOperation::GetTask { task_id } | A2AOperation::CancelTask { task_id } => {
                json!({ "id": task_id })
            }
            A2AOperation::DiscoverAgent => unreachable!("discovery carries no envelope"),
        };

        let request = JsonRpcRequest::new(Uuid::now_v7().to_string(), method, params);
        let bytes = serde_json::to_vec(&request)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        if let A2AOperation::DiscoverAgent = operation {
            let card: AgentCard = serde_json::from_slice(body)
                .map_err(|e| A2AError::Protocol(format!("Failed to parse agent card: {e}")))?;
            return Ok(A2AResponse::AgentCard(Box::new(card)));
        }

        let envelope: JsonRpcResponse = serde_json::from_slice(body)
            .map_err(|e| A2AError::Protocol(format!("Failed to parse JSON-RPC response: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(Self::map_rpc_error(error));
        }

        let result = envelope.result.ok_or_else(|| {
            A2AError::Protocol("JSON-RPC response missing 'result' field".to_string())
        })?;

        match operation {
            A2AOperation::SendMessage { .. } => {
                // The result is either a full task or a bare reply; callers
                // must not assume one shape.
                let result: SendMessageResult = serde_json::from_value(result)?;
                Ok(match result {
                    SendMessageResult::Task(task) => A2AResponse::Task(Box::new(task)),
                    SendMessageResult::Message(message) => {
                        A2AResponse::Message(Box::new(message))
                    }
                })
            }
            A2AOperation::GetTask { .. } | A2AOperation::CancelTask { .. } => {
                let task: Task = serde_json::from_value(result)?;
                Ok(A2AResponse::Task(Box::new(task)))
            }
            A2AOperation::DiscoverAgent => unreachable!("handled above"),
        }
    }

    fn content_type(&self) -> &str {
        "application/a2a+json"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::protocol::message::Message;

    use super::*;

    #[test]
    fn test_encode_send_message() {
        let codec = JsonRpcCodec::new();
        let operation = A2AOperation::SendMessage {
            message: Message::user("Hello"),
        };

        let bytes = codec.encode_request(&operation).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "message/send");
        assert!(json["params"]["message"].is_object());
        assert!(json["id"].is_string());
    }

    #[test]
    fn test_encode_envelope_ids_are_fresh() {
        let codec = JsonRpcCodec::new();
        let operation = A2AOperation::GetTask {
            task_id: "task-1".to_string(),
        };

        let a: Value =
            serde_json::from_slice(&codec.encode_request(&operation).unwrap()).unwrap();
        let b: Value =
            serde_json::from_slice(&codec.encode_request(&operation).unwrap()).unwrap();
        assert_ne!(a["id"], b["id"]);
    }

    #[test]
    fn test_encode_discovery_is_empty() {
        let codec = JsonRpcCodec::new();
        let bytes = codec.encode_request(&A2AOperation::DiscoverAgent).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_decode_task_result() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "jsonrpc": "2.0",
            "id": "req-123",
            "result": {
                "kind": "task",
                "id": "task-123",
                "contextId": "ctx-1",
                "status": {"state": "completed", "timestamp": "2024-01-01T00:00:00Z"},
                "history": []
            }
        }"#;

        let operation = A2AOperation::SendMessage {
            message: Message::user("hi"),
        };

        let response = codec.decode_response(json.as_bytes(), &operation).unwrap();
        match response {
            A2AResponse::Task(task) => assert_eq!(task.id, "task-123"),
            _ => panic!("Expected Task response"),
        }
    }

    #[test]
    fn test_decode_bare_message_result() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "jsonrpc": "2.0",
            "id": "req-123",
            "result": {
                "kind": "message",
                "messageId": "m-1",
                "role": "agent",
                "parts": [{"kind": "text", "text": "You said: 'hi'"}]
            }
        }"#;

        let operation = A2AOperation::SendMessage {
            message: Message::user("hi"),
        };

        let response = codec.decode_response(json.as_bytes(), &operation).unwrap();
        match response {
            A2AResponse::Message(message) => {
                assert_eq!(message.text_content(), "You said: 'hi'")
            }
            _ => panic!("Expected Message response"),
        }
    }

    #[test]
    fn test_decode_error_response() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "jsonrpc": "2.0",
            "id": "req-123",
            "error": {"code": -32601, "message": "Method not found: message/delete"}
        }"#;

        let operation = A2AOperation::GetTask {
            task_id: "task-123".to_string(),
        };

        let result = codec.decode_response(json.as_bytes(), &operation);
        assert!(matches!(result, Err(A2AError::MethodNotFound(_))));
    }

    #[test]
    fn test_decode_missing_result() {
        let codec = JsonRpcCodec::new();
        let json = r#"{"jsonrpc": "2.0", "id": "req-123"}"#;

        let operation = A2AOperation::GetTask {
            task_id: "task-123".to_string(),
        };

        match codec.decode_response(json.as_bytes(), &operation) {
            Err(A2AError::Protocol(msg)) => assert!(msg.contains("missing 'result' field")),
            other => panic!("Expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_agent_card() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "name": "Echo Agent",
            "description": "Repeats whatever you say",
            "url": "http://localhost:8000",
            "version": "1.0.0",
            "protocolVersion": "0.3.0",
            "skills": [],
            "capabilities": {"streaming": false, "pushNotifications": false, "stateTransitionHistory": true},
            "defaultInputModes": ["text/plain"],
            "defaultOutputModes": ["text/plain"]
        }"#;

        let response = codec
            .decode_response(json.as_bytes(), &A2AOperation::DiscoverAgent)
            .unwrap();
        match response {
            A2AResponse::AgentCard(card) => assert_eq!(card.name, "Echo Agent"),
            _ => panic!("Expected AgentCard response"),
        }
    }

    #[test]
    fn test_content_type() {
        let codec = JsonRpcCodec::new();
        assert_eq!(codec.content_type(), "application/a2a+json");
    }
}
