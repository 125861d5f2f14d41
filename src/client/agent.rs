//! High-level A2A agent client

use crate::{
    client::config::ClientConfig,
    protocol::{
        error::A2AError,
        message::{Message, Role},
        operation::A2AOperation,
        rpc::SendMessageResult,
        AgentCard, Task,
    },
    service::{A2ARequest, A2AResponse, RequestContext},
};
use tower_service::Service;

/// High-level A2A client for interacting with agents
///
/// This client wraps a Tower service and provides convenient methods for the
/// protocol operations. The service is generic over any implementation that
/// satisfies the Service trait bounds.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_kit::prelude::*;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://localhost:8000".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url).build()?;
///
/// let card = client.discover().await?;
/// println!("Connected to: {}", card.name);
///
/// let reply = client.invoke(Message::user("Hello A2A world!")).await?;
/// println!("Agent: {reply}");
/// # Ok(())
/// # }
/// ```
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
}

impl<S> AgentClient<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
{
    /// Create a new agent client
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request context from the client configuration
    fn build_context(&self) -> RequestContext {
        RequestContext {
            agent_url: self.config.agent_url.clone(),
            timeout: Some(self.config.timeout),
            metadata: Default::default(),
        }
    }

    /// Discover agent capabilities by fetching the Agent Card
    ///
    /// This retrieves the agent's metadata from `/.well-known/agent-card.json`.
    /// A transport failure here aborts the flow; there is no retry.
    pub async fn discover(&mut self) -> Result<AgentCard, A2AError> {
        let request = A2ARequest::new(A2AOperation::DiscoverAgent, self.build_context());
        let response = self.service.call(request).await?;

        match response {
            A2AResponse::AgentCard(card) => Ok(*card),
            _ => Err(A2AError::Protocol(
                "Expected agent card response from discover".into(),
            )),
        }
    }

    /// Send a message to the agent
    ///
    /// The result is whatever shape the deployment produces: a full task with
    /// history, or a bare reply message. Use [`invoke`](Self::invoke) to get
    /// just the reply text.
    pub async fn send_message(
        &mut self,
        message: Message,
    ) -> Result<SendMessageResult, A2AError> {
        let operation = A2AOperation::SendMessage { message };
        let request = A2ARequest::new(operation, self.build_context());
        let response = self.service.call(request).await?;

        match response {
            A2AResponse::Task(task) => Ok(SendMessageResult::Task(*task)),
            A2AResponse::Message(reply) => Ok(SendMessageResult::Message(*reply)),
            _ => Err(A2AError::Protocol(
                "Expected task or message response from send_message".into(),
            )),
        }
    }

    /// Send a message and extract the agent's reply text
    ///
    /// Handles both response shapes: a bare message is taken directly, a task
    /// is scanned for the first agent-authored message at or after the point
    /// the caller's message was submitted.
    pub async fn invoke(&mut self, message: Message) -> Result<String, A2AError> {
        let sent_id = message.message_id.clone();
        let result = self.send_message(message).await?;

        Self::extract_reply(&sent_id, &result).ok_or_else(|| {
            A2AError::Protocol("No agent reply found in the response".into())
        })
    }

    fn extract_reply(sent_id: &str, result: &SendMessageResult) -> Option<String> {
        match result {
            SendMessageResult::Message(reply) => Some(reply.text_content()),
            SendMessageResult::Task(task) => {
                let start = task
                    .history
                    .iter()
                    .position(|m| m.message_id == sent_id)
                    .unwrap_or(0);
                task.history[start..]
                    .iter()
                    .find(|m| m.role == Role::Agent)
                    .map(|m| m.text_content())
            }
        }
    }

    /// Get a task by ID
    ///
    /// # Errors
    ///
    /// Returns `A2AError::TaskNotFound` if the task doesn't exist
    pub async fn get_task(&mut self, task_id: String) -> Result<Task, A2AError> {
        let operation = A2AOperation::GetTask { task_id };
        let request = A2ARequest::new(operation, self.build_context());
        let response = self.service.call(request).await?;

        match response {
            A2AResponse::Task(task) => Ok(*task),
            _ => Err(A2AError::Protocol(
                "Expected task response from get_task".into(),
            )),
        }
    }

    /// Cancel a task by ID
    ///
    /// Canceling an already-finished task is a no-op on the server; the
    /// returned task carries whatever status it already had.
    pub async fn cancel_task(&mut self, task_id: String) -> Result<Task, A2AError> {
        let operation = A2AOperation::CancelTask { task_id };
        let request = A2ARequest::new(operation, self.build_context());
        let response = self.service.call(request).await?;

        match response {
            A2AResponse::Task(task) => Ok(*task),
            _ => Err(A2AError::Protocol(
                "Expected task response from cancel_task".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use serde_json::json;

    use crate::{
        codec::JsonRpcCodec,
        protocol::{
            agent::{AgentCapabilities, AgentCard, AgentSkill},
            rpc::JsonRpcResponse,
            task::TaskState,
        },
        service::A2AProtocolService,
        transport::{mock::MockTransport, TransportResponse},
    };

    use super::*;

    fn client_over<F>(handler: F) -> AgentClient<A2AProtocolService<MockTransport>>
    where
        F: Fn(crate::transport::TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        let transport = MockTransport::new(handler);
        let codec = Arc::new(JsonRpcCodec::new());
        let service = A2AProtocolService::new(transport, codec);
        AgentClient::new(service, ClientConfig::new("http://localhost:8000"))
    }

    fn envelope(result: serde_json::Value) -> Bytes {
        let resp = JsonRpcResponse::success(json!("req-1"), result);
        Bytes::from(serde_json::to_vec(&resp).unwrap())
    }

    #[tokio::test]
    async fn test_discover() {
        let mut client = client_over(|req| {
            assert_eq!(req.endpoint, "/.well-known/agent-card.json");
            assert_eq!(req.method, "GET");

            let card = AgentCard::new(
                "Echo Agent",
                "Repeats whatever you say",
                "http://localhost:8000".parse().unwrap(),
                "1.0.0",
                "0.3.0",
            )
            .with_skill(AgentSkill::new("echo", "Echo Messages", "Repeats"))
            .with_capabilities(AgentCapabilities::new());
            TransportResponse::new(200).body(Bytes::from(serde_json::to_vec(&card).unwrap()))
        });

        let card = client.discover().await.unwrap();
        assert_eq!(card.name, "Echo Agent");
        assert!(!card.skills.is_empty());
    }

    #[tokio::test]
    async fn test_invoke_with_task_result() {
        let mut client = client_over(|req| {
            let request: crate::protocol::rpc::JsonRpcRequest =
                serde_json::from_slice(&req.body).unwrap();
            let params: crate::protocol::rpc::MessageSendParams =
                serde_json::from_value(request.params).unwrap();

            let mut task = Task::new("task-1", params.message);
            task.history.push(Message::agent("You said: 'hi'"));
            task.status = crate::protocol::task::TaskStatus::new(TaskState::Completed);
            TransportResponse::new(200).body(envelope(serde_json::to_value(&task).unwrap()))
        });

        let reply = client.invoke(Message::user("hi")).await.unwrap();
        assert_eq!(reply, "You said: 'hi'");
    }

    #[tokio::test]
    async fn test_invoke_with_bare_message_result() {
        let mut client = client_over(|_req| {
            let reply = Message::agent("You said: 'hi'");
            TransportResponse::new(200).body(envelope(serde_json::to_value(&reply).unwrap()))
        });

        let reply = client.invoke(Message::user("hi")).await.unwrap();
        assert_eq!(reply, "You said: 'hi'");
    }

    #[tokio::test]
    async fn test_invoke_skips_earlier_agent_messages() {
        // The reply must come at or after the caller's message, not from an
        // earlier turn of the conversation.
        let sent = Message::user("second question");
        let sent_id = sent.message_id.clone();

        let mut client = client_over(move |_req| {
            let mut task = Task::new("task-1", Message::user("first question"));
            task.history.push(Message::agent("first answer"));
            task.history.push(
                Message::builder()
                    .role(Role::User)
                    .part(crate::protocol::message::Part::text("second question"))
                    .message_id(sent_id.clone())
                    .build(),
            );
            task.history.push(Message::agent("second answer"));
            task.status = crate::protocol::task::TaskStatus::new(TaskState::Completed);
            TransportResponse::new(200).body(envelope(serde_json::to_value(&task).unwrap()))
        });

        let reply = client.invoke(sent).await.unwrap();
        assert_eq!(reply, "second answer");
    }

    #[tokio::test]
    async fn test_get_task() {
        let mut client = client_over(|_req| {
            let task = Task::new("task-456", Message::user("Test"));
            TransportResponse::new(200).body(envelope(serde_json::to_value(&task).unwrap()))
        });

        let task = client.get_task("task-456".to_string()).await.unwrap();
        assert_eq!(task.id, "task-456");
    }

    #[tokio::test]
    async fn test_cancel_task() {
        let mut client = client_over(|_req| {
            let mut task = Task::new("task-789", Message::user("Test"));
            task.status = crate::protocol::task::TaskStatus::new(TaskState::Canceled);
            TransportResponse::new(200).body(envelope(serde_json::to_value(&task).unwrap()))
        });

        let task = client.cancel_task("task-789".to_string()).await.unwrap();
        assert_eq!(task.status.state, TaskState::Canceled);
    }

    #[tokio::test]
    async fn test_discovery_failure_aborts() {
        let mut client = client_over(|_req| TransportResponse::new(503));

        let result = client.discover().await;
        assert!(matches!(result, Err(A2AError::Transport(_))));
    }
}
