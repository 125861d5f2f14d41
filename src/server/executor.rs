//! Agent business logic seam

use async_trait::async_trait;

use crate::protocol::error::A2AResult;
use crate::protocol::message::Message;
use crate::protocol::task::TaskState;

use super::event::EventQueue;

/// Input handed to an executor for one `message/send` invocation
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Id of the task being worked on
    pub task_id: String,

    /// Context id grouping the conversation
    pub context_id: String,

    /// The inbound message, parts untouched
    pub message: Message,
}

impl ExecutionContext {
    /// Create a context for a task and its inbound message
    pub fn new(
        task_id: impl Into<String>,
        context_id: impl Into<String>,
        message: Message,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            context_id: context_id.into(),
            message,
        }
    }

    /// The accumulated input text: all text parts concatenated in order
    ///
    /// Non-text parts are ignored here; they stay in the task history.
    pub fn user_input(&self) -> String {
        self.message.text_content()
    }
}

/// Business logic entry point for one agent
///
/// Implementations publish zero or more events to the queue and must
/// eventually publish a terminal status, either directly or implicitly by
/// ending with a message event (the dispatcher treats a trailing reply as
/// completion).
#[async_trait]
pub trait AgentExecutor: Send + Sync + 'static {
    /// Process an inbound message, publishing progress and the reply
    async fn execute(&self, ctx: ExecutionContext, queue: &EventQueue) -> A2AResult<()>;

    /// Cancel a task by publishing a `canceled` status
    ///
    /// Must be safe to call while `execute` is mid-flight; the queue is the
    /// single serialization point.
    async fn cancel(&self, task_id: &str, queue: &EventQueue) -> A2AResult<()>;
}

/// Reference executor that echoes the input text back
///
/// Replies with the literal input wrapped in a fixed phrase. Empty or
/// whitespace-only input yields an explanatory reply and still completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoExecutor;

impl EchoExecutor {
    /// Create an echo executor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgentExecutor for EchoExecutor {
    async fn execute(&self, ctx: ExecutionContext, queue: &EventQueue) -> A2AResult<()> {
        let user_text = ctx.user_input();

        if user_text.trim().is_empty() {
            tracing::debug!(task_id = %ctx.task_id, "echo request without text");
            queue.enqueue_message(Message::agent(
                "I didn't receive any text to echo. Please send me a message with text content.",
            ))?;
            queue.enqueue_status(TaskState::Completed, None)?;
            return Ok(());
        }

        queue.enqueue_message(Message::agent(format!("You said: '{}'", user_text.trim())))?;
        queue.enqueue_status(TaskState::Completed, None)?;
        Ok(())
    }

    async fn cancel(&self, task_id: &str, queue: &EventQueue) -> A2AResult<()> {
        queue.enqueue_status(
            TaskState::Canceled,
            Some(Message::agent(format!("Echo task {task_id} has been canceled."))),
        )?;
        Ok(())
    }
}
