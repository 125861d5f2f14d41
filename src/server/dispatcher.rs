//! JSON-RPC dispatcher: routes protocol calls to the executor

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::protocol::agent::AgentCard;
use crate::protocol::error::{A2AError, A2AResult};
use crate::protocol::message::Message;
use crate::protocol::rpc::{
    JsonRpcRequest, JsonRpcResponse, MessageSendParams, TaskIdParams, METHOD_MESSAGE_SEND,
    METHOD_TASKS_CANCEL, METHOD_TASKS_GET,
};
use crate::protocol::task::{Task, TaskState};

use super::event::{Event, EventQueue};
use super::executor::{AgentExecutor, ExecutionContext};
use super::store::TaskStore;

/// Routes JSON-RPC requests to an agent executor through the task store
///
/// One dispatcher serves one agent. Each `message/send` gets its own event
/// queue; the dispatcher drains it after the executor returns, applying every
/// event to the task, and guarantees the task ends in a terminal state before
/// the response leaves.
#[derive(Clone)]
pub struct Dispatcher {
    card: Arc<AgentCard>,
    executor: Arc<dyn AgentExecutor>,
    store: TaskStore,
    queues: Arc<RwLock<HashMap<String, Arc<EventQueue>>>>,
}

impl Dispatcher {
    /// Create a dispatcher for an agent card and its executor
    pub fn new(card: AgentCard, executor: Arc<dyn AgentExecutor>) -> Self {
        Self {
            card: Arc::new(card),
            executor,
            store: TaskStore::new(),
            queues: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The agent card served at the discovery endpoint
    pub fn agent_card(&self) -> Arc<AgentCard> {
        self.card.clone()
    }

    /// The task store backing this dispatcher
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Handle one JSON-RPC request, never panicking across this boundary
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            METHOD_MESSAGE_SEND => self.on_message_send(request.params).await,
            METHOD_TASKS_GET => self.on_tasks_get(request.params).await,
            METHOD_TASKS_CANCEL => self.on_tasks_cancel(request.params).await,
            other => Err(A2AError::MethodNotFound(other.to_string())),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                JsonRpcResponse::error(id, &err)
            }
        }
    }

    async fn on_message_send(&self, params: Value) -> A2AResult<Value> {
        let params: MessageSendParams = serde_json::from_value(params)
            .map_err(|e| A2AError::InvalidParams(e.to_string()))?;
        let message = params.message;

        let task_id = self.resolve_task(&message).await?;
        let task = self
            .store
            .get(&task_id)
            .await
            .ok_or_else(|| A2AError::Internal("task vanished after creation".to_string()))?;

        let queue = Arc::new(EventQueue::new());
        self.queues
            .write()
            .await
            .insert(task_id.clone(), queue.clone());

        let ctx = ExecutionContext::new(&task_id, &task.context_id, message);
        if let Err(err) = self.executor.execute(ctx, &queue).await {
            // Executor failures become agent-authored explanations; the task
            // still reaches a terminal state.
            tracing::warn!(task_id = %task_id, error = %err, "executor failed");
            let _ = queue.enqueue_status(
                TaskState::Failed,
                Some(Message::agent(format!(
                    "Error processing your message: {err}"
                ))),
            );
        }

        queue.close().await;
        let replies = self.drain(&task_id, &queue).await?;
        self.finalize(&task_id, replies).await?;
        self.queues.write().await.remove(&task_id);

        let task = self
            .store
            .get(&task_id)
            .await
            .ok_or_else(|| A2AError::Internal("task vanished after execution".to_string()))?;

        self.send_result(task)
    }

    async fn on_tasks_get(&self, params: Value) -> A2AResult<Value> {
        let params: TaskIdParams = serde_json::from_value(params)
            .map_err(|e| A2AError::InvalidParams(e.to_string()))?;

        let task = self
            .store
            .get(&params.id)
            .await
            .ok_or(A2AError::TaskNotFound { task_id: params.id })?;

        Ok(serde_json::to_value(task)?)
    }

    async fn on_tasks_cancel(&self, params: Value) -> A2AResult<Value> {
        let params: TaskIdParams = serde_json::from_value(params)
            .map_err(|e| A2AError::InvalidParams(e.to_string()))?;
        let task_id = params.id;

        let task = self
            .store
            .get(&task_id)
            .await
            .ok_or_else(|| A2AError::TaskNotFound {
                task_id: task_id.clone(),
            })?;

        // Canceling a finished task is a no-op reporting the existing status.
        if task.is_terminal() {
            return Ok(serde_json::to_value(task)?);
        }

        let queue = match self.queues.read().await.get(&task_id) {
            Some(queue) => queue.clone(),
            None => Arc::new(EventQueue::new()),
        };

        if let Err(err) = self.executor.cancel(&task_id, &queue).await {
            tracing::warn!(task_id = %task_id, error = %err, "cancel failed");
        }

        queue.close().await;
        while let Some(event) = queue.dequeue().await {
            self.store.apply_event(&task_id, event).await?;
        }

        // A cancel that produced no terminal event is forced over the line.
        let task = self
            .store
            .get(&task_id)
            .await
            .ok_or_else(|| A2AError::Internal("task vanished during cancel".to_string()))?;
        if !task.is_terminal() {
            self.store
                .apply_event(
                    &task_id,
                    Event::StatusUpdate {
                        state: TaskState::Canceled,
                        message: None,
                    },
                )
                .await?;
        }
        self.queues.write().await.remove(&task_id);

        let task = self
            .store
            .get(&task_id)
            .await
            .ok_or_else(|| A2AError::Internal("task vanished during cancel".to_string()))?;
        Ok(serde_json::to_value(task)?)
    }

    /// Locate the task a message targets, creating one if it targets none
    async fn resolve_task(&self, message: &Message) -> A2AResult<String> {
        match &message.task_id {
            Some(existing) => {
                if self.store.get(existing).await.is_none() {
                    return Err(A2AError::TaskNotFound {
                        task_id: existing.clone(),
                    });
                }
                self.store.append_message(existing, message.clone()).await?;
                Ok(existing.clone())
            }
            None => {
                let task = Task::new(Uuid::now_v7().to_string(), message.clone());
                let id = task.id.clone();
                self.store.create(task).await;
                tracing::debug!(task_id = %id, "created task");
                Ok(id)
            }
        }
    }

    /// Apply every queued event to the task; returns how many agent replies landed
    async fn drain(&self, task_id: &str, queue: &EventQueue) -> A2AResult<usize> {
        let mut replies = 0;
        while let Some(event) = queue.dequeue().await {
            let is_message = matches!(
                event,
                Event::Message(_)
                    | Event::StatusUpdate {
                        message: Some(_),
                        ..
                    }
            );
            if self.store.apply_event(task_id, event).await? && is_message {
                replies += 1;
            }
        }
        Ok(replies)
    }

    /// Drive a task that is still live after the drain to a terminal state
    ///
    /// A trailing reply without an explicit status means the work is done; no
    /// events at all means the executor went silent, which fails the task
    /// with an explanation rather than leaving it dangling.
    async fn finalize(&self, task_id: &str, replies: usize) -> A2AResult<()> {
        let task = self
            .store
            .get(task_id)
            .await
            .ok_or_else(|| A2AError::Internal("task vanished during finalize".to_string()))?;
        if task.is_terminal() {
            return Ok(());
        }

        let event = if replies > 0 {
            Event::StatusUpdate {
                state: TaskState::Completed,
                message: None,
            }
        } else {
            tracing::warn!(task_id = %task_id, "executor published no events");
            Event::StatusUpdate {
                state: TaskState::Failed,
                message: Some(Message::agent(
                    "The agent finished without producing a response.",
                )),
            }
        };
        self.store.apply_event(task_id, event).await?;
        Ok(())
    }

    /// Shape the `message/send` result per the card's declared capability
    fn send_result(&self, task: Task) -> A2AResult<Value> {
        if self.card.capabilities.state_transition_history {
            return Ok(serde_json::to_value(task)?);
        }

        match task.last_agent_message() {
            Some(reply) => Ok(serde_json::to_value(reply)?),
            // A task that failed before any reply still returns as a task so
            // the caller sees its status.
            None => Ok(serde_json::to_value(task)?),
        }
    }
}
