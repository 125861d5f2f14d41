//! A2A task types and lifecycle management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// A task in the A2A protocol
///
/// Tasks represent trackable, cancellable units of work performed by agents.
/// They have a lifecycle from submitted to a terminal state, and an
/// append-only history of the messages exchanged along the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Wire discriminator, always `"task"`
    #[serde(default = "Task::kind_value")]
    pub kind: String,

    /// Unique identifier for the task
    pub id: String,

    /// Context identifier grouping related messages
    #[serde(rename = "contextId")]
    pub context_id: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Ordered, append-only message history; the submitted message is first
    pub history: Vec<Message>,
}

impl Task {
    fn kind_value() -> String {
        "task".to_string()
    }

    /// Create a new task in the `submitted` state
    ///
    /// The inbound message becomes the first history entry. The context id is
    /// taken from the message when present, otherwise freshly generated.
    pub fn new(id: impl Into<String>, input: Message) -> Self {
        let context_id = input
            .context_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

        Self {
            kind: Self::kind_value(),
            id: id.into(),
            context_id,
            status: TaskStatus::new(TaskState::Submitted),
            history: vec![input],
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Check if the task is still processing
    pub fn is_processing(&self) -> bool {
        matches!(
            self.status.state,
            TaskState::Submitted | TaskState::Working
        )
    }

    /// The most recent agent-authored message in history, if any
    pub fn last_agent_message(&self) -> Option<&Message> {
        self.history
            .iter()
            .rev()
            .find(|msg| msg.role == super::message::Role::Agent)
    }
}

/// Status of a task: its lifecycle state and when it was entered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Current lifecycle state
    pub state: TaskState,

    /// When this state was entered
    pub timestamp: DateTime<Utc>,
}

impl TaskStatus {
    /// Create a status for the given state, stamped now
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            timestamp: Utc::now(),
        }
    }
}

/// Task lifecycle state
///
/// Lifecycle: submitted → working → completed/failed/canceled, with
/// input-required as a non-terminal pause awaiting the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the client
    InputRequired,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was canceled by the client
    Canceled,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled
        )
    }
}
