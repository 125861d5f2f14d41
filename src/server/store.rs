//! In-memory task store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::protocol::error::{A2AError, A2AResult};
use crate::protocol::message::Message;
use crate::protocol::task::{Task, TaskStatus};

use super::event::Event;

/// Keyed, concurrency-safe holder of task state
///
/// Tasks live here from creation until process exit. All mutation goes
/// through [`apply_event`](TaskStore::apply_event) or
/// [`append_message`](TaskStore::append_message), which take the write lock,
/// so updates to a single task are serialized while reads of distinct tasks
/// proceed in parallel.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a snapshot of a task by id
    pub async fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().await.get(id).cloned()
    }

    /// Insert a freshly created task
    pub async fn create(&self, task: Task) {
        self.tasks.write().await.insert(task.id.clone(), task);
    }

    /// Append an inbound message to an existing task's history
    pub async fn append_message(&self, id: &str, message: Message) -> A2AResult<()> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(id).ok_or_else(|| A2AError::TaskNotFound {
            task_id: id.to_string(),
        })?;
        task.history.push(message);
        Ok(())
    }

    /// Apply a queue event to a task, atomically
    ///
    /// Returns `Ok(true)` if the event was applied, `Ok(false)` if it was
    /// dropped because the task already reached a terminal state. Status
    /// timestamps are refreshed on every applied transition.
    pub async fn apply_event(&self, id: &str, event: Event) -> A2AResult<bool> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(id).ok_or_else(|| A2AError::TaskNotFound {
            task_id: id.to_string(),
        })?;

        if task.is_terminal() {
            tracing::debug!(task_id = %id, ?event, "dropping event for terminal task");
            return Ok(false);
        }

        match event {
            Event::Message(message) => {
                task.history.push(message);
            }
            Event::StatusUpdate { state, message } => {
                if let Some(message) = message {
                    task.history.push(message);
                }
                task.status = TaskStatus::new(state);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::task::TaskState;

    use super::*;

    async fn seeded() -> (TaskStore, String) {
        let store = TaskStore::new();
        let task = Task::new("task-1", Message::user("hi"));
        let id = task.id.clone();
        store.create(task).await;
        (store, id)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (store, id) = seeded().await;

        let task = store.get(&id).await.unwrap();
        assert_eq!(task.id, "task-1");
        assert_eq!(task.history.len(), 1);

        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_message_event_appends_without_state_change() {
        let (store, id) = seeded().await;

        let applied = store
            .apply_event(&id, Event::Message(Message::agent("working on it")))
            .await
            .unwrap();
        assert!(applied);

        let task = store.get(&id).await.unwrap();
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.status.state, TaskState::Submitted);
    }

    #[tokio::test]
    async fn test_status_event_applies_message_then_state() {
        let (store, id) = seeded().await;

        store
            .apply_event(
                &id,
                Event::StatusUpdate {
                    state: TaskState::Completed,
                    message: Some(Message::agent("done")),
                },
            )
            .await
            .unwrap();

        let task = store.get(&id).await.unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.history.last().unwrap().text_content(), "done");
    }

    #[tokio::test]
    async fn test_events_after_terminal_are_dropped() {
        let (store, id) = seeded().await;

        store
            .apply_event(
                &id,
                Event::StatusUpdate {
                    state: TaskState::Canceled,
                    message: None,
                },
            )
            .await
            .unwrap();

        let applied = store
            .apply_event(
                &id,
                Event::StatusUpdate {
                    state: TaskState::Working,
                    message: None,
                },
            )
            .await
            .unwrap();
        assert!(!applied);

        let applied = store
            .apply_event(&id, Event::Message(Message::agent("too late")))
            .await
            .unwrap();
        assert!(!applied);

        let task = store.get(&id).await.unwrap();
        assert_eq!(task.status.state, TaskState::Canceled);
        assert_eq!(task.history.len(), 1);
    }

    #[tokio::test]
    async fn test_history_is_append_only() {
        let (store, id) = seeded().await;

        for i in 0..3 {
            store
                .apply_event(&id, Event::Message(Message::agent(format!("step {i}"))))
                .await
                .unwrap();
        }

        let task = store.get(&id).await.unwrap();
        let texts: Vec<String> = task.history.iter().map(|m| m.text_content()).collect();
        assert_eq!(texts, vec!["hi", "step 0", "step 1", "step 2"]);
    }

    #[tokio::test]
    async fn test_unknown_task_errors() {
        let store = TaskStore::new();
        let result = store
            .apply_event("ghost", Event::Message(Message::agent("hi")))
            .await;
        assert!(matches!(result, Err(A2AError::TaskNotFound { .. })));
    }
}
