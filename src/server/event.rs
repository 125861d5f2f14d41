//! Per-task event queue connecting an executor to the dispatcher

use tokio::sync::{mpsc, Mutex};

use crate::protocol::error::{A2AError, A2AResult};
use crate::protocol::message::Message;
use crate::protocol::task::TaskState;

/// An event published by an executor while working on a task
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Append a message to the task history; state unchanged
    Message(Message),

    /// Move the task to a new state, optionally carrying a message
    StatusUpdate {
        /// The state to transition to
        state: TaskState,

        /// Message appended to history before the transition applies
        message: Option<Message>,
    },
}

impl Event {
    /// Whether applying this event ends the task lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::StatusUpdate { state, .. } if state.is_terminal())
    }
}

/// Ordered, single-consumer channel between one executor and the dispatcher
///
/// The producer side never blocks: the underlying channel is unbounded.
/// The receiver sits behind an async mutex, so only one drain loop can
/// consume at a time. After [`close`](EventQueue::close), enqueues fail and
/// draining yields the buffered events followed by end-of-stream.
#[derive(Debug)]
pub struct EventQueue {
    tx: mpsc::UnboundedSender<Event>,
    rx: Mutex<mpsc::UnboundedReceiver<Event>>,
}

impl EventQueue {
    /// Create a fresh queue for one task
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Publish an event; never blocks on the consumer
    pub fn enqueue(&self, event: Event) -> A2AResult<()> {
        self.tx
            .send(event)
            .map_err(|_| A2AError::Internal("event queue is closed".to_string()))
    }

    /// Publish a message event
    pub fn enqueue_message(&self, message: Message) -> A2AResult<()> {
        self.enqueue(Event::Message(message))
    }

    /// Publish a status event, optionally carrying a message
    pub fn enqueue_status(&self, state: TaskState, message: Option<Message>) -> A2AResult<()> {
        self.enqueue(Event::StatusUpdate { state, message })
    }

    /// Take the next event in FIFO order
    ///
    /// Returns `None` once the queue is closed and drained. Suspends (without
    /// busy-waiting) while the queue is open and empty.
    pub async fn dequeue(&self) -> Option<Event> {
        self.rx.lock().await.recv().await
    }

    /// Close the queue: no further enqueues; buffered events stay drainable
    pub async fn close(&self) {
        self.rx.lock().await.close();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
