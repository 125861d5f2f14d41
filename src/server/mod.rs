//! Server half of the A2A protocol: dispatcher, store, queue, executor

pub mod dispatcher;
pub mod event;
pub mod executor;
pub mod http;
pub mod store;

pub use dispatcher::Dispatcher;
pub use event::{Event, EventQueue};
pub use executor::{AgentExecutor, EchoExecutor, ExecutionContext};
pub use http::{a2a_router, serve};
pub use store::TaskStore;
