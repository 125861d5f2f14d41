//! # A2A Kit
//!
//! An implementation of the Agent2Agent (A2A) protocol: agent discovery, a
//! JSON-RPC 2.0 message envelope, and a task lifecycle that lets a caller
//! send a message to a remote agent and receive either an immediate reply or
//! a trackable, cancellable unit of work.
//!
//! Both halves of the protocol live here:
//!
//! - **Server**: a [`server::Dispatcher`] routes JSON-RPC calls to a
//!   pluggable [`server::AgentExecutor`], which reports progress through a
//!   per-task [`server::EventQueue`]; axum serves the discovery document and
//!   the RPC endpoint.
//! - **Client**: an [`client::AgentClient`] built on Tower's Service and
//!   Layer abstractions over a pluggable transport, handling both response
//!   shapes (full task or bare reply) transparently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_kit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "http://localhost:8000".parse().unwrap();
//!     let mut client = A2AClientBuilder::new_http(url).build()?;
//!
//!     let agent_card = client.discover().await?;
//!     println!("Connected to: {}", agent_card.name);
//!
//!     let reply = client.invoke(Message::user("Hello A2A world!")).await?;
//!     println!("Agent: {reply}");
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod layer;
pub mod protocol;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{A2AClientBuilder, AgentClient},
        protocol::error::A2AError,
        protocol::{
            AgentCapabilities, AgentCard, AgentSkill, Message, Part, Role, SendMessageResult,
            Task, TaskState, TaskStatus,
        },
        server::{AgentExecutor, Dispatcher, EchoExecutor, EventQueue},
    };
}
