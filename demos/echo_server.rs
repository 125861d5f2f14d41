//! Runnable echo agent: serves the discovery document and the JSON-RPC
//! endpoint on localhost.

use std::sync::Arc;

use a2a_kit::protocol::{AgentCapabilities, AgentCard, AgentSkill};
use a2a_kit::server::{serve, Dispatcher, EchoExecutor};

const PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let card = AgentCard::new(
        "Echo Agent",
        "A simple agent that echoes your messages back",
        format!("http://localhost:{PORT}").parse()?,
        "1.0.0",
        "0.3.0",
    )
    .with_skill(
        AgentSkill::new("echo", "Echo Messages", "Repeats whatever you say")
            .with_tag("echo")
            .with_tag("demo")
            .with_example("Hello there!")
            .with_example("How are you doing?"),
    )
    .with_capabilities(AgentCapabilities::new().with_state_transition_history());

    let dispatcher = Dispatcher::new(card, Arc::new(EchoExecutor::new()));

    println!("Agent card: http://localhost:{PORT}/.well-known/agent-card.json");
    println!("A2A endpoint: http://localhost:{PORT}/");

    serve(dispatcher, ([0, 0, 0, 0], PORT).into()).await?;
    Ok(())
}
