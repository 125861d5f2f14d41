//! Minimal A2A client flow: discover the agent, send one message, print the
//! reply. Run the echo_server demo first.

use a2a_kit::prelude::*;

const AGENT_URL: &str = "http://localhost:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let url = AGENT_URL.parse()?;
    let mut client = A2AClientBuilder::new_http(url).build()?;

    // Step 1: discover the agent. Failure here aborts before anything is sent.
    println!("Discovering A2A agent at {AGENT_URL}...");
    let card = match client.discover().await {
        Ok(card) => card,
        Err(e) => {
            eprintln!("Discovery failed: {e}");
            eprintln!("Is the echo_server demo running?");
            return Ok(());
        }
    };
    println!("Found: {} - {}", card.name, card.description);

    // Step 2: send a message over JSON-RPC.
    println!("\nSending message...");
    let reply = client.invoke(Message::user("Hello A2A world!")).await?;

    // Step 3: print whichever reply shape came back.
    println!("Agent: {reply}");

    Ok(())
}
