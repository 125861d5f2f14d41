//! Full-loop tests: real client against a real server over localhost
//!
//! Boots the echo agent on an ephemeral port, then drives it with the
//! high-level client: discover, invoke, get, cancel.

use std::sync::Arc;

use a2a_kit::client::A2AClientBuilder;
use a2a_kit::protocol::message::Message;
use a2a_kit::protocol::rpc::SendMessageResult;
use a2a_kit::protocol::task::TaskState;
use a2a_kit::protocol::{AgentCapabilities, AgentCard, AgentSkill};
use a2a_kit::server::{a2a_router, Dispatcher, EchoExecutor};

async fn spawn_echo_server(history: bool) -> url::Url {
    let capabilities = if history {
        AgentCapabilities::new().with_state_transition_history()
    } else {
        AgentCapabilities::new()
    };

    let card = AgentCard::new(
        "Echo Agent",
        "Repeats whatever you say back to you",
        "http://localhost:8000".parse().unwrap(),
        "1.0.0",
        "0.3.0",
    )
    .with_skill(
        AgentSkill::new("echo", "Echo Messages", "Repeats whatever you say")
            .with_tag("echo")
            .with_example("Hello there!"),
    )
    .with_capabilities(capabilities);

    let dispatcher = Dispatcher::new(card, Arc::new(EchoExecutor::new()));
    let router = a2a_router(dispatcher);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}").parse().unwrap()
}

#[tokio::test]
async fn discovery_then_echo() {
    let base_url = spawn_echo_server(true).await;
    let mut client = A2AClientBuilder::new_http(base_url).build().unwrap();

    let card = client.discover().await.unwrap();
    assert_eq!(card.name, "Echo Agent");
    assert_eq!(card.protocol_version, "0.3.0");
    assert!(!card.skills.is_empty());

    let reply = client.invoke(Message::user("Hello A2A world!")).await.unwrap();
    assert_eq!(reply, "You said: 'Hello A2A world!'");
}

#[tokio::test]
async fn invoke_handles_bare_reply_deployments() {
    // Same client code, a deployment that answers with a bare message.
    let base_url = spawn_echo_server(false).await;
    let mut client = A2AClientBuilder::new_http(base_url).build().unwrap();

    let result = client.send_message(Message::user("ping")).await.unwrap();
    assert!(matches!(result, SendMessageResult::Message(_)));

    let reply = client.invoke(Message::user("ping")).await.unwrap();
    assert_eq!(reply, "You said: 'ping'");
}

#[tokio::test]
async fn get_and_cancel_round_trip() {
    let base_url = spawn_echo_server(true).await;
    let mut client = A2AClientBuilder::new_http(base_url).build().unwrap();

    let result = client.send_message(Message::user("track me")).await.unwrap();
    let task = match result {
        SendMessageResult::Task(task) => task,
        other => panic!("Expected task result, got {other:?}"),
    };
    assert_eq!(task.status.state, TaskState::Completed);

    let fetched = client.get_task(task.id.clone()).await.unwrap();
    assert_eq!(fetched.id, task.id);
    assert_eq!(fetched.history.len(), task.history.len());

    // Cancel after completion: idempotent, status unchanged.
    let canceled = client.cancel_task(task.id.clone()).await.unwrap();
    assert_eq!(canceled.status.state, TaskState::Completed);
}

#[tokio::test]
async fn get_unknown_task_is_not_found() {
    let base_url = spawn_echo_server(true).await;
    let mut client = A2AClientBuilder::new_http(base_url).build().unwrap();

    let result = client.get_task("no-such-task".to_string()).await;
    assert!(matches!(
        result,
        Err(a2a_kit::protocol::error::A2AError::TaskNotFound { .. })
    ));
}

#[tokio::test]
async fn discovery_failure_aborts_before_any_send() {
    // Nothing is listening here; discovery must fail with a transport error.
    let mut client = A2AClientBuilder::new_http("http://127.0.0.1:1".parse().unwrap())
        .build()
        .unwrap();

    let result = client.discover().await;
    assert!(matches!(
        result,
        Err(a2a_kit::protocol::error::A2AError::Transport(_))
            | Err(a2a_kit::protocol::error::A2AError::Timeout)
    ));
}
