//! HTTP wiring for the A2A server endpoints

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::instrument;

use crate::protocol::agent::AgentCard;
use crate::protocol::error::{A2AError, A2AResult};
use crate::protocol::rpc::{JsonRpcRequest, JsonRpcResponse};

use super::dispatcher::Dispatcher;

/// Build the axum Router exposing the two protocol endpoints
pub fn a2a_router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/.well-known/agent-card.json", get(agent_card_handler))
        .route("/", post(rpc_handler))
        .with_state(dispatcher)
}

/// Bind and serve until the process exits
pub async fn serve(dispatcher: Dispatcher, addr: SocketAddr) -> A2AResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| A2AError::Transport(format!("failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, agent = %dispatcher.agent_card().name, "A2A server listening");

    axum::serve(listener, a2a_router(dispatcher))
        .await
        .map_err(|e| A2AError::Transport(e.to_string()))
}

/// GET /.well-known/agent-card.json
#[instrument(skip(dispatcher))]
async fn agent_card_handler(State(dispatcher): State<Dispatcher>) -> Json<AgentCard> {
    Json((*dispatcher.agent_card()).clone())
}

/// POST /, the JSON-RPC endpoint
///
/// The body is parsed by hand rather than through the Json extractor so that
/// an unparseable payload still yields a JSON-RPC error envelope instead of a
/// bare 4xx.
#[instrument(skip(dispatcher, body))]
async fn rpc_handler(State(dispatcher): State<Dispatcher>, body: Bytes) -> Json<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return Json(JsonRpcResponse::error(
                Value::Null,
                &A2AError::Serialization(err),
            ));
        }
    };

    Json(dispatcher.handle(request).await)
}
