//! TUI sidecar server: state machine, HTTP transport, FIFO request queue.
//!
//! The server owns a loopback listener and a shared state flag; `start()`
//! binds and spawns the accept loop, `stop()` flips the flag and triggers
//! graceful shutdown. A bearer-token auth layer gates `/tui`; `/health` is
//! open so a client can cheaply probe reachability before sending a prompt.

use crate::protocol::{ComponentTag, Request, Response};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::RngCore;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot, Notify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Created,
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
}

impl ServerState {
    fn from_code(code: u8) -> Self {
        match code {
            0 => ServerState::Created,
            1 => ServerState::Starting,
            2 => ServerState::Running,
            3 => ServerState::Stopping,
            4 => ServerState::Stopped,
            _ => ServerState::Failed,
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("start() called from state {0:?}, expected Created")]
    InvalidStartState(ServerState),
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),
}

/// One queued prompt: the request plus the slot the HTTP handler is
/// blocked on for the eventual response.
pub type QueuedPrompt = (Request, oneshot::Sender<Response>);

struct SharedState {
    token: String,
    queue_tx: mpsc::Sender<QueuedPrompt>,
}

pub struct TuiServer {
    state: Arc<AtomicU8>,
    addr: Option<SocketAddr>,
    token: Option<String>,
    queue_rx: Option<mpsc::Receiver<QueuedPrompt>>,
    shutdown: Arc<Notify>,
}

const MIN_TOKEN_BYTES: usize = 16; // 128 bits

impl TuiServer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(ServerState::Created.code())),
            addr: None,
            token: None,
            queue_rx: None,
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> ServerState {
        ServerState::from_code(self.state.load(Ordering::SeqCst))
    }

    pub fn url(&self) -> Option<String> {
        self.addr.map(|addr| format!("http://{addr}"))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Binds a loopback listener on a random port, generates a token with
    /// at least 128 bits of entropy, and spawns the accept loop. Returns
    /// the receiving half of the FIFO prompt queue for the caller's actor
    /// loop to drain.
    pub async fn start(&mut self) -> Result<mpsc::Receiver<QueuedPrompt>, ServerError> {
        if self.state() != ServerState::Created {
            return Err(ServerError::InvalidStartState(self.state()));
        }
        self.state.store(ServerState::Starting.code(), Ordering::SeqCst);

        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) => {
                self.state.store(ServerState::Failed.code(), Ordering::SeqCst);
                return Err(ServerError::Bind(err));
            }
        };
        let addr = listener.local_addr().map_err(ServerError::Bind)?;

        let mut token_bytes = [0u8; MIN_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let token = hex::encode(token_bytes);

        let (queue_tx, queue_rx_for_actor) = mpsc::channel::<QueuedPrompt>(64);
        let shared = Arc::new(SharedState {
            token: token.clone(),
            queue_tx,
        });

        let app = Router::new()
            .route("/tui", post(handle_tui))
            .route_layer(middleware::from_fn_with_state(shared.clone(), auth_layer))
            .route("/health", get(handle_health))
            .with_state(shared);

        let shutdown = self.shutdown.clone();
        let state_flag = self.state.clone();
        tokio::spawn(async move {
            let serve = axum::serve(listener, app.into_make_service());
            let graceful = serve.with_graceful_shutdown(async move {
                shutdown.notified().await;
            });
            if let Err(err) = graceful.await {
                tracing::warn!("tui sidecar server error: {err}");
            }
            state_flag.store(ServerState::Stopped.code(), Ordering::SeqCst);
        });

        self.addr = Some(addr);
        self.token = Some(token);
        self.state.store(ServerState::Running.code(), Ordering::SeqCst);
        self.queue_rx = None;
        Ok(queue_rx_for_actor)
    }

    /// `stop()` from `Running` triggers graceful shutdown (the spawned
    /// task transitions to `Stopped` once the server drains). From
    /// `Stopped`/`Created` it is a no-op; from `Failed` it is a no-op too.
    pub fn stop(&mut self) {
        match self.state() {
            ServerState::Running => {
                self.state.store(ServerState::Stopping.code(), Ordering::SeqCst);
                self.shutdown.notify_one();
            }
            ServerState::Created | ServerState::Stopped | ServerState::Failed => {}
            ServerState::Starting | ServerState::Stopping => {}
        }
    }
}

impl Default for TuiServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn handle_health() -> impl IntoResponse {
    StatusCode::OK
}

async fn auth_layer(
    State(shared): State<Arc<SharedState>>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> axum::response::Response {
    let expected = format!("Bearer {}", shared.token);
    let actual = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match actual {
        Some(value) if value == expected => next.run(request).await,
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn handle_tui(
    State(shared): State<Arc<SharedState>>,
    Json(request): Json<Request>,
) -> impl IntoResponse {
    if !ComponentTag::is_valid(&request.component) {
        return Json(Response::unknown_component(&request.component));
    }

    let (tx, rx) = oneshot::channel();
    if shared.queue_tx.send((request, tx)).await.is_err() {
        return Json(Response::error("sidecar actor is not accepting prompts"));
    }

    match rx.await {
        Ok(response) => Json(response),
        Err(_) => Json(Response::error("sidecar actor dropped the prompt without responding")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_binds_and_generates_token() {
        let mut server = TuiServer::new();
        let _rx = server.start().await.unwrap();
        assert_eq!(server.state(), ServerState::Running);
        assert!(server.url().unwrap().starts_with("http://127.0.0.1:"));
        assert_eq!(server.token().unwrap().len(), MIN_TOKEN_BYTES * 2);
        server.stop();
    }

    #[tokio::test]
    async fn start_from_non_created_state_is_an_error() {
        let mut server = TuiServer::new();
        let _rx = server.start().await.unwrap();
        let err = server.start().await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidStartState(ServerState::Running)));
    }

    #[test]
    fn stop_from_created_is_idempotent() {
        let mut server = TuiServer::new();
        server.stop();
        assert_eq!(server.state(), ServerState::Created);
    }

    #[tokio::test]
    async fn unknown_component_gets_a_200_with_error_not_a_rejection() {
        let mut server = TuiServer::new();
        let mut queue = server.start().await.unwrap();
        let url = server.url().unwrap();
        let token = server.token().unwrap().to_string();

        // No actor is draining the queue; a bad component must be
        // answered by the server itself, never forwarded.
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{url}/tui"))
            .bearer_auth(&token)
            .json(&Request {
                component: "dropdown".to_string(),
                options: serde_json::json!({}),
            })
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Response = resp.json().await.unwrap();
        assert!(body.error.unwrap().starts_with("unknown component"));
        assert!(queue.try_recv().is_err());

        server.stop();
    }

    #[tokio::test]
    async fn missing_auth_header_is_unauthorized() {
        let mut server = TuiServer::new();
        let _rx = server.start().await.unwrap();
        let url = server.url().unwrap();

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{url}/tui"))
            .json(&Request {
                component: "confirm".to_string(),
                options: serde_json::json!({}),
            })
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        server.stop();
    }
}
