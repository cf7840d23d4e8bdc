//! Scoreboard client: local form state driving an injected live connection.

/// Live connection handles.
pub mod transport;
/// Form state and board rendering.
pub mod view;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::dto::ws::{ClientMessage, PlayerScore, ServerMessage};

pub use self::transport::{DEFAULT_SERVER_URL, ScoreTransport, WsTransport};
pub use self::view::{ScoreForm, render_lines};

/// Errors surfaced by the client side of the real-time channel.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying WebSocket failed.
    #[error("websocket error: {0}")]
    Transport(#[from] tungstenite::Error),
    /// A frame could not be encoded or decoded.
    #[error("invalid message: {0}")]
    Codec(#[from] serde_json::Error),
    /// The server closed the connection.
    #[error("connection closed")]
    Closed,
}

/// Client-side view of the scoreboard bound to one connection for its lifetime.
pub struct ScoreClient<T> {
    transport: T,
    form: ScoreForm,
    scores: Vec<PlayerScore>,
    connection_id: Option<String>,
}

impl<T: ScoreTransport> ScoreClient<T> {
    /// Wrap an already established connection.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            form: ScoreForm::default(),
            scores: Vec::new(),
            connection_id: None,
        }
    }

    /// Record a change to one of the form inputs (`name` or `score`).
    pub fn handle_input(&mut self, field: &str, value: impl Into<String>) -> bool {
        self.form.set(field, value)
    }

    /// Current content of the local form.
    pub fn form(&self) -> &ScoreForm {
        &self.form
    }

    /// Submit the current form content.
    pub async fn publish(&mut self) -> Result<(), ClientError> {
        let submission = self.form.submission();
        self.transport.send(ClientMessage::Scores(submission)).await
    }

    /// Wait for the next server event and fold it into the local view.
    pub async fn next_update(&mut self) -> Result<ServerMessage, ClientError> {
        let message = self.transport.recv().await.ok_or(ClientError::Closed)??;
        match &message {
            ServerMessage::Connected(payload) => {
                self.connection_id = Some(payload.id.clone());
            }
            ServerMessage::PlayerScores(scores) => {
                self.scores = scores.clone();
            }
        }
        Ok(message)
    }

    /// Identifier the server assigned to this connection, once announced.
    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    /// Last board received from the server.
    pub fn scores(&self) -> &[PlayerScore] {
        &self.scores
    }

    /// Text rendering of the last board received.
    pub fn render(&self) -> Vec<String> {
        render_lines(&self.scores)
    }
}
