//! Shared server state: the score board and the registry of open connections.

/// Ordered score board and connection identifiers.
pub mod scoreboard;

use std::sync::Arc;

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::{Mutex, mpsc};

use crate::config::AppConfig;

pub use self::scoreboard::{ConnectionId, ScoreBoard, ScoreRecord};

/// Reference-counted handle to [`AppState`] passed to every handler.
pub type SharedState = Arc<AppState>;

#[derive(Clone)]
/// Handle used to push messages to a connected client.
pub struct ClientConnection {
    /// Identifier assigned on connect.
    pub id: ConnectionId,
    /// Outbound queue drained by the connection's writer task.
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Central application state: the score board and the open connections.
pub struct AppState {
    config: Arc<AppConfig>,
    board: Mutex<ScoreBoard>,
    connections: DashMap<ConnectionId, ClientConnection>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config: Arc::new(config),
            board: Mutex::new(ScoreBoard::new()),
            connections: DashMap::new(),
        })
    }

    /// Runtime configuration the state was built with.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    /// The score board. Hold the guard across a mutation and its broadcast so
    /// snapshots reach clients in mutation order.
    pub fn board(&self) -> &Mutex<ScoreBoard> {
        &self.board
    }

    /// Registry of open sockets keyed by their identifier.
    pub fn connections(&self) -> &DashMap<ConnectionId, ClientConnection> {
        &self.connections
    }
}
