//! Board mutations and the broadcast that follows each of them.

use axum::extract::ws::{Message, Utf8Bytes};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    dto::ws::{ConnectedPayload, PlayerScore, ScoreSubmission, ServerMessage},
    error::ServiceError,
    state::{ClientConnection, ConnectionId, ScoreBoard, SharedState},
};

/// Greet a new connection with its identifier, then add it to the registry.
///
/// The greeting is queued before the connection becomes visible to broadcasts,
/// so it is always the first message the client receives. Returns `None` when
/// the writer is already gone; nothing is registered in that case.
pub fn open_connection(
    state: &SharedState,
    tx: mpsc::UnboundedSender<Message>,
) -> Option<ConnectionId> {
    let id = ConnectionId::generate();
    let hello = ServerMessage::Connected(ConnectedPayload { id: id.to_string() });
    if !send_message(&tx, &hello) {
        return None;
    }

    state.connections().insert(
        id.clone(),
        ClientConnection {
            id: id.clone(),
            tx,
        },
    );
    Some(id)
}

/// Record the latest submission of `id` and broadcast the updated board.
pub async fn submit_score(state: &SharedState, id: &ConnectionId, submission: ScoreSubmission) {
    let mut board = state.board().lock().await;
    board.upsert(id, submission);
    info!(id = %id, records = board.len(), "score updated");
    broadcast_board(state, &board);
}

/// Forget a closed connection, drop its record and broadcast the remaining board.
///
/// The broadcast happens even when the connection never submitted a score.
pub async fn disconnect(state: &SharedState, id: &ConnectionId) {
    state.connections().remove(id);
    let mut board = state.board().lock().await;
    if board.remove(id).is_some() {
        info!(id = %id, records = board.len(), "score removed");
    }
    broadcast_board(state, &board);
}

/// Broadcast the current board to every open connection.
pub async fn broadcast_scores(state: &SharedState) {
    let board = state.board().lock().await;
    broadcast_board(state, &board);
}

/// Current board in submission order.
pub async fn scores(state: &SharedState) -> Vec<PlayerScore> {
    state.board().lock().await.snapshot()
}

/// Latest record submitted by the connection `id`.
pub async fn score(state: &SharedState, id: &str) -> Result<PlayerScore, ServiceError> {
    let board = state.board().lock().await;
    board
        .get(&ConnectionId::from(id))
        .map(PlayerScore::from)
        .ok_or_else(|| ServiceError::NotFound(format!("no score for connection `{id}`")))
}

/// Serialize `message` and queue it on a single connection's writer.
///
/// Returns `false` when the writer is gone and the connection should be dropped.
pub fn send_message(tx: &mpsc::UnboundedSender<Message>, message: &ServerMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(payload) => tx.send(Message::Text(payload.into())).is_ok(),
        Err(err) => {
            warn!(error = %err, "failed to serialize message `{message:?}`");
            true
        }
    }
}

/// Fan a snapshot of `board` out to all connections. Callers hold the board lock.
fn broadcast_board(state: &SharedState, board: &ScoreBoard) {
    let message = ServerMessage::PlayerScores(board.snapshot());
    let payload: Utf8Bytes = match serde_json::to_string(&message) {
        Ok(payload) => payload.into(),
        Err(err) => {
            warn!(error = %err, "failed to serialize board");
            return;
        }
    };

    let closed: Vec<ConnectionId> = state
        .connections()
        .iter()
        .filter(|entry| entry.tx.send(Message::Text(payload.clone())).is_err())
        .map(|entry| entry.id.clone())
        .collect();

    for id in &closed {
        warn!(id = %id, "writer closed during broadcast, removing connection");
        state.connections().remove(id);
    }

    debug!(
        records = board.len(),
        recipients = state.connections().len(),
        "broadcast player scores"
    );
}
