use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};

use crate::{dto::ws::ClientMessage, services::scoreboard_service, state::SharedState};

/// Handle the full lifecycle for an individual scoreboard WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let Some(connection_id) = scoreboard_service::open_connection(&state, outbound_tx.clone())
    else {
        info!("connection closed before greeting, terminating");
        finalize(writer_task, outbound_tx).await;
        return;
    };
    info!(id = %connection_id, "client connected");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                info!(id = %connection_id, payload = %text, "received client message");

                match ClientMessage::from_json_str(text.as_str()) {
                    Ok(ClientMessage::Scores(submission)) => {
                        scoreboard_service::submit_score(&state, &connection_id, submission).await;
                    }
                    Err(err) => {
                        warn!(id = %connection_id, error = %err, "ignoring client message");
                    }
                }
            }
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(id = %connection_id, "client closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(id = %connection_id, error = %err, "websocket error");
                break;
            }
        }
    }

    scoreboard_service::disconnect(&state, &connection_id).await;
    info!(id = %connection_id, "client disconnected");

    finalize(writer_task, outbound_tx).await;
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
