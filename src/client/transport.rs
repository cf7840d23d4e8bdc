//! Live connection handles used by [`super::ScoreClient`].

use futures::{SinkExt, StreamExt, future::BoxFuture};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info};

use crate::{
    client::ClientError,
    dto::ws::{ClientMessage, ServerMessage},
};

/// Default address of a locally running scoreboard server.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:3000/ws";

/// Bidirectional channel carrying scoreboard events.
pub trait ScoreTransport: Send {
    /// Emit one event to the server.
    fn send(&mut self, message: ClientMessage) -> BoxFuture<'_, Result<(), ClientError>>;
    /// Wait for the next server event; `None` once the connection is closed.
    fn recv(&mut self) -> BoxFuture<'_, Option<Result<ServerMessage, ClientError>>>;
}

/// [`ScoreTransport`] backed by a WebSocket connection.
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Open a WebSocket connection to `url`.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        info!(url, "connected to scoreboard server");
        Ok(Self { stream })
    }
}

impl ScoreTransport for WsTransport {
    fn send(&mut self, message: ClientMessage) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move {
            let payload = serde_json::to_string(&message)?;
            self.stream.send(Message::text(payload)).await?;
            Ok(())
        })
    }

    fn recv(&mut self) -> BoxFuture<'_, Option<Result<ServerMessage, ClientError>>> {
        Box::pin(async move {
            loop {
                match self.stream.next().await? {
                    Ok(Message::Text(text)) => {
                        return Some(serde_json::from_str(text.as_str()).map_err(Into::into));
                    }
                    Ok(Message::Close(frame)) => {
                        debug!(?frame, "server closed the connection");
                        return None;
                    }
                    Ok(_) => continue,
                    Err(err) => return Some(Err(err.into())),
                }
            }
        })
    }
}
