use crate::core::{Console, Demo};
use crate::utils::error::{DemoError, Result};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

const CLOSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends one text frame and prints the first data frame that comes back.
pub struct WebSocketDemo {
    url: String,
    message: String,
}

impl WebSocketDemo {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[async_trait::async_trait]
impl Demo for WebSocketDemo {
    fn name(&self) -> &str {
        "WebSocket"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        tracing::debug!("Connecting to {}", self.url);
        let (mut socket, response) = connect_async(self.url.as_str()).await?;
        tracing::debug!("WebSocket handshake completed with status {}", response.status());

        console.print_line(&format!("Sending : {}", self.message));
        socket.send(Message::Text(self.message.clone())).await?;

        let reply = loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => break text,
                Some(Ok(Message::Binary(bytes))) => break String::from_utf8_lossy(&bytes).into_owned(),
                Some(Ok(Message::Close(frame))) => {
                    return Err(DemoError::ProtocolError {
                        message: format!("server closed the connection before replying: {:?}", frame),
                    });
                }
                Some(Ok(other)) => tracing::trace!("Skipping control frame: {:?}", other),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(DemoError::ProtocolError {
                        message: "connection ended before a reply arrived".to_string(),
                    });
                }
            }
        };
        console.print_line(&format!("Received : {}", reply));

        match socket.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => {}
            Err(e) => return Err(e.into()),
        }
        // wait for the server's close frame so the handshake completes
        let drained = tokio::time::timeout(CLOSE_TIMEOUT, async {
            while let Some(Ok(frame)) = socket.next().await {
                tracing::trace!("Frame after close: {:?}", frame);
            }
        })
        .await;
        if drained.is_err() {
            tracing::warn!("Server did not complete the close handshake within {:?}", CLOSE_TIMEOUT);
        }

        Ok(())
    }
}
