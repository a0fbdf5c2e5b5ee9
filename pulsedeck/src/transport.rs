//! Push-stream transport capability.
//!
//! The connection manager's state machine only sees these traits, so the
//! concrete wire (WebSocket here) can be swapped for any simplex or duplex
//! stream without touching it. Tests inject scripted implementations.

use async_trait::async_trait;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("stream failed: {0}")]
    Stream(String),
}

/// Factory for subscriptions to the push stream.
#[async_trait]
pub trait StreamTransport: Send + Sync + 'static {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError>;
}

/// One live subscription. `next_payload` yields `Ok(Some)` per text payload,
/// `Ok(None)` when the server ends the stream, `Err` on a transport fault.
#[async_trait]
pub trait StreamConn: Send {
    async fn next_payload(&mut self) -> Result<Option<String>, TransportError>;
    async fn close(&mut self);
}

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport against the agent's stream endpoint.
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl StreamTransport for WsTransport {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError> {
        let (ws, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Box::new(WsConn { ws }))
    }
}

struct WsConn {
    ws: WsStream,
}

#[async_trait]
impl StreamConn for WsConn {
    async fn next_payload(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                // ping/pong/binary frames are transport noise
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.ws.close(None).await;
    }
}
