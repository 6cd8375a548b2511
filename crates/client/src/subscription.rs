// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Following live league updates over WebSocket.

use fm_league_api::LiveEvent;
use futures::StreamExt;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::transport::decode_document;

/// Builds the live endpoint URL for a server base URL.
///
/// `http` becomes `ws` and `https` becomes `wss`.
#[must_use]
pub fn live_url(base_url: &str) -> String {
    let base: &str = base_url.trim_end_matches('/');
    let ws_base: String = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{ws_base}/live")
}

/// Decodes one text frame from the live endpoint.
///
/// Returns `None` for event types this client does not know.
///
/// # Errors
///
/// Returns an error if the frame is not JSON.
pub fn decode_event(text: &str) -> Result<Option<LiveEvent>, ClientError> {
    let value: Value = serde_json::from_str(text)?;
    let event: Option<LiveEvent> = match value.get("type").and_then(Value::as_str) {
        Some("connected") => Some(LiveEvent::Connected {
            timestamp: value
                .get("timestamp")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        Some("data-updated") => Some(LiveEvent::DataUpdated {
            channel: value
                .get("channel")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            state: decode_document(value.get("state").unwrap_or(&Value::Null)),
        }),
        other => {
            debug!(event_type = ?other, "Ignoring unknown live event");
            None
        }
    };
    Ok(event)
}

/// An open connection to the live endpoint.
pub struct Subscription {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Subscription {
    /// Connects to the live endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the WebSocket handshake fails.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        info!(url, "Subscribed to live league updates");
        Ok(Self { stream })
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the server closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn next_event(&mut self) -> Result<Option<LiveEvent>, ClientError> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => match decode_event(text.as_str()) {
                    Ok(Some(event)) => return Ok(Some(event)),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Dropping malformed live event"),
                },
                Message::Close(_) => {
                    info!("Server closed the live connection");
                    return Ok(None);
                }
                // Ping/pong is answered by tungstenite
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }
}
