// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live league updates over WebSocket.
//!
//! Every successful save is pushed to every connected client as a
//! `data-updated` event carrying the whole document.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Clients never send commands over the socket; edits go through `POST /data`
//! - A lagging client drops old events and catches up on the next one

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use fm_league_api::{LiveEvent, PublishError, Publisher};
use futures::{SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Broadcaster for live league events on a single channel.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive league updates.
pub struct LiveEventBroadcaster {
    /// The channel this broadcaster serves.
    channel: String,
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster for the given channel.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            channel: channel.into(),
            tx,
        }
    }

    /// Returns the channel this broadcaster serves.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Publisher for LiveEventBroadcaster {
    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    fn publish(&self, channel: &str, event: &LiveEvent) -> Result<usize, PublishError> {
        if channel != self.channel {
            return Err(PublishError::UnknownChannel(channel.to_string()));
        }

        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(channel, receivers = count, "Broadcast live event");
                Ok(count)
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(channel, "No receivers for live event");
                Ok(0)
            }
        }
    }
}

/// Builds the confirmation sent to a newly connected client.
fn connected_event() -> LiveEvent {
    LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `broadcaster` - The live event broadcaster from application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection confirmation, then streams all live events until
/// the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!(channel = broadcaster.channel(), "Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    if let Ok(json) = serde_json::to_string(&connected_event())
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            // Client disconnected
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, dropping old events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_league_api::LEAGUE_CHANNEL;
    use fm_league_domain::LeagueState;

    fn data_updated() -> LiveEvent {
        LiveEvent::DataUpdated {
            channel: LEAGUE_CHANNEL.to_string(),
            state: LeagueState::default(),
        }
    }

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = LiveEventBroadcaster::new(LEAGUE_CHANNEL);
        assert_eq!(broadcaster.tx.receiver_count(), 0);
        assert_eq!(broadcaster.channel(), LEAGUE_CHANNEL);
    }

    #[test]
    fn test_publish_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new(LEAGUE_CHANNEL);
        assert_eq!(broadcaster.publish(LEAGUE_CHANNEL, &data_updated()), Ok(0));
    }

    #[test]
    fn test_publish_unknown_channel() {
        let broadcaster = LiveEventBroadcaster::new(LEAGUE_CHANNEL);
        let mut rx = broadcaster.subscribe();

        let result = broadcaster.publish("other-league", &data_updated());

        assert_eq!(
            result,
            Err(PublishError::UnknownChannel(String::from("other-league")))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = LiveEventBroadcaster::new(LEAGUE_CHANNEL);
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        assert_eq!(broadcaster.publish(LEAGUE_CHANNEL, &data_updated()), Ok(2));

        assert!(matches!(rx1.try_recv(), Ok(LiveEvent::DataUpdated { .. })));
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::DataUpdated { .. })));
    }

    #[test]
    fn test_connected_event_wire_format() {
        let json: serde_json::Value = serde_json::to_value(connected_event()).unwrap();

        assert_eq!(json["type"], "connected");
        assert!(json["timestamp"].is_string());
    }
}
