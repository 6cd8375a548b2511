// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fm_league::CoreError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors raised by the sync client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned status {0}")]
    Status(u16),

    /// The live subscription failed.
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),

    /// The cache file could not be read or written.
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A body or cache file was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A local edit was rejected.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<tungstenite::Error> for ClientError {
    fn from(err: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}
