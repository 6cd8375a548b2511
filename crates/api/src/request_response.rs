// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use fm_league_domain::LeagueState;

/// The broadcast channel league updates are published on.
pub const LEAGUE_CHANNEL: &str = "fm24-league";

/// API response for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveResponse {
    /// Always `true`.
    pub ok: bool,
    /// The version the server assigned to the saved document.
    pub version: u64,
    /// Whether the write was based on an outdated version.
    ///
    /// Stale writes are still accepted.
    #[serde(default)]
    pub conflict: bool,
}

/// API response for a failed save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// What went wrong.
    pub error: String,
}

impl SaveErrorResponse {
    /// Creates an error response with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Live event types pushed to subscribers.
///
/// Every update carries the whole document, so a subscriber that misses
/// events only needs the next one to catch up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// The league document was saved.
    DataUpdated {
        /// The channel the update was published on.
        channel: String,
        /// The saved document.
        state: LeagueState,
    },
}
