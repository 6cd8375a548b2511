// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fetching and saving the league document over HTTP.

use fm_league_api::SaveResponse;
use fm_league_domain::{LeagueState, PartialLeagueState};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;

/// Moves whole documents between the client and the server.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetches the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or refuses the request.
    async fn fetch(&self) -> Result<LeagueState, ClientError>;

    /// Saves a whole document, returning the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or did not store the
    /// document.
    async fn push(&self, state: &LeagueState) -> Result<SaveResponse, ClientError>;
}

/// Decodes a document received from the server or read from a cache.
///
/// Fields are coerced the same way the server coerces inbound writes. The
/// version and timestamp are kept as sent.
#[must_use]
pub fn decode_document(value: &Value) -> LeagueState {
    let mut state: LeagueState = PartialLeagueState::from_value(value).into_state();
    if let Some(timestamp) = value.get("timestamp").and_then(Value::as_str) {
        state.timestamp = timestamp.to_string();
    }
    state
}

/// A [`Transport`] speaking JSON to the league server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn data_url(&self) -> String {
        format!("{}/data", self.base_url)
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self) -> Result<LeagueState, ClientError> {
        let response = self.client.get(self.data_url()).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json().await?;
                let state: LeagueState = decode_document(&body);
                debug!(version = state.version, "Fetched league document");
                Ok(state)
            }
            status => Err(ClientError::Status(status.as_u16())),
        }
    }

    async fn push(&self, state: &LeagueState) -> Result<SaveResponse, ClientError> {
        let response = self
            .client
            .post(self.data_url())
            .json(state)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<SaveResponse>().await?),
            status => Err(ClientError::Status(status.as_u16())),
        }
    }
}
