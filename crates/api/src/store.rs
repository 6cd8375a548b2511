// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shared league document store.
//!
//! The store owns the authoritative in-memory copy of the document. Every
//! save follows the same path:
//!
//! 1. coerce the inbound document (per [`WriteMode`])
//! 2. stamp it with the server time and the next version
//! 3. commit it to the in-memory copy
//! 4. persist it (failure is reported to the writer)
//! 5. publish it (failure is only logged)
//!
//! Steps 4 and 5 are independent: a failed write is still broadcast.

use fm_league::{Command, apply};
use fm_league_domain::{
    LeagueState, ManagerId, ManagerSummary, OrphanedReference, PartialLeagueState, StandingsRow,
    find_orphaned_references, manager_summary, standings_for,
};
use fm_league_persistence::DocumentBackend;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::publisher::Publisher;
use crate::request_response::{LEAGUE_CHANNEL, LiveEvent, SaveResponse};

/// How an inbound document is combined with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Fields missing from the inbound document take their defaults.
    #[default]
    Replace,
    /// Fields missing from the inbound document keep their stored values.
    Merge,
}

impl WriteMode {
    /// Returns the configuration name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "merge" => Ok(Self::Merge),
            _ => Err(format!(
                "Invalid write mode: '{s}'. Must be 'replace' or 'merge'"
            )),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The channel saves are published on.
    pub channel: String,
    /// How inbound documents are combined with the stored one.
    pub mode: WriteMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel: LEAGUE_CHANNEL.to_string(),
            mode: WriteMode::default(),
        }
    }
}

/// The league document store.
pub struct LeagueStore<B, P> {
    backend: B,
    publisher: P,
    config: StoreConfig,
    current: LeagueState,
}

impl<B: DocumentBackend, P: Publisher> LeagueStore<B, P> {
    /// Opens the store, loading the stored document.
    ///
    /// Falls back to the default document when nothing is stored or the
    /// stored document cannot be read.
    pub fn open(mut backend: B, publisher: P, config: StoreConfig) -> Self {
        let current: LeagueState = match backend.load_document() {
            Ok(Some(state)) => {
                info!(
                    version = state.version,
                    matches = state.matches.len(),
                    "Loaded stored league document"
                );
                state
            }
            Ok(None) => {
                info!("No stored league document, starting from defaults");
                LeagueState::default()
            }
            Err(e) => {
                error!(error = %e, "Failed to load league document, starting from defaults");
                LeagueState::default()
            }
        };

        let orphans: Vec<OrphanedReference> = find_orphaned_references(&current);
        if !orphans.is_empty() {
            warn!(
                count = orphans.len(),
                "League document references unknown managers; they will show as unknown"
            );
        }

        Self {
            backend,
            publisher,
            config,
            current,
        }
    }

    /// Returns the current document.
    #[must_use]
    pub fn load(&self) -> LeagueState {
        self.current.clone()
    }

    /// Saves an inbound document, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object, or if the document
    /// could not be persisted. In the latter case the document has still
    /// been committed and broadcast.
    pub fn save(&mut self, body: &Value) -> Result<SaveResponse, ApiError> {
        self.save_at(body, OffsetDateTime::now_utc())
    }

    /// Saves an inbound document, stamped with the given time.
    ///
    /// # Errors
    ///
    /// See [`LeagueStore::save`].
    pub fn save_at(&mut self, body: &Value, at: OffsetDateTime) -> Result<SaveResponse, ApiError> {
        if !body.is_object() {
            return Err(ApiError::InvalidDocument(String::from(
                "expected a JSON object",
            )));
        }

        let partial: PartialLeagueState = PartialLeagueState::from_value(body);
        let based_on: Option<u64> = partial.version;
        let next: LeagueState = match self.config.mode {
            WriteMode::Replace => partial.into_state(),
            WriteMode::Merge => partial.merge_onto(&self.current),
        };

        let conflict: bool = based_on.is_some_and(|version| version < self.current.version);
        if conflict {
            warn!(
                based_on = based_on.unwrap_or_default(),
                stored = self.current.version,
                "Accepting write based on an outdated version"
            );
        }

        self.commit(next, at, conflict)
    }

    /// Replaces the league with the seed document.
    ///
    /// # Errors
    ///
    /// See [`LeagueStore::save`].
    pub fn reset(&mut self) -> Result<SaveResponse, ApiError> {
        self.reset_at(OffsetDateTime::now_utc())
    }

    /// Replaces the league with the seed document, stamped with the given time.
    ///
    /// # Errors
    ///
    /// See [`LeagueStore::save`].
    pub fn reset_at(&mut self, at: OffsetDateTime) -> Result<SaveResponse, ApiError> {
        let next: LeagueState = apply(&self.current, Command::ResetLeague)?.new_state;
        info!("Resetting league document");
        self.commit(next, at, false)
    }

    /// Computes the standings of the current document.
    #[must_use]
    pub fn standings(&self) -> Vec<StandingsRow> {
        standings_for(&self.current)
    }

    /// Builds the detail view of one manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the manager does not exist.
    pub fn manager_summary(&self, manager_id: &ManagerId) -> Result<ManagerSummary, ApiError> {
        manager_summary(&self.current, manager_id).ok_or_else(|| ApiError::NotFound {
            resource_type: String::from("Manager"),
            message: format!("No manager with id '{manager_id}'"),
        })
    }

    fn commit(
        &mut self,
        mut next: LeagueState,
        at: OffsetDateTime,
        conflict: bool,
    ) -> Result<SaveResponse, ApiError> {
        next.version = self.current.version.saturating_add(1);
        next.timestamp = at
            .format(&Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown"));
        self.current = next;

        let persisted = self.backend.save_document(&self.current);
        if let Err(e) = &persisted {
            error!(
                error = %e,
                version = self.current.version,
                "Failed to persist league document"
            );
        }

        self.broadcast();

        persisted?;

        info!(
            version = self.current.version,
            matches = self.current.matches.len(),
            conflict,
            "Saved league document"
        );

        Ok(SaveResponse {
            ok: true,
            version: self.current.version,
            conflict,
        })
    }

    fn broadcast(&self) {
        let event: LiveEvent = LiveEvent::DataUpdated {
            channel: self.config.channel.clone(),
            state: self.current.clone(),
        };
        match self.publisher.publish(&self.config.channel, &event) {
            Ok(receivers) => {
                debug!(
                    channel = %self.config.channel,
                    receivers,
                    "Broadcast league update"
                );
            }
            Err(e) => {
                warn!(
                    channel = %self.config.channel,
                    error = %e,
                    "Failed to broadcast league update"
                );
            }
        }
    }
}
