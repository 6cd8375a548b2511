// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The client driver.
//!
//! [`SyncClient`] wires a [`SyncSession`] to a transport and a cache. The
//! session decides whether a transition needs a push; the driver only
//! performs the I/O it is told to.

use fm_league::{Change, Command, Effect, InitialLoad, SyncSession};
use fm_league_api::{LiveEvent, SaveResponse};
use fm_league_domain::LeagueState;
use tracing::{debug, info, warn};

use crate::cache::DocumentCache;
use crate::error::ClientError;
use crate::transport::Transport;

/// Where the first document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The server answered.
    Server,
    /// The server was unreachable; the cached copy was used.
    Cache,
    /// Nothing was available; the default document is shown.
    Defaults,
}

/// Whether the server stored a local edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The server stored the edit under `version`.
    Confirmed {
        /// The version the server assigned.
        version: u64,
        /// Whether the edit was based on an outdated version.
        conflict: bool,
    },
    /// The push failed. The edit is only visible locally.
    Unconfirmed,
}

/// Keeps a local view of the league in sync with the server.
pub struct SyncClient<T, C> {
    transport: T,
    cache: C,
    session: SyncSession,
}

impl<T: Transport, C: DocumentCache> SyncClient<T, C> {
    /// Creates a client showing the default document.
    #[must_use]
    pub fn new(transport: T, cache: C) -> Self {
        Self {
            transport,
            cache,
            session: SyncSession::new(),
        }
    }

    /// Returns the current view.
    #[must_use]
    pub const fn view(&self) -> &LeagueState {
        self.session.view()
    }

    /// Returns the cache.
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns the underlying session.
    #[must_use]
    pub const fn session(&self) -> &SyncSession {
        &self.session
    }

    /// Performs the first load.
    ///
    /// The server is asked first; the cache is the fallback. Neither path
    /// pushes anything.
    pub async fn connect(&mut self) -> LoadSource {
        let (load, source) = match self.transport.fetch().await {
            Ok(state) => (InitialLoad::Fetched(state), LoadSource::Server),
            Err(e) => {
                warn!(error = %e, "Failed to fetch league document, trying cache");
                match self.cache.read() {
                    Ok(Some(state)) => (InitialLoad::Cached(state), LoadSource::Cache),
                    Ok(None) => (InitialLoad::Unavailable, LoadSource::Defaults),
                    Err(e) => {
                        warn!(error = %e, "Failed to read cached league document");
                        (InitialLoad::Unavailable, LoadSource::Defaults)
                    }
                }
            }
        };

        let effect: Effect = self.session.initialize(load);
        debug_assert_eq!(effect, Effect::None);

        if source == LoadSource::Server {
            self.store_cache();
        }
        info!(
            ?source,
            version = self.view().version,
            "Loaded league document"
        );
        source
    }

    /// Applies a local edit and saves the resulting document.
    ///
    /// A failed save is not retried; the edit stays in the local view and
    /// the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected. Nothing is sent in
    /// that case.
    pub async fn edit(&mut self, command: Command) -> Result<(Change, EditOutcome), ClientError> {
        let (effect, change) = self.session.apply_local(command)?;
        debug!(%change, "Applied local edit");

        let outcome: EditOutcome = match effect {
            Effect::Push(state) => self.push(&state).await,
            Effect::None => EditOutcome::Unconfirmed,
        };
        self.store_cache();
        Ok((change, outcome))
    }

    /// Applies an event from the live subscription.
    ///
    /// Returns `true` if the view changed.
    pub fn apply_event(&mut self, event: LiveEvent) -> bool {
        match event {
            LiveEvent::Connected { timestamp } => {
                debug!(%timestamp, "Live subscription confirmed");
                false
            }
            LiveEvent::DataUpdated { channel, state } => {
                debug!(%channel, version = state.version, "Received league update");
                let effect: Effect = self.session.apply_remote(state);
                debug_assert_eq!(effect, Effect::None);
                self.store_cache();
                true
            }
        }
    }

    async fn push(&mut self, state: &LeagueState) -> EditOutcome {
        match self.transport.push(state).await {
            Ok(SaveResponse {
                version, conflict, ..
            }) => {
                self.session.acknowledge(version);
                if conflict {
                    warn!(version, "Server flagged the save as based on an outdated version");
                }
                EditOutcome::Confirmed { version, conflict }
            }
            Err(e) => {
                warn!(error = %e, "Failed to save league document; keeping local edit");
                EditOutcome::Unconfirmed
            }
        }
    }

    fn store_cache(&mut self) {
        if let Err(e) = self.cache.write(self.session.view()) {
            warn!(error = %e, "Failed to cache league document");
        }
    }
}
