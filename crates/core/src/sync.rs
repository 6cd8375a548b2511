// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-side synchronization state machine.
//!
//! Every change to the local view is tagged with where it came from.
//! Remote-origin changes are never pushed back to the server, local-origin
//! changes always are. No flag outlives the transition that set it, so an
//! update arriving while another is being applied cannot leak a save.

use fm_league_domain::LeagueState;

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Change, TransitionResult};

/// Where a change to the view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A user edit on this client.
    Local,
    /// A document fetched from, or broadcast by, the server.
    Remote,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to send.
    None,
    /// Save this whole document to the server.
    Push(LeagueState),
}

impl Effect {
    /// Returns the document to push, if any.
    #[must_use]
    pub const fn document(&self) -> Option<&LeagueState> {
        match self {
            Self::None => None,
            Self::Push(state) => Some(state),
        }
    }
}

/// The outcome of the first load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialLoad {
    /// The server answered.
    Fetched(LeagueState),
    /// The server was unreachable but a cached copy exists.
    Cached(LeagueState),
    /// Neither the server nor a cache produced a document.
    Unavailable,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not yet loaded.
    Initial,
    /// Loaded and following server updates.
    Listening,
}

/// A client's view of the shared league document.
#[derive(Debug, Clone)]
pub struct SyncSession {
    view: LeagueState,
    phase: Phase,
    last_origin: Option<Origin>,
}

impl SyncSession {
    /// Creates a session showing the default document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: LeagueState::default(),
            phase: Phase::Initial,
            last_origin: None,
        }
    }

    /// Returns the current view.
    #[must_use]
    pub const fn view(&self) -> &LeagueState {
        &self.view
    }

    /// Returns the session phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the origin of the most recent change, if any.
    #[must_use]
    pub const fn last_origin(&self) -> Option<Origin> {
        self.last_origin
    }

    /// Applies the result of the first load and starts listening.
    ///
    /// Loaded documents count as remote, so this never pushes.
    pub fn initialize(&mut self, load: InitialLoad) -> Effect {
        self.phase = Phase::Listening;
        match load {
            InitialLoad::Fetched(state) | InitialLoad::Cached(state) => {
                self.transition(Origin::Remote, state)
            }
            InitialLoad::Unavailable => Effect::None,
        }
    }

    /// Replaces the view with a document received from the server.
    pub fn apply_remote(&mut self, state: LeagueState) -> Effect {
        self.phase = Phase::Listening;
        self.transition(Origin::Remote, state)
    }

    /// Applies a local edit and returns the document to push.
    ///
    /// The pushed document carries the version the edit was based on.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is not valid against the current view.
    /// The view is left unchanged in that case.
    pub fn apply_local(&mut self, command: Command) -> Result<(Effect, Change), CoreError> {
        let TransitionResult { new_state, change } = apply(&self.view, command)?;
        let effect: Effect = self.transition(Origin::Local, new_state);
        Ok((effect, change))
    }

    /// Records the version the server assigned to our last push.
    ///
    /// Never lowers the version and never pushes.
    pub fn acknowledge(&mut self, version: u64) {
        self.view.version = self.view.version.max(version);
    }

    fn transition(&mut self, origin: Origin, mut state: LeagueState) -> Effect {
        state.normalize();
        self.view = state;
        self.last_origin = Some(origin);
        match origin {
            Origin::Local => Effect::Push(self.view.clone()),
            Origin::Remote => Effect::None,
        }
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}
