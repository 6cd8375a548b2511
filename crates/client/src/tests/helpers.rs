// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fm_league::{Command, OpponentChoice};
use fm_league_api::SaveResponse;
use fm_league_domain::{Competition, LeagueState, ManagerId, Venue};
use std::sync::Mutex;

use crate::{ClientError, Transport};

/// A transport answering from memory.
///
/// `remote: None` makes every fetch fail; `accept: false` makes every push
/// fail. Every push attempt is recorded either way.
#[derive(Default)]
pub struct MockTransport {
    pub remote: Option<LeagueState>,
    pub accept: bool,
    pub conflict: bool,
    pub pushed: Mutex<Vec<LeagueState>>,
}

impl MockTransport {
    pub fn serving(state: LeagueState) -> Self {
        Self {
            remote: Some(state),
            accept: true,
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self::default()
    }

    pub fn pushed(&self) -> Vec<LeagueState> {
        self.pushed.lock().unwrap().clone()
    }
}

impl Transport for &MockTransport {
    async fn fetch(&self) -> Result<LeagueState, ClientError> {
        self.remote.clone().ok_or(ClientError::Status(503))
    }

    async fn push(&self, state: &LeagueState) -> Result<SaveResponse, ClientError> {
        self.pushed.lock().unwrap().push(state.clone());
        if !self.accept {
            return Err(ClientError::Status(500));
        }
        Ok(SaveResponse {
            ok: true,
            version: state.version + 1,
            conflict: self.conflict,
        })
    }
}

pub fn document_at_version(version: u64) -> LeagueState {
    LeagueState {
        version,
        timestamp: String::from("2026-01-10T12:00:00.000000000Z"),
        ..LeagueState::default()
    }
}

pub fn add_match_against(opponent_id: &str) -> Command {
    Command::AddMatch {
        manager_id: ManagerId::new("m1"),
        opponent: OpponentChoice::Manager(ManagerId::new(opponent_id)),
        date: String::from("2026-01-10"),
        competition: Competition::Liga,
        venue: Venue::Home,
        goals_for: 2,
        goals_against: 1,
    }
}
