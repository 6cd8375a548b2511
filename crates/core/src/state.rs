// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fm_league_domain::{LeagueState, ManagerId};

/// What a successful command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A match was recorded under this id.
    MatchAdded {
        /// The new match id.
        match_id: u64,
    },
    /// A match's standings flag was flipped.
    MatchUseToggled {
        /// The toggled match.
        match_id: u64,
        /// Whether it now counts.
        counted: bool,
    },
    /// A manager's profile was edited.
    ManagerEdited {
        /// The edited manager.
        manager_id: ManagerId,
    },
    /// A manager joined or left the active roster.
    RosterChanged {
        /// The toggled manager.
        manager_id: ManagerId,
        /// Whether they are now active.
        active: bool,
    },
    /// The league was reset to the seed document.
    LeagueReset,
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatchAdded { match_id } => write!(f, "Added match {match_id}"),
            Self::MatchUseToggled { match_id, counted } => {
                let status: &str = if *counted { "counted" } else { "excluded" };
                write!(f, "Match {match_id} is now {status}")
            }
            Self::ManagerEdited { manager_id } => write!(f, "Edited manager {manager_id}"),
            Self::RosterChanged { manager_id, active } => {
                let status: &str = if *active { "joined" } else { "left" };
                write!(f, "Manager {manager_id} {status} the roster")
            }
            Self::LeagueReset => write!(f, "League reset"),
        }
    }
}

/// The result of a successful state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The league document after the command.
    pub new_state: LeagueState,
    /// What changed.
    pub change: Change,
}
