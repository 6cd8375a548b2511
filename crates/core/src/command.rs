// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fm_league_domain::{Competition, ManagerId, Venue};

/// How the submitter picked the opponent of a new match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentChoice {
    /// A club from the catalogue. Resolves to a league manager if another
    /// active manager has claimed the club, otherwise to an AI opponent.
    Club(String),
    /// Another league manager, picked directly.
    Manager(ManagerId),
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request local edits to the league document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a new match result.
    AddMatch {
        /// The manager who played the match.
        manager_id: ManagerId,
        /// Who they played against.
        opponent: OpponentChoice,
        /// The match date (`YYYY-MM-DD`).
        date: String,
        /// The competition.
        competition: Competition,
        /// Home or away.
        venue: Venue,
        /// Goals scored.
        goals_for: u32,
        /// Goals conceded.
        goals_against: u32,
    },
    /// Include or exclude a match from the standings.
    ToggleMatchUse {
        /// The match to toggle.
        match_id: u64,
    },
    /// Edit a manager's club and biography.
    EditManager {
        /// The manager to edit.
        manager_id: ManagerId,
        /// New club logo file; an empty string clears the club.
        club_logo_file: Option<String>,
        /// New biography.
        bio: Option<String>,
    },
    /// Add the manager to the active roster, or remove them from it.
    ToggleManagerActive {
        /// The manager to toggle.
        manager_id: ManagerId,
    },
    /// Discard everything and start from the seed document.
    ResetLeague,
}
