// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clubs;
mod document;
mod error;
mod standings;
mod summary;
mod types;

#[cfg(test)]
mod tests;

pub use clubs::{CLUB_LOGOS, club_name_from_logo, club_names, is_catalogue_logo, logo_for_club};
pub use document::{LeagueState, PartialLeagueState};
pub use error::DomainError;
pub use standings::{MatchOutcome, Record, StandingsRow, compute_standings, points_for};
pub use summary::{
    ManagerSummary, MatchFilter, OrphanedReference, ReferenceSide, UNKNOWN_OPPONENT,
    filter_matches, find_orphaned_references, manager_summary, newest_first, opponent_label,
};
pub use types::{Competition, Manager, ManagerId, Match, MatchKind, Opponent, Venue};

/// Computes the league table for a whole document.
///
/// Shorthand for [`compute_standings`] over the document's own roster.
#[must_use]
pub fn standings_for(state: &LeagueState) -> Vec<StandingsRow> {
    compute_standings(&state.managers, &state.matches, &state.active_manager_ids)
}
