// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side views over the league document: manager detail, match lists,
//! opponent labels, and dangling references.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::document::LeagueState;
use crate::standings::Record;
use crate::types::{Competition, Manager, ManagerId, Match, MatchKind, Opponent};

/// Label shown for opponents that cannot be resolved.
pub const UNKNOWN_OPPONENT: &str = "unknown";

/// A manager's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSummary {
    /// The manager.
    pub manager: Manager,
    /// Results over all of the manager's counted matches.
    pub record: Record,
    /// All of the manager's matches, newest first.
    pub matches: Vec<Match>,
}

/// Builds the detail view for one manager.
///
/// Unlike the league table this ignores the active roster: a benched manager
/// still has a history. Returns `None` when the manager does not exist.
#[must_use]
pub fn manager_summary(state: &LeagueState, manager_id: &ManagerId) -> Option<ManagerSummary> {
    let manager: &Manager = state.manager(manager_id)?;

    let mut matches: Vec<Match> = state
        .matches
        .iter()
        .filter(|m| &m.manager_id == manager_id)
        .cloned()
        .collect();
    matches.sort_by(newest_first);

    let mut record: Record = Record::default();
    for m in matches.iter().filter(|m| m.counted) {
        record.add(m);
    }

    Some(ManagerSummary {
        manager: manager.clone(),
        record,
        matches,
    })
}

/// Orders matches by date descending; undated matches go last, ties by id descending.
#[must_use]
pub fn newest_first(a: &Match, b: &Match) -> Ordering {
    match (a.played_on(), b.played_on()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.id.cmp(&a.id))
}

/// Filter for the match list. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    /// Only matches of this kind.
    pub kind: Option<MatchKind>,
    /// Only matches in this competition.
    pub competition: Option<Competition>,
    /// Only matches of this manager.
    pub manager_id: Option<ManagerId>,
}

impl MatchFilter {
    fn accepts(&self, m: &Match) -> bool {
        self.kind.is_none_or(|kind| m.kind == kind)
            && self.competition.is_none_or(|c| m.competition == c)
            && self.manager_id.as_ref().is_none_or(|id| &m.manager_id == id)
    }
}

/// Lists the matches shown on the league page.
///
/// Matches of managers outside the active roster are always hidden.
#[must_use]
pub fn filter_matches<'a>(state: &'a LeagueState, filter: &MatchFilter) -> Vec<&'a Match> {
    state
        .matches
        .iter()
        .filter(|m| state.is_active(&m.manager_id) && filter.accepts(m))
        .collect()
}

/// Returns the display label for a match's opponent.
///
/// Known opponents show their club name (or their name if they have no club).
/// References to managers that no longer exist, and empty AI names, show
/// [`UNKNOWN_OPPONENT`].
#[must_use]
pub fn opponent_label(state: &LeagueState, m: &Match) -> String {
    match &m.opponent {
        Opponent::Known(id) => state.manager(id).map_or_else(
            || UNKNOWN_OPPONENT.to_string(),
            |opponent| {
                if opponent.club_name.is_empty() {
                    opponent.name.clone()
                } else {
                    opponent.club_name.clone()
                }
            },
        ),
        Opponent::External(name) if name.is_empty() => UNKNOWN_OPPONENT.to_string(),
        Opponent::External(name) => name.clone(),
    }
}

/// Which side of a match holds a dangling manager reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceSide {
    /// The owning manager.
    Owner,
    /// The opposing manager.
    Opponent,
}

/// A match referencing a manager that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedReference {
    /// The match holding the reference.
    pub match_id: u64,
    /// Which side of the match it is.
    pub side: ReferenceSide,
    /// The missing manager id.
    pub manager_id: ManagerId,
}

/// Lists every match reference to a manager that does not exist.
///
/// Such references are tolerated in the document; this is for reporting.
#[must_use]
pub fn find_orphaned_references(state: &LeagueState) -> Vec<OrphanedReference> {
    let mut orphans: Vec<OrphanedReference> = Vec::new();
    for m in &state.matches {
        if state.manager(&m.manager_id).is_none() {
            orphans.push(OrphanedReference {
                match_id: m.id,
                side: ReferenceSide::Owner,
                manager_id: m.manager_id.clone(),
            });
        }
        if let Opponent::Known(id) = &m.opponent
            && state.manager(id).is_none()
        {
            orphans.push(OrphanedReference {
                match_id: m.id,
                side: ReferenceSide::Opponent,
                manager_id: id.clone(),
            });
        }
    }
    orphans
}
