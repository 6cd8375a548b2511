// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! League table computation.
//!
//! Standings are a pure function of the managers, the matches, and the
//! active roster. Only counted matches of active managers contribute.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Manager, ManagerId, Match, MatchKind};

/// The result of a match from the owning manager's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// More goals scored than conceded.
    #[serde(rename = "W")]
    Win,
    /// Equal goals.
    #[serde(rename = "D")]
    Draw,
    /// Fewer goals scored than conceded.
    #[serde(rename = "L")]
    Loss,
}

impl MatchOutcome {
    /// Classifies a score line.
    #[must_use]
    pub const fn from_score(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            Self::Win
        } else if goals_for < goals_against {
            Self::Loss
        } else {
            Self::Draw
        }
    }

    /// Returns the single-letter form used in match lists.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "W",
            Self::Draw => "D",
            Self::Loss => "L",
        }
    }
}

/// Returns the points a match is worth to its owning manager.
///
/// Matches against other managers are worth more than matches against AI
/// clubs: a win is 5 instead of 3, a draw 2 instead of 1.
#[must_use]
pub const fn points_for(m: &Match) -> u32 {
    match (MatchOutcome::from_score(m.goals_for, m.goals_against), m.kind) {
        (MatchOutcome::Win, MatchKind::Teman) => 5,
        (MatchOutcome::Win, MatchKind::Ai) => 3,
        (MatchOutcome::Draw, MatchKind::Teman) => 2,
        (MatchOutcome::Draw, MatchKind::Ai) => 1,
        (MatchOutcome::Loss, _) => 0,
    }
}

/// Aggregated results over a set of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Matches played.
    pub played: u32,
    /// Matches won.
    pub won: u32,
    /// Matches drawn.
    pub drawn: u32,
    /// Matches lost.
    pub lost: u32,
    /// Goals scored.
    pub goals_for: u32,
    /// Goals conceded.
    pub goals_against: u32,
    /// Points earned.
    pub points: u32,
}

impl Record {
    /// Adds a match to the record.
    pub fn add(&mut self, m: &Match) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(m.goals_for);
        self.goals_against = self.goals_against.saturating_add(m.goals_against);
        match MatchOutcome::from_score(m.goals_for, m.goals_against) {
            MatchOutcome::Win => self.won = self.won.saturating_add(1),
            MatchOutcome::Draw => self.drawn = self.drawn.saturating_add(1),
            MatchOutcome::Loss => self.lost = self.lost.saturating_add(1),
        }
        self.points = self.points.saturating_add(points_for(m));
    }

    /// Goals scored minus goals conceded.
    #[must_use]
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    /// The manager this row belongs to.
    pub manager_id: ManagerId,
    /// The manager's display name.
    pub name: String,
    /// The manager's club.
    pub club: String,
    /// Aggregated results.
    #[serde(flatten)]
    pub record: Record,
    /// Goals scored minus goals conceded.
    pub goal_difference: i64,
}

/// Computes the league table.
///
/// One row is produced per distinct id in `active_manager_ids`; inactive
/// managers are left out even when they have counted matches. Rows are ordered
/// by points, then goal difference, then goals scored (all descending), then
/// by name. The result depends only on the inputs.
#[must_use]
pub fn compute_standings(
    managers: &[Manager],
    matches: &[Match],
    active_manager_ids: &[ManagerId],
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::with_capacity(active_manager_ids.len());
    let mut index: HashMap<&ManagerId, usize> = HashMap::with_capacity(active_manager_ids.len());

    for id in active_manager_ids {
        if index.contains_key(id) {
            continue;
        }
        let manager: Option<&Manager> = managers.iter().find(|m| &m.id == id);
        index.insert(id, rows.len());
        rows.push(StandingsRow {
            manager_id: id.clone(),
            name: manager.map_or_else(|| id.to_string(), |m| m.name.clone()),
            club: manager.map(|m| m.club_name.clone()).unwrap_or_default(),
            record: Record::default(),
            goal_difference: 0,
        });
    }

    for m in matches.iter().filter(|m| m.counted) {
        if let Some(&position) = index.get(&m.manager_id) {
            rows[position].record.add(m);
        }
    }

    for row in &mut rows {
        row.goal_difference = row.record.goal_difference();
    }

    rows.sort_by(compare_rows);
    rows
}

/// Table ordering: points, goal difference, goals for, then name.
///
/// Names compare case-insensitively first so "bobby" sits between "ALDO" and
/// "OWEN"; exact bytes and finally the manager id keep the order total.
fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.record
        .points
        .cmp(&a.record.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.record.goals_for.cmp(&a.record.goals_for))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.manager_id.cmp(&b.manager_id))
}
