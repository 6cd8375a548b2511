// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shared league document and its lenient decoding.
//!
//! The whole document is the unit of synchronization: every write replaces
//! it wholesale. Inbound documents are never rejected for shape problems.
//! Each field is decoded on its own and falls back to a safe default:
//!
//! - a missing or non-array list becomes empty
//! - list elements that fail to decode are dropped
//! - a missing match counter becomes 1
//! - an empty roster means "everyone is active"

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::types::{Manager, ManagerId, Match};

/// The single shared league document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueState {
    /// Every manager ever registered.
    pub managers: Vec<Manager>,
    /// Every match ever recorded.
    pub matches: Vec<Match>,
    /// The identifier the next match will receive.
    pub match_counter: u64,
    /// Managers taking part in the league, in roster order.
    pub active_manager_ids: Vec<ManagerId>,
    /// Server-assigned time of the last save (ISO 8601).
    #[serde(default)]
    pub timestamp: String,
    /// Server-assigned save counter.
    #[serde(default)]
    pub version: u64,
}

impl LeagueState {
    /// Returns the four seed managers of a fresh league.
    #[must_use]
    pub fn seed_managers() -> Vec<Manager> {
        vec![
            Manager::new("m1", "HUI", "Manchester City", "hui.png"),
            Manager::new("m2", "bobby", "Liverpool FC", "bobby.png"),
            Manager::new("m3", "ALDO", "Chelsea FC", "aldo.png"),
            Manager::new("m4", "OWEN", "Manchester United", "owen.png"),
        ]
    }

    /// Looks up a manager by identifier.
    #[must_use]
    pub fn manager(&self, id: &ManagerId) -> Option<&Manager> {
        self.managers.iter().find(|m| &m.id == id)
    }

    /// Returns whether the manager is on the active roster.
    #[must_use]
    pub fn is_active(&self, id: &ManagerId) -> bool {
        self.active_manager_ids.contains(id)
    }

    /// Returns the active managers in roster order.
    pub fn active_managers(&self) -> impl Iterator<Item = &Manager> {
        self.active_manager_ids
            .iter()
            .filter_map(|id| self.manager(id))
    }

    /// Looks up a match by identifier.
    #[must_use]
    pub fn find_match(&self, id: u64) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Returns the smallest counter value that cannot collide with an existing match.
    #[must_use]
    pub fn next_free_match_id(&self) -> u64 {
        self.matches
            .iter()
            .map(|m| m.id)
            .max()
            .map_or(1, |max_id| max_id.saturating_add(1))
    }

    /// Restores the document invariants.
    ///
    /// - `match_counter` is raised above every existing match id
    /// - unknown and duplicate roster ids are dropped
    /// - an empty roster is replaced with every manager
    pub fn normalize(&mut self) {
        self.match_counter = self.match_counter.max(self.next_free_match_id());

        let known: HashSet<&ManagerId> = self.managers.iter().map(|m| &m.id).collect();
        let mut seen: HashSet<ManagerId> = HashSet::new();
        self.active_manager_ids
            .retain(|id| known.contains(id) && seen.insert(id.clone()));

        if self.active_manager_ids.is_empty() {
            self.active_manager_ids = self.managers.iter().map(|m| m.id.clone()).collect();
        }
    }
}

impl Default for LeagueState {
    fn default() -> Self {
        let managers: Vec<Manager> = Self::seed_managers();
        let active_manager_ids: Vec<ManagerId> = managers.iter().map(|m| m.id.clone()).collect();
        Self {
            managers,
            matches: Vec::new(),
            match_counter: 1,
            active_manager_ids,
            timestamp: String::new(),
            version: 0,
        }
    }
}

/// A league document decoded field by field.
///
/// `None` means the field was absent or unusable in the inbound JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialLeagueState {
    /// Decoded managers, if present.
    pub managers: Option<Vec<Manager>>,
    /// Decoded matches, if present.
    pub matches: Option<Vec<Match>>,
    /// Decoded match counter, if present.
    pub match_counter: Option<u64>,
    /// Decoded roster, if present.
    pub active_manager_ids: Option<Vec<ManagerId>>,
    /// The version the writer based its edit on, if present.
    pub version: Option<u64>,
}

impl PartialLeagueState {
    /// Decodes whatever usable fields the value contains.
    ///
    /// Non-object values decode to an empty partial document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            managers: decode_list(value.get("managers")),
            matches: decode_list(value.get("matches")),
            match_counter: value.get("matchCounter").and_then(Value::as_u64),
            active_manager_ids: decode_list(value.get("activeManagerIds")),
            version: value.get("version").and_then(Value::as_u64),
        }
    }

    /// Builds a full document, using per-field defaults for missing fields.
    #[must_use]
    pub fn into_state(self) -> LeagueState {
        let mut state: LeagueState = LeagueState {
            managers: self.managers.unwrap_or_default(),
            matches: self.matches.unwrap_or_default(),
            match_counter: self.match_counter.unwrap_or(1),
            active_manager_ids: self.active_manager_ids.unwrap_or_default(),
            timestamp: String::new(),
            version: self.version.unwrap_or(0),
        };
        state.normalize();
        state
    }

    /// Builds a full document, taking missing fields from `base`.
    #[must_use]
    pub fn merge_onto(self, base: &LeagueState) -> LeagueState {
        let mut state: LeagueState = LeagueState {
            managers: self.managers.unwrap_or_else(|| base.managers.clone()),
            matches: self.matches.unwrap_or_else(|| base.matches.clone()),
            match_counter: self.match_counter.unwrap_or(base.match_counter),
            active_manager_ids: self
                .active_manager_ids
                .unwrap_or_else(|| base.active_manager_ids.clone()),
            timestamp: base.timestamp.clone(),
            version: self.version.unwrap_or(base.version),
        };
        state.normalize();
        state
    }
}

/// Decodes a JSON array element by element, dropping undecodable elements.
fn decode_list<T>(value: Option<&Value>) -> Option<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()
    })
}
