// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod document;

use crate::{Competition, ManagerId, Match, MatchKind, Opponent, Venue};

/// Creates a counted match against an AI club.
pub fn create_test_match(id: u64, manager_id: &str, goals_for: u32, goals_against: u32) -> Match {
    Match {
        id,
        manager_id: ManagerId::new(manager_id),
        opponent: Opponent::External(String::from("Arsenal FC")),
        kind: MatchKind::Ai,
        date: String::from("2026-01-10"),
        competition: Competition::Liga,
        venue: Venue::Home,
        goals_for,
        goals_against,
        counted: true,
    }
}

/// Creates a counted match against another manager.
pub fn create_test_friend_match(
    id: u64,
    manager_id: &str,
    opponent_id: &str,
    goals_for: u32,
    goals_against: u32,
) -> Match {
    Match {
        opponent: Opponent::Known(ManagerId::new(opponent_id)),
        kind: MatchKind::Teman,
        ..create_test_match(id, manager_id, goals_for, goals_against)
    }
}

pub fn ids(values: &[&str]) -> Vec<ManagerId> {
    values.iter().map(|v| ManagerId::new(v)).collect()
}
