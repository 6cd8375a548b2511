// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use diesel::prelude::*;
use fm_league_domain::{
    Competition, LeagueState, ManagerId, Match, MatchKind, Opponent, Venue,
};

use crate::Persistence;
use crate::diesel_schema::league_documents;

pub fn create_test_state() -> LeagueState {
    let mut state: LeagueState = LeagueState::default();
    state.matches.push(Match {
        id: 1,
        manager_id: ManagerId::new("m1"),
        opponent: Opponent::Known(ManagerId::new("m2")),
        kind: MatchKind::Teman,
        date: String::from("2026-01-10"),
        competition: Competition::Cup,
        venue: Venue::Away,
        goals_for: 2,
        goals_against: 1,
        counted: true,
    });
    state.match_counter = 2;
    state.timestamp = String::from("2026-01-10T12:00:00.000000000Z");
    state.version = 3;
    state
}

/// Writes a raw row, bypassing document serialization.
pub fn insert_raw_row(persistence: &mut Persistence, body: &str, version: i64) {
    diesel::insert_into(league_documents::table)
        .values((
            league_documents::document_key.eq(crate::LEAGUE_DOCUMENT_KEY),
            league_documents::body.eq(body),
            league_documents::version.eq(version),
            league_documents::updated_at.eq("2026-01-01T00:00:00Z"),
        ))
        .execute(&mut persistence.conn)
        .unwrap();
}
