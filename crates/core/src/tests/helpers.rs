// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, OpponentChoice};
use fm_league_domain::{Competition, LeagueState, ManagerId, Venue};

pub fn create_test_state() -> LeagueState {
    LeagueState::default()
}

pub fn create_add_match(manager_id: &str, opponent: OpponentChoice, gf: u32, ga: u32) -> Command {
    Command::AddMatch {
        manager_id: ManagerId::new(manager_id),
        opponent,
        date: String::from("2026-01-10"),
        competition: Competition::Liga,
        venue: Venue::Home,
        goals_for: gf,
        goals_against: ga,
    }
}

pub fn club(name: &str) -> OpponentChoice {
    OpponentChoice::Club(String::from(name))
}

pub fn manager(id: &str) -> OpponentChoice {
    OpponentChoice::Manager(ManagerId::new(id))
}
