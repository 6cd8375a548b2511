// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use crate::tests::{create_test_match, ids};
use crate::{LeagueState, ManagerId, PartialLeagueState};

#[test]
fn test_default_document() {
    let state: LeagueState = LeagueState::default();

    assert_eq!(state.managers.len(), 4);
    assert!(state.matches.is_empty());
    assert_eq!(state.match_counter, 1);
    assert_eq!(state.active_manager_ids, ids(&["m1", "m2", "m3", "m4"]));
    assert_eq!(state.version, 0);
    assert_eq!(state.managers[2].name, "ALDO");
    assert_eq!(state.managers[2].club_logo_file, "Chelsea FC.png");
    assert_eq!(state.managers[2].photo_file, "aldo.png");
}

#[test]
fn test_document_wire_field_names() {
    let mut state: LeagueState = LeagueState::default();
    state.matches.push(create_test_match(1, "m1", 2, 1));

    let json: Value = serde_json::to_value(&state).unwrap();

    assert!(json.get("matchCounter").is_some());
    assert!(json.get("activeManagerIds").is_some());
    assert_eq!(json["managers"][0]["clubLogoFile"], "Manchester City.png");
    assert_eq!(json["matches"][0]["gf"], 2);
    assert_eq!(json["matches"][0]["use"], true);
    assert_eq!(json["matches"][0]["ha"], "H");
}

#[test]
fn test_missing_fields_use_defaults() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({}));
    let state: LeagueState = partial.into_state();

    assert!(state.managers.is_empty());
    assert!(state.matches.is_empty());
    assert_eq!(state.match_counter, 1);
    assert!(state.active_manager_ids.is_empty());
}

#[test]
fn test_non_object_decodes_to_empty_partial() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!("nonsense"));
    assert_eq!(partial, PartialLeagueState::default());
}

#[test]
fn test_wrong_typed_fields_use_defaults() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "managers": "not a list",
        "matches": 7,
        "matchCounter": "three",
    }));

    assert!(partial.managers.is_none());
    assert!(partial.matches.is_none());
    assert!(partial.match_counter.is_none());
}

#[test]
fn test_undecodable_elements_are_dropped() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "managers": [
            { "id": "m1", "name": "HUI" },
            { "name": "no id" }
        ],
        "matches": [
            { "id": 1, "managerId": "m1", "opponent": "Arsenal FC", "type": "AI", "gf": 1, "ga": 0, "use": true },
            { "id": 2, "managerId": "m1", "gf": -1, "ga": 0 }
        ]
    }));

    let managers = partial.managers.unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].bio, "");
    assert_eq!(partial.matches.unwrap().len(), 1);
}

#[test]
fn test_counter_raised_above_existing_ids() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "matches": [
            { "id": 4, "managerId": "m1", "opponent": "Arsenal FC", "gf": 0, "ga": 0 }
        ],
        "matchCounter": 2
    }));

    let state: LeagueState = partial.into_state();
    assert_eq!(state.match_counter, 5);
}

#[test]
fn test_higher_counter_is_kept() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "matches": [
            { "id": 1, "managerId": "m1", "opponent": "Arsenal FC", "gf": 0, "ga": 0 }
        ],
        "matchCounter": 9
    }));

    assert_eq!(partial.into_state().match_counter, 9);
}

#[test]
fn test_roster_filtered_to_known_managers() {
    let mut state: LeagueState = LeagueState::default();
    state.active_manager_ids = ids(&["m2", "ghost", "m2", "m4"]);

    state.normalize();

    assert_eq!(state.active_manager_ids, ids(&["m2", "m4"]));
}

#[test]
fn test_empty_roster_means_everyone() {
    let mut state: LeagueState = LeagueState::default();
    state.active_manager_ids.clear();

    state.normalize();

    assert_eq!(state.active_manager_ids.len(), 4);
}

#[test]
fn test_merge_keeps_missing_fields_from_base() {
    let mut base: LeagueState = LeagueState::default();
    base.matches.push(create_test_match(1, "m1", 1, 0));
    base.match_counter = 2;

    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "activeManagerIds": ["m1", "m3"]
    }));
    let merged: LeagueState = partial.merge_onto(&base);

    assert_eq!(merged.managers, base.managers);
    assert_eq!(merged.matches, base.matches);
    assert_eq!(merged.match_counter, 2);
    assert_eq!(merged.active_manager_ids, ids(&["m1", "m3"]));
}

#[test]
fn test_replace_drops_missing_fields() {
    let partial: PartialLeagueState = PartialLeagueState::from_value(&json!({
        "activeManagerIds": ["m1"]
    }));

    let replaced: LeagueState = partial.into_state();

    assert!(replaced.managers.is_empty());
    assert!(replaced.active_manager_ids.is_empty());
}

#[test]
fn test_document_round_trip() {
    let mut state: LeagueState = LeagueState::default();
    state.matches.push(create_test_match(1, "m1", 2, 1));
    state.match_counter = 2;
    state.version = 7;

    let json: Value = serde_json::to_value(&state).unwrap();
    let decoded: LeagueState = PartialLeagueState::from_value(&json).into_state();

    assert_eq!(decoded.managers, state.managers);
    assert_eq!(decoded.matches, state.matches);
    assert_eq!(decoded.match_counter, state.match_counter);
    assert_eq!(decoded.active_manager_ids, state.active_manager_ids);
    assert_eq!(decoded.version, 7);
}

#[test]
fn test_lookup_helpers() {
    let mut state: LeagueState = LeagueState::default();
    state.active_manager_ids = ids(&["m3", "m1"]);
    state.matches.push(create_test_match(3, "m1", 0, 0));

    assert!(state.manager(&ManagerId::new("m2")).is_some());
    assert!(state.manager(&ManagerId::new("m9")).is_none());
    assert!(state.is_active(&ManagerId::new("m3")));
    assert!(!state.is_active(&ManagerId::new("m2")));
    let active: Vec<&str> = state.active_managers().map(|m| m.name.as_str()).collect();
    assert_eq!(active, vec!["ALDO", "HUI"]);
    assert!(state.find_match(3).is_some());
    assert_eq!(state.next_free_match_id(), 4);
}
