// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, OpponentChoice};
use crate::error::CoreError;
use crate::state::{Change, TransitionResult};
use fm_league_domain::{
    DomainError, LeagueState, Manager, ManagerId, Match, MatchKind, Opponent, club_name_from_logo,
    is_catalogue_logo,
};

/// Applies a command to the league document, producing a new document.
///
/// The input document is never modified.
///
/// # Arguments
///
/// * `state` - The current league document
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - The referenced manager or match does not exist
/// - A match is submitted for an inactive manager or without an opponent
/// - A manager is edited to a club outside the catalogue
pub fn apply(state: &LeagueState, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::AddMatch {
            manager_id,
            opponent,
            date,
            competition,
            venue,
            goals_for,
            goals_against,
        } => {
            require_active(state, &manager_id)?;
            let (opponent, kind): (Opponent, MatchKind) =
                resolve_opponent(state, &manager_id, opponent)?;

            let mut new_state: LeagueState = state.clone();
            let match_id: u64 = new_state.match_counter;
            new_state.matches.push(Match {
                id: match_id,
                manager_id,
                opponent,
                kind,
                date,
                competition,
                venue,
                goals_for,
                goals_against,
                counted: true,
            });
            new_state.match_counter = match_id.saturating_add(1);

            Ok(TransitionResult {
                new_state,
                change: Change::MatchAdded { match_id },
            })
        }
        Command::ToggleMatchUse { match_id } => {
            let mut new_state: LeagueState = state.clone();
            let target: &mut Match = new_state
                .matches
                .iter_mut()
                .find(|m| m.id == match_id)
                .ok_or(DomainError::MatchNotFound(match_id))?;
            target.counted = !target.counted;
            let counted: bool = target.counted;

            Ok(TransitionResult {
                new_state,
                change: Change::MatchUseToggled { match_id, counted },
            })
        }
        Command::EditManager {
            manager_id,
            club_logo_file,
            bio,
        } => {
            if let Some(logo) = &club_logo_file
                && !logo.is_empty()
                && !is_catalogue_logo(logo)
            {
                return Err(DomainError::UnknownClub(logo.clone()).into());
            }

            let mut new_state: LeagueState = state.clone();
            let manager: &mut Manager = new_state
                .managers
                .iter_mut()
                .find(|m| m.id == manager_id)
                .ok_or_else(|| DomainError::UnknownManager(manager_id.clone()))?;

            if let Some(logo) = club_logo_file {
                manager.club_name = club_name_from_logo(&logo).to_string();
                manager.club_logo_file = logo;
            }
            if let Some(bio) = bio {
                manager.bio = bio;
            }

            Ok(TransitionResult {
                new_state,
                change: Change::ManagerEdited { manager_id },
            })
        }
        Command::ToggleManagerActive { manager_id } => {
            if state.manager(&manager_id).is_none() {
                return Err(DomainError::UnknownManager(manager_id).into());
            }

            let mut new_state: LeagueState = state.clone();
            let active: bool = !state.is_active(&manager_id);
            if active {
                new_state.active_manager_ids.push(manager_id.clone());
                // Keep the roster in registration order.
                let order: Vec<ManagerId> =
                    state.managers.iter().map(|m| m.id.clone()).collect();
                new_state
                    .active_manager_ids
                    .sort_by_key(|id| order.iter().position(|o| o == id));
            } else {
                new_state.active_manager_ids.retain(|id| id != &manager_id);
                // Local edits never empty the roster; empty means everyone.
                if new_state.active_manager_ids.is_empty() {
                    return Err(DomainError::LastActiveManager(manager_id).into());
                }
            }

            Ok(TransitionResult {
                new_state,
                change: Change::RosterChanged { manager_id, active },
            })
        }
        Command::ResetLeague => Ok(TransitionResult {
            new_state: LeagueState {
                version: state.version,
                ..LeagueState::default()
            },
            change: Change::LeagueReset,
        }),
    }
}

/// Ensures the manager exists and is on the active roster.
fn require_active(state: &LeagueState, manager_id: &ManagerId) -> Result<(), DomainError> {
    if state.manager(manager_id).is_none() {
        return Err(DomainError::UnknownManager(manager_id.clone()));
    }
    if !state.is_active(manager_id) {
        return Err(DomainError::ManagerNotActive(manager_id.clone()));
    }
    Ok(())
}

/// Resolves the submitted opponent into its stored form and the match kind.
///
/// A club claimed by another active manager turns an AI match into a match
/// against that manager.
fn resolve_opponent(
    state: &LeagueState,
    manager_id: &ManagerId,
    choice: OpponentChoice,
) -> Result<(Opponent, MatchKind), DomainError> {
    match choice {
        OpponentChoice::Club(club) => {
            let club: &str = club.trim();
            if club.is_empty() {
                return Err(DomainError::MissingOpponent);
            }
            let claimed_by: Option<&Manager> = state
                .active_managers()
                .find(|m| &m.id != manager_id && m.has_club(club));
            Ok(claimed_by.map_or_else(
                || (Opponent::External(club.to_string()), MatchKind::Ai),
                |owner| (Opponent::Known(owner.id.clone()), MatchKind::Teman),
            ))
        }
        OpponentChoice::Manager(opponent_id) => {
            if opponent_id.is_empty() {
                return Err(DomainError::MissingOpponent);
            }
            if &opponent_id == manager_id {
                return Err(DomainError::SelfOpponent(opponent_id));
            }
            require_active(state, &opponent_id)?;
            Ok((Opponent::Known(opponent_id), MatchKind::Teman))
        }
    }
}
