// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ManagerId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced manager does not exist in the league document.
    UnknownManager(ManagerId),
    /// The manager exists but is not on the active roster.
    ManagerNotActive(ManagerId),
    /// A match was submitted without choosing an opponent.
    MissingOpponent,
    /// A manager was chosen as their own opponent.
    SelfOpponent(ManagerId),
    /// The club logo file is not part of the club catalogue.
    UnknownClub(String),
    /// No match with this identifier exists.
    MatchNotFound(u64),
    /// Removing this manager would leave the active roster empty.
    LastActiveManager(ManagerId),
    /// The inbound document could not be interpreted at all.
    InvalidDocument(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownManager(id) => write!(f, "Unknown manager: {id}"),
            Self::ManagerNotActive(id) => {
                write!(f, "Manager {id} is not on the active roster")
            }
            Self::MissingOpponent => write!(f, "A match requires an opponent"),
            Self::SelfOpponent(id) => {
                write!(f, "Manager {id} cannot play against themselves")
            }
            Self::UnknownClub(club) => write!(f, "Unknown club logo: '{club}'"),
            Self::MatchNotFound(id) => write!(f, "Match not found: {id}"),
            Self::LastActiveManager(id) => {
                write!(f, "Manager {id} is the last active manager")
            }
            Self::InvalidDocument(msg) => write!(f, "Invalid league document: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
