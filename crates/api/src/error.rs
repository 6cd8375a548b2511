// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fm_league::CoreError;
use fm_league_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The document could not be written to storage.
    ///
    /// The in-memory document and the broadcast were still updated.
    #[error("Failed to save: {0}")]
    Persistence(#[from] PersistenceError),

    /// The submitted document is not a JSON object.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },

    /// A league command was rejected.
    #[error(transparent)]
    Command(#[from] CoreError),
}
