// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use fm_league_domain::{LeagueState, PartialLeagueState};
use num_traits::ToPrimitive;
use serde_json::Value;
use tracing::debug;

use crate::data_models::DocumentRow;
use crate::diesel_schema::league_documents;
use crate::error::PersistenceError;

/// Retrieves the raw row stored under a document key.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if nothing is stored under the key.
pub fn get_document_row(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<DocumentRow>, PersistenceError> {
    debug!(key, "Looking up stored document");

    let row: Option<DocumentRow> = league_documents::table
        .filter(league_documents::document_key.eq(key))
        .select(DocumentRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row)
}

/// Loads and decodes the document stored under a key.
///
/// The body is decoded leniently: fields that are missing or malformed
/// fall back to their defaults. The `version` and `updated_at` columns
/// are authoritative over whatever the body carries.
///
/// # Errors
///
/// Returns an error if the query fails, the body is not JSON at all,
/// or the stored version is negative.
pub fn load_document(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<LeagueState>, PersistenceError> {
    let Some(row) = get_document_row(conn, key)? else {
        return Ok(None);
    };

    let body: Value = serde_json::from_str(&row.body)?;
    let mut state: LeagueState = PartialLeagueState::from_value(&body).into_state();
    state.version = row
        .version
        .to_u64()
        .ok_or_else(|| PersistenceError::ValueOutOfRange {
            field: "version",
            value: row.version.to_string(),
        })?;
    state.timestamp = row.updated_at;

    debug!(
        key = %row.document_key,
        version = state.version,
        matches = state.matches.len(),
        "Loaded stored document"
    );

    Ok(Some(state))
}
