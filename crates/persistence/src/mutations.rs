// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use fm_league_domain::LeagueState;
use num_traits::ToPrimitive;
use tracing::info;

use crate::diesel_schema::league_documents;
use crate::error::PersistenceError;

/// Stores the document under a key, replacing any previous body.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The document key
/// * `state` - The document to store
///
/// # Errors
///
/// Returns an error if serialization or the upsert fails, or if the
/// version does not fit the column.
pub fn upsert_document(
    conn: &mut SqliteConnection,
    key: &str,
    state: &LeagueState,
) -> Result<(), PersistenceError> {
    let body: String = serde_json::to_string(state)?;
    let version: i64 = state
        .version
        .to_i64()
        .ok_or_else(|| PersistenceError::ValueOutOfRange {
            field: "version",
            value: state.version.to_string(),
        })?;

    diesel::insert_into(league_documents::table)
        .values((
            league_documents::document_key.eq(key),
            league_documents::body.eq(&body),
            league_documents::version.eq(version),
            league_documents::updated_at.eq(&state.timestamp),
        ))
        .on_conflict(league_documents::document_key)
        .do_update()
        .set((
            league_documents::body.eq(&body),
            league_documents::version.eq(version),
            league_documents::updated_at.eq(&state.timestamp),
        ))
        .execute(conn)?;

    info!(key, version, bytes = body.len(), "Stored document");

    Ok(())
}
