// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the FM League tracker.
//!
//! The whole league is one JSON document stored in a single `SQLite` row
//! keyed `"league"`. Every save replaces the row. Nothing is versioned
//! historically; the `version` column only mirrors the document counter.
//!
//! ## Backends
//!
//! - **file** (`new_with_file`) runs in WAL mode and survives restarts
//! - **in-memory** (`new_in_memory`) is used by tests and by servers started
//!   without a database path
//!
//! Both run the embedded Diesel migrations on open.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fm_league_domain::LeagueState;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// The key of the single league document row.
pub const LEAGUE_DOCUMENT_KEY: &str = "league";

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Loads and saves the shared league document.
///
/// Implemented by [`Persistence`]; callers depend on this trait so that
/// alternative stores can stand in for the database.
pub trait DocumentBackend {
    /// Loads the stored document, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored body is not JSON.
    fn load_document(&mut self) -> Result<Option<LeagueState>, PersistenceError>;

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_document(&mut self, state: &LeagueState) -> Result<(), PersistenceError>;
}

/// `SQLite`-backed document store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_league_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Reports the `SQLite` journal mode of this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the PRAGMA query fails.
    pub fn journal_mode(&mut self) -> Result<String, PersistenceError> {
        backend::sqlite::journal_mode(&mut self.conn)
    }
}

impl DocumentBackend for Persistence {
    fn load_document(&mut self) -> Result<Option<LeagueState>, PersistenceError> {
        queries::load_document(&mut self.conn, LEAGUE_DOCUMENT_KEY)
    }

    fn save_document(&mut self, state: &LeagueState) -> Result<(), PersistenceError> {
        mutations::upsert_document(&mut self.conn, LEAGUE_DOCUMENT_KEY, state)
    }
}
