// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local copies of the league document, used when the server is unreachable.

use fm_league_domain::LeagueState;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ClientError;
use crate::transport::decode_document;

/// Somewhere to keep the last known document.
pub trait DocumentCache {
    /// Reads the cached document, or `None` if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache exists but cannot be read.
    fn read(&self) -> Result<Option<LeagueState>, ClientError>;

    /// Replaces the cached document.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be written.
    fn write(&mut self, state: &LeagueState) -> Result<(), ClientError>;
}

impl<C: DocumentCache + ?Sized> DocumentCache for Box<C> {
    fn read(&self) -> Result<Option<LeagueState>, ClientError> {
        (**self).read()
    }

    fn write(&mut self, state: &LeagueState) -> Result<(), ClientError> {
        (**self).write(state)
    }
}

/// A cache kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    state: Option<LeagueState>,
}

impl MemoryCache {
    /// Creates a cache already holding `state`.
    #[must_use]
    pub const fn with_state(state: LeagueState) -> Self {
        Self { state: Some(state) }
    }
}

impl DocumentCache for MemoryCache {
    fn read(&self) -> Result<Option<LeagueState>, ClientError> {
        Ok(self.state.clone())
    }

    fn write(&mut self, state: &LeagueState) -> Result<(), ClientError> {
        self.state = Some(state.clone());
        Ok(())
    }
}

/// A cache stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Creates a cache backed by the file at `path`.
    ///
    /// The file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentCache for FileCache {
    fn read(&self) -> Result<Option<LeagueState>, ClientError> {
        let contents: String = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value: Value = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "Read cached league document");
        Ok(Some(decode_document(&value)))
    }

    fn write(&mut self, state: &LeagueState) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(state)?)?;
        debug!(path = %self.path.display(), version = state.version, "Cached league document");
        Ok(())
    }
}
