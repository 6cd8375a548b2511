// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fm_league_domain::LeagueState;
use fm_league_persistence::{DocumentBackend, Persistence, PersistenceError};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{LeagueStore, LiveEvent, PublishError, Publisher, StoreConfig};

/// Records every published event.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<(String, LiveEvent)>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<(String, LiveEvent)> {
        self.events.lock().unwrap().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, channel: &str, event: &LiveEvent) -> Result<usize, PublishError> {
        self.events
            .lock()
            .unwrap()
            .push((channel.to_string(), event.clone()));
        Ok(1)
    }
}

/// Rejects every event.
pub struct FailingPublisher;

impl Publisher for FailingPublisher {
    fn publish(&self, channel: &str, _event: &LiveEvent) -> Result<usize, PublishError> {
        Err(PublishError::UnknownChannel(channel.to_string()))
    }
}

/// A backend whose reads and writes always fail.
pub struct FailingBackend;

impl DocumentBackend for FailingBackend {
    fn load_document(&mut self) -> Result<Option<LeagueState>, PersistenceError> {
        Err(PersistenceError::DatabaseError(String::from("disk on fire")))
    }

    fn save_document(&mut self, _state: &LeagueState) -> Result<(), PersistenceError> {
        Err(PersistenceError::DatabaseError(String::from("disk on fire")))
    }
}

pub type TestStore = LeagueStore<Persistence, Arc<RecordingPublisher>>;

pub fn create_test_store(config: StoreConfig) -> (TestStore, Arc<RecordingPublisher>) {
    let publisher: Arc<RecordingPublisher> = Arc::new(RecordingPublisher::default());
    let persistence: Persistence = Persistence::new_in_memory().unwrap();
    (
        LeagueStore::open(persistence, Arc::clone(&publisher), config),
        publisher,
    )
}

pub const fn test_time() -> OffsetDateTime {
    datetime!(2026-01-10 12:00 UTC)
}
