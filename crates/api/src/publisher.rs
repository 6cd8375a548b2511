// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The broadcast capability the store publishes through.

use std::sync::Arc;
use thiserror::Error;

use crate::request_response::LiveEvent;

/// Broadcast errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Nothing serves the requested channel.
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
}

/// Fan-out of live events to subscribers.
pub trait Publisher {
    /// Publishes an event on a channel.
    ///
    /// Returns the number of subscribers the event was handed to.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be published on this channel.
    fn publish(&self, channel: &str, event: &LiveEvent) -> Result<usize, PublishError>;
}

impl<P: Publisher + ?Sized> Publisher for Arc<P> {
    fn publish(&self, channel: &str, event: &LiveEvent) -> Result<usize, PublishError> {
        (**self).publish(channel, event)
    }
}
