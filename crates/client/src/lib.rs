// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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
#![allow(clippy::multiple_crate_versions, clippy::future_not_send)]

mod cache;
mod client;
mod error;
mod subscription;
mod transport;

#[cfg(test)]
mod tests;

pub use cache::{DocumentCache, FileCache, MemoryCache};
pub use client::{EditOutcome, LoadSource, SyncClient};
pub use error::ClientError;
pub use subscription::{Subscription, decode_event, live_url};
pub use transport::{HttpTransport, Transport, decode_document};
