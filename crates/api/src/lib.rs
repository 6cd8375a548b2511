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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod publisher;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use publisher::{PublishError, Publisher};
pub use request_response::{LEAGUE_CHANNEL, LiveEvent, SaveErrorResponse, SaveResponse};
pub use store::{LeagueStore, StoreConfig, WriteMode};
