//! Core library for hoopdeck.
//!
//! Everything that does not touch the terminal lives here:
//!
//! - `config`: user configuration and environment overrides
//! - `api`: request building, fetching and decoding of player pages
//! - `models`: `Player`, `Team` and `PageResult`
//! - `view`: position filter and ranked display list derivation
//! - `pagination`: Next/Previous enablement over the current page
//! - `load`: single-slot tracking of the in-flight page load
//! - `utils`: string formatting helpers

pub mod api;
pub mod config;
pub mod load;
pub mod models;
pub mod pagination;
pub mod utils;
pub mod view;

pub use api::{ApiClient, ApiError, ErrorKind};
pub use config::Config;
pub use load::LoadSlot;
pub use models::{PageResult, Player, Team};
pub use pagination::Pager;
pub use view::{DisplayRow, PositionFilter, ViewState, ALL_PLAYERS};
