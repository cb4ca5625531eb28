//! Data models for the players API.
//!
//! - `Player`, `Team`: one record of the `data` array
//! - `PageResult`: one decoded page plus pagination metadata

pub mod player;

pub use player::{PageResult, Player, PlayersResponse, Team};
