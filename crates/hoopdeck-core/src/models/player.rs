use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub team: Team,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Position code, treating an empty string the same as a missing one.
    pub fn position_code(&self) -> Option<&str> {
        self.position.as_deref().filter(|p| !p.is_empty())
    }
}

// Wire format of GET /players
#[derive(Debug, Clone, Deserialize)]
pub struct PlayersResponse {
    pub data: Vec<Player>,
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// One page of players as returned by the API, in API order.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub players: Vec<Player>,
    pub total_pages: u32,
    pub total_count: Option<u64>,
    pub fetched_at: DateTime<Utc>,
}

impl PageResult {
    pub fn new(players: Vec<Player>, total_pages: u32) -> Self {
        Self {
            players,
            total_pages,
            total_count: None,
            fetched_at: Utc::now(),
        }
    }

    /// Decode a raw `/players` response body.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let response: PlayersResponse = serde_json::from_str(body)?;
        Ok(response.into())
    }
}

impl From<PlayersResponse> for PageResult {
    fn from(response: PlayersResponse) -> Self {
        Self {
            players: response.data,
            total_pages: response.meta.total_pages,
            total_count: response.meta.total_count,
            fetched_at: Utc::now(),
        }
    }
}
