//! Derived view of one loaded page.
//!
//! A `ViewState` is built from a `PageResult` and never mutated. Changing
//! the page or the position filter produces a new value that replaces the
//! old one wholesale.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{PageResult, Player};
use crate::pagination::Pager;

/// Label of the sentinel filter entry that shows every player.
pub const ALL_PLAYERS: &str = "All players";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionFilter {
    All,
    Position(String),
}

impl PositionFilter {
    pub fn label(&self) -> &str {
        match self {
            PositionFilter::All => ALL_PLAYERS,
            PositionFilter::Position(p) => p,
        }
    }

    /// Exact, case-sensitive match on the position code.
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Position(p) => player.position.as_deref() == Some(p.as_str()),
        }
    }
}

/// One line of the ranked player list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub rank: u64,
    pub label: String,
    /// Index into the page's player list
    pub player_index: usize,
}

/// Filter entries for a page: "All players" followed by each non-empty
/// position in first-seen order.
pub fn position_filters(players: &[Player]) -> Vec<PositionFilter> {
    let mut seen = HashSet::new();
    let mut filters = vec![PositionFilter::All];
    for position in players.iter().filter_map(Player::position_code) {
        if seen.insert(position) {
            filters.push(PositionFilter::Position(position.to_string()));
        }
    }
    filters
}

/// 1-based rank of the `local_index`-th filtered player on `page`.
pub fn global_rank(page: u32, page_size: u32, local_index: usize) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size) + local_index as u64 + 1
}

/// Ranked, labelled rows for the players matching `filter`, in API order.
pub fn display_rows(players: &[Player], filter: &PositionFilter, page: u32, page_size: u32) -> Vec<DisplayRow> {
    players
        .iter()
        .enumerate()
        .filter(|(_, player)| filter.matches(player))
        .enumerate()
        .map(|(local_index, (player_index, player))| {
            let rank = global_rank(page, page_size, local_index);
            DisplayRow {
                rank,
                label: format!("{}. {} {}", rank, player.first_name, player.last_name),
                player_index,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ViewState {
    page: u32,
    page_size: u32,
    total_pages: u32,
    total_count: Option<u64>,
    fetched_at: DateTime<Utc>,
    players: Arc<[Player]>,
    positions: Vec<PositionFilter>,
    selected: usize,
    rows: Vec<DisplayRow>,
}

impl ViewState {
    /// View of a freshly loaded page with "All players" selected.
    pub fn from_page(result: PageResult, page: u32, page_size: u32) -> Self {
        let players: Arc<[Player]> = result.players.into();
        let positions = position_filters(&players);
        let rows = display_rows(&players, &PositionFilter::All, page, page_size);
        Self {
            page: page.max(1),
            page_size,
            total_pages: result.total_pages,
            total_count: result.total_count,
            fetched_at: result.fetched_at,
            players,
            positions,
            selected: 0,
            rows,
        }
    }

    /// Like `from_page`, but keeps `previous` selected if the new page has it.
    pub fn from_page_keeping(result: PageResult, page: u32, page_size: u32, previous: &PositionFilter) -> Self {
        let view = Self::from_page(result, page, page_size);
        match view.positions.iter().position(|f| f == previous) {
            Some(index) if index != 0 => view.with_filter(index),
            _ => view,
        }
    }

    /// Same page with the filter at `index` selected. Out-of-range
    /// indices select "All players".
    pub fn with_filter(&self, index: usize) -> Self {
        let selected = if index < self.positions.len() { index } else { 0 };
        let rows = display_rows(&self.players, &self.positions[selected], self.page, self.page_size);
        Self {
            selected,
            rows,
            players: Arc::clone(&self.players),
            positions: self.positions.clone(),
            ..*self
        }
    }

    /// Select the next (or previous) filter, wrapping around.
    pub fn cycle_filter(&self, forward: bool) -> Self {
        let len = self.positions.len();
        let index = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        self.with_filter(index)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn positions(&self) -> &[PositionFilter] {
        &self.positions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_filter(&self) -> &PositionFilter {
        &self.positions[self.selected]
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn player(&self, row: &DisplayRow) -> Option<&Player> {
        self.players.get(row.player_index)
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.total_pages)
    }
}
