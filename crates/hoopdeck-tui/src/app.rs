//! Application state management for hoopdeck.
//!
//! `App` owns the API client, the current `ViewState` and the single-slot
//! page load. Loads run as background tasks and report back over a channel;
//! `check_background_tasks` applies the newest result on the UI loop.

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use hoopdeck_core::{
    ApiClient, ApiError, Config, DisplayRow, LoadSlot, PageResult, Pager, Player, ViewState,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the page load channel.
/// Superseded loads are aborted, so only a handful can ever be queued.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of rows to move on page up/down within the list.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ShowingError,
    Quitting,
}

/// Outcome of a background page load, tagged with its generation.
struct LoadResult {
    generation: u64,
    page: u32,
    result: Result<PageResult, ApiError>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    /// Configuration as stored on disk (no environment overrides)
    pub config: Config,
    /// Where setting changes are saved; `None` keeps them in memory only
    config_path: Option<PathBuf>,
    api: ApiClient,

    pub state: AppState,
    /// Last successfully loaded page; replaced wholesale on every load
    pub view: Option<ViewState>,
    pub selection: usize,

    pub error_message: Option<String>,
    pub status_message: Option<String>,

    /// Page requested by the in-flight load, not yet committed
    pending_page: Option<u32>,
    loads: LoadSlot,
    load_rx: mpsc::Receiver<LoadResult>,
    load_tx: mpsc::Sender<LoadResult>,
}

impl App {
    /// Create the application, applying environment overrides to `config`
    /// for the API client.
    pub fn new(config: Config) -> Result<Self> {
        let effective = config.with_env_overrides();
        debug!(
            base_url = effective.base_url(),
            page_size = effective.page_size(),
            has_api_key = effective.api_key.is_some(),
            "Config loaded"
        );
        let api = ApiClient::new(&effective)?;
        Ok(Self::with_client(config, api))
    }

    pub fn with_client(config: Config, api: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            config,
            config_path: None,
            api,
            state: AppState::Normal,
            view: None,
            selection: 0,
            error_message: None,
            status_message: None,
            pending_page: None,
            loads: LoadSlot::new(),
            load_rx: rx,
            load_tx: tx,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    // =========================================================================
    // Page Loading
    // =========================================================================

    /// Start loading `page`, superseding any load still in flight.
    /// Returns the generation of the new load.
    pub fn request_page(&mut self, page: u32) -> u64 {
        let generation = self.loads.begin();
        info!(page, generation, "Loading players page");

        let api = self.api.clone();
        let tx = self.load_tx.clone();
        let handle = tokio::spawn(async move {
            let result = api.fetch_page(page).await;
            if tx.send(LoadResult { generation, page, result }).await.is_err() {
                debug!(generation, "Load result receiver dropped");
            }
        });
        self.loads.attach(generation, handle);

        self.pending_page = Some(page);
        self.status_message = Some(format!("Loading page {}...", page));
        generation
    }

    pub fn pager(&self) -> Pager {
        match self.view {
            Some(ref view) => view.pager(),
            // Nothing loaded yet: neither direction is available
            None => Pager::new(1, 0),
        }
    }

    /// Request the next page. No-op when Next is disabled.
    pub fn next_page(&mut self) -> Option<u64> {
        let page = self.pager().next_page()?;
        Some(self.request_page(page))
    }

    /// Request the previous page. No-op when Previous is disabled.
    pub fn previous_page(&mut self) -> Option<u64> {
        let page = self.pager().previous_page()?;
        Some(self.request_page(page))
    }

    /// Re-request the displayed page, or page 1 if nothing is loaded.
    pub fn reload(&mut self) -> u64 {
        let page = self.view.as_ref().map(ViewState::page).unwrap_or(1);
        self.request_page(page)
    }

    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    pub fn pending_page(&self) -> Option<u32> {
        self.pending_page
    }

    /// Apply any completed page loads
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.load_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_load_result(result);
        }
    }

    fn process_load_result(&mut self, load: LoadResult) {
        if !self.loads.finish(load.generation) {
            debug!(generation = load.generation, page = load.page, "Discarding stale load result");
            return;
        }
        self.pending_page = None;
        self.status_message = None;

        match load.result {
            Ok(result) => {
                let page_size = self.api.page_size();
                let view = match self.view {
                    Some(ref previous) if self.config.keep_filter_across_pages => {
                        ViewState::from_page_keeping(result, load.page, page_size, previous.selected_filter())
                    }
                    _ => ViewState::from_page(result, load.page, page_size),
                };
                info!(
                    page = view.page(),
                    total_pages = view.total_pages(),
                    players = view.players().len(),
                    "Players page loaded"
                );
                self.view = Some(view);
                self.selection = 0;
            }
            Err(e) => {
                // The displayed page stays as it was; only the request failed
                error!(page = load.page, kind = ?e.kind(), error = %e, "Failed to load players");
                self.error_message = Some(format!("Error loading players: {}", e));
                self.state = AppState::ShowingError;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Filter and Selection
    // =========================================================================

    pub fn cycle_filter(&mut self, forward: bool) {
        if let Some(ref view) = self.view {
            let view = view.cycle_filter(forward);
            debug!(filter = view.selected_filter().label(), "Position filter changed");
            self.view = Some(view);
            self.selection = 0;
        }
    }

    /// Flip whether the position filter survives page loads, and persist it
    /// when there is a config file to save to.
    pub fn toggle_keep_filter(&mut self) {
        self.config.keep_filter_across_pages = !self.config.keep_filter_across_pages;
        let setting = if self.config.keep_filter_across_pages {
            "Position filter kept across pages"
        } else {
            "Position filter resets on page change"
        };

        let saved = match self.config_path {
            Some(ref path) => match self.config.save_to(path) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to save config");
                    false
                }
            },
            None => {
                warn!("Config file was not loaded; setting kept for this session only");
                false
            }
        };

        self.status_message = Some(if saved {
            setting.to_string()
        } else {
            format!("{} (not saved)", setting)
        });
    }

    fn row_count(&self) -> usize {
        self.view.as_ref().map(|v| v.rows().len()).unwrap_or(0)
    }

    pub fn select_down(&mut self, step: usize) {
        let last = self.row_count().saturating_sub(1);
        self.selection = (self.selection + step).min(last);
    }

    pub fn select_up(&mut self, step: usize) {
        self.selection = self.selection.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.row_count().saturating_sub(1);
    }

    /// The highlighted row and the player it refers to
    pub fn selected_player(&self) -> Option<(&DisplayRow, &Player)> {
        let view = self.view.as_ref()?;
        let row = view.rows().get(self.selection)?;
        Some((row, view.player(row)?))
    }
}

// ============================================================================
// Tests
// ============================================================================
