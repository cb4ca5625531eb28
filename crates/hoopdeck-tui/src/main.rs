//! Hoopdeck - a terminal browser for basketball players.
//!
//! Pages through the players endpoint of the balldontlie API, with a
//! per-page position filter.

mod app;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hoopdeck_core::{ApiClient, Config};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name prefix inside the log directory
const LOG_FILE_PREFIX: &str = "hoopdeck.log";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Daily-rotated log file appender in `dir`. Fails if the directory cannot
/// be created.
fn file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
}

/// Initialize logging to a daily log file. The TUI owns the terminal, so
/// nothing may be written to stdout/stderr while it runs. Without a usable
/// log directory, events are filtered but not written anywhere.
fn init_file_tracing() -> Option<WorkerGuard> {
    let appender = Config::log_dir().ok().and_then(|dir| file_appender(&dir).ok());
    match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(env_filter())
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(env_filter()).init();
            None
        }
    }
}

/// Initialize logging to stderr for one-shot commands
fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Load the config file.
///
/// Also returns the path setting changes should be saved to. That is `None`
/// when the file exists but could not be read, so the defaults used in its
/// place never overwrite it.
fn load_config() -> (Config, Option<PathBuf>) {
    match Config::config_path() {
        Ok(path) => load_config_from(path),
        Err(e) => {
            warn!(error = %e, "No config location, using defaults");
            (Config::default(), None)
        }
    }
}

fn load_config_from(path: PathBuf) -> (Config, Option<PathBuf>) {
    match Config::load_from(&path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults; settings will not be saved");
            (Config::default(), None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--dump-page" {
        return dump_page(args.get(2).map(String::as_str)).await;
    }

    let _log_guard = init_file_tracing();
    info!("Hoopdeck starting");
    let (config, config_path) = load_config();

    // Build the client before touching the terminal so config errors print normally
    let mut app = App::new(config)?.with_config_path(config_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // First page
    app.reload();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Hoopdeck shutting down");
    Ok(())
}

/// Fetch one page and print it to stdout as JSON
async fn dump_page(arg: Option<&str>) -> Result<()> {
    init_stderr_tracing();

    let page: u32 = arg
        .ok_or_else(|| anyhow::anyhow!("Usage: hoopdeck --dump-page <PAGE>"))?
        .parse()
        .context("Page must be a positive integer")?;
    if page == 0 {
        anyhow::bail!("Pages are numbered from 1");
    }

    let (config, _) = load_config();
    let api = ApiClient::new(&config.with_env_overrides())?;

    eprintln!("Fetching {}...", api.players_url(page));
    let result = api.fetch_page(page).await?;

    let json = serde_json::to_string_pretty(&result)?;
    println!("{}", json);

    eprintln!(
        "Done! {} players on page {} of {}.",
        result.players.len(),
        page,
        result.total_pages
    );
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ignore release/repeat events reported on some platforms
                if key.kind != KeyEventKind::Press {
                    app.check_background_tasks();
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Apply completed page loads
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
