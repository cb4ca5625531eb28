//! Keyboard input handling for the TUI.
//!
//! Translates key events into application actions. Page changes only
//! request a load; the view updates when the load completes.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Error overlay is modal
    if matches!(app.state, AppState::ShowingError) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_error();
        }
        return false;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }

        // Pagination
        KeyCode::Char('n') | KeyCode::PageDown => {
            app.next_page();
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            app.previous_page();
        }
        KeyCode::Char('u') => {
            app.reload();
        }

        // Position filter
        KeyCode::Right | KeyCode::Char('f') => app.cycle_filter(true),
        KeyCode::Left | KeyCode::Char('F') => app.cycle_filter(false),
        KeyCode::Char('t') => app.toggle_keep_filter(),

        // List navigation
        KeyCode::Down | KeyCode::Char('j') => app.select_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(1),
        KeyCode::Char('J') => app.select_down(PAGE_SCROLL_SIZE),
        KeyCode::Char('K') => app.select_up(PAGE_SCROLL_SIZE),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        _ => {}
    }

    false
}
