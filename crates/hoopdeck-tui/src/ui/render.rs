use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use hoopdeck_core::utils::{format_count, or_dash, truncate_string};

use crate::app::{App, AppState};

use super::styles;

/// Width of the value column in the detail panel
const DETAIL_VALUE_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Position filter
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_filter_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ShowingError) {
        render_error_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Hoopdeck";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(" Position: ", styles::muted_style())];

    match app.view {
        Some(ref view) => {
            for (i, filter) in view.positions().iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" | ", styles::muted_style()));
                }
                let selected = i == view.selected_index();
                spans.push(Span::styled(filter.label().to_string(), styles::filter_style(selected)));
            }
        }
        None => spans.push(Span::styled("-", styles::muted_style())),
    }

    // Keep-filter toggle on the right
    let (toggle_text, toggle_style) = if app.config.keep_filter_across_pages {
        ("on ", styles::success_style())
    } else {
        ("off", styles::muted_style())
    };
    let hint = "[t] keep filter: ";
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(used + hint.len() + toggle_text.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(hint, styles::muted_style()));
    spans.push(Span::styled(toggle_text, toggle_style));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_player_list(frame, app, chunks[0]);
    render_player_detail(frame, app, chunks[1]);
}

fn render_player_list(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.view else {
        let message = match app.pending_page() {
            Some(page) if app.is_loading() => format!("Loading page {}...", page),
            _ => "No players loaded. Press [u] to retry.".to_string(),
        };
        let block = Block::default()
            .title(" Players ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true));
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles::muted_style())).block(block),
            area,
        );
        return;
    };

    let items: Vec<ListItem> = if view.rows().is_empty() {
        vec![ListItem::new(Span::styled("No players", styles::muted_style()))]
    } else {
        view.rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i == app.selection {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };
                ListItem::new(Line::from(row.label.clone())).style(style)
            })
            .collect()
    };

    let block = Block::default()
        .title(format!(
            " Players ({}) - {} ",
            view.rows().len(),
            view.selected_filter().label()
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), styles::highlight_style()),
        Span::raw(truncate_string(value, DETAIL_VALUE_WIDTH)),
    ])
}

fn render_player_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Player ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let lines = match app.selected_player() {
        Some((row, player)) => vec![
            Line::from(Span::styled(player.full_name(), styles::title_style())),
            Line::from(""),
            detail_line("Rank", &row.rank.to_string()),
            detail_line("ID", &player.id.to_string()),
            detail_line("Position", or_dash(player.position_code())),
            detail_line("Team", or_dash(Some(player.team.full_name.as_str()))),
        ],
        None => vec![Line::from(Span::styled("No player selected", styles::muted_style()))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let pager = app.pager();

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(ref view) = app.view {
        let mut text = format!(" Page {} of {}", pager.current(), pager.total());
        if let Some(count) = view.total_count() {
            text.push_str(&format!(" | {} players", format_count(count)));
        }
        text.push_str(&format!(
            " | Loaded {} ",
            view.fetched_at().with_timezone(&Local).format("%H:%M:%S")
        ));
        text
    } else {
        " Not loaded ".to_string()
    };

    let actions: Vec<(&str, bool)> = vec![
        ("[p]rev", pager.has_previous()),
        ("[n]ext", pager.has_next()),
        ("[u]pdate", true),
        ("[q]uit", true),
    ];
    let right_width: usize = actions.iter().map(|(l, _)| l.len()).sum::<usize>()
        + (actions.len() - 1) * 3
        + 2;

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_width);

    let mut spans = vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::raw(" "),
    ];
    for (i, (label, enabled)) in actions.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::action_style(*enabled)));
    }
    spans.push(Span::raw(" "));

    let paragraph = Paragraph::new(Line::from(spans)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 20, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("  Hoopdeck", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Pages", styles::highlight_style())),
        key("  n / PgDn  ", "Next page"),
        key("  p / PgUp  ", "Previous page"),
        key("  u         ", "Reload current page"),
        Line::from(""),
        Line::from(Span::styled(" Players", styles::highlight_style())),
        key("  ←/→  f/F  ", "Cycle position filter"),
        key("  t         ", "Keep filter across pages"),
        key("  ↑/↓  j/k  ", "Move highlight"),
        key("  Home/End  ", "First / last player"),
        Line::from(""),
        key("  q / Esc   ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_error_overlay(frame: &mut Frame, app: &App) {
    let message = app.error_message.as_deref().unwrap_or("Unknown error");

    // Grow with the message, within reason
    let width: u16 = 60;
    let interior = (width - 4) as usize;
    let message_rows = message.chars().count().div_ceil(interior).max(1) as u16;
    let area = centered_rect_fixed(width, (message_rows + 6).min(16), frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(message.to_string())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", styles::muted_style()),
            Span::styled("[Enter]", styles::help_key_style()),
            Span::styled(" to dismiss", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Error ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopdeck_core::{ApiClient, Config, PageResult, Player, Team, ViewState};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn test_app() -> App {
        let config = Config {
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..Config::default()
        };
        App::with_client(config.clone(), ApiClient::new(&config).unwrap())
    }

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(50, 20, outer), Rect::new(25, 10, 50, 20));

        // Clamped to the available area
        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect_fixed(50, 20, small), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_render_before_first_load() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Hoopdeck"));
        assert!(text.contains("No players loaded"));
        assert!(text.contains("Not loaded"));
    }

    #[test]
    fn test_render_error_overlay() {
        let mut app = test_app();
        app.error_message = Some("Error loading players: Server error: 500".to_string());
        app.state = AppState::ShowingError;

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Error loading players: Server error: 500"));
        assert!(text.contains("to dismiss"));
    }

    #[test]
    fn test_render_status_bar_page_counter() {
        let mut app = test_app();
        let players = vec![Player {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            position: Some("G".to_string()),
            team: Team {
                full_name: "Boston Celtics".to_string(),
            },
        }];
        app.view = Some(ViewState::from_page(PageResult::new(players, 5), 2, 50));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Page 2 of 5"));
        assert!(text.contains("51. Ada Lovelace"));
    }
}
