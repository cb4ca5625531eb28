use ratatui::style::{Color, Modifier, Style};

// Court colors
pub const BALL_ORANGE: Color = Color::Rgb(232, 116, 44);
pub const HARDWOOD: Color = Color::Rgb(214, 178, 120);
pub const NET_WHITE: Color = Color::Rgb(236, 236, 228);
pub const FOUL_RED: Color = Color::Rgb(210, 58, 52);
pub const SIDELINE_GRAY: Color = Color::Rgb(118, 120, 128);
pub const PAINT_NAVY: Color = Color::Rgb(28, 44, 78);
pub const SCOREBOARD: Color = Color::Rgb(18, 22, 34);

pub fn title_style() -> Style {
    Style::default().fg(BALL_ORANGE).add_modifier(Modifier::BOLD)
}

/// Highlighted row in the player list
pub fn selected_style() -> Style {
    Style::default()
        .bg(PAINT_NAVY)
        .fg(NET_WHITE)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(NET_WHITE)
}

pub fn muted_style() -> Style {
    Style::default().fg(SIDELINE_GRAY)
}

pub fn highlight_style() -> Style {
    Style::default().fg(HARDWOOD)
}

pub fn success_style() -> Style {
    Style::default().fg(HARDWOOD).add_modifier(Modifier::ITALIC)
}

pub fn error_style() -> Style {
    Style::default().fg(FOUL_RED).add_modifier(Modifier::BOLD)
}

pub fn filter_style(selected: bool) -> Style {
    if selected {
        title_style().add_modifier(Modifier::UNDERLINED)
    } else {
        muted_style()
    }
}

/// Key hint in the status bar; dimmed when the action is unavailable
pub fn action_style(enabled: bool) -> Style {
    if enabled {
        help_key_style()
    } else {
        muted_style().add_modifier(Modifier::DIM)
    }
}

pub fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { BALL_ORANGE } else { SIDELINE_GRAY })
}

pub fn status_bar_style() -> Style {
    Style::default().bg(SCOREBOARD).fg(NET_WHITE)
}

pub fn help_key_style() -> Style {
    Style::default().fg(HARDWOOD).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    list_item_style()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_filter_uses_title_color() {
        assert_eq!(filter_style(true).fg, Some(BALL_ORANGE));
        assert_eq!(filter_style(false).fg, Some(SIDELINE_GRAY));
    }

    #[test]
    fn test_disabled_action_is_dimmed() {
        assert!(action_style(false).add_modifier.contains(Modifier::DIM));
        assert!(!action_style(true).add_modifier.contains(Modifier::DIM));
    }
}
