use ratatui::style::{Color, Modifier, Style};

/// Consistent theme for the TUI
pub struct Theme {
    pub title: Style,
    pub heading: Style,
    pub focused: Style,
    pub button: Style,
    pub output: Style,
    pub muted: Style,
    pub nav_active: Style,
    pub nav: Style,
    pub error: Style,
    pub help_bar: Style,
    pub help_key: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            heading: Style::default().add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::Yellow)
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::Cyan),
            output: Style::default().fg(Color::Green),
            muted: Style::default().fg(Color::DarkGray),
            nav_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            nav: Style::default().fg(Color::Gray),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            help_bar: Style::default().bg(Color::DarkGray),
            help_key: Style::default().fg(Color::Cyan),
        }
    }
}
