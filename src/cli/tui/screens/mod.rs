//! Frame layout: header, active screen panel, bottom nav and help bar
pub mod nav;
pub mod panel;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::App;
use super::theme::Theme;
use crate::page::PROMPT_VIEWER_SCREEN;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Active screen
            Constraint::Length(3), // Bottom nav
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let screen = app.controller().active_screen().unwrap_or("(no screen)");
    let header = Line::from(vec![
        Span::styled(" KIN ", theme.title),
        Span::styled(format!(" {}", screen), theme.muted),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    panel::render(frame, chunks[1], app, theme);
    nav::render(frame, chunks[2], app, theme);
    render_help(frame, chunks[3], app, theme);
}

fn render_help(frame: &mut Frame, area: ratatui::layout::Rect, app: &App, theme: &Theme) {
    let line = if let Some(status) = app.status() {
        Line::from(Span::styled(format!(" {}", status), theme.error))
    } else if app.is_editing() {
        Line::from(vec![
            Span::raw(" Typing (not saved)  "),
            Span::styled("Esc", theme.help_key),
            Span::raw(" Done"),
        ])
    } else {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled("↑↓/Tab", theme.help_key),
            Span::raw(" Move  "),
            Span::styled("Enter", theme.help_key),
            Span::raw(" Select  "),
        ];
        if app.controller().active_screen() == Some(PROMPT_VIEWER_SCREEN) {
            spans.push(Span::styled("←→", theme.help_key));
            spans.push(Span::raw(" Prompts  "));
        }
        if app.show_draft() {
            spans.push(Span::styled("i", theme.help_key));
            spans.push(Span::raw(" Write  "));
        }
        spans.push(Span::styled("q", theme.help_key));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).style(theme.help_bar), area);
}
