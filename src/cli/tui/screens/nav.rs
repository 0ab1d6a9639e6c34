use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::panel::label_of;
use crate::cli::tui::app::App;
use crate::cli::tui::theme::Theme;
use crate::page::ACTIVE_CLASS;

/// Bottom navigation bar. The active screen's button is highlighted.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let page = app.controller().page();
    let focused = app.focused();

    let mut spans = Vec::new();
    for node in page.nav_buttons() {
        let Some(button) = page.element(node) else {
            continue;
        };
        let style = if focused == Some(node) {
            theme.focused
        } else if button.has_class(ACTIVE_CLASS) {
            theme.nav_active
        } else {
            theme.nav
        };
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!(" {} ", label_of(page, node)), style));
    }

    let nav = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(nav, area);
}
