//! The active screen, drawn from its element subtree

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::cli::tui::app::App;
use crate::cli::tui::theme::Theme;
use crate::page::{NodeId, Page};

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let page = app.controller().page();
    let screen = app
        .controller()
        .active_screen()
        .and_then(|id| page.get_element_by_id(id));

    let Some(screen) = screen else {
        let empty = Paragraph::new(Line::styled("No screen is showing.", theme.muted))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let (body_area, draft_area) = if app.show_draft() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let mut lines = Vec::new();
    collect_lines(page, screen, app.focused(), theme, &mut lines);
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, body_area);

    if let Some(draft_area) = draft_area {
        render_draft(frame, draft_area, app, theme);
    }
}

fn collect_lines(
    page: &Page,
    node: NodeId,
    focused: Option<NodeId>,
    theme: &Theme,
    lines: &mut Vec<Line<'static>>,
) {
    let Some(element) = page.element(node) else {
        return;
    };

    for &child in element.children() {
        let Some(e) = page.element(child) else {
            continue;
        };

        if e.is_clickable() {
            let label = label_of(page, child);
            let line = if focused == Some(child) {
                Span::styled(format!("▶ [ {} ]", label), theme.focused)
            } else {
                Span::styled(format!("  [ {} ]", label), theme.button)
            };
            lines.push(Line::from(line));
            continue;
        }

        if !e.text.is_empty() {
            let style = match e.tag.as_str() {
                "h1" | "h2" | "h3" => theme.heading,
                _ if e.id.is_some() => theme.output,
                _ => Style::default(),
            };
            for text in e.text.lines() {
                lines.push(Line::styled(text.to_string(), style));
            }
            lines.push(Line::from(""));
        }

        collect_lines(page, child, focused, theme, lines);
    }
}

/// Text of an element, or of its descendants when it has none of its own
pub fn label_of(page: &Page, node: NodeId) -> String {
    let Some(element) = page.element(node) else {
        return String::new();
    };
    if !element.text.is_empty() {
        return element.text.clone();
    }
    element
        .children()
        .iter()
        .map(|&child| label_of(page, child))
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

fn render_draft(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let border = if app.is_editing() {
        theme.focused
    } else {
        theme.muted
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Your story (not saved) ");
    let inner = block.inner(area);

    let width = inner.width.max(1) as usize;
    let scroll = app.draft().visual_scroll(width);
    let input = Paragraph::new(app.draft().value().to_string())
        .scroll((0, scroll as u16))
        .block(block);
    frame.render_widget(input, area);

    if app.is_editing() {
        let cursor = app.draft().visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((inner.x + cursor, inner.y));
    }
}
