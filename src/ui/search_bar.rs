//! Search field overlay with live city suggestions
//!
//! Renders a small modal near the top of the screen holding the search
//! input, the suggestion list for the current prefix, and any inline
//! lookup error.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, MIN_SUGGEST_QUERY_LEN};

/// Longest suggestion list shown under the input
const MAX_VISIBLE_SUGGESTIONS: usize = 6;

/// Renders the search overlay on top of the dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let width = area.width.saturating_sub(8).clamp(24, 46);
    let suggestion_rows = app.suggestions.len().min(MAX_VISIBLE_SUGGESTIONS) as u16;
    // Input line + optional error + suggestions + hint, inside the borders
    let mut inner_height = 2 + suggestion_rows;
    if app.search_error.is_some() {
        inner_height += 1;
    }
    let overlay_area = top_rect(width, inner_height + 2, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("» ", Style::default().fg(Color::Cyan)),
        Span::styled(
            app.search_input.clone(),
            Style::default().fg(Color::White),
        ),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]));

    if let Some(error) = &app.search_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    for (index, place) in app
        .suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .enumerate()
    {
        let is_selected = index == app.selected_suggestion;
        let cursor = if is_selected { "\u{25B8} " } else { "  " };
        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(cursor.to_string(), style),
            Span::styled(place.label(), style),
        ]));
    }

    lines.push(hint_line(app));

    let block = Block::default()
        .title(" Search city ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

/// Builds the key-hint line under the suggestion list
fn hint_line(app: &App) -> Line<'static> {
    if app.search_input.chars().count() < MIN_SUGGEST_QUERY_LEN {
        return Line::from(Span::styled(
            format!("Type {}+ characters for suggestions", MIN_SUGGEST_QUERY_LEN),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" Select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
    ])
}

/// Horizontally centered rect anchored just below the top of the screen
fn top_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height.saturating_sub(2)),
    }
}
