//! Help overlay listing every key binding
//!
//! A centered modal over the dashboard; any of Esc, `?`, or `q` closes it.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Key bindings by section, in display order
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("/", "Search for a city"),
            ("\u{2191}/\u{2193}", "Move through suggestions"),
            ("Enter", "Show forecast for selection"),
            ("Esc", "Cancel search"),
        ],
    ),
    (
        "Forecast",
        &[
            ("r", "Refresh, bypassing the cache"),
            ("?", "Toggle this help"),
            ("q", "Quit application"),
        ],
    ),
];

const OVERLAY_WIDTH: u16 = 44;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (section, keys) in BINDINGS {
        lines.push(Line::from(Span::styled(
            section.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, action) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Yellow)),
                Span::raw(action.to_string()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    // Two extra rows for the border
    let height = lines.len() as u16 + 2;
    let overlay_area = centered(OVERLAY_WIDTH, height, frame.area());

    frame.render_widget(Clear, overlay_area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        overlay_area,
    );
}

/// Rect of the given size centered inside `area`, clipped to fit
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw() -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_overlay_lists_every_binding() {
        let content = draw();

        for (section, keys) in BINDINGS {
            assert!(content.contains(section), "Missing section {}", section);
            for (key, action) in keys.iter() {
                assert!(content.contains(key), "Missing key {}", key);
                assert!(content.contains(action), "Missing action for {}", key);
            }
        }
    }

    #[test]
    fn test_overlay_shows_close_hint() {
        let content = draw();
        assert!(content.contains("Press Esc or ? to close"));
    }

    #[test]
    fn test_centered_rect_fits_small_areas() {
        let tiny = Rect::new(0, 0, 10, 4);
        let rect = centered(44, 20, tiny);
        assert!(rect.width <= tiny.width);
        assert!(rect.height <= tiny.height);
    }
}
