//! Forecast dashboard rendering
//!
//! Renders the main screen for the current place: header, current
//! conditions, detail readings, the hourly strip with a temperature
//! sparkline, and one card per forecast day. Loading and failure states
//! render their own centered screens.

use chrono::{Duration, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, QueryState};
use crate::forecast::{EntryView, ForecastView};
use crate::ui::widgets::TemperatureSparkline;

/// How many 3-hour slots fit on the hourly strip
const HOURLY_COLUMNS: usize = 8;

/// Most daily cards shown side by side
const MAX_DAILY_CARDS: usize = 6;

/// OpenWeatherMap icon code to glyph mapping
///
/// Codes are two digits plus a day/night suffix; the condition group is
/// carried by the digits, the suffix only matters for clear sky.
fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(0..2) {
        Some("01") => {
            if icon.ends_with('n') {
                "\u{1F319}" // 🌙
            } else {
                "\u{2600}" // ☀
            }
        }
        Some("02") => "\u{26C5}",               // ⛅
        Some("03") | Some("04") => "\u{2601}", // ☁
        Some("09") => "\u{1F327}",              // 🌧
        Some("10") => "\u{1F326}",              // 🌦
        Some("11") => "\u{26C8}",               // ⛈
        Some("13") => "\u{2744}",               // ❄
        Some("50") => "\u{1F32B}",              // 🌫
        _ => "\u{00B7}",                        // ·
    }
}

/// Color for a displayed temperature (warmer = more red, cooler = more blue)
///
/// The sentinel and anything else unparseable render gray.
fn temperature_color(temperature: &str) -> Color {
    match temperature.parse::<i64>() {
        Ok(t) if t >= 30 => Color::Red,
        Ok(t) if t >= 25 => Color::LightRed,
        Ok(t) if t >= 20 => Color::Yellow,
        Ok(t) if t >= 15 => Color::Green,
        Ok(t) if t >= 10 => Color::Cyan,
        Ok(_) => Color::Blue,
        Err(_) => Color::Gray,
    }
}

/// Extracts the numeric temperatures of the hourly strip for the sparkline
fn hourly_values(entries: &[EntryView]) -> Vec<f64> {
    entries
        .iter()
        .filter_map(|entry| entry.temperature.parse::<f64>().ok())
        .collect()
}

/// Renders the dashboard for the current query state
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing the forecast view
pub fn render(frame: &mut Frame, app: &App) {
    match &app.state {
        QueryState::Loading => render_loading(frame, &app.place),
        QueryState::Failed(message) => render_failure(frame, &app.place, message),
        QueryState::Ready(view) => render_forecast(frame, app, view),
    }
}

/// Renders a centered loading message while the forecast is fetched
fn render_loading(frame: &mut Frame, place: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new(format!("Loading forecast for {}...", place))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders a centered failure screen with the fetch error
fn render_failure(frame: &mut Frame, place: &str, message: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Percentage(40),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Could not load forecast for {}", place),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" Search another city  "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" Retry  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}

/// Renders the full forecast screen
fn render_forecast(frame: &mut Frame, app: &App, view: &ForecastView) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(5), // Current conditions
            Constraint::Length(4), // Detail readings
            Constraint::Length(5), // Hourly strip
            Constraint::Min(6),    // Daily cards
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, view, chunks[0]);
    render_current(frame, view, chunks[1]);
    render_details(frame, view, chunks[2]);
    render_hourly(frame, view, chunks[3]);
    render_daily(frame, view, chunks[4]);
    render_help(frame, chunks[5], app);
}

/// Renders the header line with the city and today's date
fn render_header(frame: &mut Frame, view: &ForecastView, area: Rect) {
    let width = area.width as usize;
    let separator = "─".repeat(width);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "SKYCAST",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                view.city_name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{}, {}", view.current.day_name, view.current.date),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the current-conditions panel from the first forecast slot
fn render_current(frame: &mut Frame, view: &ForecastView, area: Rect) {
    let current = &view.current;

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", icon_glyph(&current.icon))),
            Span::styled(
                format!("{}°C", current.temperature),
                Style::default()
                    .fg(temperature_color(&current.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                current.description.clone(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(
            format!("Feels like {}°C", current.feels_like),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("Low {}°C  High {}°C", current.temp_min, current.temp_max),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .title(format!(" Now · {} ", current.time))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the secondary readings of the current slot
fn render_details(frame: &mut Frame, view: &ForecastView, area: Rect) {
    let current = &view.current;

    let lines = vec![
        Line::from(vec![
            detail_label("Visibility "),
            detail_value(&current.visibility),
            detail_label("   Humidity "),
            detail_value(&current.humidity),
            detail_label("   Wind "),
            detail_value(&current.wind_speed),
            detail_label("   Pressure "),
            detail_value(&current.pressure),
        ]),
        Line::from(vec![
            detail_label("Sunrise "),
            detail_value(&view.sunrise),
            detail_label("   Sunset "),
            detail_value(&view.sunset),
        ]),
    ];

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_label(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(Color::DarkGray))
}

fn detail_value(value: &str) -> Span<'static> {
    Span::styled(value.to_string(), Style::default().fg(Color::White))
}

/// Renders the hourly strip with times, conditions, and the trend sparkline
fn render_hourly(frame: &mut Frame, view: &ForecastView, area: Rect) {
    let block = Block::default()
        .title(" Next hours ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let mut time_spans = Vec::new();
    let mut condition_spans = Vec::new();
    for entry in view.hourly.iter().take(HOURLY_COLUMNS) {
        time_spans.push(Span::styled(
            format!("{:<9}", entry.time),
            Style::default().fg(Color::Gray),
        ));
        condition_spans.push(Span::raw(format!("{} ", icon_glyph(&entry.icon))));
        condition_spans.push(Span::styled(
            format!("{:<6}", format!("{}°", entry.temperature)),
            Style::default().fg(temperature_color(&entry.temperature)),
        ));
    }

    let lines = vec![Line::from(time_spans), Line::from(condition_spans)];
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let values = hourly_values(&view.hourly);
    if inner.height >= 3 && !values.is_empty() {
        let spark_area = Rect {
            x: inner.x,
            y: inner.y + 2,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(TemperatureSparkline::new(&values), spark_area);
    }
}

/// Renders one card per forecast day
fn render_daily(frame: &mut Frame, view: &ForecastView, area: Rect) {
    if view.daily.is_empty() {
        return;
    }

    let count = view.daily.len().min(MAX_DAILY_CARDS);
    let constraints: Vec<Constraint> =
        (0..count).map(|_| Constraint::Ratio(1, count as u32)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (entry, column) in view.daily.iter().take(count).zip(columns.iter()) {
        render_daily_card(frame, entry, *column);
    }
}

/// Renders a single daily card
fn render_daily_card(frame: &mut Frame, entry: &EntryView, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            entry.date.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::raw(format!("{} ", icon_glyph(&entry.icon))),
            Span::styled(
                format!("{}°C", entry.temperature),
                Style::default()
                    .fg(temperature_color(&entry.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("{}° / {}°", entry.temp_min, entry.temp_max),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            entry.description.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(format!(" {} ", entry.day_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the bottom key hints plus the age of the displayed data
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let hints = [
        ("/", " Search  "),
        ("r", " Refresh  "),
        ("?", " Help  "),
        ("q", " Quit"),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    for (key, action) in hints {
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(action));
    }
    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!(" \u{2502} Data: {}", freshness_label(Local::now() - refreshed)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Human-readable age of the displayed forecast, coarsening with distance
fn freshness_label(age: Duration) -> String {
    if age.num_minutes() < 1 {
        "just now".to_string()
    } else if age.num_minutes() < 60 {
        format!("{}m ago", age.num_minutes())
    } else {
        format!("{}h ago", age.num_hours())
    }
}
