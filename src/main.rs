//! Skycast - OpenWeatherMap city forecasts in the terminal
//!
//! A terminal UI application that displays the 5-day/3-hour forecast for a
//! city, with live city search, cached responses, and keyboard navigation.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use skycast::app::{App, AppMessage, Command, InputMode};
use skycast::cli::{Cli, StartupConfig};
use skycast::data::OpenWeatherClient;
use skycast::ui;

/// Capacity of the fetch-result channel
const MESSAGE_BUFFER: usize = 32;

/// Enables tracing when RUST_LOG is set.
///
/// Logs go to stderr so they can be redirected to a file without
/// corrupting the alternate screen.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }
}

/// Restores the terminal before the default panic output runs, so a crash
/// doesn't leave the shell in raw mode on the alternate screen.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the dashboard plus whichever overlays are active
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_dashboard(frame, app);
    if app.input_mode == InputMode::Search {
        ui::render_search_bar(frame, app);
    }
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Runs one fetch in the background, reporting back on the channel
fn spawn_command(command: Command, client: &OpenWeatherClient, tx: &mpsc::Sender<AppMessage>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let message = match command {
            Command::FetchForecast {
                place,
                generation,
                force,
            } => {
                let result = if force {
                    client.refresh_forecast(&place).await
                } else {
                    client.fetch_forecast(&place).await
                };
                AppMessage::ForecastLoaded { generation, result }
            }
            Command::FetchSuggestions { query, generation } => {
                let result = client.search_places(&query).await;
                AppMessage::SuggestionsLoaded { generation, result }
            }
        };
        // The receiver is gone once the app is shutting down
        let _ = tx.send(message).await;
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Resolve the place and API key before touching the terminal, so
    // configuration errors print normally
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    setup_panic_hook();

    // Enter the alternate screen; everything below must restore it on exit
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = OpenWeatherClient::new(startup.api_key);
    let (tx, mut rx) = mpsc::channel::<AppMessage>(MESSAGE_BUFFER);

    // Create app instance; its initial fetch is queued already
    let mut app = App::new(startup.place);

    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // The 100 ms input poll caps how long fetch results can sit unapplied
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Apply finished fetches, then start the ones the key handler queued
        while let Ok(message) = rx.try_recv() {
            app.apply_message(message);
        }
        for command in app.take_pending() {
            spawn_command(command, &client, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
