//! Application state management for the forecast viewer
//!
//! This module contains the main application state, handling keyboard input,
//! query lifecycle, and the pending-command queue drained by the runtime
//! loop. Every fetch carries the generation counter current when it was
//! requested; a response whose generation is no longer current is discarded,
//! so a slow response can never overwrite a newer query.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::data::{CityForecast, PlaceMatch, WeatherError};
use crate::forecast::{build_forecast_view, ForecastView};

/// Shortest search input that triggers a suggestion lookup
pub const MIN_SUGGEST_QUERY_LEN: usize = 3;

/// Lifecycle of the currently displayed forecast query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// A fetch for the current place is in flight
    Loading,
    /// The forecast arrived and rendered into display strings
    Ready(ForecastView),
    /// The fetch failed; holds the message shown to the user
    Failed(String),
}

/// Which part of the screen owns keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Dashboard navigation
    Normal,
    /// The search field is being edited
    Search,
}

/// Asynchronous work requested by the app, executed by the runtime loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the forecast for a place query
    FetchForecast {
        place: String,
        generation: u64,
        /// Skip the fresh-cache read (manual refresh)
        force: bool,
    },
    /// Fetch city suggestions for a partial name
    FetchSuggestions { query: String, generation: u64 },
}

/// Result of asynchronous work, delivered back to the app
#[derive(Debug)]
pub enum AppMessage {
    /// A forecast fetch finished
    ForecastLoaded {
        generation: u64,
        result: Result<CityForecast, WeatherError>,
    },
    /// A suggestion fetch finished
    SuggestionsLoaded {
        generation: u64,
        result: Result<Vec<PlaceMatch>, WeatherError>,
    },
}

/// Main application struct managing state and input
pub struct App {
    /// Current forecast query lifecycle
    pub state: QueryState,
    /// Place query behind the current forecast
    pub place: String,
    /// Current input owner
    pub input_mode: InputMode,
    /// Text in the search field
    pub search_input: String,
    /// Suggestions for the current search input
    pub suggestions: Vec<PlaceMatch>,
    /// Index of the highlighted suggestion
    pub selected_suggestion: usize,
    /// Inline error shown under the search field
    pub search_error: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of the last successfully applied forecast
    pub last_refresh: Option<DateTime<Local>>,
    /// Generation of the newest forecast request
    query_generation: u64,
    /// Generation of the newest suggestion request
    suggest_generation: u64,
    /// Commands queued for the runtime loop
    pending: Vec<Command>,
}

impl App {
    /// Creates the app showing `place`, with its initial fetch already queued.
    pub fn new(place: impl Into<String>) -> Self {
        let mut app = Self {
            state: QueryState::Loading,
            place: String::new(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            suggestions: Vec::new(),
            selected_suggestion: 0,
            search_error: None,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            query_generation: 0,
            suggest_generation: 0,
            pending: Vec::new(),
        };
        app.request_forecast(place.into(), false);
        app
    }

    /// Drains the queued commands for the runtime loop to execute
    pub fn take_pending(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `q` or `Esc` (dashboard): Quit the application
    /// - `/`: Open the search field
    /// - `r`: Refresh the current forecast, bypassing the cache
    /// - `?`: Toggle the help overlay
    /// - Typing in search: Update input; 3+ chars request suggestions
    /// - `Up`/`Down` (search): Move the suggestion highlight
    /// - `Enter` (search): Submit the highlighted suggestion or free text
    /// - `Esc` (search): Cancel and return to the dashboard
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('/') => {
                    self.enter_search();
                }
                KeyCode::Char('r') => {
                    self.request_forecast(self.place.clone(), true);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            InputMode::Search => match key_event.code {
                KeyCode::Esc => {
                    self.leave_search();
                }
                KeyCode::Enter => {
                    self.submit_search();
                }
                KeyCode::Up => {
                    self.move_suggestion_up();
                }
                KeyCode::Down => {
                    self.move_suggestion_down();
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    self.refresh_suggestions();
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                    self.refresh_suggestions();
                }
                _ => {}
            },
        }
    }

    /// Applies a finished fetch, discarding responses for superseded queries
    pub fn apply_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::ForecastLoaded { generation, result } => {
                if generation != self.query_generation {
                    tracing::debug!(
                        "Discarding forecast response for superseded query (generation {} < {})",
                        generation,
                        self.query_generation
                    );
                    return;
                }
                self.apply_forecast(result);
            }
            AppMessage::SuggestionsLoaded { generation, result } => {
                if generation != self.suggest_generation {
                    tracing::debug!(
                        "Discarding suggestions for superseded input (generation {} < {})",
                        generation,
                        self.suggest_generation
                    );
                    return;
                }
                // The search field may already be closed by the time a
                // lookup finishes
                if self.input_mode != InputMode::Search {
                    return;
                }
                self.apply_suggestions(result);
            }
        }
    }

    /// Queues a forecast fetch and puts the display into Loading
    fn request_forecast(&mut self, place: String, force: bool) {
        self.query_generation += 1;
        self.state = QueryState::Loading;
        self.place = place.clone();
        self.pending.push(Command::FetchForecast {
            place,
            generation: self.query_generation,
            force,
        });
    }

    /// Queues a suggestion lookup when the input is long enough
    fn refresh_suggestions(&mut self) {
        self.selected_suggestion = 0;
        self.search_error = None;
        if self.search_input.chars().count() < MIN_SUGGEST_QUERY_LEN {
            self.suggestions.clear();
            return;
        }
        self.suggest_generation += 1;
        self.pending.push(Command::FetchSuggestions {
            query: self.search_input.clone(),
            generation: self.suggest_generation,
        });
    }

    fn apply_forecast(&mut self, result: Result<CityForecast, WeatherError>) {
        match result {
            Ok(forecast) => match build_forecast_view(&forecast) {
                Ok(view) => {
                    self.state = QueryState::Ready(view);
                    self.last_refresh = Some(Local::now());
                }
                Err(view_error) => {
                    self.state = QueryState::Failed(view_error.to_string());
                }
            },
            Err(fetch_error) => {
                self.state = QueryState::Failed(fetch_error.to_string());
            }
        }
    }

    fn apply_suggestions(&mut self, result: Result<Vec<PlaceMatch>, WeatherError>) {
        match result {
            Ok(places) if places.is_empty() => {
                self.suggestions.clear();
                self.selected_suggestion = 0;
                self.search_error = Some("City not found".to_string());
            }
            Ok(places) => {
                self.suggestions = places;
                self.selected_suggestion = 0;
                self.search_error = None;
            }
            Err(fetch_error) => {
                self.suggestions.clear();
                self.selected_suggestion = 0;
                self.search_error = Some(fetch_error.to_string());
            }
        }
    }

    /// Opens the search field with empty input
    fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input.clear();
        self.suggestions.clear();
        self.selected_suggestion = 0;
        self.search_error = None;
    }

    /// Closes the search field, keeping the current forecast untouched
    fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
        self.suggestions.clear();
        self.selected_suggestion = 0;
        self.search_error = None;
    }

    /// Submits the highlighted suggestion, or the raw input as a free-text
    /// query when no suggestions are shown
    fn submit_search(&mut self) {
        let place = if let Some(suggestion) = self.suggestions.get(self.selected_suggestion) {
            suggestion.label()
        } else {
            let trimmed = self.search_input.trim();
            if trimmed.is_empty() {
                return;
            }
            trimmed.to_string()
        };
        self.leave_search();
        self.request_forecast(place, false);
    }

    /// Moves the suggestion highlight up, wrapping to the bottom at the top
    fn move_suggestion_up(&mut self) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        if self.selected_suggestion == 0 {
            self.selected_suggestion = count - 1;
        } else {
            self.selected_suggestion -= 1;
        }
    }

    /// Moves the suggestion highlight down, wrapping to the top at the bottom
    fn move_suggestion_down(&mut self) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        self.selected_suggestion = (self.selected_suggestion + 1) % count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ForecastEntry;
    use chrono::{DateTime, NaiveDate, Utc};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_entry() -> ForecastEntry {
        ForecastEntry {
            timestamp: DateTime::<Utc>::from_timestamp(1714543200, 0).unwrap(),
            local_time: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            temperature: Some(285.55),
            feels_like: Some(284.15),
            temp_min: Some(283.15),
            temp_max: Some(287.15),
            humidity: Some(45.0),
            pressure: Some(1012.0),
            wind_speed: Some(3.5),
            visibility: Some(10000.0),
            icon: "10d".to_string(),
            description: "light rain".to_string(),
        }
    }

    fn sample_forecast(city_name: &str) -> CityForecast {
        CityForecast {
            city_name: city_name.to_string(),
            timezone_offset_secs: 10800,
            sunrise: DateTime::<Utc>::from_timestamp(1714531380, 0).unwrap(),
            sunset: DateTime::<Utc>::from_timestamp(1714586280, 0).unwrap(),
            entries: vec![sample_entry()],
            fetched_at: Utc::now(),
        }
    }

    fn sample_suggestions() -> Vec<PlaceMatch> {
        vec![
            PlaceMatch {
                name: "Lutsk".to_string(),
                country: "UA".to_string(),
            },
            PlaceMatch {
                name: "Lutske".to_string(),
                country: "UA".to_string(),
            },
        ]
    }

    #[test]
    fn test_initial_state_is_loading() {
        let app = App::new("Lutsk");
        assert_eq!(app.state, QueryState::Loading);
        assert_eq!(app.place, "Lutsk");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert!(app.suggestions.is_empty());
        assert!(app.last_refresh.is_none());
    }

    #[test]
    fn test_new_queues_initial_fetch() {
        let mut app = App::new("Lutsk");
        let commands = app.take_pending();
        assert_eq!(
            commands,
            vec![Command::FetchForecast {
                place: "Lutsk".to_string(),
                generation: 1,
                force: false,
            }]
        );
    }

    #[test]
    fn test_take_pending_drains_the_queue() {
        let mut app = App::new("Lutsk");
        assert_eq!(app.take_pending().len(), 1);
        assert!(app.take_pending().is_empty());
    }

    #[test]
    fn test_q_quits_in_normal_mode() {
        let mut app = App::new("Lutsk");
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_esc_quits_in_normal_mode() {
        let mut app = App::new("Lutsk");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_question_mark_opens_help() {
        let mut app = App::new("Lutsk");
        assert!(!app.show_help);

        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);
    }

    #[test]
    fn test_q_closes_help_without_quitting() {
        let mut app = App::new("Lutsk");
        app.show_help = true;

        app.handle_key(key_event(KeyCode::Char('q')));

        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_ignores_other_keys() {
        let mut app = App::new("Lutsk");
        app.show_help = true;

        app.handle_key(key_event(KeyCode::Char('/')));

        assert!(app.show_help);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_slash_enters_search_mode() {
        let mut app = App::new("Lutsk");

        app.handle_key(key_event(KeyCode::Char('/')));

        assert_eq!(app.input_mode, InputMode::Search);
        assert!(app.search_input.is_empty());
        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_short_input_does_not_request_suggestions() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));

        app.handle_key(key_event(KeyCode::Char('L')));
        app.handle_key(key_event(KeyCode::Char('u')));

        assert_eq!(app.search_input, "Lu");
        assert!(app.take_pending().is_empty());
    }

    #[test]
    fn test_third_char_requests_suggestions() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));

        app.handle_key(key_event(KeyCode::Char('L')));
        app.handle_key(key_event(KeyCode::Char('u')));
        app.handle_key(key_event(KeyCode::Char('t')));

        assert_eq!(
            app.take_pending(),
            vec![Command::FetchSuggestions {
                query: "Lut".to_string(),
                generation: 1,
            }]
        );
    }

    #[test]
    fn test_each_keystroke_bumps_suggestion_generation() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Luts".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }

        let commands = app.take_pending();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            Command::FetchSuggestions {
                query: "Luts".to_string(),
                generation: 2,
            }
        );
    }

    #[test]
    fn test_backspace_below_threshold_clears_suggestions() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Lut".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.suggestions = sample_suggestions();

        app.handle_key(key_event(KeyCode::Backspace));

        assert_eq!(app.search_input, "Lu");
        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_esc_cancels_search_and_keeps_forecast_state() {
        let mut app = App::new("Lutsk");
        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(sample_forecast("Lutsk")),
        });
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Kyiv".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }

        app.handle_key(key_event(KeyCode::Esc));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.search_input.is_empty());
        assert!(app.suggestions.is_empty());
        assert!(matches!(app.state, QueryState::Ready(_)));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_enter_submits_selected_suggestion() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Lut".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.take_pending();
        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Ok(sample_suggestions()),
        });
        app.handle_key(key_event(KeyCode::Down));

        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.place, "Lutske,UA");
        assert_eq!(app.state, QueryState::Loading);
        assert_eq!(
            app.take_pending(),
            vec![Command::FetchForecast {
                place: "Lutske,UA".to_string(),
                generation: 2,
                force: false,
            }]
        );
    }

    #[test]
    fn test_enter_submits_free_text_without_suggestions() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Narnia".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.take_pending();

        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.place, "Narnia");
        assert_eq!(app.state, QueryState::Loading);
        let commands = app.take_pending();
        assert_eq!(
            commands,
            vec![Command::FetchForecast {
                place: "Narnia".to_string(),
                generation: 2,
                force: false,
            }]
        );
    }

    #[test]
    fn test_enter_with_empty_input_stays_in_search() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.handle_key(key_event(KeyCode::Char('/')));

        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Search);
        assert_eq!(app.place, "Lutsk");
        assert!(app.take_pending().is_empty());
    }

    #[test]
    fn test_suggestion_selection_wraps() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        app.suggestions = sample_suggestions();
        assert_eq!(app.selected_suggestion, 0);

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_suggestion, 1);

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_suggestion, 0, "Should wrap to top");

        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selected_suggestion, 1, "Should wrap to bottom");
    }

    #[test]
    fn test_r_requests_forced_refresh() {
        let mut app = App::new("Lutsk");
        app.take_pending();
        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(sample_forecast("Lutsk")),
        });

        app.handle_key(key_event(KeyCode::Char('r')));

        assert_eq!(app.state, QueryState::Loading);
        assert_eq!(
            app.take_pending(),
            vec![Command::FetchForecast {
                place: "Lutsk".to_string(),
                generation: 2,
                force: true,
            }]
        );
    }

    #[test]
    fn test_successful_forecast_transitions_to_ready() {
        let mut app = App::new("Lutsk");

        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(sample_forecast("Lutsk")),
        });

        match &app.state {
            QueryState::Ready(view) => assert_eq!(view.city_name, "Lutsk"),
            other => panic!("Expected Ready state, got {:?}", other),
        }
        assert!(app.last_refresh.is_some());
    }

    #[test]
    fn test_failed_forecast_transitions_to_failed() {
        let mut app = App::new("Lutsk");

        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Err(WeatherError::MissingField("weather".to_string())),
        });

        assert_eq!(
            app.state,
            QueryState::Failed("Missing expected field in response: weather".to_string())
        );
        assert!(app.last_refresh.is_none());
    }

    #[test]
    fn test_stale_forecast_response_is_discarded() {
        let mut app = App::new("Lutsk");
        // A second query supersedes the first before any response arrives
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Kyiv".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.place, "Kyiv");

        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(sample_forecast("Lutsk")),
        });

        assert_eq!(app.state, QueryState::Loading);
    }

    #[test]
    fn test_out_of_order_responses_keep_latest_query() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Kyiv".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.handle_key(key_event(KeyCode::Enter));

        // The newer query answers first, then the older one trickles in
        app.apply_message(AppMessage::ForecastLoaded {
            generation: 2,
            result: Ok(sample_forecast("Kyiv")),
        });
        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(sample_forecast("Lutsk")),
        });

        match &app.state {
            QueryState::Ready(view) => assert_eq!(view.city_name, "Kyiv"),
            other => panic!("Expected Ready state, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_error_cannot_clobber_newer_result() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Kyiv".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.handle_key(key_event(KeyCode::Enter));

        app.apply_message(AppMessage::ForecastLoaded {
            generation: 2,
            result: Ok(sample_forecast("Kyiv")),
        });
        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Err(WeatherError::MissingField("weather".to_string())),
        });

        assert!(matches!(app.state, QueryState::Ready(_)));
    }

    #[test]
    fn test_empty_suggestions_show_city_not_found() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Xyz".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }

        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Ok(Vec::new()),
        });

        assert_eq!(app.search_error.as_deref(), Some("City not found"));
        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_suggestion_fetch_error_is_shown_inline() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Lut".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }

        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Err(WeatherError::BadStatus(401, "Invalid API key".to_string())),
        });

        assert_eq!(
            app.search_error.as_deref(),
            Some("OpenWeatherMap returned 401: Invalid API key")
        );
        assert!(matches!(app.state, QueryState::Loading));
    }

    #[test]
    fn test_stale_suggestions_are_discarded() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Luts".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }

        // Response for "Lut" (generation 1) arrives after "Luts" was typed
        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Ok(sample_suggestions()),
        });

        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_after_leaving_search_are_ignored() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Lut".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.handle_key(key_event(KeyCode::Esc));

        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Ok(sample_suggestions()),
        });

        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_new_suggestions_reset_selection() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));
        for c in "Lut".chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 1,
            result: Ok(sample_suggestions()),
        });
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_suggestion, 1);

        app.handle_key(key_event(KeyCode::Char('s')));
        app.apply_message(AppMessage::SuggestionsLoaded {
            generation: 2,
            result: Ok(sample_suggestions()),
        });

        assert_eq!(app.selected_suggestion, 0);
    }

    #[test]
    fn test_q_is_typed_text_in_search_mode() {
        let mut app = App::new("Lutsk");
        app.handle_key(key_event(KeyCode::Char('/')));

        app.handle_key(key_event(KeyCode::Char('q')));

        assert!(!app.should_quit);
        assert_eq!(app.search_input, "q");
    }

    #[test]
    fn test_view_error_transitions_to_failed() {
        let mut app = App::new("Lutsk");
        let mut forecast = sample_forecast("Lutsk");
        forecast.entries.clear();

        app.apply_message(AppMessage::ForecastLoaded {
            generation: 1,
            result: Ok(forecast),
        });

        assert_eq!(
            app.state,
            QueryState::Failed("Forecast contained no entries".to_string())
        );
    }
}
