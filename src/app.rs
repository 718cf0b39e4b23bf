//! Application state management for SpaceScope
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and state transitions between the dashboard views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::CacheStore;
use crate::cli::{StartupConfig, View};
use crate::data::weather::aurora_probability;
use crate::data::{
    EpicImage, EventsClient, GalleryClient, Launch, LaunchClient, SkyEvent, SpaceWeather,
    SpaceWeatherClient,
};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// List view showing the sky event catalog
    EventList,
    /// Detail view for a specific event
    EventDetail(String),
    /// Launch manifest view
    Launches,
    /// Space weather view
    Weather,
    /// EPIC Earth imagery view
    Gallery,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Loaded sky event catalog, date-sorted
    pub events: Vec<SkyEvent>,
    /// Loaded launch manifest
    pub launches: Vec<Launch>,
    /// Loaded space weather snapshot
    pub weather: Option<SpaceWeather>,
    /// Loaded EPIC frames
    pub gallery: Vec<EpicImage>,
    /// Index of currently selected event in the list view
    pub selected_event: usize,
    /// Index of currently selected launch
    pub selected_launch: usize,
    /// Index of the currently shown gallery frame
    pub gallery_index: usize,
    /// Scroll offset for the event detail view
    pub detail_scroll_offset: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// View to transition to after data loads (from --view CLI flag)
    pub pending_view: Option<View>,
    /// Observer latitude for the aurora estimate (from --lat CLI flag)
    pub observer_lat: Option<f64>,
    /// Sky event catalog client
    events_client: EventsClient,
    /// Launch manifest client
    launch_client: LaunchClient,
    /// Space weather client
    weather_client: SpaceWeatherClient,
    /// EPIC imagery client
    gallery_client: GalleryClient,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self::with_startup_config(StartupConfig::default())
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This is used to apply CLI arguments like --view and --lat.
    ///
    /// # Arguments
    /// * `config` - The startup configuration derived from CLI arguments
    pub fn with_startup_config(config: StartupConfig) -> Self {
        Self::build(config, CacheStore::new())
    }

    /// Creates an App with no backing cache store (for testing)
    #[cfg(test)]
    pub fn uncached() -> Self {
        Self::build(StartupConfig::default(), None)
    }

    fn build(config: StartupConfig, store: Option<CacheStore>) -> Self {
        Self {
            state: AppState::Loading,
            should_quit: false,
            events: Vec::new(),
            launches: Vec::new(),
            weather: None,
            gallery: Vec::new(),
            selected_event: 0,
            selected_launch: 0,
            gallery_index: 0,
            detail_scroll_offset: 0,
            show_help: false,
            refresh_requested: false,
            last_refresh: None,
            pending_view: config.initial_view,
            observer_lat: config.observer_lat,
            events_client: EventsClient::new(store.clone()),
            launch_client: LaunchClient::new(store.clone()),
            weather_client: SpaceWeatherClient::new(store.clone()),
            gallery_client: GalleryClient::new(store),
        }
    }

    /// Loads all four data domains concurrently
    ///
    /// Each domain degrades internally and never fails, so this always
    /// completes with renderable data. Transitions to the event list (or the
    /// view requested on the command line) when done.
    pub async fn load_all_data(&mut self) {
        let (events, launches, weather, gallery) = futures::join!(
            self.events_client.fetch_events(),
            self.launch_client.fetch_launches(),
            self.weather_client.fetch_weather(),
            self.gallery_client.fetch_gallery(),
        );

        self.events = events;
        self.launches = launches;
        self.weather = weather;
        self.gallery = gallery;

        // The aurora estimate depends on the observer, so it is derived here
        // rather than stored with the shared snapshot
        if let (Some(weather), Some(lat)) = (&mut self.weather, self.observer_lat) {
            weather.aurora_probability = Some(aurora_probability(lat, weather.kp.value));
        }

        self.clamp_selections();
        self.last_refresh = Some(Local::now());

        self.state = match self.pending_view.take() {
            Some(view) => state_for_view(view),
            None => AppState::EventList,
        };
    }

    /// Keeps selections in range after a reload shrinks a list
    fn clamp_selections(&mut self) {
        if self.selected_event >= self.events.len() {
            self.selected_event = self.events.len().saturating_sub(1);
        }
        if self.selected_launch >= self.launches.len() {
            self.selected_launch = self.launches.len().saturating_sub(1);
        }
        if self.gallery_index >= self.gallery.len() {
            self.gallery_index = self.gallery.len().saturating_sub(1);
        }
    }

    /// Returns the currently selected event, if any
    pub fn selected_event(&self) -> Option<&SkyEvent> {
        self.events.get(self.selected_event)
    }

    /// Returns the currently selected launch, if any
    #[allow(dead_code)]
    pub fn selected_launch(&self) -> Option<&Launch> {
        self.launches.get(self.selected_launch)
    }

    /// Finds an event by its id (for the detail view)
    pub fn event_by_id(&self, id: &str) -> Option<&SkyEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `q`: Quit the application (any view)
    /// - `1`-`4`: Switch to events / launches / weather / gallery
    /// - `Up`/`k`, `Down`/`j`: Move selection (lists) or scroll (detail)
    /// - `Enter` (in EventList): Open event detail
    /// - `Esc`: Back to event list; quits from the event list itself
    /// - `Left`/`h`, `Right`/`l` (in Gallery): Cycle frames
    /// - `r`: Request a data refresh
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::EventList => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_event_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_event_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(event) = self.selected_event() {
                        self.state = AppState::EventDetail(event.id.clone());
                    }
                }
                KeyCode::Char('2') => {
                    self.state = AppState::Launches;
                }
                KeyCode::Char('3') => {
                    self.state = AppState::Weather;
                }
                KeyCode::Char('4') => {
                    self.state = AppState::Gallery;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::EventDetail(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.detail_scroll_offset = 0;
                    self.state = AppState::EventList;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.scroll_down();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.scroll_up();
                }
                KeyCode::Char('g') => {
                    self.detail_scroll_offset = 0;
                }
                KeyCode::Char('G') => {
                    self.scroll_to_bottom();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Launches => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('1') => {
                    self.state = AppState::EventList;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_launch_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_launch_selection_down();
                }
                KeyCode::Char('3') => {
                    self.state = AppState::Weather;
                }
                KeyCode::Char('4') => {
                    self.state = AppState::Gallery;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Weather => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('1') => {
                    self.state = AppState::EventList;
                }
                KeyCode::Char('2') => {
                    self.state = AppState::Launches;
                }
                KeyCode::Char('4') => {
                    self.state = AppState::Gallery;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Gallery => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('1') => {
                    self.state = AppState::EventList;
                }
                KeyCode::Char('2') => {
                    self.state = AppState::Launches;
                }
                KeyCode::Char('3') => {
                    self.state = AppState::Weather;
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.previous_gallery_frame();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.next_gallery_frame();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves the event selection up, wrapping to the bottom at the top
    fn move_event_selection_up(&mut self) {
        let count = self.events.len();
        if count == 0 {
            return;
        }
        if self.selected_event == 0 {
            self.selected_event = count - 1;
        } else {
            self.selected_event -= 1;
        }
    }

    /// Moves the event selection down, wrapping to the top at the bottom
    fn move_event_selection_down(&mut self) {
        let count = self.events.len();
        if count == 0 {
            return;
        }
        self.selected_event = (self.selected_event + 1) % count;
    }

    /// Moves the launch selection up, wrapping at the top
    fn move_launch_selection_up(&mut self) {
        let count = self.launches.len();
        if count == 0 {
            return;
        }
        if self.selected_launch == 0 {
            self.selected_launch = count - 1;
        } else {
            self.selected_launch -= 1;
        }
    }

    /// Moves the launch selection down, wrapping at the bottom
    fn move_launch_selection_down(&mut self) {
        let count = self.launches.len();
        if count == 0 {
            return;
        }
        self.selected_launch = (self.selected_launch + 1) % count;
    }

    /// Shows the previous gallery frame, wrapping at the first
    fn previous_gallery_frame(&mut self) {
        let count = self.gallery.len();
        if count == 0 {
            return;
        }
        if self.gallery_index == 0 {
            self.gallery_index = count - 1;
        } else {
            self.gallery_index -= 1;
        }
    }

    /// Shows the next gallery frame, wrapping at the last
    fn next_gallery_frame(&mut self) {
        let count = self.gallery.len();
        if count == 0 {
            return;
        }
        self.gallery_index = (self.gallery_index + 1) % count;
    }

    /// Scrolls up in the detail view, stopping at 0
    pub fn scroll_up(&mut self) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the detail view with a reasonable upper bound
    pub fn scroll_down(&mut self) {
        const MAX_SCROLL: u16 = 100;
        if self.detail_scroll_offset < MAX_SCROLL {
            self.detail_scroll_offset += 1;
        }
    }

    /// Scrolls to the bottom; the renderer clamps to the actual content
    pub fn scroll_to_bottom(&mut self) {
        self.detail_scroll_offset = 100;
    }
}

/// Maps a CLI view to its application state
fn state_for_view(view: View) -> AppState {
    match view {
        View::Events => AppState::EventList,
        View::Launches => AppState::Launches,
        View::Weather => AppState::Weather,
        View::Gallery => AppState::Gallery,
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::curated_events;
    use crate::data::launches::mock_launches;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// App in the event list with mock data loaded
    fn loaded_app() -> App {
        let mut app = App::uncached();
        app.events = curated_events();
        app.launches = mock_launches();
        app.state = AppState::EventList;
        app
    }

    #[test]
    fn test_initial_state_is_loading() {
        let app = App::uncached();
        assert_eq!(app.state, AppState::Loading);
        assert_eq!(app.selected_event, 0);
        assert!(!app.should_quit);
        assert!(app.events.is_empty());
        assert!(app.weather.is_none());
    }

    #[test]
    fn test_keys_ignored_during_loading() {
        let mut app = App::uncached();

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_event, 0);

        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.state, AppState::Loading);

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_and_esc_quit_from_event_list() {
        let mut app = loaded_app();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = loaded_app();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_event_navigation_wraps() {
        let mut app = loaded_app();
        let count = app.events.len();

        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selected_event, count - 1, "Should wrap to bottom");

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_event, 0, "Should wrap to top");
    }

    #[test]
    fn test_vim_navigation_in_event_list() {
        let mut app = loaded_app();

        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.selected_event, 1);

        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.selected_event, 0);
    }

    #[test]
    fn test_navigation_with_no_events_does_nothing() {
        let mut app = App::uncached();
        app.state = AppState::EventList;

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_event, 0);

        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.state, AppState::EventList, "No event to open");
    }

    #[test]
    fn test_enter_opens_event_detail() {
        let mut app = loaded_app();
        app.selected_event = 1;
        let expected_id = app.events[1].id.clone();

        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.state, AppState::EventDetail(expected_id));
    }

    #[test]
    fn test_esc_returns_from_detail_and_resets_scroll() {
        let mut app = loaded_app();
        app.state = AppState::EventDetail("perseids-2025".to_string());
        app.detail_scroll_offset = 7;

        app.handle_key(key_event(KeyCode::Esc));

        assert_eq!(app.state, AppState::EventList);
        assert_eq!(app.detail_scroll_offset, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_detail_scroll_keys() {
        let mut app = loaded_app();
        app.state = AppState::EventDetail("perseids-2025".to_string());

        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.detail_scroll_offset, 1);

        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.detail_scroll_offset, 0);

        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.detail_scroll_offset, 0, "Should not underflow");

        app.handle_key(key_event(KeyCode::Char('G')));
        assert_eq!(app.detail_scroll_offset, 100);

        app.handle_key(key_event(KeyCode::Char('g')));
        assert_eq!(app.detail_scroll_offset, 0);
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = loaded_app();

        app.handle_key(key_event(KeyCode::Char('2')));
        assert_eq!(app.state, AppState::Launches);

        app.handle_key(key_event(KeyCode::Char('3')));
        assert_eq!(app.state, AppState::Weather);

        app.handle_key(key_event(KeyCode::Char('4')));
        assert_eq!(app.state, AppState::Gallery);

        app.handle_key(key_event(KeyCode::Char('1')));
        assert_eq!(app.state, AppState::EventList);
    }

    #[test]
    fn test_esc_returns_to_event_list_from_other_views() {
        for state in [AppState::Launches, AppState::Weather, AppState::Gallery] {
            let mut app = loaded_app();
            app.state = state;

            app.handle_key(key_event(KeyCode::Esc));
            assert_eq!(app.state, AppState::EventList);
            assert!(!app.should_quit);
        }
    }

    #[test]
    fn test_launch_navigation_wraps() {
        let mut app = loaded_app();
        app.state = AppState::Launches;
        let count = app.launches.len();

        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.selected_launch, count - 1);

        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.selected_launch, 0);
    }

    #[test]
    fn test_gallery_frame_cycling_wraps() {
        let mut app = loaded_app();
        app.state = AppState::Gallery;
        app.gallery = vec![
            crate::data::EpicImage {
                id: "a".to_string(),
                date: chrono::Utc::now(),
                image_url: "https://example.invalid/a.png".to_string(),
            },
            crate::data::EpicImage {
                id: "b".to_string(),
                date: chrono::Utc::now(),
                image_url: "https://example.invalid/b.png".to_string(),
            },
        ];

        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.gallery_index, 1);

        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.gallery_index, 0, "Should wrap to first frame");

        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.gallery_index, 1, "Should wrap to last frame");
    }

    #[test]
    fn test_refresh_requested_from_each_view() {
        for state in [
            AppState::EventList,
            AppState::EventDetail("perseids-2025".to_string()),
            AppState::Launches,
            AppState::Weather,
            AppState::Gallery,
        ] {
            let mut app = loaded_app();
            app.state = state;

            app.handle_key(key_event(KeyCode::Char('r')));
            assert!(app.refresh_requested);
        }
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = loaded_app();

        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        // Navigation is swallowed while help is shown
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_event, 0);
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit, "Esc closes help, does not quit");
    }

    #[test]
    fn test_event_by_id() {
        let app = loaded_app();
        assert!(app.event_by_id("perseids-2025").is_some());
        assert!(app.event_by_id("no-such-event").is_none());
    }

    #[test]
    fn test_with_startup_config_records_view_and_lat() {
        let config = StartupConfig {
            initial_view: Some(View::Weather),
            observer_lat: Some(65.0),
        };
        let app = App::with_startup_config(config);

        assert_eq!(app.state, AppState::Loading);
        assert_eq!(app.pending_view, Some(View::Weather));
        assert_eq!(app.observer_lat, Some(65.0));
    }

    #[test]
    fn test_state_for_view_mapping() {
        assert_eq!(state_for_view(View::Events), AppState::EventList);
        assert_eq!(state_for_view(View::Launches), AppState::Launches);
        assert_eq!(state_for_view(View::Weather), AppState::Weather);
        assert_eq!(state_for_view(View::Gallery), AppState::Gallery);
    }

    #[test]
    fn test_clamp_selections_after_shrinking_reload() {
        let mut app = loaded_app();
        app.selected_event = app.events.len() + 5;
        app.selected_launch = 99;
        app.gallery_index = 99;

        app.clamp_selections();

        assert_eq!(app.selected_event, app.events.len() - 1);
        assert_eq!(app.selected_launch, app.launches.len() - 1);
        assert_eq!(app.gallery_index, 0, "Empty gallery clamps to 0");
    }

    #[test]
    fn test_default_creates_same_as_new() {
        let app1 = App::new();
        let app2 = App::default();

        assert_eq!(app1.state, app2.state);
        assert_eq!(app1.selected_event, app2.selected_event);
        assert_eq!(app1.should_quit, app2.should_quit);
    }
}
