//! Application state management for the SWAPI Explorer dashboard
//!
//! This module contains the dashboard state, handling keyboard input, loading
//! every category report through the data manager, and the transitions
//! between the home page and the per-category pages.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::BTreeMap;
use tracing::warn;

use crate::analysis::{self, Report};
use crate::cache::CacheStore;
use crate::data::{Category, DataManager, RecordSource};

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Overview of every category
    Home,
    /// Report page for one category
    Category(Category),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Index into [`Category::ALL`] of the highlighted sidebar entry
    pub selected_index: usize,
    /// Report per category, or the error that prevented it
    pub reports: BTreeMap<Category, Result<Report, String>>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of last data load
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a reload has been requested
    pub refresh_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Index of the first visible section on a category page
    pub scroll_offset: usize,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            selected_index: 0,
            reports: BTreeMap::new(),
            should_quit: false,
            last_refresh: None,
            refresh_requested: false,
            show_help: false,
            scroll_offset: 0,
        }
    }

    /// Returns the currently highlighted category
    pub fn selected_category(&self) -> Category {
        Category::ALL[self.selected_index % Category::ALL.len()]
    }

    /// Gets the report (or load error) for a category
    pub fn report(&self, category: Category) -> Option<&Result<Report, String>> {
        self.reports.get(&category)
    }

    /// Number of categories that failed to load
    pub fn error_count(&self) -> usize {
        self.reports.values().filter(|r| r.is_err()).count()
    }

    /// Loads and analyzes every category, one after another
    ///
    /// A failing category is recorded as an error string and does not stop
    /// the others. Transitions from Loading to Home when complete; any other
    /// view is kept so a reload does not move the user.
    pub async fn load_all_data<S: CacheStore, F: RecordSource>(
        &mut self,
        manager: &DataManager<S, F>,
    ) {
        for category in Category::ALL {
            let report = match manager.record_set(category).await {
                Ok(records) => Ok(analysis::analyze(&records)),
                Err(e) => {
                    warn!("Failed to load {}: {}", category, e);
                    Err(e.to_string())
                }
            };
            self.reports.insert(category, report);
        }

        self.last_refresh = Some(Local::now());
        self.refresh_requested = false;
        self.clamp_scroll();

        if self.state == AppState::Loading {
            self.state = AppState::Home;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Esc`: Quit from Home, otherwise go back to Home
    /// - `Up`/`k`, `Down`/`j`: Move selection on Home, scroll on a category page
    /// - `Enter`: Open the selected category
    /// - `1`-`6`: Jump to a category
    /// - `h`: Go to Home
    /// - `Tab`/`BackTab`: Next/previous category page
    /// - `g`/`G`: Scroll to top/bottom of a category page
    /// - `r`: Request a reload
    /// - `?`: Toggle the help overlay
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
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Home => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    self.open_category(self.selected_category());
                }
                KeyCode::Char(c @ '1'..='6') => {
                    self.jump_to_digit(c);
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Category(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('h') => {
                    self.go_home();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_down();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_up();
                }
                KeyCode::Char('g') => {
                    self.scroll_to_top();
                }
                KeyCode::Char('G') => {
                    self.scroll_to_bottom();
                }
                KeyCode::Tab => {
                    self.move_selection_down();
                    self.open_category(self.selected_category());
                }
                KeyCode::BackTab => {
                    self.move_selection_up();
                    self.open_category(self.selected_category());
                }
                KeyCode::Char(c @ '1'..='6') => {
                    self.jump_to_digit(c);
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

    /// Opens the page for a category, starting at the top
    pub fn open_category(&mut self, category: Category) {
        if let Some(index) = Category::ALL.iter().position(|c| *c == category) {
            self.selected_index = index;
        }
        self.scroll_offset = 0;
        self.state = AppState::Category(category);
    }

    /// Returns to the home page, keeping the sidebar selection
    pub fn go_home(&mut self) {
        self.scroll_offset = 0;
        self.state = AppState::Home;
    }

    fn jump_to_digit(&mut self, digit: char) {
        let index = digit.to_digit(10).unwrap_or(1) as usize;
        if let Some(category) = Category::ALL.get(index.saturating_sub(1)) {
            self.open_category(*category);
        }
    }

    /// Moves the selection up, wrapping to the bottom if at the top
    fn move_selection_up(&mut self) {
        let count = Category::ALL.len();
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down, wrapping to the top if at the bottom
    fn move_selection_down(&mut self) {
        self.selected_index = (self.selected_index + 1) % Category::ALL.len();
    }

    /// Number of scrollable sections on the current page
    ///
    /// The metrics block is one section and each chart is another.
    pub fn section_count(&self) -> usize {
        match self.state {
            AppState::Category(category) => match self.reports.get(&category) {
                Some(Ok(report)) => 1 + report.charts.len(),
                _ => 1,
            },
            AppState::Loading | AppState::Home => 1,
        }
    }

    fn max_scroll(&self) -> usize {
        self.section_count().saturating_sub(1)
    }

    /// Scrolls up one section, stopping at the first
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scrolls down one section, stopping at the last
    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.max_scroll() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Keeps the scroll position valid after reports change
    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
