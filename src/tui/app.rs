//! Main TUI application state machine.
//!
//! Handles:
//! - Page navigation (charts are rebuilt for each page)
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::sqlite::SqliteStore;
use crate::application::{
    AirQualityService, AssessmentService, ChartController, Lookup, PersistedState, RecommendationService,
};
use crate::config::Config;
use crate::domain::{Page, SeverityLevel};

use super::ui::{
    asthma::{render_asthma, AsthmaState},
    home::{render_home, HomeField, HomeState},
    pollution::{render_pollution, PollutionState},
    questionnaire::{render_questionnaire, QuestionnaireState},
    render_disclaimer, render_nav,
    solutions::{render_solutions, SolutionsState},
    tools::{render_tools, ToolsState},
};

/// Main application state
pub struct App {
    page: Page,
    should_quit: bool,

    air_quality: AirQualityService<SqliteStore>,
    assessment: AssessmentService<SqliteStore>,
    recommendations: RecommendationService<SqliteStore>,

    /// Charts of the active page
    charts: ChartController,

    /// Set by input events; chart changes are tracked through `drawn_view`
    needs_redraw: bool,
    /// Page and chart revision of the last frame drawn
    drawn_view: Option<(Page, u64)>,

    home: HomeState,
    pollution: PollutionState,
    asthma: AsthmaState,
    questionnaire: QuestionnaireState,
    solutions: SolutionsState,
    tools: ToolsState,
}

impl App {
    /// Open the configured database and build the services.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened.
    pub fn new(config: &Config) -> Result<Self> {
        if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let store = Arc::new(SqliteStore::new(&config.db_path)?);
        Ok(Self::with_store(store, config.start_page))
    }

    /// Create the application over an existing store (Composition Root).
    pub fn with_store(store: Arc<SqliteStore>, start_page: Page) -> Self {
        let state = PersistedState::new(store);
        let mut app = Self {
            page: start_page,
            should_quit: false,
            air_quality: AirQualityService::new(state.clone()),
            assessment: AssessmentService::new(state.clone()),
            recommendations: RecommendationService::new(state),
            charts: ChartController::for_page(start_page),
            needs_redraw: true,
            drawn_view: None,
            home: HomeState::default(),
            pollution: PollutionState::default(),
            asthma: AsthmaState::default(),
            questionnaire: QuestionnaireState::default(),
            solutions: SolutionsState::default(),
            tools: ToolsState::default(),
        };
        app.enter_page();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            if self.take_redraw() {
                terminal.draw(|f| {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(2), // Nav
                            Constraint::Min(0),    // Page
                            Constraint::Length(3), // Disclaimer
                        ])
                        .split(f.area());

                    render_nav(f, chunks[0], self.page);

                    let content = chunks[1];
                    match self.page {
                        Page::Home => render_home(f, content, &self.home, &self.charts),
                        Page::AirPollution => render_pollution(f, content, &self.pollution, &self.charts),
                        Page::Asthma => render_asthma(f, content, &self.asthma, &self.charts),
                        Page::Questionnaire => render_questionnaire(f, content, &self.questionnaire),
                        Page::Solutions => render_solutions(f, content, &self.solutions),
                        Page::Tools => render_tools(f, content, &self.tools),
                    }

                    render_disclaimer(f, chunks[2]);
                })?;
            }

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, key.modifiers);
                    }
                    Event::Resize(..) => self.needs_redraw = true,
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Whether a frame is due: after input, or when the page or its charts
    /// changed since the last frame. Marks the current view as drawn.
    fn take_redraw(&mut self) -> bool {
        let view = (self.page, self.charts.revision());
        let due = self.needs_redraw || self.drawn_view != Some(view);
        if due {
            tracing::trace!(page = ?view.0, revision = view.1, "Redraw");
            self.drawn_view = Some(view);
            self.needs_redraw = false;
        }
        due
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switch pages. The new page gets a fresh set of charts.
    pub fn switch_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        tracing::debug!(from = ?self.page, to = ?page, "Switching page");
        self.page = page;
        self.charts = ChartController::for_page(page);
        self.enter_page();
    }

    fn enter_page(&mut self) {
        match self.page {
            Page::AirPollution => self.load_breakdown(),
            Page::Solutions => self.load_recommendation(),
            Page::Home | Page::Asthma | Page::Questionnaire | Page::Tools => {}
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        self.needs_redraw = true;

        // Global keys
        match key {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.switch_page(self.page.next());
                return;
            }
            KeyCode::BackTab => {
                self.switch_page(self.page.prev());
                return;
            }
            KeyCode::F(n @ 1..=6) => {
                if let Some(&page) = Page::ALL.get(usize::from(n) - 1) {
                    self.switch_page(page);
                }
                return;
            }
            _ => {}
        }

        match self.page {
            Page::Home => self.handle_home_key(key),
            Page::AirPollution => self.handle_pollution_key(key),
            Page::Asthma => self.handle_asthma_key(key),
            Page::Questionnaire => self.handle_questionnaire_key(key),
            Page::Solutions => self.handle_solutions_key(key),
            Page::Tools => self.handle_tools_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.home.focus = self.home.focus.prev(),
            KeyCode::Down => self.home.focus = self.home.focus.next(),
            KeyCode::Left if self.home.focus == HomeField::Dropdown => self.home.cycle_dropdown(false),
            KeyCode::Right if self.home.focus == HomeField::Dropdown => self.home.cycle_dropdown(true),
            KeyCode::Enter => match self.home.focus {
                HomeField::Station => self.fetch_station(),
                HomeField::Search | HomeField::Dropdown => self.search_city(),
            },
            KeyCode::Char(c) => match self.home.focus {
                HomeField::Station => self.home.station_input.input_char(c),
                HomeField::Search => self.home.search_input.input_char(c),
                HomeField::Dropdown => {}
            },
            KeyCode::Backspace => match self.home.focus {
                HomeField::Station => self.home.station_input.delete_char(),
                HomeField::Search => self.home.search_input.delete_char(),
                HomeField::Dropdown => self.home.dropdown = None,
            },
            _ => {}
        }
    }

    fn handle_pollution_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Left => self.pollution.move_cursor(false),
            KeyCode::Right => self.pollution.move_cursor(true),
            KeyCode::Enter => {
                let city = self.pollution.cursor_city();
                match self.air_quality.select_city(city) {
                    Ok(()) => self.load_breakdown(),
                    Err(e) => {
                        tracing::error!("Failed to save selected city: {}", e);
                        self.pollution.error = Some(e.to_string());
                    }
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_asthma_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.asthma.focus = self.asthma.focus.prev(),
            KeyCode::Down => self.asthma.focus = self.asthma.focus.next(),
            KeyCode::Enter => self.check_exposure(),
            KeyCode::Char(c) => self.asthma.input_char(c),
            KeyCode::Backspace => self.asthma.delete_char(),
            _ => {}
        }
    }

    fn handle_questionnaire_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.questionnaire.move_selection(false),
            KeyCode::Down => self.questionnaire.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => self.questionnaire.cycle_answer(),
            KeyCode::Char('n') => self.questionnaire.set_answer(SeverityLevel::None),
            KeyCode::Char('m') => self.questionnaire.set_answer(SeverityLevel::Mild),
            KeyCode::Char('s') => self.questionnaire.set_answer(SeverityLevel::Severe),
            KeyCode::Enter => {
                let answers = &self.questionnaire.answers;
                self.questionnaire.result = Some(self.assessment.check_questionnaire(answers));
                self.questionnaire.flare = Some(self.assessment.check_flare(answers));
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_solutions_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_recommendation(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_tools_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.tools.result = Some(self.air_quality.instant_aqi(&self.tools.input.value));
            }
            KeyCode::Char(c) => self.tools.input.input_char(c),
            KeyCode::Backspace => self.tools.input.delete_char(),
            KeyCode::Delete => self.tools.input.clear(),
            _ => {}
        }
    }

    fn fetch_station(&mut self) {
        match self.air_quality.fetch_station(&self.home.station_input.value) {
            Ok(lookup) => self.home.station = Some(lookup),
            Err(e) => {
                tracing::error!("Station lookup failed: {}", e);
                self.home.station = Some(Lookup::NotFound(e.to_string()));
            }
        }
    }

    fn search_city(&mut self) {
        let selected = self.home.selected_city();
        self.home.search = Some(
            self.air_quality
                .search_city(&self.home.search_input.value, selected, &mut self.charts),
        );
    }

    fn check_exposure(&mut self) {
        let input = self.asthma.to_input();
        match self.assessment.check_exposure(&input, &mut self.charts) {
            Ok(report) => {
                self.asthma.report = Some(report);
                self.asthma.error = None;
            }
            Err(e) => {
                tracing::error!("Exposure check failed: {}", e);
                self.asthma.error = Some(e.to_string());
            }
        }
    }

    fn load_breakdown(&mut self) {
        match self.air_quality.pollution_breakdown(&mut self.charts) {
            Ok((city, _)) => {
                self.pollution.shown = Some(city);
                self.pollution.sync_cursor(city);
                self.pollution.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load pollution breakdown: {}", e);
                self.pollution.error = Some(e.to_string());
            }
        }
    }

    fn load_recommendation(&mut self) {
        match self.recommendations.current() {
            Ok(rec) => {
                self.solutions.recommendation = Some(rec);
                self.solutions.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load recommendation: {}", e);
                self.solutions.error = Some(e.to_string());
            }
        }
    }
}
