use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::catalog::{self, CompetitorProfile, Persona, Problem, SuccessStory};
use crate::core::{parse_command, Action, Command, Module, NotifyLevel};
use crate::modules::export::{self, ExportFormat};
use crate::modules::search_modal::SearchModal;

/// Sidebar entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Dashboard,
    Icp,
    Problems,
    Impact,
    Metrics,
    Scripts,
    Stories,
    Technical,
    Competitors,
    Resources,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Dashboard,
        Section::Icp,
        Section::Problems,
        Section::Impact,
        Section::Metrics,
        Section::Scripts,
        Section::Stories,
        Section::Technical,
        Section::Competitors,
        Section::Resources,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Icp => "icp",
            Section::Problems => "problems",
            Section::Impact => "impact",
            Section::Metrics => "metrics",
            Section::Scripts => "scripts",
            Section::Stories => "stories",
            Section::Technical => "technical",
            Section::Competitors => "competitors",
            Section::Resources => "resources",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Icp => "Ideal Customer Profile",
            Section::Problems => "Problems & Pain Points",
            Section::Impact => "Business Impact",
            Section::Metrics => "KPIs & Metrics",
            Section::Scripts => "Sales Scripts",
            Section::Stories => "Success Stories",
            Section::Technical => "Technical Deep Dive",
            Section::Competitors => "Competitive Intel",
            Section::Resources => "Resources",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Section::Dashboard => '1',
            Section::Icp => '2',
            Section::Problems => '3',
            Section::Impact => '4',
            Section::Metrics => '5',
            Section::Scripts => '6',
            Section::Stories => '7',
            Section::Technical => '8',
            Section::Competitors => '9',
            Section::Resources => '0',
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        let id = id.trim().to_lowercase();
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.id() == id)
    }

    pub fn from_shortcut(ch: char) -> Option<Section> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.shortcut() == ch)
    }

    /// Which content view renders this section
    pub fn view(&self) -> ContentView {
        match self {
            Section::Dashboard => ContentView::Dashboard,
            Section::Icp => ContentView::Personas,
            Section::Problems => ContentView::Problems,
            Section::Stories => ContentView::Stories,
            Section::Competitors => ContentView::Competitors,
            Section::Impact
            | Section::Metrics
            | Section::Scripts
            | Section::Technical
            | Section::Resources => ContentView::UnderConstruction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView {
    Dashboard,
    Personas,
    Problems,
    Stories,
    Competitors,
    UnderConstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Editing the header search field
    Search,
    Command,
}

/// Persona directory filter: everything, or one exact persona id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaFilter {
    All,
    Only(&'static str),
}

impl PersonaFilter {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Some(PersonaFilter::All);
        }
        catalog::persona(value).map(|persona| PersonaFilter::Only(persona.id))
    }

    pub fn id(&self) -> &'static str {
        match self {
            PersonaFilter::All => "all",
            PersonaFilter::Only(id) => id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PersonaFilter::All => "All Personas",
            PersonaFilter::Only(id) => catalog::persona_title(id),
        }
    }

    pub fn matches(&self, persona: &Persona) -> bool {
        match self {
            PersonaFilter::All => true,
            PersonaFilter::Only(id) => persona.id == *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Screen rows a problem card occupied on the last frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemHitbox {
    pub id: &'static str,
    pub rows: Range<u16>,
}

/// State of the optional in-process API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Off,
    Starting(String),
    Listening(String),
    Failed(String),
}

#[derive(Debug)]
pub struct App {
    pub active_section: Section,
    /// Captured from the header field; never applied to any content
    pub search_query: String,
    pub sidebar_open: bool,
    pub expanded_problem: Option<&'static str>,
    pub persona_filter: PersonaFilter,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub content_cursor: usize,
    pub content_scroll: u16,
    pub problem_hitboxes: Vec<ProblemHitbox>,
    pub search_open: bool,
    pub search_modal: SearchModal,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub api_status: ApiStatus,
    /// Where the TUI writes its log, shown in the settings popup
    pub log_file: Option<PathBuf>,
    /// First sidebar entry drawn on the last frame
    pub sidebar_offset: usize,
    pub help_open: bool,
    pub settings_open: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            active_section: Section::Dashboard,
            search_query: String::new(),
            sidebar_open: true,
            expanded_problem: None,
            persona_filter: PersonaFilter::All,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            content_cursor: 0,
            content_scroll: 0,
            problem_hitboxes: Vec::new(),
            search_open: false,
            search_modal: SearchModal::new(),
            command: CommandBar::default(),
            status: None,
            api_status: ApiStatus::Off,
            log_file: None,
            sidebar_offset: 0,
            help_open: false,
            settings_open: false,
            should_quit: false,
        }
    }

    /// Reload: every piece of view state goes back to its default.
    pub fn reset(&mut self) {
        let api_status = std::mem::replace(&mut self.api_status, ApiStatus::Off);
        let log_file = self.log_file.take();
        *self = Self::new();
        self.api_status = api_status;
        self.log_file = log_file;
        self.set_status("View reset", StatusLevel::Info);
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    pub fn content_view(&self) -> ContentView {
        self.active_section.view()
    }

    pub fn set_section(&mut self, section: Section) {
        self.active_section = section;
        self.content_cursor = 0;
        self.content_scroll = 0;
        self.problem_hitboxes.clear();
    }

    pub fn cycle_section(&mut self, forward: bool) {
        let index = Section::ALL
            .iter()
            .position(|section| *section == self.active_section)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % Section::ALL.len()
        } else {
            (index + Section::ALL.len() - 1) % Section::ALL.len()
        };
        self.set_section(Section::ALL[next]);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        if !self.sidebar_open && self.focus == Focus::Sidebar {
            self.focus = Focus::Content;
        }
    }

    /// Accordion toggle: expands `id`, or collapses it if it was already open.
    pub fn toggle_problem(&mut self, id: &'static str) {
        self.expanded_problem = if self.expanded_problem == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn set_persona_filter(&mut self, filter: PersonaFilter) {
        self.persona_filter = filter;
        self.content_cursor = 0;
        self.content_scroll = 0;
    }

    pub fn cycle_persona_filter(&mut self, forward: bool) {
        // Position 0 is "all", 1..=N the personas in catalogue order
        let slots = catalog::PERSONAS.len() + 1;
        let current = match self.persona_filter {
            PersonaFilter::All => 0,
            PersonaFilter::Only(id) => catalog::PERSONAS
                .iter()
                .position(|persona| persona.id == id)
                .map(|idx| idx + 1)
                .unwrap_or(0),
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let filter = match next {
            0 => PersonaFilter::All,
            idx => PersonaFilter::Only(catalog::PERSONAS[idx - 1].id),
        };
        self.set_persona_filter(filter);
    }

    pub fn filtered_personas(&self) -> Vec<&'static Persona> {
        catalog::PERSONAS
            .iter()
            .filter(|persona| self.persona_filter.matches(persona))
            .collect()
    }

    pub fn content_len(&self) -> usize {
        match self.content_view() {
            ContentView::Personas => self.filtered_personas().len(),
            ContentView::Problems => catalog::PROBLEMS.len(),
            ContentView::Stories => catalog::STORIES.len(),
            ContentView::Competitors => catalog::COMPETITORS.len(),
            ContentView::Dashboard | ContentView::UnderConstruction => 0,
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.content_cursor = self.content_cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.content_len();
        if len > 0 && self.content_cursor + 1 < len {
            self.content_cursor += 1;
        }
    }

    /// Card grids scroll by moving the cursor; the grid keeps the cursor's row in view
    fn scrolls_by_card(&self) -> bool {
        matches!(
            self.content_view(),
            ContentView::Personas | ContentView::Stories
        )
    }

    pub fn scroll_up(&mut self, amount: u16) {
        if self.scrolls_by_card() {
            self.content_cursor = self.content_cursor.saturating_sub(amount as usize);
            return;
        }
        self.content_scroll = self.content_scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        if self.scrolls_by_card() {
            let last = self.content_len().saturating_sub(1);
            self.content_cursor = (self.content_cursor + amount as usize).min(last);
            return;
        }
        self.content_scroll = self.content_scroll.saturating_add(amount);
    }

    /// Section drawn on sidebar row `row` (0 = first row inside the border)
    pub fn sidebar_section_at(&self, row: usize) -> Option<Section> {
        Section::ALL.get(self.sidebar_offset + row).copied()
    }

    pub fn cursor_persona(&self) -> Option<&'static Persona> {
        if self.content_view() != ContentView::Personas {
            return None;
        }
        self.filtered_personas().get(self.content_cursor).copied()
    }

    pub fn cursor_problem(&self) -> Option<&'static Problem> {
        if self.content_view() != ContentView::Problems {
            return None;
        }
        catalog::PROBLEMS.get(self.content_cursor)
    }

    pub fn cursor_story(&self) -> Option<&'static SuccessStory> {
        if self.content_view() != ContentView::Stories {
            return None;
        }
        catalog::STORIES.get(self.content_cursor)
    }

    pub fn cursor_competitor(&self) -> Option<&'static CompetitorProfile> {
        if self.content_view() != ContentView::Competitors {
            return None;
        }
        catalog::COMPETITORS.get(self.content_cursor)
    }

    /// Enter on the content pane
    pub fn activate(&mut self) {
        match self.content_view() {
            ContentView::Problems => {
                if let Some(problem) = self.cursor_problem() {
                    self.toggle_problem(problem.id);
                }
            }
            ContentView::Personas => {
                let filter = match (self.persona_filter, self.cursor_persona()) {
                    (PersonaFilter::All, Some(persona)) => PersonaFilter::Only(persona.id),
                    _ => PersonaFilter::All,
                };
                self.set_persona_filter(filter);
            }
            _ => {}
        }
    }

    /// Problem whose card covered `row` on the last frame
    pub fn problem_at_row(&self, row: u16) -> Option<&'static str> {
        self.problem_hitboxes
            .iter()
            .find(|hitbox| hitbox.rows.contains(&row))
            .map(|hitbox| hitbox.id)
    }

    /// Plain-text pitch for whatever the content cursor is on
    pub fn talking_point(&self) -> Option<String> {
        match self.content_view() {
            ContentView::Personas => self.cursor_persona().map(|persona| {
                format!(
                    "{} ({}): {}",
                    persona.title,
                    persona.department,
                    persona.responsibilities.join(", ")
                )
            }),
            ContentView::Problems => self.cursor_problem().map(|problem| {
                format!(
                    "{}. {} Expected impact: {}",
                    problem.title, problem.solution, problem.impact
                )
            }),
            ContentView::Stories => self.cursor_story().map(|story| {
                format!(
                    "{}: {} ({}). \"{}\"",
                    story.company, story.outcome, story.savings, story.testimonial
                )
            }),
            ContentView::Competitors => self.cursor_competitor().map(|competitor| {
                format!(
                    "vs {}: {}",
                    competitor.name,
                    competitor.differentiators.join(", ")
                )
            }),
            ContentView::Dashboard | ContentView::UnderConstruction => None,
        }
    }

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn open_search_modal(&mut self, prefill: Option<String>) {
        if let Some(query) = prefill {
            self.search_modal.set_query(query);
        }
        self.search_open = true;
    }

    pub fn close_search_modal(&mut self) {
        self.search_open = false;
    }

    /// Route a key to the search modal while it is open
    pub fn handle_modal_key(&mut self, key: crossterm::event::KeyEvent) {
        let action = self.search_modal.handle_key(key);
        self.apply_action(action);
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }
        let cmd = parse_command(&input);
        self.command.last = Some(input);
        self.exit_command();
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Go(target) => match Section::from_id(target) {
                Some(section) => Action::Navigate(section),
                None => Action::Notify(format!("Unknown section: {target}"), NotifyLevel::Warn),
            },
            Command::Sidebar => {
                self.toggle_sidebar();
                Action::None
            }
            Command::Persona(None) => {
                self.cycle_persona_filter(true);
                Action::Navigate(Section::Icp)
            }
            Command::Persona(Some(value)) => match PersonaFilter::parse(value) {
                Some(filter) => {
                    self.set_persona_filter(filter);
                    Action::Navigate(Section::Icp)
                }
                None => Action::Notify(format!("Unknown persona: {value}"), NotifyLevel::Warn),
            },
            Command::Expand(None) => match self.cursor_problem() {
                Some(problem) => {
                    self.toggle_problem(problem.id);
                    Action::None
                }
                None => Action::Notify("expand needs a problem id".to_string(), NotifyLevel::Warn),
            },
            Command::Expand(Some(id)) => match catalog::problem(id) {
                Some(problem) => {
                    self.toggle_problem(problem.id);
                    if self.active_section != Section::Problems {
                        self.set_section(Section::Problems);
                    }
                    if let Some(idx) = catalog::PROBLEMS.iter().position(|p| p.id == problem.id) {
                        self.content_cursor = idx;
                    }
                    Action::None
                }
                None => Action::Notify(format!("Unknown problem: {id}"), NotifyLevel::Warn),
            },
            Command::Search(prefill) => {
                self.open_search_modal(prefill.clone());
                Action::None
            }
            Command::Help => {
                self.help_open = true;
                Action::None
            }
            Command::Export(format) => {
                let format = match format.as_deref().map(ExportFormat::parse) {
                    None => ExportFormat::Json,
                    Some(Some(format)) => format,
                    Some(None) => {
                        return Action::Notify(
                            "Export format must be json or csv".to_string(),
                            NotifyLevel::Warn,
                        )
                    }
                };
                export::export_current_section(self, format)
            }
            Command::Reset => {
                self.reset();
                Action::None
            }
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(section) => {
                if section != self.active_section {
                    self.set_section(section);
                }
            }
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::CloseOverlay => {
                self.search_open = false;
                self.help_open = false;
                self.settings_open = false;
            }
            Action::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup() {
        assert_eq!(Section::from_id("ICP"), Some(Section::Icp));
        assert_eq!(Section::from_id("pricing"), None);
        assert_eq!(Section::from_shortcut('0'), Some(Section::Resources));
        assert_eq!(Section::Scripts.view(), ContentView::UnderConstruction);
    }

    #[test]
    fn test_cycle_section_wraps() {
        let mut app = App::new();
        app.cycle_section(false);
        assert_eq!(app.active_section, Section::Resources);
        app.cycle_section(true);
        assert_eq!(app.active_section, Section::Dashboard);
    }

    #[test]
    fn test_cycle_persona_filter_round_trip() {
        let mut app = App::new();
        app.cycle_persona_filter(true);
        assert_eq!(app.persona_filter, PersonaFilter::Only("cio"));
        app.cycle_persona_filter(false);
        app.cycle_persona_filter(false);
        assert_eq!(app.persona_filter, PersonaFilter::Only("msp_ceo"));
    }

    #[test]
    fn test_hidden_sidebar_moves_focus() {
        let mut app = App::new();
        assert_eq!(app.focus, Focus::Sidebar);
        app.toggle_sidebar();
        assert_eq!(app.focus, Focus::Content);
    }

    #[test]
    fn test_expand_command_jumps_to_problems() {
        let mut app = App::new();
        let action = app.execute_command(&Command::Expand(Some("vm_performance".into())));
        assert_eq!(action, Action::None);
        assert_eq!(app.active_section, Section::Problems);
        assert_eq!(app.expanded_problem, Some("vm_performance"));
        assert_eq!(app.content_cursor, 1);
    }

    #[test]
    fn test_unknown_section_warns() {
        let mut app = App::new();
        app.command.input = "go pricing".to_string();
        app.apply_command();
        assert_eq!(app.active_section, Section::Dashboard);
        assert_eq!(
            app.status_text(),
            Some(("Unknown section: pricing", StatusLevel::Warn))
        );
    }

    #[test]
    fn test_card_views_scroll_the_cursor() {
        let mut app = App::new();
        app.set_section(Section::Icp);
        app.scroll_down(20);
        assert_eq!(app.content_cursor, catalog::PERSONAS.len() - 1);
        assert_eq!(app.content_scroll, 0);
        app.scroll_up(1);
        assert_eq!(app.content_cursor, catalog::PERSONAS.len() - 2);

        app.set_section(Section::Problems);
        app.scroll_down(3);
        assert_eq!(app.content_cursor, 0);
        assert_eq!(app.content_scroll, 3);
    }

    #[test]
    fn test_reset_keeps_log_file() {
        let mut app = App::new();
        app.log_file = Some(PathBuf::from("/tmp/si.log"));
        app.reset();
        assert_eq!(app.log_file, Some(PathBuf::from("/tmp/si.log")));
    }

    #[test]
    fn test_talking_point_follows_cursor() {
        let mut app = App::new();
        assert!(app.talking_point().is_none());
        app.set_section(Section::Competitors);
        app.move_cursor_down();
        let pitch = app.talking_point().unwrap();
        assert!(pitch.starts_with("vs Competitor B"));
    }
}
