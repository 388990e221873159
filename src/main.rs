use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use sales_intel::api::{self, ApiBridge, ApiEvent};
use sales_intel::app::{ApiStatus, App, Focus, InputMode, PersonaFilter, Section, StatusLevel};
use sales_intel::catalog;
use sales_intel::config::{self, Config, Loaded};
use sales_intel::logging;
use sales_intel::modules::export::{self, ExportFormat, ExportKind};
use sales_intel::ui::{self, layout::UiAreas};
use sales_intel::ui::layout::{rect_contains, rect_inner};

#[derive(Debug, Parser)]
#[command(
    name = "sales-intel",
    version,
    about = "Sales intelligence hub: personas, problems, wins and competitors in the terminal"
)]
struct Args {
    /// Also serve the mock data API while the TUI runs
    #[arg(long)]
    api: bool,

    /// API listen address (e.g. 127.0.0.1:3000)
    #[arg(long, global = true)]
    addr: Option<String>,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Run only the mock data API until Ctrl-C
    Serve,

    /// Write catalogue content to a file
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_enum, default_value = "problems")]
        kind: ExportKind,

        /// Persona id to keep when exporting personas, or "all"
        #[arg(long, default_value = "all")]
        persona: String,

        /// Output path (defaults to a timestamped file in the export directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = config::load();
    let addr = resolve_addr(&args, &loaded.config)?;

    match args.command {
        Some(Cmd::Serve) => run_serve(&loaded, addr),
        Some(Cmd::Export {
            format,
            kind,
            persona,
            out,
        }) => {
            let personas = PersonaFilter::parse(&persona)
                .with_context(|| format!("unknown persona: {persona}"))?;
            run_export(format, kind, personas, out)
        }
        None => run_tui(args.api, args.no_mouse, &loaded, addr),
    }
}

fn resolve_addr(args: &Args, config: &Config) -> Result<SocketAddr> {
    match args.addr.as_deref() {
        Some(value) => config::parse_addr(value)
            .with_context(|| format!("invalid --addr value: {value}")),
        None => Ok(config.server_addr()),
    }
}

fn run_serve(loaded: &Loaded, addr: SocketAddr) -> Result<()> {
    logging::init_stderr(&loaded.config.log.level)?;
    loaded.log_warnings();
    warn_dangling_refs();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(api::serve(addr))
}

fn run_export(
    format: ExportFormat,
    kind: ExportKind,
    personas: PersonaFilter,
    out: Option<PathBuf>,
) -> Result<()> {
    let path = match out {
        Some(path) => path,
        None => export::export_dir()?
            .join(export::generate_filename(kind.name(), format.extension())),
    };
    let count = export::write_catalog(&path, kind, format, personas)
        .with_context(|| format!("exporting {} to {}", kind.name(), path.display()))?;
    println!("Exported {} {} to {}", count, kind.name(), path.display());
    Ok(())
}

fn run_tui(with_api: bool, no_mouse: bool, loaded: &Loaded, addr: SocketAddr) -> Result<()> {
    let config: &Config = &loaded.config;
    let log_file = match config.log_file() {
        Some(path) => match logging::init_file(&path, &config.log.level) {
            Ok(()) => Some(path),
            Err(err) => {
                eprintln!("logging disabled: {err:#}");
                None
            }
        },
        None => None,
    };
    if log_file.is_some() {
        loaded.log_warnings();
    } else {
        for warning in &loaded.warnings {
            eprintln!("warning: {warning}");
        }
    }
    warn_dangling_refs();

    let mouse = config.ui.mouse && !no_mouse;
    let tick_rate = Duration::from_millis(config.ui.tick_ms.max(16));

    let mut app = App::new();
    app.log_file = log_file;
    let bridge = if with_api {
        app.api_status = ApiStatus::Starting(addr.to_string());
        match ApiBridge::start(addr) {
            Ok(bridge) => Some(bridge),
            Err(err) => {
                app.api_status = ApiStatus::Failed(format!("{err:#}"));
                app.set_status(format!("API disabled: {err:#}"), StatusLevel::Error);
                None
            }
        }
    } else {
        None
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    if mouse {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, bridge, tick_rate);

    disable_raw_mode()?;
    if mouse {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn warn_dangling_refs() {
    for (problem, persona) in catalog::dangling_persona_refs() {
        tracing::warn!(problem, persona, "problem references an unknown persona");
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut bridge: Option<ApiBridge>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, bridge.as_ref());
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            if let Some(bridge) = bridge.as_mut() {
                bridge.shutdown();
            }
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, bridge: Option<&ApiBridge>) {
    let Some(bridge) = bridge else {
        return;
    };
    for event in bridge.poll_events() {
        match event {
            ApiEvent::Listening { addr } => {
                app.api_status = ApiStatus::Listening(addr.to_string());
                app.set_status(format!("API listening on http://{addr}"), StatusLevel::Info);
            }
            ApiEvent::Stopped => app.api_status = ApiStatus::Off,
            ApiEvent::Error { message } => {
                app.set_status(format!("API error: {message}"), StatusLevel::Error);
                app.api_status = ApiStatus::Failed(message);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    if app.settings_open {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('S')) {
            app.settings_open = false;
        }
        return;
    }

    if app.search_open {
        app.handle_modal_key(key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('r'), mods) if mods.contains(KeyModifiers::CONTROL) => app.reset(),
        (KeyCode::Char('u'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.scroll_up(page_amount(true))
        }
        (KeyCode::Char('d'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.scroll_down(page_amount(true))
        }
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.help_open = true,
        (KeyCode::Char('S'), _) => app.settings_open = true,
        (KeyCode::Char('s'), _) => app.open_search_modal(None),
        (KeyCode::Char('/'), _) => app.enter_search(),
        (KeyCode::Char(':'), _) => app.enter_command(),
        (KeyCode::Char('b'), _) => app.toggle_sidebar(),
        (KeyCode::Char('p'), _) => {
            app.cycle_persona_filter(true);
            app.set_section(Section::Icp);
        }
        (KeyCode::Char('P'), _) => {
            app.cycle_persona_filter(false);
            app.set_section(Section::Icp);
        }
        (KeyCode::Char('y'), _) => handle_copy_to_clipboard(app),
        (KeyCode::Char('e'), _) => {
            let action = export::export_current_section(app, ExportFormat::Json);
            app.apply_action(action);
        }
        (KeyCode::Char('['), _) => app.cycle_section(false),
        (KeyCode::Char(']'), _) => app.cycle_section(true),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => focus_left(app),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => focus_right(app),
        (KeyCode::Tab, _) => cycle_focus(app),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => handle_nav_up(app),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => handle_nav_down(app),
        (KeyCode::PageUp, _) => app.scroll_up(page_amount(false)),
        (KeyCode::PageDown, _) => app.scroll_down(page_amount(false)),
        (KeyCode::Enter, _) => handle_enter(app),
        (KeyCode::Char(ch), _) => {
            if let Some(section) = Section::from_shortcut(ch) {
                app.set_section(section);
            }
        }
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.exit_search(),
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.search_query.push(ch);
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn cycle_focus(app: &mut App) {
    app.focus = match app.focus {
        Focus::Sidebar => Focus::Content,
        Focus::Content if app.sidebar_open => Focus::Sidebar,
        Focus::Content => Focus::Content,
    };
}

fn focus_left(app: &mut App) {
    if app.sidebar_open {
        app.focus = Focus::Sidebar;
    }
}

fn focus_right(app: &mut App) {
    app.focus = Focus::Content;
}

fn handle_enter(app: &mut App) {
    match app.focus {
        Focus::Sidebar => app.focus = Focus::Content,
        Focus::Content => app.activate(),
    }
}

fn handle_nav_up(app: &mut App) {
    match app.focus {
        Focus::Sidebar => app.cycle_section(false),
        Focus::Content => app.move_cursor_up(),
    }
}

fn handle_nav_down(app: &mut App) {
    match app.focus {
        Focus::Sidebar => app.cycle_section(true),
        Focus::Content => app.move_cursor_down(),
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}

fn page_amount(half: bool) -> u16 {
    let Some(size) = terminal_rect() else {
        return 5;
    };
    let height = rect_inner(ui::layout::areas(size, true).content).height.max(1);
    if half {
        (height / 2).max(1)
    } else {
        height
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.settings_open || app.search_open || app.input_mode == InputMode::Command
    {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size, app.sidebar_open);
    let col = mouse.column;
    let row = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, areas, col, row),
        MouseEventKind::ScrollUp => handle_scroll(app, areas, col, row, true),
        MouseEventKind::ScrollDown => handle_scroll(app, areas, col, row, false),
        _ => {}
    }
}

fn handle_scroll(app: &mut App, areas: UiAreas, col: u16, row: u16, up: bool) {
    if let Some(sidebar) = areas.sidebar {
        if rect_contains(sidebar, col, row) {
            app.focus = Focus::Sidebar;
            app.cycle_section(!up);
            return;
        }
    }
    if rect_contains(areas.content, col, row) {
        if up {
            app.scroll_up(1);
        } else {
            app.scroll_down(1);
        }
    }
}

fn handle_click(app: &mut App, areas: UiAreas, col: u16, row: u16) {
    if rect_contains(areas.menu_button, col, row) {
        app.toggle_sidebar();
        return;
    }

    if rect_contains(areas.search_field, col, row) {
        app.enter_search();
        return;
    }
    if app.input_mode == InputMode::Search {
        app.exit_search();
    }

    if let Some(sidebar) = areas.sidebar {
        if rect_contains(sidebar, col, row) {
            let inner = rect_inner(sidebar);
            if !rect_contains(inner, col, row) {
                return;
            }
            if let Some(section) = app.sidebar_section_at((row - inner.y) as usize) {
                app.set_section(section);
                app.focus = Focus::Sidebar;
            }
            return;
        }
    }

    if rect_contains(areas.content, col, row) {
        app.focus = Focus::Content;
        if let Some(id) = app.problem_at_row(row) {
            app.toggle_problem(id);
            if let Some(idx) = catalog::PROBLEMS.iter().position(|problem| problem.id == id) {
                app.content_cursor = idx;
            }
        }
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(text) = app.talking_point() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(text.clone()).is_ok() {
                let preview: String = text.chars().take(32).collect();
                let suffix = if text.chars().count() > 32 { "..." } else { "" };
                app.set_status(format!("Copied: {preview}{suffix}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
