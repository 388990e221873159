use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod sections;
pub mod widgets;

use crate::app::{ApiStatus, App, Focus, InputMode, Section, StatusLevel};
use crate::config;

pub const APP_TITLE: &str = "Sales Intel Hub";
pub const SEARCH_PLACEHOLDER: &str = "Search personas, problems, scripts...";

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size(), app.sidebar_open);

    draw_menu_button(f, areas.menu_button, app);
    draw_header(f, areas.search_field, app);
    if let Some(sidebar) = areas.sidebar {
        draw_sidebar(f, sidebar, app);
    }
    sections::draw_content(f, areas.content, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
    if app.settings_open {
        draw_settings_popup(f, areas.size, app);
    }
    app.search_modal.render(f, areas.size, app.search_open);
}

fn draw_menu_button(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.sidebar_open {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default().fg(Color::White)
    };
    let button = Paragraph::new(Span::styled("≡", style.add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn api_label(status: &ApiStatus) -> (String, Color) {
    match status {
        ApiStatus::Off => ("off".to_string(), Color::DarkGray),
        ApiStatus::Starting(addr) => (format!("starting {addr}"), Color::LightYellow),
        ApiStatus::Listening(addr) => (format!("http://{addr}"), Color::LightGreen),
        ApiStatus::Failed(_) => ("failed".to_string(), Color::LightRed),
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(area);

    let editing = app.input_mode == InputMode::Search;
    let query = if app.search_query.is_empty() && !editing {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search_query.clone())
    };
    let mut spans = vec![
        Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("⌕ ", Style::default().fg(Color::DarkGray)),
        query,
    ];
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let left = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .alignment(Alignment::Left);
    f.render_widget(left, chunks[0]);

    let (label, color) = api_label(&app.api_status);
    let right = Paragraph::new(Line::from(vec![
        Span::styled("API ", Style::default().fg(Color::DarkGray)),
        Span::styled(label, Style::default().fg(color)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &mut App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let is_active = *section == app.active_section;
            let spans = vec![
                Span::styled(
                    format!("{} ", section.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(section.title()),
            ];
            let style = if is_active {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Navigation")
            .border_style(border_style),
    );

    let mut state = ListState::default().with_offset(app.sidebar_offset);
    state.select(Some(
        Section::ALL
            .iter()
            .position(|section| *section == app.active_section)
            .unwrap_or(0),
    ));
    f.render_stateful_widget(list, area, &mut state);
    app.sidebar_offset = state.offset();
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let expanded = app
        .expanded_problem
        .and_then(crate::catalog::problem)
        .map(|problem| problem.title)
        .unwrap_or("--");
    let spans = vec![
        Span::styled("Section ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.active_section.title())),
        Span::styled("Persona ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.persona_filter.label())),
        Span::styled("Expanded ", Style::default().fg(Color::DarkGray)),
        Span::raw(expanded),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("go", "Jump to a section (go problems)"),
        ("sidebar", "Toggle the navigation sidebar"),
        ("persona", "Filter personas (persona cio | all)"),
        ("export", "Export this section (export csv)"),
        ("expand", "Toggle a problem (expand azure_costs)"),
        ("search", "Open the search modal"),
        ("help", "Show key bindings"),
        ("reset", "Reset every view setting"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("go | persona | expand | search | export | reset");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Search => Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "typing into the header search  (Enter=done Esc=done)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            } else {
                action_hints()
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints() -> Line<'static> {
    let keys = [
        ("[ ]", " Section  "),
        ("Tab", " Focus  "),
        ("Enter", " Open  "),
        ("b", " Menu  "),
        ("p", " Persona  "),
        ("/", " Search  "),
        ("s", " Advanced  "),
        ("y", " Copy  "),
        ("e", " Export  "),
        ("?", " Help  "),
        ("q", " Quit"),
    ];
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, label) in keys {
        spans.push(Span::styled(key, Style::default().fg(Color::LightCyan)));
        spans.push(Span::raw(label));
    }
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(72, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  Tab / h / l Cycle focus (vim)"),
        Line::from("  j / k      Move selection (vim)"),
        Line::from("  Ctrl-u/d   Half page up/down (vim)"),
        Line::from("  PgUp/PgDn  Scroll content"),
        Line::from("  [ / ]      Prev/Next section"),
        Line::from("  1-9, 0     Jump to section"),
        Line::from("  Enter      Toggle problem / focus persona"),
        Line::from("  Esc        Close overlay"),
        Line::from("  Mouse      Click menu, sections, problems"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  b          Toggle sidebar"),
        Line::from("  p / P      Next/prev persona filter"),
        Line::from("  /          Edit header search"),
        Line::from("  s          Advanced search"),
        Line::from("  y          Copy talking point"),
        Line::from("  e          Export section (json)"),
        Line::from("  Ctrl-r     Reset view"),
        Line::from("  S          Settings"),
        Line::from("  :          Command"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Command examples:"),
        Line::from("  :go competitors"),
        Line::from("  :persona vp_finance"),
        Line::from("  :expand security_compliance"),
        Line::from("  :export csv"),
        Line::from(""),
        Line::from(format!("Active section: {}", app.active_section.title())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_settings_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(76, 50, area);
    f.render_widget(Clear, popup_area);

    let display = |path: Option<std::path::PathBuf>| {
        path.map(|path| path.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    };
    let api = match &app.api_status {
        ApiStatus::Failed(message) => format!("failed: {message}"),
        other => api_label(other).0,
    };

    let lines = vec![
        Line::from(Span::styled(
            "Settings",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Config:  {}", display(config::config_path()))),
        Line::from(format!("Data:    {}", display(config::data_dir()))),
        Line::from(format!("Log:     {}", display(app.log_file.clone()))),
        Line::from(format!("API:     {}", api)),
        Line::from(""),
        Line::from(format!(
            "Catalog: {} personas, {} problems, {} stories, {} competitors",
            crate::catalog::PERSONAS.len(),
            crate::catalog::PROBLEMS.len(),
            crate::catalog::STORIES.len(),
            crate::catalog::COMPETITORS.len()
        )),
        Line::from(""),
        Line::from("Example config.toml:"),
        Line::from("  [server]"),
        Line::from("  addr = \"127.0.0.1:3000\""),
        Line::from("  [ui]"),
        Line::from("  tick_ms = 200"),
        Line::from("  mouse = true"),
        Line::from(""),
        Line::from("Keys: Esc close"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Settings").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("exp"), Some("Export this section (export csv)"));
        assert_eq!(command_hint("expa"), Some("Toggle a problem (expand azure_costs)"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}
