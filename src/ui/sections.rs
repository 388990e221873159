//! Content renderers, one per view
//!
//! Each renderer is a pure function of the catalogue and the selection
//! state. Written back: the problem hitbox table, which the mouse handler
//! reads on the next click, and the first visible card row of a grid.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, ContentView, Focus, ProblemHitbox};
use crate::catalog::{
    self, Severity, COMPETITORS, PROBLEMS, QUICK_ACTIONS, STAT_CARDS, STORIES, TARGET_INDUSTRIES,
};
use crate::ui::widgets::StatCardWidget;

pub fn draw_content(f: &mut Frame, area: Rect, app: &mut App) {
    app.problem_hitboxes.clear();
    match app.content_view() {
        ContentView::Dashboard => draw_dashboard(f, area),
        ContentView::Personas => draw_personas(f, area, app),
        ContentView::Problems => draw_problems(f, area, app),
        ContentView::Stories => draw_stories(f, area, app),
        ContentView::Competitors => draw_competitors(f, area, app),
        ContentView::UnderConstruction => draw_placeholder(f, area, app),
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::LightRed,
        Severity::High => Color::LightYellow,
    }
}

fn heading() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn pane_border(app: &App) -> Style {
    if app.focus == Focus::Content {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn card_border(selected: bool, focused: bool) -> Style {
    match (selected, focused) {
        (true, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::DarkGray),
    }
}

fn draw_dashboard(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let stat_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    let accents = [Color::LightGreen, Color::LightBlue, Color::LightYellow];
    for ((card, chunk), accent) in STAT_CARDS.iter().zip(stat_chunks.iter()).zip(accents) {
        f.render_widget(StatCardWidget::new(card).accent(accent), *chunk);
    }

    let mut actions = Vec::new();
    for (idx, action) in QUICK_ACTIONS.iter().enumerate() {
        if idx > 0 {
            actions.push(Span::raw("   "));
        }
        actions.push(Span::styled(
            format!("[ {action} ]"),
            Style::default().fg(Color::White),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(actions)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Quick Actions", heading())),
        ),
        rows[1],
    );

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let mut problem_lines = Vec::new();
    for problem in PROBLEMS.iter().take(3) {
        problem_lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(severity_color(problem.severity))),
            Span::raw(problem.title),
            Span::styled(" ›", Style::default().fg(Color::DarkGray)),
        ]));
    }
    f.render_widget(
        Paragraph::new(Text::from(problem_lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Top Problems to Address", heading())),
            )
            .wrap(Wrap { trim: true }),
        bottom[0],
    );

    let mut win_lines = Vec::new();
    for story in STORIES.iter().take(3) {
        win_lines.push(Line::from(vec![
            Span::styled(
                story.company,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(story.savings, Style::default().fg(Color::LightGreen)),
        ]));
        win_lines.push(Line::from(Span::styled(
            story.outcome,
            Style::default().fg(Color::Gray),
        )));
    }
    f.render_widget(
        Paragraph::new(Text::from(win_lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Recent Wins", heading())),
            )
            .wrap(Wrap { trim: true }),
        bottom[1],
    );
}

/// Column count for card grids at a given width
fn grid_columns(width: u16) -> usize {
    if width >= 96 {
        3
    } else if width >= 60 {
        2
    } else {
        1
    }
}

/// Lay out the rows of a card grid that fit in `area`, starting near
/// `first_row` and shifted so the row holding `cursor` is visible.
///
/// Returns the first row drawn and the `(card index, cell)` pairs. The last
/// visible row is clipped to the area when a full card does not fit.
fn grid_window(
    area: Rect,
    count: usize,
    columns: usize,
    height: u16,
    cursor: usize,
    first_row: usize,
) -> (usize, Vec<(usize, Rect)>) {
    let columns = columns.max(1);
    let total_rows = count.div_ceil(columns);
    if total_rows == 0 || area.height == 0 || height == 0 {
        return (0, Vec::new());
    }
    let visible_rows = ((area.height / height) as usize).max(1);
    let cursor_row = cursor.min(count - 1) / columns;

    let mut first = first_row.min(total_rows.saturating_sub(visible_rows));
    if cursor_row < first {
        first = cursor_row;
    } else if cursor_row >= first + visible_rows {
        first = cursor_row + 1 - visible_rows;
    }

    let mut cells = Vec::with_capacity(visible_rows * columns);
    let bottom = area.y + area.height;
    for row in first..total_rows {
        let y = area.y + ((row - first) as u16).saturating_mul(height);
        if y >= bottom {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height.min(bottom - y));
        let constraints = vec![Constraint::Ratio(1, columns as u32); columns];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(row_area);
        for (col, chunk) in chunks.iter().enumerate() {
            let idx = row * columns + col;
            if idx >= count {
                break;
            }
            cells.push((idx, *chunk));
        }
    }
    (first, cells)
}

/// "3/5" marker for the card under the cursor
fn card_position(app: &App, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!("{}/{}", app.content_cursor.min(count - 1) + 1, count)
}

fn draw_personas(f: &mut Frame, area: Rect, app: &mut App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Ideal Customer Profile", heading()))
        .border_style(pane_border(app));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(inner);

    let personas = app.filtered_personas();
    let filter_line = Line::from(vec![
        Span::styled("Persona ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("◂ {} ▸", app.persona_filter.label()),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", card_position(app, personas.len())),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            "   p/P cycle  Enter focus card",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(filter_line), rows[0]);

    let columns = grid_columns(rows[2].width);
    let (first, cells) = grid_window(
        rows[2],
        personas.len(),
        columns,
        7,
        app.content_cursor,
        app.content_scroll as usize,
    );
    app.content_scroll = first as u16;
    let focused = app.focus == Focus::Content;
    for (idx, cell) in cells {
        let persona = personas[idx];
        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {} ", persona.department),
                Style::default().fg(Color::Black).bg(Color::LightBlue),
            )),
            Line::from(Span::styled(
                "Key Responsibilities:",
                Style::default().fg(Color::Gray),
            )),
        ];
        for resp in persona.responsibilities {
            lines.push(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::LightGreen)),
                Span::raw(*resp),
            ]));
        }
        let card = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(persona.title, heading()))
                .border_style(card_border(idx == app.content_cursor, focused)),
        );
        f.render_widget(card, cell);
    }

    let mut industries = Vec::new();
    for industry in TARGET_INDUSTRIES {
        industries.push(Span::styled("◆ ", Style::default().fg(Color::LightMagenta)));
        industries.push(Span::raw(*industry));
        industries.push(Span::raw("   "));
    }
    f.render_widget(
        Paragraph::new(Line::from(industries))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Target Industries", heading())),
            )
            .wrap(Wrap { trim: true }),
        rows[3],
    );
}

/// Greedy word wrap; a single word longer than `width` gets its own line
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lines for the problem catalogue plus the line span each problem covers
pub fn problem_lines(app: &App, width: u16) -> (Vec<Line<'static>>, Vec<(&'static str, std::ops::Range<usize>)>) {
    const INDENT: &str = "    ";
    let text_width = (width as usize).saturating_sub(INDENT.len() + 1);
    let focused = app.focus == Focus::Content;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans = Vec::new();

    for (idx, problem) in PROBLEMS.iter().enumerate() {
        let start = lines.len();
        let expanded = app.expanded_problem == Some(problem.id);
        let selected = idx == app.content_cursor;

        let marker = if selected && focused { ">> " } else { "   " };
        let chevron = if expanded { "▾" } else { "▸" };
        let title_style = if selected {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled("● ", Style::default().fg(severity_color(problem.severity))),
            Span::styled(problem.title, title_style),
            Span::raw(" "),
            Span::styled(chevron, Style::default().fg(Color::DarkGray)),
        ]));

        for row in wrap_text(problem.description, text_width) {
            lines.push(Line::from(Span::styled(
                format!("{INDENT}{row}"),
                Style::default().fg(Color::Gray),
            )));
        }

        let mut chips = vec![Span::raw(INDENT)];
        for persona_id in problem.affected_personas {
            chips.push(Span::styled(
                format!(" {} ", catalog::persona_title(persona_id)),
                Style::default().fg(Color::LightBlue).bg(Color::DarkGray),
            ));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));

        if expanded {
            lines.push(Line::from(Span::styled(
                format!("{INDENT}{}", "─".repeat(text_width.min(60))),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                format!("{INDENT}Key Metrics Affected"),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )));
            for metric in problem.metrics {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{INDENT}  ▪ "),
                        Style::default().fg(Color::LightRed),
                    ),
                    Span::raw(*metric),
                ]));
            }
            lines.push(Line::from(Span::styled(
                format!("{INDENT}Our Solution"),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )));
            for row in wrap_text(problem.solution, text_width.saturating_sub(2)) {
                lines.push(Line::from(format!("{INDENT}  {row}")));
            }
            lines.push(Line::from(Span::styled(
                format!("{INDENT}Expected Impact"),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("{INDENT}  {}", problem.impact),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )));
            for story in catalog::stories_for(problem.id) {
                lines.push(Line::from(vec![
                    Span::styled(format!("{INDENT}  ✓ "), Style::default().fg(Color::LightGreen)),
                    Span::raw(story.company),
                    Span::styled(
                        format!("  {}", story.savings),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
        }

        spans.push((problem.id, start..lines.len()));
        lines.push(Line::from(""));
    }

    (lines, spans)
}

fn draw_problems(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Problems & Pain Points", heading()))
        .border_style(pane_border(app));
    let inner = block.inner(area);

    let (lines, spans) = problem_lines(app, inner.width);
    let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
    app.content_scroll = app.content_scroll.min(max_scroll);
    let scroll = app.content_scroll;

    for (id, range) in spans {
        let first = range.start as i32 - scroll as i32;
        let last = range.end as i32 - scroll as i32;
        let visible_start = first.max(0);
        let visible_end = last.min(inner.height as i32);
        if visible_start >= visible_end {
            continue;
        }
        app.problem_hitboxes.push(ProblemHitbox {
            id,
            rows: (inner.y + visible_start as u16)..(inner.y + visible_end as u16),
        });
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .scroll((scroll, 0)),
        area,
    );
}

fn draw_stories(f: &mut Frame, area: Rect, app: &mut App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Customer Success Stories", heading()))
        .border_style(pane_border(app));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let columns = grid_columns(inner.width);
    let (first, cells) = grid_window(
        inner,
        STORIES.len(),
        columns,
        9,
        app.content_cursor,
        app.content_scroll as usize,
    );
    app.content_scroll = first as u16;
    let focused = app.focus == Focus::Content;
    for (idx, cell) in cells {
        let story = &STORIES[idx];
        let problem_title = catalog::problem(story.problem)
            .map(|problem| problem.title)
            .unwrap_or("");
        let lines = vec![
            Line::from(Span::styled(
                story.savings,
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(story.outcome),
            Line::from(Span::styled(
                format!("│ \"{}\"", story.testimonial),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                problem_title,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let card = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(story.company, heading()))
                    .border_style(card_border(idx == app.content_cursor, focused)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(card, cell);
    }
}

fn bullet_list(items: &[&'static str], bullet: &'static str, color: Color, text: Style) -> Text<'static> {
    Text::from(
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(bullet, Style::default().fg(color)),
                    Span::styled(*item, text),
                ])
            })
            .collect::<Vec<_>>(),
    )
}

fn draw_competitors(f: &mut Frame, area: Rect, app: &App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Competitive Intelligence", heading()))
        .border_style(pane_border(app));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let heights: Vec<Constraint> = COMPETITORS
        .iter()
        .map(|competitor| {
            let longest = competitor
                .strengths
                .len()
                .max(competitor.weaknesses.len())
                .max(competitor.differentiators.len());
            Constraint::Length(longest as u16 + 3)
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(heights)
        .split(inner);

    let focused = app.focus == Focus::Content;
    for (idx, competitor) in COMPETITORS.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(competitor.name, heading()))
            .border_style(card_border(idx == app.content_cursor, focused));
        let card_inner = block.inner(rows[idx]);
        f.render_widget(block, rows[idx]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(card_inner);

        let sections = [
            (
                "Their Strengths",
                bullet_list(competitor.strengths, "✓ ", Color::LightYellow, Style::default()),
            ),
            (
                "Their Weaknesses",
                bullet_list(competitor.weaknesses, "✗ ", Color::LightRed, Style::default()),
            ),
            (
                "Our Differentiators",
                bullet_list(
                    competitor.differentiators,
                    "★ ",
                    Color::LightGreen,
                    Style::default().fg(Color::LightGreen),
                ),
            ),
        ];
        for ((title, body), column) in sections.into_iter().zip(columns.iter()) {
            let mut text = Text::from(Line::from(Span::styled(
                title,
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )));
            text.lines.extend(body.lines);
            f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), *column);
        }
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.active_section.title())
        .border_style(pane_border(app));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let top_pad = inner.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        "✦",
        Style::default().fg(Color::LightYellow),
    )));
    lines.push(Line::from(Span::styled(
        "Section Under Construction",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "This section will be populated with your specific content",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("unbreakable", 4), vec!["unbreakable"]);
    }

    #[test]
    fn test_expanded_problem_adds_detail_lines() {
        let mut app = App::new();
        let (collapsed, _) = problem_lines(&app, 80);
        app.toggle_problem("vm_performance");
        let (expanded, spans) = problem_lines(&app, 80);
        // separator, 3 headings, 3 metrics, 1+ solution rows, impact
        assert!(expanded.len() >= collapsed.len() + 9);
        let (id, range) = &spans[1];
        assert_eq!(*id, "vm_performance");
        assert!(range.len() > spans[0].1.len());
    }

    fn indices(cells: &[(usize, Rect)]) -> Vec<usize> {
        cells.iter().map(|(idx, _)| *idx).collect()
    }

    #[test]
    fn test_grid_window_fits_everything_when_tall() {
        let (first, cells) = grid_window(Rect::new(0, 0, 90, 30), 5, 2, 7, 0, 0);
        assert_eq!(first, 0);
        assert_eq!(indices(&cells), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_grid_window_follows_cursor() {
        let area = Rect::new(0, 3, 50, 11);
        // one full row plus a clipped one
        let (first, cells) = grid_window(area, 5, 1, 7, 0, 0);
        assert_eq!(first, 0);
        assert_eq!(indices(&cells), vec![0, 1]);
        assert_eq!(cells[1].1.height, 4);

        let (first, cells) = grid_window(area, 5, 1, 7, 4, 0);
        assert_eq!(first, 4);
        assert_eq!(indices(&cells), vec![4]);
        assert_eq!(cells[0].1.y, 3);

        // moving back up scrolls back
        let (first, cells) = grid_window(area, 5, 1, 7, 2, 4);
        assert_eq!(first, 2);
        assert_eq!(indices(&cells)[0], 2);
    }

    #[test]
    fn test_grid_window_keeps_scroll_while_cursor_visible() {
        let area = Rect::new(0, 0, 90, 14);
        let (first, cells) = grid_window(area, 5, 2, 7, 3, 1);
        assert_eq!(first, 1);
        assert_eq!(indices(&cells), vec![2, 3, 4]);
    }

    #[test]
    fn test_grid_window_short_area_still_shows_cursor() {
        let (first, cells) = grid_window(Rect::new(0, 0, 40, 3), 3, 1, 9, 2, 0);
        assert_eq!(first, 2);
        assert_eq!(indices(&cells), vec![2]);
        assert_eq!(cells[0].1.height, 3);
    }
}
