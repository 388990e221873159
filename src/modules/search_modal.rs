//! Search modal - decorative overlay with its own query field
//!
//! The modal never runs a search. Its visibility is owned by the shell
//! (`App::search_open`); closing is requested by returning
//! `Action::CloseOverlay`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::SEARCH_SUGGESTIONS;
use crate::core::{Action, Module};
use crate::ui::layout::centered_rect;

#[derive(Debug, Clone, Default)]
pub struct SearchModal {
    query: String,
    /// Highlighted suggestion chip, if the cursor left the text field
    selected_chip: Option<usize>,
}

impl SearchModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn selected_chip(&self) -> Option<usize> {
        self.selected_chip
    }

    /// Overwrite the query with suggestion `idx`
    pub fn choose_suggestion(&mut self, idx: usize) {
        if let Some(suggestion) = SEARCH_SUGGESTIONS.get(idx) {
            self.query = suggestion.to_string();
        }
    }

    fn next_chip(&mut self) {
        self.selected_chip = match self.selected_chip {
            None => Some(0),
            Some(idx) if idx + 1 < SEARCH_SUGGESTIONS.len() => Some(idx + 1),
            Some(_) => None,
        };
    }

    fn prev_chip(&mut self) {
        self.selected_chip = match self.selected_chip {
            None => SEARCH_SUGGESTIONS.len().checked_sub(1),
            Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
    }

    pub fn render(&self, f: &mut Frame, area: Rect, is_open: bool) {
        if !is_open {
            return;
        }

        let popup = centered_rect(64, 40, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Advanced Search")
            .title_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::LightMagenta));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let field = if self.query.is_empty() {
            Line::from(Span::styled(
                "Search everything...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.query.as_str())
        };
        let field_style = if self.selected_chip.is_none() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        f.render_widget(
            Paragraph::new(field).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Query")
                    .border_style(field_style),
            ),
            rows[0],
        );

        f.render_widget(
            Paragraph::new(Span::styled(
                "Try searching for:",
                Style::default().fg(Color::Gray),
            )),
            rows[1],
        );

        let mut chips = Vec::new();
        for (idx, suggestion) in SEARCH_SUGGESTIONS.iter().enumerate() {
            let style = if self.selected_chip == Some(idx) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            chips.push(Span::styled(format!(" {suggestion} "), style));
            chips.push(Span::raw(" "));
        }
        f.render_widget(
            Paragraph::new(Line::from(chips)).wrap(Wrap { trim: false }),
            rows[2],
        );

        f.render_widget(
            Paragraph::new(Span::styled(
                "Tab/→ chips  Enter pick  Esc close",
                Style::default().fg(Color::DarkGray),
            )),
            rows[3],
        );
    }
}

impl Module for SearchModal {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::CloseOverlay,
            KeyCode::Tab | KeyCode::Right => {
                self.next_chip();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.prev_chip();
                Action::None
            }
            KeyCode::Enter => {
                if let Some(idx) = self.selected_chip.take() {
                    self.choose_suggestion(idx);
                }
                Action::None
            }
            KeyCode::Backspace => {
                self.selected_chip = None;
                self.query.pop();
                Action::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.selected_chip = None;
                self.query.clear();
                Action::None
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Action::None;
                }
                self.selected_chip = None;
                self.query.push(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_edits_query() {
        let mut modal = SearchModal::new();
        for ch in "cio".chars() {
            assert_eq!(modal.handle_key(key(KeyCode::Char(ch))), Action::None);
        }
        modal.handle_key(key(KeyCode::Backspace));
        assert_eq!(modal.query(), "ci");
    }

    #[test]
    fn test_chip_overwrites_query() {
        let mut modal = SearchModal::new();
        modal.set_query("something typed");
        modal.handle_key(key(KeyCode::Tab));
        modal.handle_key(key(KeyCode::Tab));
        assert_eq!(modal.selected_chip(), Some(1));
        modal.handle_key(key(KeyCode::Enter));
        assert_eq!(modal.query(), "CIO persona");
        assert_eq!(modal.selected_chip(), None);
    }

    #[test]
    fn test_chip_cursor_wraps_through_field() {
        let mut modal = SearchModal::new();
        modal.handle_key(key(KeyCode::Left));
        assert_eq!(modal.selected_chip(), Some(SEARCH_SUGGESTIONS.len() - 1));
        modal.handle_key(key(KeyCode::Right));
        assert_eq!(modal.selected_chip(), None);
        modal.handle_key(key(KeyCode::Right));
        assert_eq!(modal.selected_chip(), Some(0));
    }

    #[test]
    fn test_escape_requests_close() {
        let mut modal = SearchModal::new();
        modal.set_query("kept");
        assert_eq!(modal.handle_key(key(KeyCode::Esc)), Action::CloseOverlay);
        assert_eq!(modal.query(), "kept");
    }
}
