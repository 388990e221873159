use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 30;

/// Width of the "≡" menu button at the left edge of the header
pub const MENU_BUTTON_WIDTH: u16 = 5;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub menu_button: Rect,
    pub search_field: Rect,
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect, sidebar_open: bool) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_BUTTON_WIDTH), Constraint::Min(0)])
        .split(vertical[0]);

    let (sidebar, content) = if sidebar_open {
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(vertical[1]);
        (Some(main_chunks[0]), main_chunks[1])
    } else {
        (None, vertical[1])
    };

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        menu_button: header_chunks[0],
        search_field: header_chunks[1],
        sidebar,
        content,
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_collapses() {
        let size = Rect::new(0, 0, 120, 40);
        let open = areas(size, true);
        let closed = areas(size, false);
        assert_eq!(open.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert_eq!(open.content.width, 120 - SIDEBAR_WIDTH);
        assert!(closed.sidebar.is_none());
        assert_eq!(closed.content.width, 120);
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::new(2, 2, 4, 3);
        assert!(rect_contains(rect, 2, 2));
        assert!(!rect_contains(rect, 6, 2));
        assert_eq!(rect_inner(rect), Rect::new(3, 3, 2, 1));
    }
}
