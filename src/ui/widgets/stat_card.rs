//! Headline KPI card for the dashboard

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::catalog::StatCard;

/// Bordered card: caption on the border, big value, label, trend line
pub struct StatCardWidget<'a> {
    card: &'a StatCard,
    accent: Color,
}

impl<'a> StatCardWidget<'a> {
    pub fn new(card: &'a StatCard) -> Self {
        Self {
            card,
            accent: Color::LightGreen,
        }
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl<'a> Widget for StatCardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.card.caption)
            .title_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let rows = [
            (
                self.card.value,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            (self.card.label, Style::default().fg(Color::Gray)),
            ("", Style::default()),
            (self.card.trend, Style::default().fg(self.accent)),
        ];

        for (offset, (text, style)) in rows.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_stringn(inner.x + 1, y, text, inner.width.saturating_sub(1) as usize, *style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STAT_CARDS;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_value_and_trend() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        StatCardWidget::new(&STAT_CARDS[1]).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Active"));
        assert!(row_text(&buf, 1).contains("847"));
        assert!(row_text(&buf, 2).contains("Enterprise Customers"));
        assert!(row_text(&buf, 4).contains("23% growth QoQ"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        StatCardWidget::new(&STAT_CARDS[0]).render(area, &mut buf);
    }
}
