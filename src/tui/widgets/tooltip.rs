//! Tooltip for a hovered or clicked day

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::services::locale::{format_date, tooltip_text};
use crate::tui::theme::Theme;
use crate::types::GridCell;

/// Border (2) + two text lines
const TOOLTIP_HEIGHT: u16 = 4;
/// Border and one space of padding on each side
const HORIZONTAL_PADDING: u16 = 4;

/// Two-line tooltip: the count, then the localized date beneath it
pub struct Tooltip {
    headline: String,
    date: String,
    theme: Theme,
}

impl Tooltip {
    pub fn new(cell: GridCell, theme: Theme) -> Self {
        Self {
            headline: tooltip_text(cell.count),
            date: format_date(cell.date),
            theme,
        }
    }

    fn width(&self) -> u16 {
        let text_width = Line::from(self.headline.as_str())
            .width()
            .max(Line::from(self.date.as_str()).width());
        text_width as u16 + HORIZONTAL_PADDING
    }

    /// Place the tooltip just below the anchor cell, or above it when there
    /// is no room, clamped inside `bounds`
    pub fn area_near(&self, anchor: (u16, u16), bounds: Rect) -> Rect {
        let width = self.width().min(bounds.width);
        let height = TOOLTIP_HEIGHT.min(bounds.height);
        let (anchor_x, anchor_y) = anchor;

        let max_x = bounds.right().saturating_sub(width);
        let x = anchor_x.saturating_sub(width / 2).clamp(bounds.x, max_x.max(bounds.x));

        let y = if anchor_y + 1 + height <= bounds.bottom() {
            anchor_y + 1
        } else {
            anchor_y.saturating_sub(height).max(bounds.y)
        };

        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Widget for Tooltip {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::styled(
                format!(" {}", self.headline),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!(" {}", self.date),
                Style::default().fg(self.theme.date()),
            ),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cell(count: u64) -> GridCell {
        GridCell {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            count,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_tooltip_text_for_zero() {
        let tooltip = Tooltip::new(cell(0), Theme::Dark);
        assert_eq!(tooltip.headline, "No contributions");
        assert!(tooltip.date.starts_with("Пятница"));
    }

    #[test]
    fn test_tooltip_renders_both_lines() {
        let tooltip = Tooltip::new(cell(12), Theme::Dark);
        let area = Rect::new(0, 0, tooltip.width(), TOOLTIP_HEIGHT);
        let mut buf = Buffer::empty(area);
        tooltip.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("12 contributions"), "{text}");
        assert!(text.contains("Пятница, 8"), "{text}");
    }

    #[test]
    fn test_area_near_below_anchor() {
        let tooltip = Tooltip::new(cell(1), Theme::Dark);
        let bounds = Rect::new(0, 0, 200, 40);
        let area = tooltip.area_near((100, 5), bounds);
        assert_eq!(area.y, 6);
        assert_eq!(area.height, TOOLTIP_HEIGHT);
        assert_eq!(area.x, 100 - area.width / 2);
    }

    #[test]
    fn test_area_near_flips_above_at_bottom() {
        let tooltip = Tooltip::new(cell(1), Theme::Dark);
        let bounds = Rect::new(0, 0, 200, 10);
        let area = tooltip.area_near((100, 8), bounds);
        assert_eq!(area.y, 8 - TOOLTIP_HEIGHT);
    }

    #[test]
    fn test_area_near_clamps_to_edges() {
        let tooltip = Tooltip::new(cell(1), Theme::Dark);
        let bounds = Rect::new(0, 0, 60, 20);

        let left = tooltip.area_near((0, 2), bounds);
        assert_eq!(left.x, 0);

        let right = tooltip.area_near((59, 2), bounds);
        assert_eq!(right.right(), 60);
    }
}
