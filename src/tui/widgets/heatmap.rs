//! 51-week contribution heatmap widget

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::services::grid::month_spans;
use crate::services::locale::month_label;
use crate::tui::theme::Theme;
use crate::types::{WeekColumn, DAYS_IN_WEEK};

/// Bucketed intensity of a day's contribution count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionLevel {
    /// No contributions
    None,
    /// 1-9
    Low,
    /// 10-19
    Medium,
    /// 20-30
    High,
    /// More than 30
    Max,
}

impl ContributionLevel {
    /// Map a count to its bucket, highest threshold first
    pub fn from_count(count: u64) -> Self {
        if count > 30 {
            Self::Max
        } else if count >= 20 {
            Self::High
        } else if count >= 10 {
            Self::Medium
        } else if count >= 1 {
            Self::Low
        } else {
            Self::None
        }
    }

    /// Hex color for this level
    pub fn hex(self) -> &'static str {
        match self {
            Self::None => "#EDEDED",
            Self::Low => "#ACD5F2",
            Self::Medium => "#7FA8C9",
            Self::High => "#527BA0",
            Self::Max => "#254E77",
        }
    }

    /// Shade glyph for plain-text output
    pub fn glyph(self) -> char {
        match self {
            Self::None => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Max => '█',
        }
    }

    /// Terminal color for this level (same values as `hex`)
    pub fn color(self) -> Color {
        match self {
            Self::None => Color::Rgb(0xED, 0xED, 0xED),
            Self::Low => Color::Rgb(0xAC, 0xD5, 0xF2),
            Self::Medium => Color::Rgb(0x7F, 0xA8, 0xC9),
            Self::High => Color::Rgb(0x52, 0x7B, 0xA0),
            Self::Max => Color::Rgb(0x25, 0x4E, 0x77),
        }
    }
}

/// Hex color for a day's count
pub fn color_for(count: u64) -> &'static str {
    ContributionLevel::from_count(count).hex()
}

/// Cell dimensions: 2 chars content + 1 gap
pub const CELL_WIDTH: u16 = 3;
/// Weekday label column ("Mon ")
pub const LABEL_WIDTH: u16 = 4;
/// Month header row + 7 weekday rows
pub const HEATMAP_HEIGHT: u16 = 1 + DAYS_IN_WEEK as u16;

const CELL_SYMBOL: &str = "██";
const SELECTED_SYMBOL: &str = "▓▓";

/// Weekday labels; only Mon/Wed/Fri carry text
pub const DAY_LABELS: [&str; DAYS_IN_WEEK] = ["Mon ", " ", "Wed ", " ", "Fri", " ", " "];

/// Screen geometry of the heatmap inside an area.
///
/// When the area is too narrow for every week, the most recent weeks that
/// fit are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapLayout {
    area: Rect,
    cells_x: u16,
    first_col: usize,
    visible: usize,
}

impl HeatmapLayout {
    pub fn new(area: Rect, weeks: usize) -> Self {
        let fit = (area.width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize;
        let visible = weeks.min(fit);
        let used = LABEL_WIDTH + visible as u16 * CELL_WIDTH;
        let x_offset = area.width.saturating_sub(used) / 2;
        Self {
            area,
            cells_x: area.x + x_offset + LABEL_WIDTH,
            first_col: weeks - visible,
            visible,
        }
    }

    /// Grid columns that are on screen
    pub fn visible_columns(&self) -> Range<usize> {
        self.first_col..self.first_col + self.visible
    }

    fn label_x(&self) -> u16 {
        self.cells_x - LABEL_WIDTH
    }

    fn row_y(&self, row: usize) -> u16 {
        self.area.y + 1 + row as u16
    }

    /// Top-left screen position of a cell, if it is on screen
    pub fn cell_origin(&self, col: usize, row: usize) -> Option<(u16, u16)> {
        if !self.visible_columns().contains(&col) || row >= DAYS_IN_WEEK {
            return None;
        }
        let y = self.row_y(row);
        if y >= self.area.bottom() {
            return None;
        }
        let x = self.cells_x + (col - self.first_col) as u16 * CELL_WIDTH;
        Some((x, y))
    }

    /// Grid position `(column, row)` under a screen position; gaps map to nothing
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if x < self.cells_x || y <= self.area.y || y >= self.area.bottom() {
            return None;
        }
        let row = (y - self.area.y - 1) as usize;
        let offset = x - self.cells_x;
        let idx = (offset / CELL_WIDTH) as usize;
        if row >= DAYS_IN_WEEK || idx >= self.visible || offset % CELL_WIDTH == CELL_WIDTH - 1 {
            return None;
        }
        Some((self.first_col + idx, row))
    }
}

/// Heatmap widget for ratatui
pub struct Heatmap<'a> {
    grid: &'a [WeekColumn],
    selected: Option<(usize, usize)>,
    theme: Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(grid: &'a [WeekColumn], theme: Theme) -> Self {
        Self {
            grid,
            selected: None,
            theme,
        }
    }

    pub fn with_selected(mut self, selected: Option<(usize, usize)>) -> Self {
        self.selected = selected;
        self
    }

    /// Month labels, each centered over the columns it spans
    fn render_month_header(&self, layout: &HeatmapLayout, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        let y = layout.area.y;
        let mut x = layout.cells_x;

        for span in month_spans(&self.grid[layout.visible_columns()]) {
            let width = span.columns as u16 * CELL_WIDTH;
            let label = month_label(&span.key);
            let label_width = label.chars().count() as u16;
            let label_x = x + width.saturating_sub(label_width) / 2;
            buf.set_stringn(label_x, y, label, width as usize, style);
            x += width;
        }
    }

    /// Weekday label followed by one cell per visible week
    fn render_row(&self, layout: &HeatmapLayout, buf: &mut Buffer, row: usize) {
        buf.set_string(
            layout.label_x(),
            layout.row_y(row),
            DAY_LABELS[row],
            Style::default().fg(self.theme.muted()),
        );

        for col in layout.visible_columns() {
            let Some(cell) = self.grid[col][row] else {
                continue;
            };
            let Some((x, y)) = layout.cell_origin(col, row) else {
                continue;
            };

            let color = ContributionLevel::from_count(cell.count).color();
            let (symbol, style) = if self.selected == Some((col, row)) {
                (
                    SELECTED_SYMBOL,
                    Style::default().fg(color).bg(self.theme.accent()),
                )
            } else {
                (CELL_SYMBOL, Style::default().fg(color))
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < LABEL_WIDTH + CELL_WIDTH {
            return;
        }

        let layout = HeatmapLayout::new(area, self.grid.len());
        self.render_month_header(&layout, buf);

        for row in 0..DAYS_IN_WEEK {
            if layout.row_y(row) >= area.bottom() {
                break;
            }
            self.render_row(&layout, buf, row);
        }
    }
}
