//! `contribgraph grid` subcommand: fetch once and print the grid

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::services::{build_grid, format_local_date, load_records, month_label, month_spans, tooltip_text};
use crate::services::grid::populated_cells;
use crate::tui::widgets::heatmap::{color_for, ContributionLevel, DAY_LABELS};
use crate::types::{Config, ContribError, ContributionRecord, GridCell, Result, DAYS_IN_WEEK};

/// Print the contribution grid without the interactive UI
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GridArgs {
    pub fn run(self, config: &Config, today: NaiveDate) -> Result<()> {
        let records = load_records(&config.url, config.timeout);
        let report = GridReport::build(&records, today);
        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ContribError::Parse(format!("Serialization failed: {}", e)))?;
            println!("{}", json);
        } else {
            print!("{}", report.to_text());
        }
        Ok(())
    }
}

/// A populated day with everything the UI would show for it
#[derive(Debug, Serialize)]
pub struct CellReport {
    pub date: NaiveDate,
    pub count: u64,
    pub color: &'static str,
    pub tooltip: String,
    pub label: String,
}

impl From<GridCell> for CellReport {
    fn from(cell: GridCell) -> Self {
        Self {
            date: cell.date,
            count: cell.count,
            color: color_for(cell.count),
            tooltip: tooltip_text(cell.count),
            label: format_local_date(&cell.date.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub key: String,
    pub label: &'static str,
    pub columns: usize,
}

/// The whole grid, oldest week first
#[derive(Debug, Serialize)]
pub struct GridReport {
    pub today: NaiveDate,
    pub total: u64,
    pub months: Vec<MonthReport>,
    pub columns: Vec<Vec<Option<CellReport>>>,
    #[serde(skip)]
    glyphs: Vec<[char; DAYS_IN_WEEK]>,
}

/// Characters per week column in text output (glyph + space)
const TEXT_CELL_WIDTH: usize = 2;

impl GridReport {
    pub fn build(records: &[ContributionRecord], today: NaiveDate) -> Self {
        let grid = build_grid(records, today);
        let total = populated_cells(&grid).map(|cell| cell.count).sum();

        let months = month_spans(&grid)
            .into_iter()
            .map(|span| MonthReport {
                label: month_label(&span.key),
                key: span.key,
                columns: span.columns,
            })
            .collect();

        let glyphs = grid
            .iter()
            .map(|column| {
                column.map(|cell| {
                    cell.map_or(' ', |c| ContributionLevel::from_count(c.count).glyph())
                })
            })
            .collect();

        let columns = grid
            .into_iter()
            .map(|column| column.into_iter().map(|cell| cell.map(CellReport::from)).collect())
            .collect();

        Self {
            today,
            total,
            months,
            columns,
            glyphs,
        }
    }

    /// Month header, seven weekday rows of shade glyphs, and a total line
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&" ".repeat(DAY_LABELS[0].len()));
        for month in &self.months {
            let width = month.columns * TEXT_CELL_WIDTH;
            // Labels wider than their span are left out rather than cut
            let label = if month.label.chars().count() <= width {
                month.label
            } else {
                ""
            };
            out.push_str(&format!("{:<width$}", label, width = width));
        }
        out.push('\n');

        for (row, label) in DAY_LABELS.iter().enumerate() {
            out.push_str(&format!("{:<4}", label));
            for column in &self.glyphs {
                out.push(column[row]);
                out.push(' ');
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }

        out.push_str(&format!(
            "{} in the last {} weeks\n",
            tooltip_text(self.total),
            self.columns.len()
        ));
        out
    }
}
