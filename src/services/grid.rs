//! Week grid construction and month header spans

use std::collections::HashMap;
use std::iter::successors;

use chrono::{Datelike, NaiveDate};

use crate::types::{ContributionRecord, Grid, GridCell, MonthSpan, WeekColumn, DAYS_IN_WEEK, WEEKS};

/// Build the 51-week grid ending at `today`.
///
/// The newest column is filled from today's weekday row up to Monday, every
/// older column from Sunday up to Monday, walking one day back per cell. Rows
/// after today in the current week stay `None`. Columns are returned oldest
/// first.
pub fn build_grid(records: &[ContributionRecord], today: NaiveDate) -> Grid {
    // First record wins on duplicate dates
    let mut counts: HashMap<&str, u64> = HashMap::with_capacity(records.len());
    for record in records {
        counts.entry(record.date.as_str()).or_insert(record.count);
    }

    let mut days = successors(Some(today), |d| d.pred_opt());
    let mut start_row = today.weekday().num_days_from_monday() as usize;
    let mut grid: Grid = Vec::with_capacity(WEEKS);

    for _ in 0..WEEKS {
        let mut column: WeekColumn = [None; DAYS_IN_WEEK];
        for row in (0..=start_row).rev() {
            let Some(date) = days.next() else { break };
            let key = date.format("%Y-%m-%d").to_string();
            let count = counts.get(key.as_str()).copied().unwrap_or(0);
            column[row] = Some(GridCell { date, count });
        }
        start_row = DAYS_IN_WEEK - 1;
        grid.push(column);
    }

    grid.reverse();
    grid
}

/// Count week columns per month of their first row, in first-seen order
pub fn month_spans(columns: &[WeekColumn]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    for column in columns {
        let Some(first) = column[0] else { continue };
        let key = first.date.format("%Y-%m").to_string();
        match spans.iter_mut().find(|span| span.key == key) {
            Some(span) => span.columns += 1,
            None => spans.push(MonthSpan { key, columns: 1 }),
        }
    }
    spans
}

/// Populated cells in traversal order (column by column, Monday first)
pub fn populated_cells(grid: &[WeekColumn]) -> impl Iterator<Item = GridCell> + '_ {
    grid.iter().flat_map(|column| column.iter().flatten().copied())
}

/// Position `(column, row)` of the newest populated cell
pub fn last_populated(grid: &[WeekColumn]) -> Option<(usize, usize)> {
    let col = grid.len().checked_sub(1)?;
    let row = grid[col].iter().rposition(Option::is_some)?;
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== build_grid tests ==========

    #[test]
    fn test_build_grid_dimensions() {
        let grid = build_grid(&[], date(2024, 6, 15));
        assert_eq!(grid.len(), 51);
        for column in &grid {
            assert_eq!(column.len(), 7);
        }
    }

    #[test]
    fn test_build_grid_last_cell_is_today() {
        // One date for each weekday
        for offset in 0..7 {
            let today = date(2024, 6, 10) + Duration::days(offset);
            let grid = build_grid(&[], today);
            let (col, row) = last_populated(&grid).unwrap();
            assert_eq!(col, 50);
            assert_eq!(row, today.weekday().num_days_from_monday() as usize);
            assert_eq!(grid[col][row].unwrap().date, today);
        }
    }

    #[test]
    fn test_build_grid_consecutive_days() {
        let today = date(2024, 3, 13); // Wednesday
        let grid = build_grid(&[], today);
        let cells: Vec<GridCell> = populated_cells(&grid).collect();

        for pair in cells.windows(2) {
            assert_eq!(pair[0].date + Duration::days(1), pair[1].date);
        }
        assert_eq!(cells.last().unwrap().date, today);
        // 50 full weeks plus Mon..Wed of the current one
        assert_eq!(cells.len(), 50 * 7 + 3);
    }

    #[test]
    fn test_build_grid_sunday_fills_every_slot() {
        let today = date(2024, 6, 16); // Sunday
        let grid = build_grid(&[], today);
        assert_eq!(populated_cells(&grid).count(), 357);
        assert_eq!(
            grid[0][0].unwrap().date,
            today - Duration::days(356),
            "grid spans exactly 357 days"
        );
    }

    #[test]
    fn test_build_grid_monday_leaves_placeholders() {
        let today = date(2024, 6, 10); // Monday
        let grid = build_grid(&[], today);
        let newest = &grid[50];
        assert_eq!(newest[0].unwrap().date, today);
        assert!(newest[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_build_grid_rows_are_weekdays() {
        let grid = build_grid(&[], date(2024, 6, 15));
        for column in &grid {
            for (row, cell) in column.iter().enumerate() {
                if let Some(cell) = cell {
                    assert_eq!(cell.date.weekday().num_days_from_monday() as usize, row);
                }
            }
        }
    }

    #[test]
    fn test_build_grid_counts_from_records() {
        let records = vec![
            ContributionRecord::new("2024-01-01", 5),
            ContributionRecord::new("2024-01-02", 0),
        ];
        let grid = build_grid(&records, date(2024, 1, 2));

        let find = |d: NaiveDate| populated_cells(&grid).find(|c| c.date == d).unwrap();
        assert_eq!(find(date(2024, 1, 1)).count, 5);
        assert_eq!(find(date(2024, 1, 2)).count, 0);
        assert_eq!(find(date(2023, 12, 1)).count, 0);
    }

    #[test]
    fn test_build_grid_first_duplicate_wins() {
        let records = vec![
            ContributionRecord::new("2024-01-01", 4),
            ContributionRecord::new("2024-01-01", 40),
        ];
        let grid = build_grid(&records, date(2024, 1, 1));
        assert_eq!(grid[50][0].unwrap().count, 4);
    }

    #[test]
    fn test_build_grid_ignores_malformed_dates() {
        let records = vec![
            ContributionRecord::new("2024-1-1", 9),
            ContributionRecord::new("garbage", 9),
        ];
        let grid = build_grid(&records, date(2024, 1, 1));
        assert!(populated_cells(&grid).all(|c| c.count == 0));
    }

    #[test]
    fn test_build_grid_is_deterministic() {
        let records = vec![ContributionRecord::new("2024-05-05", 12)];
        let today = date(2024, 6, 1);
        assert_eq!(build_grid(&records, today), build_grid(&records, today));
    }

    // ========== month_spans tests ==========

    #[test]
    fn test_month_spans_sum_to_week_count() {
        let grid = build_grid(&[], date(2024, 6, 15));
        let spans = month_spans(&grid);
        assert_eq!(spans.iter().map(|s| s.columns).sum::<usize>(), 51);
    }

    #[test]
    fn test_month_spans_first_seen_order() {
        let grid = build_grid(&[], date(2024, 1, 2));
        let spans = month_spans(&grid);
        let keys: Vec<&str> = spans.iter().map(|s| s.key.as_str()).collect();

        assert_eq!(keys.first(), Some(&"2023-01"));
        assert_eq!(keys.last(), Some(&"2024-01"));
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_month_spans_counts_by_first_row() {
        // Mondays 2024-01-29 and 2024-02-05 / 2024-02-12
        let today = date(2024, 2, 14);
        let grid = build_grid(&[], today);
        let spans = month_spans(&grid[48..]);
        assert_eq!(
            spans,
            vec![
                MonthSpan {
                    key: "2024-01".into(),
                    columns: 1
                },
                MonthSpan {
                    key: "2024-02".into(),
                    columns: 2
                },
            ]
        );
    }

    #[test]
    fn test_month_spans_empty() {
        assert!(month_spans(&[]).is_empty());
    }

    // ========== last_populated tests ==========

    #[test]
    fn test_last_populated_empty_grid() {
        assert_eq!(last_populated(&[]), None);
    }
}
