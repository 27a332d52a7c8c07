//! Services for fetching contribution data and deriving the grid

pub mod fetcher;
pub mod grid;
pub mod locale;

pub use fetcher::load_records;
pub use grid::{build_grid, month_spans};
pub use locale::{format_local_date, month_label, tooltip_text};
