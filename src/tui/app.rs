//! Application state and event loop

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::{debug, info};

use crate::services::fetcher::FetchHandle;
use crate::services::grid::{build_grid, last_populated, populated_cells};
use crate::types::{Config, ContributionRecord, Grid, DAYS_IN_WEEK};

use super::theme::Theme;
use super::widgets::{
    heatmap::{Heatmap, HeatmapLayout, HEATMAP_HEIGHT},
    help::HelpPopup,
    tooltip::Tooltip,
};

/// Rows above the heatmap: title + blank
const HEATMAP_TOP: u16 = 2;

const TITLE: &str = "Contributions";
const HINT: &str = "arrows move · enter pin · ? help · q quit";

/// Tooltip visibility for the selected day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    /// Follows the cursor or mouse; hidden again when the mouse leaves the grid
    Hover,
    /// Opened by click or Enter; stays until dismissed
    Pinned,
}

impl TooltipState {
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Main application
pub struct App {
    records: Vec<ContributionRecord>,
    fetch: Option<FetchHandle>,
    mounted: bool,
    cursor: Option<(usize, usize)>,
    tooltip: TooltipState,
    show_help: bool,
    should_quit: bool,
    theme: Theme,
    fixed_today: Option<NaiveDate>,
    last_area: Rect,
}

impl App {
    /// Create an app with no data; every day renders as zero until a fetch lands
    pub fn new(theme: Theme) -> Self {
        Self {
            records: Vec::new(),
            fetch: None,
            mounted: false,
            cursor: None,
            tooltip: TooltipState::default(),
            show_help: false,
            should_quit: false,
            theme,
            fixed_today: None,
            last_area: Rect::default(),
        }
    }

    /// Pin "today" instead of reading the wall clock on every render
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Start the one data fetch. Later calls are no-ops.
    pub fn mount(&mut self, config: &Config) {
        if self.mounted {
            return;
        }
        info!(url = %config.url, "fetching contribution data");
        self.fetch = Some(FetchHandle::spawn(config));
        self.mounted = true;
    }

    /// Pick up the fetch result if it has arrived. Returns true when the
    /// records changed and a redraw is due.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(handle) = self.fetch.as_mut() else {
            return false;
        };
        match handle.try_take() {
            Some(records) => {
                debug!(records = records.len(), "contribution data received");
                self.records = records;
                self.fetch = None;
                true
            }
            None => false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Grid for the current records; rebuilt on every call
    pub fn grid(&self) -> Grid {
        build_grid(&self.records, self.today())
    }

    /// Cursor position if it still points at a day, else today's cell
    fn selected(&self, grid: &Grid) -> Option<(usize, usize)> {
        self.cursor
            .filter(|&pos| is_populated(grid, pos))
            .or_else(|| last_populated(grid))
    }

    /// Handle keyboard and mouse events
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.tooltip.is_visible() {
                    self.tooltip = TooltipState::Hidden;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.tooltip = match self.tooltip {
                    TooltipState::Pinned => TooltipState::Hidden,
                    _ => TooltipState::Pinned,
                };
            }
            _ => {}
        }
    }

    /// Move the cursor by whole columns/rows; placeholder days are not selectable
    fn move_cursor(&mut self, d_col: isize, d_row: isize) {
        let grid = self.grid();
        let Some((col, row)) = self.selected(&grid) else {
            return;
        };
        let (Some(col), Some(row)) = (col.checked_add_signed(d_col), row.checked_add_signed(d_row))
        else {
            return;
        };
        if col < grid.len() && row < DAYS_IN_WEEK && is_populated(&grid, (col, row)) {
            self.cursor = Some((col, row));
            if self.tooltip == TooltipState::Hidden {
                self.tooltip = TooltipState::Hover;
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let grid = self.grid();
        let layout = HeatmapLayout::new(Self::heatmap_area(self.last_area), grid.len());
        let hit = layout
            .cell_at(mouse.column, mouse.row)
            .filter(|&pos| is_populated(&grid, pos));

        match mouse.kind {
            // A pinned tooltip keeps its cell until the next click
            MouseEventKind::Moved if self.tooltip == TooltipState::Pinned => {}
            MouseEventKind::Moved => match hit {
                Some(pos) => {
                    self.cursor = Some(pos);
                    self.tooltip = TooltipState::Hover;
                }
                None => self.tooltip = TooltipState::Hidden,
            },
            MouseEventKind::Down(MouseButton::Left) => match hit {
                Some(pos)
                    if self.tooltip == TooltipState::Pinned
                        && self.selected(&grid) == Some(pos) =>
                {
                    self.tooltip = TooltipState::Hidden;
                }
                Some(pos) => {
                    self.cursor = Some(pos);
                    self.tooltip = TooltipState::Pinned;
                }
                None => self.tooltip = TooltipState::Hidden,
            },
            _ => {}
        }
    }

    /// Area the heatmap occupies inside the full frame
    fn heatmap_area(area: Rect) -> Rect {
        let top = HEATMAP_TOP.min(area.height);
        Rect {
            x: area.x,
            y: area.y + top,
            width: area.width,
            height: HEATMAP_HEIGHT.min(area.height - top),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&mut self, frame: &mut Frame) {
        self.last_area = frame.area();
        frame.render_widget(&*self, self.last_area);
    }

    fn render_title(&self, grid: &Grid, area: Rect, buf: &mut Buffer) {
        let total: u64 = populated_cells(grid).map(|cell| cell.count).sum();
        let title = Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} in the last {} weeks", total, grid.len()),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        Paragraph::new(title).render(area, buf);
    }
}

fn is_populated(grid: &Grid, (col, row): (usize, usize)) -> bool {
    grid.get(col)
        .and_then(|column| column.get(row))
        .is_some_and(Option::is_some)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // Derived per render
        let grid = self.grid();
        let selected = self.selected(&grid);

        self.render_title(&grid, Rect { height: 1, ..area }, buf);

        let heatmap_area = App::heatmap_area(area);
        Heatmap::new(&grid, self.theme)
            .with_selected(selected)
            .render(heatmap_area, buf);

        let hint_y = heatmap_area.bottom() + 1;
        if hint_y < area.bottom() {
            buf.set_stringn(
                area.x,
                hint_y,
                HINT,
                area.width as usize,
                Style::default().fg(self.theme.muted()),
            );
        }

        if self.tooltip.is_visible() {
            let layout = HeatmapLayout::new(heatmap_area, grid.len());
            if let Some((col, row)) = selected {
                if let (Some(cell), Some(anchor)) = (grid[col][row], layout.cell_origin(col, row)) {
                    let tooltip = Tooltip::new(cell, self.theme);
                    let tooltip_area = tooltip.area_near(anchor, area);
                    tooltip.render(tooltip_area, buf);
                }
            }
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

#[cfg(test)]
impl App {
    fn records(&self) -> &[ContributionRecord] {
        &self.records
    }

    fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    /// The day under the cursor
    fn selected_cell(&self) -> Option<crate::types::GridCell> {
        let grid = self.grid();
        let (col, row) = self.selected(&grid)?;
        grid[col][row]
    }
}

/// Run the TUI application
pub fn run(config: &Config, today: Option<NaiveDate>) -> anyhow::Result<()> {
    // Detect before raw mode
    let theme = Theme::detect();
    let mut app = App::new(theme);
    if let Some(today) = today {
        app = app.with_today(today);
    }

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(anyhow::Error::from)
        .and_then(|()| run_app(&mut terminal, &mut app, config));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App, config: &Config) -> anyhow::Result<()> {
    app.mount(config);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Redraw as soon as data lands
        if app.poll_fetch() {
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
