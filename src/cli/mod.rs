mod grid;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::logging::{self, LogTarget};
use crate::tui;
use crate::types::{Config, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
use grid::GridArgs;

/// Contribution graph for the last 51 weeks
#[derive(Parser)]
#[command(name = "contribgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Endpoint returning a {"YYYY-MM-DD": count} JSON object
    #[arg(long, global = true, env = "CONTRIBGRAPH_URL", default_value = DEFAULT_URL)]
    url: String,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Draw the graph as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Fetch once and print the grid
    Grid(GridArgs),
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::new(self.url, self.timeout)?;

        match self.command {
            None | Some(Commands::Tui) => {
                logging::init(LogTarget::File(logging::default_log_dir()?))?;
                tui::run(&config, self.today)
            }
            Some(Commands::Grid(args)) => {
                logging::init(LogTarget::Stderr)?;
                let today = self.today.unwrap_or_else(|| Local::now().date_naive());
                args.run(&config, today)?;
                Ok(())
            }
        }
    }
}
