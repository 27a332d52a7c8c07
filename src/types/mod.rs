//! Type definitions for contribgraph

mod config;
mod contribution;
mod error;

pub use config::*;
pub use contribution::*;
pub use error::*;
