//! Contribution data fetcher
//!
//! Issues the single GET against the calendar endpoint, turns the
//! `{"YYYY-MM-DD": count}` body into ordered records, and runs that work on a
//! background thread whose result is discarded once the UI has torn down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::types::{Config, ContribError, ContributionRecord, Result};

/// Fetch and parse the contribution map from `url`
pub fn fetch_records(url: &str, timeout: Duration) -> Result<Vec<ContributionRecord>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ContribError::Fetch(format!("HTTP client error: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| ContribError::Fetch(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ContribError::Fetch(format!("unexpected status {}", status)));
    }

    let body = response
        .text()
        .map_err(|e| ContribError::Fetch(format!("failed to read body: {}", e)))?;

    parse_records(&body)
}

/// Parse a JSON object body into records, keeping the object's key order.
/// Values that are not non-negative integers are skipped.
pub fn parse_records(body: &str) -> Result<Vec<ContributionRecord>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ContribError::Parse(format!("JSON parse error: {}", e)))?;

    let Value::Object(map) = value else {
        return Err(ContribError::Parse("expected a JSON object".into()));
    };

    let mut records = Vec::with_capacity(map.len());
    for (date, count) in map {
        match count.as_u64() {
            Some(count) => records.push(ContributionRecord::new(date, count)),
            None => debug!(%date, value = %count, "skipping non-integer contribution count"),
        }
    }
    Ok(records)
}

/// Fetch records, logging and swallowing any failure.
/// A failed fetch yields an empty set, which renders as an all-zero grid.
pub fn load_records(url: &str, timeout: Duration) -> Vec<ContributionRecord> {
    match fetch_records(url, timeout) {
        Ok(records) => {
            info!(url, records = records.len(), "loaded contribution data");
            records
        }
        Err(e) => {
            error!(url, error = %e, "error fetching contribution data");
            Vec::new()
        }
    }
}

/// Handle to the one background fetch started when the widget mounts.
///
/// Dropping the handle clears its liveness flag; a worker that finishes after
/// that point drops its result instead of delivering it.
#[derive(Debug)]
pub struct FetchHandle {
    rx: Receiver<Vec<ContributionRecord>>,
    alive: Arc<AtomicBool>,
    finished: bool,
}

impl FetchHandle {
    /// Start the fetch for `config` on a background thread
    pub fn spawn(config: &Config) -> Self {
        let url = config.url.clone();
        let timeout = config.timeout;
        Self::spawn_with(move || load_records(&url, timeout))
    }

    /// Start a fetch driven by an arbitrary loader
    pub fn spawn_with<F>(load: F) -> Self
    where
        F: FnOnce() -> Vec<ContributionRecord> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let alive = Arc::new(AtomicBool::new(true));
        let worker_alive = Arc::clone(&alive);

        thread::spawn(move || {
            let records = load();
            if worker_alive.load(Ordering::Acquire) {
                let _ = tx.send(records);
            } else {
                debug!("fetch completed after teardown, discarding result");
            }
        });

        Self {
            rx,
            alive,
            finished: false,
        }
    }

    /// Non-blocking poll; yields the records at most once
    pub fn try_take(&mut self) -> Option<Vec<ContributionRecord>> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(records) => {
                self.finished = true;
                Some(records)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                None
            }
        }
    }

    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
impl FetchHandle {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<ContributionRecord>> {
        if self.finished {
            return None;
        }
        let result = self.rx.recv_timeout(timeout).ok();
        self.finished = true;
        result
    }
}
