//! Logging setup: a `fern` dispatcher behind the `log` macros, feeding an
//! optional log file and a shared in-memory buffer.

use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_NAME;
use crate::utils::path::app_data_dir;
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: usize = 500;

/// Shared logger that can be used across the application
#[derive(Clone, Debug)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Buffer that keeps at most `capacity` entries, dropping the oldest
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == self.capacity {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Most recent entry, if any
    pub fn last(&self) -> Option<String> {
        self.logs.lock().ok().and_then(|logs| logs.back().cloned())
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of the log file written when logging is enabled
pub fn log_file_path() -> PathBuf {
    app_data_dir().join(LOG_FILE_NAME)
}

/// Install the global logger.
///
/// Records at or above the configured level always reach `buffer`; they are
/// also appended to [`log_file_path`] when logging is enabled. Returns the log
/// file path when one is in use.
pub fn init(config: &LoggingConfig, buffer: &Logger) -> Result<Option<PathBuf>> {
    let sink = buffer.clone();
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter())
        .chain(fern::Output::call(move |record| sink.log(record.args().to_string())));

    let mut file_path = None;
    if config.enabled {
        let path = log_file_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
        file_path = Some(path);
    }

    dispatch.apply().context("Logger already initialised")?;
    Ok(file_path)
}
