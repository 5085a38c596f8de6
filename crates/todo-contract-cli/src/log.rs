// crates/todo-contract-cli/src/log.rs
// ============================================================================
// Module: Run Event Logging
// Description: JSON-line sinks for run events.
// Purpose: Emit timestamped run events to stderr, a file, or nowhere.
// Dependencies: todo-contract-core, todo-contract-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Run events from the scenario runner are wrapped with a millisecond
//! timestamp and written one JSON object per line. Events carry the session
//! location at most; the token never reaches a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use todo_contract_config::LogConfig;
use todo_contract_config::LogSink;
use todo_contract_core::NoopObserver;
use todo_contract_core::RunEvent;
use todo_contract_core::RunObserver;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Timestamped run event as written to a sink.
#[derive(Debug, Clone, Serialize)]
pub struct RunEventRecord<'a> {
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event payload, flattened next to the timestamp.
    #[serde(flatten)]
    pub event: &'a RunEvent,
}

impl<'a> RunEventRecord<'a> {
    /// Wraps an event with the current time.
    #[must_use]
    pub fn now(event: &'a RunEvent) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            timestamp_ms,
            event,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl RunObserver for StderrEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(&RunEventRecord::now(event)) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RunObserver for FileEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(&RunEventRecord::now(event))
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Builds the sink selected by the log configuration.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its path.
pub fn open_sink(config: &LogConfig) -> io::Result<Box<dyn RunObserver>> {
    match (config.sink, config.path.as_deref()) {
        (LogSink::Stderr, _) => Ok(Box::new(StderrEventSink)),
        (LogSink::File, Some(path)) => Ok(Box::new(FileEventSink::new(Path::new(path.trim()))?)),
        (LogSink::File, None) => {
            Err(io::Error::new(io::ErrorKind::InvalidInput, "log.sink=file requires log.path"))
        }
        (LogSink::None, _) => Ok(Box::new(NoopObserver)),
    }
}
