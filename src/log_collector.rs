//! Decoupled logging pipeline.
//!
//! `LogCollector` is the `log` crate backend. Records are handed to a
//! background thread over an unbounded channel, so logging never blocks the
//! caller, and every line reaches disk in order.
//!
//! ```text
//! log::info!() / log_event!()
//!     |
//! [LogCollector] (non-blocking send)
//!     | crossbeam unbounded channel
//!     v
//! [disk writer thread]
//!     |-- <log_dir>/full/<ts>_full.log      (every record)
//!     '-- <log_dir>/events/<ts>_events.log  (target "events" only)
//! ```

use crate::config::Settings;
use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log target for high-level events (catalog initialization, test runs, persistence)
pub const EVENTS_TARGET: &str = "events";

/// Log a high-level event.
///
/// Events go to the full log and to the separate events log.
#[macro_export]
macro_rules! log_event {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::log_collector::EVENTS_TARGET, $($arg)*);
    }};
}

/// A formatted log line
#[derive(Clone, Debug)]
pub struct LogLine {
    pub message: String,
    /// Line also belongs in the events log
    pub is_event: bool,
    /// `HH:MM:SS.mmm`
    pub timestamp: String,
}

impl LogLine {
    pub fn new(message: String) -> Self {
        LogLine {
            message,
            is_event: false,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    pub fn event(message: String) -> Self {
        LogLine {
            is_event: true,
            ..LogLine::new(message)
        }
    }

    fn formatted(&self) -> String {
        format!("[{}] {}\n", self.timestamp, self.message)
    }
}

enum LogMessage {
    Line(LogLine),
    /// Flush marker; the sender is signalled once all earlier lines are written
    Flush(std::sync::mpsc::Sender<()>),
}

fn open_append(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[Log] Failed to open {}: {}", path.display(), e);
            None
        }
    }
}

fn write_line(file: &mut Option<File>, line: &str) {
    if let Some(f) = file.as_mut() {
        let _ = f.write_all(line.as_bytes());
    }
}

/// Logger that persists every record on a background thread
#[derive(Clone)]
pub struct LogCollector {
    tx: Sender<LogMessage>,
    level: LevelFilter,
    full_log_path: PathBuf,
    events_log_path: PathBuf,
}

impl LogCollector {
    /// Create the log directories and start the writer thread.
    ///
    /// One pair of files is created per collector, named by start time.
    pub fn new(log_dir: &Path, level: LevelFilter) -> Result<Self, String> {
        let full_dir = log_dir.join("full");
        let events_dir = log_dir.join("events");
        std::fs::create_dir_all(&full_dir)
            .map_err(|e| format!("Failed to create full log dir: {}", e))?;
        std::fs::create_dir_all(&events_dir)
            .map_err(|e| format!("Failed to create events log dir: {}", e))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let full_log_path = full_dir.join(format!("{}_full.log", stamp));
        let events_log_path = events_dir.join(format!("{}_events.log", stamp));

        let (tx, rx) = unbounded::<LogMessage>();
        let full_path = full_log_path.clone();
        let events_path = events_log_path.clone();

        // OS thread rather than a tokio task: it must keep draining after the runtime stops
        std::thread::spawn(move || {
            let mut full = open_append(&full_path);
            let mut events: Option<File> = None;

            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        let formatted = line.formatted();
                        write_line(&mut full, &formatted);
                        if line.is_event {
                            if events.is_none() {
                                events = open_append(&events_path);
                            }
                            write_line(&mut events, &formatted);
                        }
                    }
                    LogMessage::Flush(done) => {
                        for file in [full.as_mut(), events.as_mut()].into_iter().flatten() {
                            let _ = file.flush();
                            let _ = file.sync_data();
                        }
                        let _ = done.send(());
                    }
                }
            }
        });

        Ok(LogCollector {
            tx,
            level,
            full_log_path,
            events_log_path,
        })
    }

    pub fn full_log_path(&self) -> &Path {
        &self.full_log_path
    }

    /// Created lazily on the first event
    pub fn events_log_path(&self) -> &Path {
        &self.events_log_path
    }

    /// Queue a line (never blocks)
    pub fn log_line(&self, line: LogLine) {
        let _ = self.tx.send(LogMessage::Line(line));
    }

    /// Block until every line queued before this call is on disk
    pub fn flush_blocking(&self) -> Result<(), String> {
        let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();
        self.tx
            .send(LogMessage::Flush(done_tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;
        done_rx
            .recv()
            .map_err(|e| format!("Flush signal interrupted: {}", e))
    }
}

impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("[{}] {}", record.level(), record.args());
        if record.target() == EVENTS_TARGET {
            self.log_line(LogLine::event(message));
        } else {
            self.log_line(LogLine::new(message));
        }
    }

    fn flush(&self) {
        let _ = self.flush_blocking();
    }
}

/// Install a `LogCollector` as the global logger.
///
/// Level is Info, or Debug with `debug_logging`. Failures are reported on
/// stderr and never abort the program; `None` means no collector is active.
pub fn init_logging(settings: &Settings) -> Option<LogCollector> {
    let level = if settings.debug_logging {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let collector = match LogCollector::new(&settings.log_dir, level) {
        Ok(collector) => collector,
        Err(e) => {
            eprintln!("[Log] WARNING: LogCollector initialization failed: {}", e);
            return None;
        }
    };

    if let Err(e) = log::set_boxed_logger(Box::new(collector.clone()))
        .map(|()| log::set_max_level(level))
    {
        eprintln!("[Log] WARNING: Failed to set LogCollector as global logger: {}", e);
        return None;
    }

    Some(collector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::TempDir;

    fn record_line(collector: &LogCollector, target: &str, level: Level, msg: &str) {
        collector.log(
            &Record::builder()
                .args(format_args!("{}", msg))
                .level(level)
                .target(target)
                .build(),
        );
    }

    #[test]
    fn test_lines_reach_disk_after_flush() {
        let temp_dir = TempDir::new().unwrap();
        let collector = LogCollector::new(temp_dir.path(), LevelFilter::Info).unwrap();

        record_line(&collector, "arch_evaluator", Level::Info, "catalog loaded");
        record_line(&collector, EVENTS_TARGET, Level::Info, "test run stored");
        collector.flush_blocking().unwrap();

        let full = std::fs::read_to_string(collector.full_log_path()).unwrap();
        assert!(full.contains("[INFO] catalog loaded"));
        assert!(full.contains("[INFO] test run stored"));

        let events = std::fs::read_to_string(collector.events_log_path()).unwrap();
        assert!(events.contains("test run stored"));
        assert!(!events.contains("catalog loaded"));
    }

    #[test]
    fn test_level_filter() {
        let temp_dir = TempDir::new().unwrap();
        let collector = LogCollector::new(temp_dir.path(), LevelFilter::Info).unwrap();

        record_line(&collector, "arch_evaluator", Level::Debug, "noisy detail");
        record_line(&collector, "arch_evaluator", Level::Warn, "careful");
        collector.flush_blocking().unwrap();

        let full = std::fs::read_to_string(collector.full_log_path()).unwrap();
        assert!(!full.contains("noisy detail"));
        assert!(full.contains("[WARN] careful"));
    }
}
