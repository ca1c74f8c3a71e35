//! File-based logger implementation for the V5 Brain.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to both the console (terminal/debug output) and `robot.log` on
//! the Brain's SD card.
//!
//! # Usage
//!
//! Initialize the logger once at the start of the program:
//!
//! ```ignore
//! use compbot::fs::logger;
//! use log::{info, LevelFilter};
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Debug).unwrap_or_else(|e| println!("{e}"));
//!     info!("Program started");
//! }
//! ```
//!
//! # Log Output
//!
//! Each entry holds the level, the time since the program started, the
//! target (module path) and the message:
//!
//! ```text
//! INFO [2m 5s 123ms] compbot::drivetrain - Drive configuration changed: 4 wheel -> rear wheel
//! WARN [2m 8s 40ms] compbot::drivetrain - Motors disconnected: LF
//! ```
//!
//! Without an SD card the file cannot be opened and entries only go to the
//! console.

use std::{
    fmt,
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// File the log is written to, relative to the SD card root.
pub const LOG_FILE: &str = "robot.log";

/// Logger writing to the console and [`LOG_FILE`].
///
/// The file is truncated when the logger is created.
pub struct RobotLogger {
    /// `None` when the file could not be opened (e.g., no SD card present).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
}

impl RobotLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }
}

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), uptime(), record.target(), record.args());
        print!("{}", line);

        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RobotLogger> = OnceLock::new();

/// Installs the logger.
///
/// Must be called once before any logging macros are used; records below
/// `level` are dropped.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    start_time();
    let logger = LOGGER.get_or_init(RobotLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Formats one log entry, newline included. Uptime is shown to the
/// millisecond.
pub fn format_line(level: Level, uptime: Duration, target: &str, message: impl fmt::Display) -> String {
    let uptime = Duration::from_millis(uptime.as_millis() as u64);
    format!("{} [{}] {} - {}\n", level, format_duration(uptime), target, message)
}

/// Time since the user program started.
#[cfg(feature = "vex")]
fn uptime() -> Duration { vexide::time::user_uptime() }

/// Time since the logger was installed.
#[cfg(not(feature = "vex"))]
fn uptime() -> Duration { start_time().elapsed() }

#[cfg(not(feature = "vex"))]
fn start_time() -> std::time::Instant {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    *START.get_or_init(std::time::Instant::now)
}

#[cfg(feature = "vex")]
fn start_time() {}
