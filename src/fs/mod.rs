//! SD card output for the V5 Brain.
//!
//! Two things are written to the SD card: the program log, and (when enabled)
//! the drive positions sampled during driver control, which become
//! replayable trajectories.
//!
//! # Example
//!
//! ```ignore
//! use compbot::fs::{logger, recorder::PositionRecorder};
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).unwrap_or_else(|e| println!("{e}"));
//! info!("Robot initialized successfully");
//!
//! let mut recorder = PositionRecorder::create("recording.traj")?;
//! recorder.tick(&robot.drive);
//! ```

/// File-based logging for the V5 Brain.
///
/// Provides a logger implementation that writes to both the console
/// and a file on the SD card.
pub mod logger;

/// Drive position sampling in trajectory format.
pub mod recorder;
