//! Autonomous period: recorded trajectories and their replay.
//!
//! Autonomous routines are not planned on the robot. A driver runs the route
//! by hand with the position recorder on, the recording becomes a
//! [`Trajectory`](trajectory::Trajectory), and during the match
//! [`replay`](replay::replay) sends the drive back through the same positions
//! at the same rate.
//!
//! # Example
//!
//! ```ignore
//! use compbot::auton::{replay::replay, selector::AutonSelector};
//!
//! let selector = AutonSelector::with_bundled(config.sd_trajectory_path);
//! if let Some(trajectory) = &selector.selected().trajectory {
//!     replay(trajectory, &robot.drive, config.drive_velocity, config.replay_step_delay, sleep).await;
//! }
//! ```

/// Open-loop replay of a trajectory on the drivetrain.
pub mod replay;

/// Pre-match routine selection.
pub mod selector;

/// Trajectory records and their text format.
pub mod trajectory;
