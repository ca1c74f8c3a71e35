//! # compbot
//!
//! Competition control code for a VEX V5 robot with a four-motor tank drive, a
//! two-motor arm, a chain intake and a pneumatic mobile-goal clamp. It runs on
//! [vexide](https://vexide.dev) and provides:
//!
//! - **Fault-tolerant Drivetrain**: Detects disconnected drive motors and
//!   reroutes the sticks to the motors that remain.
//! - **Operator Control**: Button mapping for the intake, an arm checkpoint
//!   ladder with a manual override, and an edge-triggered clamp toggle.
//! - **Trajectory Replay**: Autonomous routines recorded as drive encoder
//!   positions and replayed step by step.
//! - **Display Graphics**: A six-panel status screen drawn with
//!   [`embedded-graphics`](https://crates.io/crates/embedded-graphics).
//! - **Logging**: A file-based logger and a position recorder on the SD card.
//!
//! Hardware is reached only through the traits in [`peripherals`], so
//! everything except the Brain drivers builds and tests on a desktop. The
//! vexide implementations are behind the `vex` feature.
//!
//! ## Quick Start
//!
//! ```ignore
//! use compbot::{config::RobotConfig, opcontrol::OpControl, robot::Subsystems};
//!
//! let robot = Subsystems::new(drive, arm, intake, clamp);
//! let mut monitor = robot.monitor(drive_config.clone());
//! robot.prepare(&mut monitor, &mut controller);
//!
//! let mut opcontrol = OpControl::new(&RobotConfig::default(), &robot.clamp);
//! loop {
//!     let reading = controller.state();
//!     opcontrol.cycle_reading(reading, &mut robot, &mut monitor, &mut controller);
//!     sleep(Duration::from_millis(20)).await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`drivetrain`]: Drive motors, configuration selection and the drive monitor.
//! - [`auton`]: Trajectories, replay and the auton selector.
//! - [`opcontrol`]: Controller input mapping and the arm ladder.
//! - [`display`]: The status screen.
//! - [`fs`]: Logging and position recording.
//! - [`peripherals`]: Hardware traits, the motor registry and mock devices.

/// Autonomous routines.
///
/// Recorded trajectories, open-loop replay, and the pre-match routine
/// selector.
pub mod auton;

/// Match phase shared between the competition callbacks and the loops.
pub mod competition;

/// Robot tuning values.
pub mod config;

/// Status screen module.
///
/// Draws the six status panels with `embedded-graphics`. With the `vex`
/// feature it also provides a [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
/// for the Brain display.
pub mod display;

/// Four-motor tank drivetrain.
///
/// Provides [`DriveTrain`](drivetrain::DriveTrain) and the
/// [`DriveConfig`](drivetrain::DriveConfig) selection that keeps the robot
/// driving after a drive motor disconnects.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains the logger and the drive position recorder, both writing to the
/// V5 Brain's SD card.
pub mod fs;

/// Operator control utilities module.
///
/// Maps controller buttons to the intake, the arm and the clamp.
pub mod opcontrol;

/// Hardware traits and their implementations.
pub mod peripherals;

/// The assembled robot.
pub mod robot;

/// Values shared between loops without locking.
pub mod snapshot;
