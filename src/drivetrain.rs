//! Four-motor tank drivetrain that reroutes around disconnected motors.
//!
//! The robot drives with one motor at each corner. When a drive motor drops
//! off the bus (a cable shakes loose, a port dies) the drivers keep control by
//! switching to a [`DriveConfig`] that only uses a pair of the remaining
//! motors.
//!
//! # Configuration Selection
//!
//! [`DriveConfig::select`] applies five fixed rules in order, each later rule
//! overwriting the result of the earlier ones:
//!
//! 1. four-wheel
//! 2. `LF` or `RF` lost: rear-wheel
//! 3. `LB` or `RB` lost: front-wheel
//! 4. `LF` and `RB` lost: diagonal `RF`+`LB`
//! 5. `LB` or `RF` lost: diagonal `LF`+`RB`
//!
//! Because of the overwrite order some multi-motor losses select a pair that
//! still contains a lost motor (losing `LB` and `RB` selects `LF`+`RB`).
//!
//! # Example
//!
//! ```
//! use compbot::{
//!     drivetrain::{DriveConfig, DriveTrain},
//!     peripherals::{mock::MockMotor, registry::ConnectivityReport},
//! };
//!
//! let drive = DriveTrain::new(MockMotor::new(), MockMotor::new(), MockMotor::new(), MockMotor::new());
//! let report = ConnectivityReport::from_statuses([("LF", false), ("LB", true), ("RF", true), ("RB", true)]);
//!
//! let config = DriveConfig::select(&report);
//! assert_eq!(config, DriveConfig::RearWheel);
//! drive.tank(config, 80.0, 75.0, 100.0);
//! ```

use std::fmt;

use log::{info, warn};

use crate::{
    auton::trajectory::TrajectoryStep,
    peripherals::{
        BrakeMode, DeviceError, OperatorConsole, Shared, SmartMotor, make_cloneable,
        registry::{ConnectivityReport, MotorRegistry},
    },
    snapshot::{SnapshotCell, SnapshotValue},
};

/// One corner of the drivetrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMotor {
    LeftFront,
    LeftBack,
    RightFront,
    RightBack,
}

impl DriveMotor {
    /// Every drive motor, in trajectory column order.
    pub const ALL: [DriveMotor; 4] = [
        DriveMotor::LeftFront,
        DriveMotor::LeftBack,
        DriveMotor::RightFront,
        DriveMotor::RightBack,
    ];

    /// Name the motor is registered under.
    pub const fn name(&self) -> &'static str {
        match self {
            DriveMotor::LeftFront => "LF",
            DriveMotor::LeftBack => "LB",
            DriveMotor::RightFront => "RF",
            DriveMotor::RightBack => "RB",
        }
    }
}

/// Which drive motors respond to the sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveConfig {
    /// All four motors.
    #[default]
    FourWheel,
    /// `LB` and `RB` only.
    RearWheel,
    /// `LF` and `RF` only.
    FrontWheel,
    /// `RF` and `LB` only.
    DiagonalRfLb,
    /// `LF` and `RB` only.
    DiagonalLfRb,
}

impl DriveConfig {
    /// Picks a configuration from a connectivity snapshot.
    ///
    /// Rules are applied in order and each match overwrites the previous
    /// choice; see the [module docs](self).
    pub fn select(report: &ConnectivityReport) -> Self {
        let lost = |motor: DriveMotor| report.is_disconnected(motor.name());
        let (lf, lb, rf, rb) = (
            lost(DriveMotor::LeftFront),
            lost(DriveMotor::LeftBack),
            lost(DriveMotor::RightFront),
            lost(DriveMotor::RightBack),
        );

        let mut config = DriveConfig::FourWheel;
        if lf || rf {
            config = DriveConfig::RearWheel;
        }
        if lb || rb {
            config = DriveConfig::FrontWheel;
        }
        if lf && rb {
            config = DriveConfig::DiagonalRfLb;
        }
        if lb || rf {
            config = DriveConfig::DiagonalLfRb;
        }
        config
    }

    /// Motors driven by the left stick.
    ///
    /// In [`DiagonalRfLb`](Self::DiagonalRfLb) the left stick drives `RF` and
    /// the right stick drives `LB`.
    pub const fn left_stick_motors(&self) -> &'static [DriveMotor] {
        match self {
            DriveConfig::FourWheel => &[DriveMotor::LeftFront, DriveMotor::LeftBack],
            DriveConfig::RearWheel => &[DriveMotor::LeftBack],
            DriveConfig::FrontWheel => &[DriveMotor::LeftFront],
            DriveConfig::DiagonalRfLb => &[DriveMotor::RightFront],
            DriveConfig::DiagonalLfRb => &[DriveMotor::LeftFront],
        }
    }

    /// Motors driven by the right stick.
    pub const fn right_stick_motors(&self) -> &'static [DriveMotor] {
        match self {
            DriveConfig::FourWheel => &[DriveMotor::RightFront, DriveMotor::RightBack],
            DriveConfig::RearWheel => &[DriveMotor::RightBack],
            DriveConfig::FrontWheel => &[DriveMotor::RightFront],
            DriveConfig::DiagonalRfLb => &[DriveMotor::LeftBack],
            DriveConfig::DiagonalLfRb => &[DriveMotor::RightBack],
        }
    }

    /// Short label for the status screen.
    pub const fn label(&self) -> &'static str {
        match self {
            DriveConfig::FourWheel => "4 wheel",
            DriveConfig::RearWheel => "rear wheel",
            DriveConfig::FrontWheel => "front wheel",
            DriveConfig::DiagonalRfLb => "diag RF+LB",
            DriveConfig::DiagonalLfRb => "diag LF+RB",
        }
    }
}

impl fmt::Display for DriveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl SnapshotValue for DriveConfig {
    fn encode(self) -> u8 {
        match self {
            DriveConfig::FourWheel => 0,
            DriveConfig::RearWheel => 1,
            DriveConfig::FrontWheel => 2,
            DriveConfig::DiagonalRfLb => 3,
            DriveConfig::DiagonalLfRb => 4,
        }
    }

    fn decode(raw: u8) -> Self {
        match raw {
            1 => DriveConfig::RearWheel,
            2 => DriveConfig::FrontWheel,
            3 => DriveConfig::DiagonalRfLb,
            4 => DriveConfig::DiagonalLfRb,
            _ => DriveConfig::FourWheel,
        }
    }
}

/// The four drive motors.
///
/// The motors are stored in reference-counted cells so the registry, the
/// trajectory recorder and the drive loop can all reach them.
pub struct DriveTrain<M> {
    pub left_front:  Shared<M>,
    pub left_back:   Shared<M>,
    pub right_front: Shared<M>,
    pub right_back:  Shared<M>,
}

impl<M> Clone for DriveTrain<M> {
    fn clone(&self) -> Self {
        Self {
            left_front:  self.left_front.clone(),
            left_back:   self.left_back.clone(),
            right_front: self.right_front.clone(),
            right_back:  self.right_back.clone(),
        }
    }
}

impl<M: SmartMotor> DriveTrain<M> {
    pub fn new(left_front: M, left_back: M, right_front: M, right_back: M) -> Self {
        Self {
            left_front:  make_cloneable(left_front),
            left_back:   make_cloneable(left_back),
            right_front: make_cloneable(right_front),
            right_back:  make_cloneable(right_back),
        }
    }

    pub fn motor(&self, motor: DriveMotor) -> &Shared<M> {
        match motor {
            DriveMotor::LeftFront => &self.left_front,
            DriveMotor::LeftBack => &self.left_back,
            DriveMotor::RightFront => &self.right_front,
            DriveMotor::RightBack => &self.right_back,
        }
    }

    /// Registers the four motors under their drive names.
    pub fn register(&self, registry: &mut MotorRegistry<M>) {
        for motor in DriveMotor::ALL {
            registry.register(self.motor(motor).clone(), motor.name());
        }
    }

    /// Tank control: `left` and `right` are stick percentages, scaled by
    /// `max_percent` and sent to the motors `config` selects. Motors outside
    /// the configuration are left alone.
    pub fn tank(&self, config: DriveConfig, left: f64, right: f64, max_percent: f64) {
        let scale = max_percent / 100.0;
        for motor in config.left_stick_motors() {
            if let Ok(mut m) = self.motor(*motor).try_borrow_mut() {
                let _ = m.spin(left * scale);
            }
        }
        for motor in config.right_stick_motors() {
            if let Ok(mut m) = self.motor(*motor).try_borrow_mut() {
                let _ = m.spin(right * scale);
            }
        }
    }

    /// Sends every motor to its position in `step` without waiting.
    pub fn move_to(&self, step: &TrajectoryStep, percent: f64) {
        for motor in DriveMotor::ALL {
            if let Ok(mut m) = self.motor(motor).try_borrow_mut() {
                let _ = m.spin_to_position(step.target(motor), percent);
            }
        }
    }

    /// Current encoder positions as a trajectory step.
    ///
    /// # Errors
    ///
    /// Fails if any of the four motors cannot be read.
    pub fn positions(&self) -> Result<TrajectoryStep, DeviceError> {
        Ok(TrajectoryStep {
            left_front:  self.left_front.borrow().position()?,
            left_back:   self.left_back.borrow().position()?,
            right_front: self.right_front.borrow().position()?,
            right_back:  self.right_back.borrow().position()?,
        })
    }

    pub fn set_brakemode(&self, mode: BrakeMode) {
        for motor in DriveMotor::ALL {
            let _ = self.motor(motor).borrow_mut().set_brake_mode(mode);
        }
    }

    pub fn reset_positions(&self) {
        for motor in DriveMotor::ALL {
            let _ = self.motor(motor).borrow_mut().reset_position();
        }
    }
}

/// Re-evaluates the drive configuration and publishes it.
///
/// Run periodically by the connectivity poller and on demand by the recheck
/// button. Changes are logged once rather than on every poll.
pub struct DriveMonitor<M> {
    registry: MotorRegistry<M>,
    config:   SnapshotCell<DriveConfig>,
    missing:  Vec<&'static str>,
}

impl<M: SmartMotor> DriveMonitor<M> {
    pub fn new(registry: MotorRegistry<M>, config: SnapshotCell<DriveConfig>) -> Self {
        Self {
            registry,
            config,
            missing: Vec::new(),
        }
    }

    /// The configuration published by the last check.
    pub fn current(&self) -> DriveConfig { self.config.current() }

    /// Handle other loops read the configuration from.
    pub fn cell(&self) -> SnapshotCell<DriveConfig> { self.config.clone() }

    /// Checks every motor, selects a configuration and publishes it.
    pub fn check(&mut self, console: &mut dyn OperatorConsole) -> DriveConfig {
        let report = self.registry.connectivity(console);

        let missing: Vec<&'static str> = report.disconnected().collect();
        if missing != self.missing {
            if missing.is_empty() {
                info!("All motors connected");
            } else {
                warn!("Motors disconnected: {}", missing.join(", "));
            }
            self.missing = missing;
        }

        let selected = DriveConfig::select(&report);
        let previous = self.config.publish(selected);
        if previous != selected {
            info!("Drive configuration changed: {} -> {}", previous, selected);
        }
        selected
    }
}
