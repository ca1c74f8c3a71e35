//! Name-tagged motor list.
//!
//! The registry is the one place that knows every motor on the robot by its
//! short logical name ("LF", "RA", ...). It answers two questions: which
//! motors are plugged in right now, and what do their diagnostics read.
//! Neither question raises an error for a missing motor; a disconnected motor
//! is reported, not treated as a fault.

use std::fmt;

use log::debug;

use super::{Cartridge, MotorKind, OperatorConsole, Shared, SmartMotor};
use crate::drivetrain::DriveConfig;

/// A motor and the name it is reported under.
pub struct RegisteredMotor<M> {
    pub name:  &'static str,
    pub motor: Shared<M>,
}

impl<M> Clone for RegisteredMotor<M> {
    fn clone(&self) -> Self {
        Self {
            name:  self.name,
            motor: self.motor.clone(),
        }
    }
}

/// Every registered motor, in registration order.
///
/// Cloning a registry clones the handles, not the motors, so the poller and
/// the status screen can each hold one.
pub struct MotorRegistry<M> {
    motors: Vec<RegisteredMotor<M>>,
}

impl<M> Clone for MotorRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            motors: self.motors.clone(),
        }
    }
}

impl<M> Default for MotorRegistry<M> {
    fn default() -> Self { Self { motors: Vec::new() } }
}

impl<M: SmartMotor> MotorRegistry<M> {
    pub fn new() -> Self { Self::default() }

    /// Associates `name` with `motor`.
    pub fn register(&mut self, motor: Shared<M>, name: &'static str) {
        self.motors.push(RegisteredMotor { name, motor });
    }

    pub fn get(&self, name: &str) -> Option<&Shared<M>> {
        self.motors.iter().find(|m| m.name == name).map(|m| &m.motor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredMotor<M>> { self.motors.iter() }

    pub fn len(&self) -> usize { self.motors.len() }

    pub fn is_empty(&self) -> bool { self.motors.is_empty() }

    /// Reads whether each motor is installed.
    ///
    /// The controller screen is cleared and the names of any disconnected
    /// motors are printed on it so the drivers see the problem immediately.
    pub fn connectivity(&self, console: &mut dyn OperatorConsole) -> ConnectivityReport {
        let statuses: Vec<MotorStatus> = self
            .motors
            .iter()
            .map(|m| MotorStatus {
                name:      m.name,
                connected: m.motor.borrow().is_connected(),
            })
            .collect();
        let report = ConnectivityReport { statuses };

        console.clear();
        let missing = report.disconnected().collect::<Vec<_>>().join(" ");
        if !missing.is_empty() {
            debug!("Disconnected motors: {}", missing);
            console.print(0, &missing);
        }
        report
    }

    /// Checks connectivity and picks the drive configuration that matches it.
    pub fn check_drive(&self, console: &mut dyn OperatorConsole) -> DriveConfig {
        DriveConfig::select(&self.connectivity(console))
    }

    /// Diagnostic snapshot of every motor.
    pub fn attributes(&self) -> Vec<MotorAttributes> {
        self.motors
            .iter()
            .map(|m| {
                let motor = m.motor.borrow();
                MotorAttributes {
                    name:        m.name,
                    connected:   motor.is_connected(),
                    cartridge:   motor.cartridge().ok(),
                    kind:        motor.kind(),
                    temperature: motor.temperature().ok(),
                    position:    motor.position().ok(),
                }
            })
            .collect()
    }
}

/// Whether one motor reported as installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorStatus {
    pub name:      &'static str,
    pub connected: bool,
}

/// Connectivity of every registered motor at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    statuses: Vec<MotorStatus>,
}

impl ConnectivityReport {
    /// Builds a report from `(name, connected)` pairs.
    pub fn from_statuses(statuses: impl IntoIterator<Item = (&'static str, bool)>) -> Self {
        Self {
            statuses: statuses
                .into_iter()
                .map(|(name, connected)| MotorStatus { name, connected })
                .collect(),
        }
    }

    pub fn statuses(&self) -> &[MotorStatus] { &self.statuses }

    /// Names of the motors that are not installed, in registration order.
    pub fn disconnected(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.statuses.iter().filter(|s| !s.connected).map(|s| s.name)
    }

    /// Whether a motor with this name was registered and reported missing.
    pub fn is_disconnected(&self, name: &str) -> bool {
        self.statuses.iter().any(|s| s.name == name && !s.connected)
    }

    pub fn all_connected(&self) -> bool { self.statuses.iter().all(|s| s.connected) }
}

/// One motor's diagnostics. Readings that failed are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorAttributes {
    pub name:        &'static str,
    pub connected:   bool,
    pub cartridge:   Option<Cartridge>,
    pub kind:        MotorKind,
    pub temperature: Option<f64>,
    pub position:    Option<f64>,
}

impl fmt::Display for MotorAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.connected {
            return write!(f, "{} disconnected", self.name);
        }
        write!(f, "{} ", self.name)?;
        match self.cartridge {
            Some(cartridge) => write!(f, "{cartridge} ")?,
            None => f.write_str("--:- ")?,
        }
        write!(f, "{} ", self.kind.rated_power())?;
        match self.temperature {
            Some(t) => write!(f, "{t:.0}C ")?,
            None => f.write_str("--C ")?,
        }
        match self.position {
            Some(p) => write!(f, "{p:.0}deg"),
            None => f.write_str("--deg"),
        }
    }
}
