//! Hardware seams between the control code and the V5 devices.
//!
//! Every component in this crate talks to hardware through the small traits
//! defined here instead of using vexide types directly. The Brain implements
//! them in [`vex`] (behind the `vex` feature) and [`mock`] implements them in
//! memory for desktop tests.
//!
//! | Trait | Device |
//! |-------|--------|
//! | [`SmartMotor`] | V5 / EXP smart motor |
//! | [`Gamepad`] | V5 controller sticks and buttons |
//! | [`Piston`] | pneumatic solenoid on an ADI port |
//! | [`OperatorConsole`] | text screen on the controller |
//!
//! # Shared Handles
//!
//! Devices live for the whole program and are used by more than one loop (the
//! drive loop commands a motor while the connectivity poller reads it), so they
//! are held as [`Shared`] handles, the same `Rc<RefCell<_>>` arrangement the
//! vexide executor is built around.

/// Controller state snapshot, button names and edge detection.
pub mod controller;

/// In-memory devices that record every command.
pub mod mock;

/// Name-tagged motor list with connectivity and diagnostics.
pub mod registry;

/// vexide implementations of the hardware traits.
#[cfg(feature = "vex")]
pub mod vex;

use std::{cell::RefCell, fmt, rc::Rc};

use snafu::Snafu;

use self::controller::GamepadState;

/// A device handle shared between loops.
pub type Shared<T> = Rc<RefCell<T>>;

/// Makes an object clonable by wrapping it in `Rc` and `RefCell`
pub fn make_cloneable<T>(t: T) -> Shared<T> { Rc::new(RefCell::new(t)) }

/// Errors reported by a device.
///
/// A disconnected device is a reportable state rather than a fault; callers
/// log these and keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum DeviceError {
    /// The device is not plugged in or not responding on its port.
    #[snafu(display("device is not installed"))]
    Disconnected,
}

/// Internal gear cartridge of a smart motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cartridge {
    /// 36:1, 100 rpm.
    Red,
    /// 18:1, 200 rpm.
    Green,
    /// 6:1, 600 rpm.
    Blue,
}

impl Cartridge {
    /// Gear ratio label shown in diagnostics.
    pub const fn ratio(&self) -> &'static str {
        match self {
            Cartridge::Red => "36:1",
            Cartridge::Green => "18:1",
            Cartridge::Blue => "6:1",
        }
    }

    /// Free speed of the output shaft.
    pub const fn max_rpm(&self) -> f64 {
        match self {
            Cartridge::Red => 100.0,
            Cartridge::Green => 200.0,
            Cartridge::Blue => 600.0,
        }
    }
}

impl fmt::Display for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.ratio()) }
}

/// Power class of a smart motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorKind {
    /// Full size 11W V5 motor.
    #[default]
    V5,
    /// Half size 5.5W EXP motor.
    Exp,
}

impl MotorKind {
    /// Rated power label shown in diagnostics.
    pub const fn rated_power(&self) -> &'static str {
        match self {
            MotorKind::V5 => "11W",
            MotorKind::Exp => "5.5W",
        }
    }
}

/// What a motor does when it is told to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrakeMode {
    /// Spin down freely.
    #[default]
    Coast,
    /// Short the windings to slow down quickly.
    Brake,
    /// Actively hold the current position.
    Hold,
}

/// A V5 smart motor.
///
/// Positions are absolute encoder readings in degrees and velocities are a
/// signed percentage of the cartridge's free speed, matching the units the
/// drivers see on the controller sticks.
pub trait SmartMotor {
    /// Whether the motor currently reports as installed.
    fn is_connected(&self) -> bool;

    /// Encoder position in degrees.
    fn position(&self) -> Result<f64, DeviceError>;

    /// Internal temperature in degrees Celsius.
    fn temperature(&self) -> Result<f64, DeviceError>;

    /// Installed gear cartridge.
    fn cartridge(&self) -> Result<Cartridge, DeviceError>;

    /// Power class of the motor.
    fn kind(&self) -> MotorKind;

    /// Spins at a signed velocity, in percent of free speed.
    fn spin(&mut self, percent: f64) -> Result<(), DeviceError>;

    /// Moves to an absolute position without waiting for it to arrive.
    fn spin_to_position(&mut self, degrees: f64, percent: f64) -> Result<(), DeviceError>;

    /// Stops using the configured [`BrakeMode`].
    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Sets the behaviour of [`stop`](Self::stop).
    fn set_brake_mode(&mut self, mode: BrakeMode) -> Result<(), DeviceError>;

    /// Zeroes the encoder at the current position.
    fn reset_position(&mut self) -> Result<(), DeviceError>;
}

/// The primary V5 controller.
pub trait Gamepad {
    /// Reads the sticks and buttons. Fails when the controller is not linked.
    fn state(&self) -> Result<GamepadState, DeviceError>;
}

/// A single acting pneumatic cylinder driven from an ADI port.
pub trait Piston {
    /// Extends (`true`) or retracts (`false`) the cylinder.
    fn set_extended(&mut self, extended: bool) -> Result<(), DeviceError>;

    /// The last commanded state.
    fn is_extended(&self) -> Result<bool, DeviceError>;
}

/// The small text screen on the controller, used to tell the drivers about
/// hardware problems.
pub trait OperatorConsole {
    /// Blanks the screen.
    fn clear(&mut self);

    /// Writes `text` at the start of `line` (0 to 2).
    fn print(&mut self, line: u8, text: &str);
}
