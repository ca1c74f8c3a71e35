//! vexide implementations of the hardware traits.
//!
//! Only built with the `vex` feature. Every vexide failure is reported as a
//! [`DeviceError`]; the underlying error is logged at `trace` level.

use std::fmt::Debug;

use log::trace;
use vexide::{
    math::Angle,
    prelude::{AdiDigitalOut, Controller, Motor},
    smart::{
        SmartDevice,
        motor::{BrakeMode as VexBrakeMode, Gearset, MotorType},
    },
};

use super::{
    BrakeMode, Cartridge, DeviceError, Gamepad, MotorKind, OperatorConsole, Piston, SmartMotor,
    controller::GamepadState,
};

fn device_error<E: Debug>(e: E) -> DeviceError {
    trace!("vexide error: {:?}", e);
    DeviceError::Disconnected
}

fn cartridge(gearset: Gearset) -> Cartridge {
    match gearset {
        Gearset::Red => Cartridge::Red,
        Gearset::Green => Cartridge::Green,
        Gearset::Blue => Cartridge::Blue,
    }
}

/// A vexide [`Motor`] with the brake mode [`SmartMotor::stop`] uses.
pub struct VexMotor {
    motor: Motor,
    brake: VexBrakeMode,
}

impl VexMotor {
    pub fn new(motor: Motor) -> Self {
        Self {
            motor,
            brake: VexBrakeMode::Coast,
        }
    }

    /// Converts a percentage of free speed to rpm for the installed cartridge.
    fn rpm(&self, percent: f64) -> i32 {
        let max = self.motor.gearset().map_or(Cartridge::Green, cartridge).max_rpm();
        (percent.clamp(-100.0, 100.0) / 100.0 * max).round() as i32
    }
}

impl SmartMotor for VexMotor {
    fn is_connected(&self) -> bool { self.motor.is_connected() }

    fn position(&self) -> Result<f64, DeviceError> {
        self.motor.position().map(|a| a.as_degrees()).map_err(device_error)
    }

    fn temperature(&self) -> Result<f64, DeviceError> { self.motor.temperature().map_err(device_error) }

    fn cartridge(&self) -> Result<Cartridge, DeviceError> {
        self.motor.gearset().map(cartridge).map_err(device_error)
    }

    fn kind(&self) -> MotorKind {
        match self.motor.motor_type() {
            MotorType::Exp => MotorKind::Exp,
            MotorType::V5 => MotorKind::V5,
        }
    }

    fn spin(&mut self, percent: f64) -> Result<(), DeviceError> {
        let rpm = self.rpm(percent);
        self.motor.set_velocity(rpm).map_err(device_error)
    }

    fn spin_to_position(&mut self, degrees: f64, percent: f64) -> Result<(), DeviceError> {
        let rpm = self.rpm(percent.abs());
        self.motor
            .set_position_target(Angle::from_degrees(degrees), rpm)
            .map_err(device_error)
    }

    fn stop(&mut self) -> Result<(), DeviceError> { self.motor.brake(self.brake).map_err(device_error) }

    fn set_brake_mode(&mut self, mode: BrakeMode) -> Result<(), DeviceError> {
        self.brake = match mode {
            BrakeMode::Coast => VexBrakeMode::Coast,
            BrakeMode::Brake => VexBrakeMode::Brake,
            BrakeMode::Hold => VexBrakeMode::Hold,
        };
        Ok(())
    }

    fn reset_position(&mut self) -> Result<(), DeviceError> { self.motor.reset_position().map_err(device_error) }
}

impl Gamepad for Controller {
    fn state(&self) -> Result<GamepadState, DeviceError> {
        let state = Controller::state(self).map_err(device_error)?;
        Ok(GamepadState {
            left_y:       state.left_stick.y() * 100.0,
            right_y:      state.right_stick.y() * 100.0,
            button_a:     state.button_a.is_pressed(),
            button_b:     state.button_b.is_pressed(),
            button_x:     state.button_x.is_pressed(),
            button_y:     state.button_y.is_pressed(),
            button_up:    state.button_up.is_pressed(),
            button_down:  state.button_down.is_pressed(),
            button_left:  state.button_left.is_pressed(),
            button_right: state.button_right.is_pressed(),
            button_l1:    state.button_l1.is_pressed(),
            button_l2:    state.button_l2.is_pressed(),
            button_r1:    state.button_r1.is_pressed(),
            button_r2:    state.button_r2.is_pressed(),
        })
    }
}

/// A solenoid on an ADI port. Extended is logic high.
pub struct VexPiston {
    port:     AdiDigitalOut,
    extended: bool,
}

impl VexPiston {
    pub fn new(port: AdiDigitalOut) -> Self {
        Self {
            port,
            extended: false,
        }
    }
}

impl Piston for VexPiston {
    fn set_extended(&mut self, extended: bool) -> Result<(), DeviceError> {
        let result = if extended { self.port.set_high() } else { self.port.set_low() };
        result.map_err(device_error)?;
        self.extended = extended;
        Ok(())
    }

    fn is_extended(&self) -> Result<bool, DeviceError> { Ok(self.extended) }
}

impl OperatorConsole for Controller {
    fn clear(&mut self) {
        self.try_clear_screen().unwrap_or_else(|e| {
            trace!("Controller Screen Error: {:?}", e);
        });
    }

    fn print(&mut self, line: u8, text: &str) {
        self.try_set_text(text, line + 1, 1).unwrap_or_else(|e| {
            trace!("Controller Screen Error: {:?}", e);
        });
    }
}
