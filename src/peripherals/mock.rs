//! In-memory devices for desktop development and tests.
//!
//! Each mock keeps the state a test wants to set (connected, position,
//! temperature) in public fields and records every command it receives, so a
//! test can assert exactly what a control component asked the hardware to do.
//!
//! ```
//! use compbot::peripherals::{SmartMotor, mock::{MockMotor, MotorCommand}};
//!
//! let mut motor = MockMotor::new();
//! motor.spin(50.0).unwrap();
//! assert_eq!(motor.commands, [MotorCommand::Spin(50.0)]);
//!
//! motor.connected = false;
//! assert!(motor.spin(50.0).is_err());
//! ```

use super::{
    BrakeMode, Cartridge, DeviceError, Gamepad, MotorKind, OperatorConsole, Piston, SmartMotor,
    controller::GamepadState,
};

/// A command received by a [`MockMotor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    Spin(f64),
    SpinToPosition { degrees: f64, percent: f64 },
    Stop,
    SetBrakeMode(BrakeMode),
    ResetPosition,
}

/// A smart motor that records commands instead of moving.
#[derive(Debug, Clone)]
pub struct MockMotor {
    pub connected:   bool,
    /// Encoder reading in degrees. Only changes through
    /// [`reset_position`](SmartMotor::reset_position) or [`settle`](Self::settle).
    pub position:    f64,
    pub temperature: f64,
    pub cartridge:   Cartridge,
    pub kind:        MotorKind,
    pub brake_mode:  BrakeMode,
    /// Every command received, including ones rejected while disconnected.
    pub commands:    Vec<MotorCommand>,
}

impl Default for MockMotor {
    fn default() -> Self { Self::new() }
}

impl MockMotor {
    /// A connected green-cartridge V5 motor at position zero.
    pub fn new() -> Self {
        Self {
            connected:   true,
            position:    0.0,
            temperature: 30.0,
            cartridge:   Cartridge::Green,
            kind:        MotorKind::V5,
            brake_mode:  BrakeMode::Coast,
            commands:    Vec::new(),
        }
    }

    pub fn with_cartridge(mut self, cartridge: Cartridge) -> Self {
        self.cartridge = cartridge;
        self
    }

    /// Moves the encoder to the most recent position target, as if the motor
    /// had finished the move.
    pub fn settle(&mut self) {
        let target = self.commands.iter().rev().find_map(|command| match command {
            MotorCommand::SpinToPosition { degrees, .. } => Some(*degrees),
            _ => None,
        });
        if let Some(degrees) = target {
            self.position = degrees;
        }
    }

    /// Position targets received, oldest first.
    pub fn position_targets(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                MotorCommand::SpinToPosition { degrees, .. } => Some(*degrees),
                _ => None,
            })
            .collect()
    }

    pub fn last_command(&self) -> Option<MotorCommand> { self.commands.last().copied() }

    fn record(&mut self, command: MotorCommand) -> Result<(), DeviceError> {
        self.commands.push(command);
        self.check()
    }

    fn check(&self) -> Result<(), DeviceError> {
        if self.connected { Ok(()) } else { Err(DeviceError::Disconnected) }
    }
}

impl SmartMotor for MockMotor {
    fn is_connected(&self) -> bool { self.connected }

    fn position(&self) -> Result<f64, DeviceError> {
        self.check()?;
        Ok(self.position)
    }

    fn temperature(&self) -> Result<f64, DeviceError> {
        self.check()?;
        Ok(self.temperature)
    }

    fn cartridge(&self) -> Result<Cartridge, DeviceError> {
        self.check()?;
        Ok(self.cartridge)
    }

    fn kind(&self) -> MotorKind { self.kind }

    fn spin(&mut self, percent: f64) -> Result<(), DeviceError> {
        self.record(MotorCommand::Spin(percent))
    }

    fn spin_to_position(&mut self, degrees: f64, percent: f64) -> Result<(), DeviceError> {
        self.record(MotorCommand::SpinToPosition { degrees, percent })
    }

    fn stop(&mut self) -> Result<(), DeviceError> { self.record(MotorCommand::Stop) }

    fn set_brake_mode(&mut self, mode: BrakeMode) -> Result<(), DeviceError> {
        self.brake_mode = mode;
        self.record(MotorCommand::SetBrakeMode(mode))
    }

    fn reset_position(&mut self) -> Result<(), DeviceError> {
        self.record(MotorCommand::ResetPosition)?;
        self.position = 0.0;
        Ok(())
    }
}

/// A controller whose state is set by the test. `None` means not linked.
#[derive(Debug, Clone, Default)]
pub struct MockGamepad {
    pub state: Option<GamepadState>,
}

impl Gamepad for MockGamepad {
    fn state(&self) -> Result<GamepadState, DeviceError> {
        self.state.ok_or(DeviceError::Disconnected)
    }
}

/// A piston that remembers every state it was set to.
#[derive(Debug, Clone, Default)]
pub struct MockPiston {
    pub extended: bool,
    pub history:  Vec<bool>,
}

impl Piston for MockPiston {
    fn set_extended(&mut self, extended: bool) -> Result<(), DeviceError> {
        self.extended = extended;
        self.history.push(extended);
        Ok(())
    }

    fn is_extended(&self) -> Result<bool, DeviceError> { Ok(self.extended) }
}

/// A controller screen that keeps its text in memory.
#[derive(Debug, Clone, Default)]
pub struct MockConsole {
    pub lines:  Vec<(u8, String)>,
    pub clears: usize,
}

impl MockConsole {
    /// Text printed since the last clear.
    pub fn text(&self) -> Vec<&str> { self.lines.iter().map(|(_, text)| text.as_str()).collect() }
}

impl OperatorConsole for MockConsole {
    fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    fn print(&mut self, line: u8, text: &str) { self.lines.push((line, text.to_owned())); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_motor_still_records() {
        let mut motor = MockMotor::new().with_cartridge(Cartridge::Red);
        motor.connected = false;
        assert_eq!(motor.stop(), Err(DeviceError::Disconnected));
        assert_eq!(motor.cartridge(), Err(DeviceError::Disconnected));
        assert_eq!(motor.commands, [MotorCommand::Stop]);
    }

    #[test]
    fn unlinked_gamepad_is_an_error() {
        let mut gamepad = MockGamepad::default();
        assert_eq!(gamepad.state(), Err(DeviceError::Disconnected));
        gamepad.state = Some(GamepadState::default());
        assert!(gamepad.state().is_ok());
    }
}
