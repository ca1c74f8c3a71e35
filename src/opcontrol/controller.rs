//! Controller input mapping for operator control.
//!
//! This module provides utilities for mapping controller button presses
//! to motor velocities, arm checkpoints and pistons. It supports:
//!
//! - **Toggle controls**: A press flips a piston (e.g., open/close clamp).
//! - **Dual-button controls**: Two buttons for forward/reverse.
//! - **Ladder controls**: Two buttons step an [`Arm`] up and down its checkpoints.
//! - **Control button modifiers**: Require a "shift" button to be held.
//!
//! # Example
//!
//! ```
//! use compbot::{
//!     opcontrol::controller::{ControllerControl, MotorOutput},
//!     peripherals::{
//!         controller::{ControllerButton, GamepadState},
//!         make_cloneable,
//!         mock::{MockMotor, MotorCommand},
//!     },
//! };
//!
//! let intake = make_cloneable(MockMotor::new());
//! let state = GamepadState::default().with(ControllerButton::ButtonL1, true);
//! let control = ControllerControl::new(state, ControllerButton::ButtonUp);
//!
//! // L1 runs intake forward, L2 runs it backward
//! control.dual_button_to_motors(
//!     ControllerButton::ButtonL1,
//!     ControllerButton::ButtonL2,
//!     std::slice::from_ref(&intake),
//!     MotorOutput::Spin(100.0),
//!     MotorOutput::Spin(-100.0),
//!     MotorOutput::Stop,
//!     false,
//! );
//! assert_eq!(intake.borrow().commands, [MotorCommand::Spin(100.0)]);
//! ```

use log::debug;

use super::arm::Arm;
use crate::peripherals::{
    Piston, Shared, SmartMotor,
    controller::{ControllerButton, GamepadState, Toggle},
};

/// What to send a motor for one button state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorOutput {
    /// Spin at a signed velocity in percent.
    Spin(f64),
    /// Stop using the motor's brake mode.
    Stop,
}

impl MotorOutput {
    pub(crate) fn apply<M: SmartMotor>(self, motor: &mut M) {
        let result = match self {
            MotorOutput::Spin(percent) => motor.spin(percent),
            MotorOutput::Stop => motor.stop(),
        };
        result.unwrap_or_else(|e| {
            debug!("Motor Command Error: {}", e);
        });
    }
}

/// Controller input mapper for operator control.
///
/// This struct captures one controller reading and whether the designated
/// "control button" is held. The control button acts as a modifier (like a
/// shift key).
///
/// # Control Button
///
/// When `ctrl: true` is passed to a mapping method, the action only triggers
/// if the control button is held; with `ctrl: false` it only triggers if the
/// control button is released. The same buttons can therefore drive two
/// different actions.
pub struct ControllerControl {
    /// The current state of all controller buttons and sticks.
    state:      GamepadState,
    /// Whether the control/modifier button is held.
    controlkey: bool,
}

impl ControllerControl {
    /// Creates a mapper for one reading, with `button` as the control button.
    pub fn new(state: GamepadState, button: ControllerButton) -> Self {
        ControllerControl {
            state,
            controlkey: state.button(button),
        }
    }

    /// Creates a mapper with no control button, for mappings that apply in
    /// every mode. Use `ctrl: false` with it.
    pub const fn unmodified(state: GamepadState) -> Self {
        ControllerControl {
            state,
            controlkey: false,
        }
    }

    /// Feeds `button` into `toggle` and drives `piston` to the toggled state
    /// when it flips. Ignores the control button.
    pub fn button_to_piston_toggle<P: Piston>(
        &self,
        button: ControllerButton,
        toggle: &mut Toggle,
        piston: &mut P,
    ) {
        let before = toggle.state();
        let after = toggle.update(self.state.button(button));
        if after != before {
            piston.set_extended(after).unwrap_or_else(|e| {
                debug!("Piston Set Error: {}", e);
            });
        }
    }

    /// Maps 2 Buttons to one or more motors. The High Button sends `high`,
    /// the Low Button sends `low`, and neither sends `passive`. High wins if
    /// both are held.
    #[allow(clippy::too_many_arguments)]
    pub fn dual_button_to_motors<M: SmartMotor>(
        &self,
        button_high: ControllerButton,
        button_low: ControllerButton,
        motors: &[Shared<M>],
        high: MotorOutput,
        low: MotorOutput,
        passive: MotorOutput,
        ctrl: bool,
    ) {
        if self.controlkey != ctrl {
            return;
        }
        let output = if self.state.button(button_high) {
            high
        } else if self.state.button(button_low) {
            low
        } else {
            passive
        };
        for motor in motors {
            output.apply(&mut *motor.borrow_mut());
        }
    }

    /// Maps 2 Buttons to the arm ladder. `button_up` steps to the next
    /// checkpoint above, `button_down` to the next below. With neither held
    /// nothing is sent, so a tap carries the arm all the way to its
    /// checkpoint.
    pub fn dual_button_to_ladder<M: SmartMotor>(
        &self,
        button_up: ControllerButton,
        button_down: ControllerButton,
        arm: &Arm<M>,
        percent: f64,
        ctrl: bool,
    ) {
        if self.controlkey != ctrl {
            return;
        }
        if self.state.button(button_up) {
            arm.step_up(percent);
        } else if self.state.button(button_down) {
            arm.step_down(percent);
        }
    }
}
