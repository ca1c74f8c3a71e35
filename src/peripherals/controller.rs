//! Controller input snapshots.
//!
//! The drive loop reads the controller once per cycle into a [`GamepadState`]
//! and everything downstream works from that copy, so a single cycle always
//! sees a consistent set of sticks and buttons.
//!
//! Button presses that should act once per press (the clamp toggle, the motor
//! recheck, the auton selector bumper) go through an [`EdgeDetector`], which
//! remembers the previous cycle's state and only fires on the rising edge.
//!
//! # Example
//!
//! ```
//! use compbot::peripherals::controller::{ControllerButton, GamepadState, Toggle};
//!
//! let mut clamp = Toggle::new(false);
//! let mut state = GamepadState::default();
//!
//! state.button_a = true;
//! assert!(clamp.update(state.button(ControllerButton::ButtonA)));
//! // Still held on the next cycle: no change.
//! assert!(clamp.update(state.button(ControllerButton::ButtonA)));
//! ```

/// One reading of the controller.
///
/// Stick axes are in percent, `-100.0..=100.0`, positive forward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    /// Left stick vertical axis (Axis 3).
    pub left_y:       f64,
    /// Right stick vertical axis (Axis 2).
    pub right_y:      f64,
    pub button_a:     bool,
    pub button_b:     bool,
    pub button_x:     bool,
    pub button_y:     bool,
    pub button_up:    bool,
    pub button_down:  bool,
    pub button_left:  bool,
    pub button_right: bool,
    pub button_l1:    bool,
    pub button_l2:    bool,
    pub button_r1:    bool,
    pub button_r2:    bool,
}

impl GamepadState {
    /// Whether `button` is held in this reading.
    pub const fn button(&self, button: ControllerButton) -> bool {
        match button {
            ControllerButton::ButtonA => self.button_a,
            ControllerButton::ButtonB => self.button_b,
            ControllerButton::ButtonX => self.button_x,
            ControllerButton::ButtonY => self.button_y,
            ControllerButton::ButtonUp => self.button_up,
            ControllerButton::ButtonDown => self.button_down,
            ControllerButton::ButtonLeft => self.button_left,
            ControllerButton::ButtonRight => self.button_right,
            ControllerButton::ButtonL1 => self.button_l1,
            ControllerButton::ButtonL2 => self.button_l2,
            ControllerButton::ButtonR1 => self.button_r1,
            ControllerButton::ButtonR2 => self.button_r2,
        }
    }

    /// Returns a copy with `button` set to `pressed`.
    #[must_use]
    pub const fn with(mut self, button: ControllerButton, pressed: bool) -> Self {
        match button {
            ControllerButton::ButtonA => self.button_a = pressed,
            ControllerButton::ButtonB => self.button_b = pressed,
            ControllerButton::ButtonX => self.button_x = pressed,
            ControllerButton::ButtonY => self.button_y = pressed,
            ControllerButton::ButtonUp => self.button_up = pressed,
            ControllerButton::ButtonDown => self.button_down = pressed,
            ControllerButton::ButtonLeft => self.button_left = pressed,
            ControllerButton::ButtonRight => self.button_right = pressed,
            ControllerButton::ButtonL1 => self.button_l1 = pressed,
            ControllerButton::ButtonL2 => self.button_l2 = pressed,
            ControllerButton::ButtonR1 => self.button_r1 = pressed,
            ControllerButton::ButtonR2 => self.button_r2 = pressed,
        }
        self
    }
}

/// A list of Controller Buttons.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

/// Rising-edge detector for a button sampled once per cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self { Self { previous: false } }

    /// Feeds this cycle's state. Returns `true` only on the cycle the button
    /// goes from released to pressed.
    pub fn rising(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.previous;
        self.previous = pressed;
        edge
    }
}

/// A boolean that flips once per press of a button.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toggle {
    state: bool,
    edge:  EdgeDetector,
}

impl Toggle {
    pub const fn new(initial: bool) -> Self {
        Self {
            state: initial,
            edge:  EdgeDetector::new(),
        }
    }

    /// Feeds this cycle's button state and returns the toggled value.
    pub fn update(&mut self, pressed: bool) -> bool {
        if self.edge.rising(pressed) {
            self.state = !self.state;
        }
        self.state
    }

    pub const fn state(&self) -> bool { self.state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fires_once_per_press() {
        let mut edge = EdgeDetector::new();
        let samples = [false, true, true, true, false, true, false];
        let fired: Vec<bool> = samples.iter().map(|&s| edge.rising(s)).collect();
        assert_eq!(fired, [false, true, false, false, false, true, false]);
    }

    #[test]
    fn toggle_flips_once_while_held() {
        let mut toggle = Toggle::new(false);
        for _ in 0..25 {
            assert!(toggle.update(true));
        }
        assert!(toggle.update(false));
        assert!(!toggle.update(true));
        assert!(!toggle.state());
    }

    #[test]
    fn with_sets_only_the_named_button() {
        let state = GamepadState::default().with(ControllerButton::ButtonR2, true);
        assert!(state.button(ControllerButton::ButtonR2));
        assert!(!state.button(ControllerButton::ButtonR1));
        assert!(!state.button_l2);
    }
}
