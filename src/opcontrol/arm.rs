//! Two-motor arm with a fixed ladder of checkpoints.
//!
//! Outside manual mode the arm only ever moves to one of five absolute
//! positions. Stepping up goes to the first checkpoint strictly above the
//! arm's current position and stepping down goes one rung below the highest
//! checkpoint the arm has reached.

use log::debug;

use crate::peripherals::{DeviceError, Shared, SmartMotor, make_cloneable};

/// Arm checkpoints in degrees, bottom to top.
pub const ARM_CHECKPOINTS: [f64; 5] = [0.0, 200.0, 400.0, 600.0, 800.0];

/// Target for one step up from `position`, or `None` at the top rung.
pub fn ladder_up(position: f64) -> Option<f64> {
    ARM_CHECKPOINTS[1..].iter().copied().find(|&rung| position < rung)
}

/// Target for one step down from `position`, or `None` below the first rung.
pub fn ladder_down(position: f64) -> Option<f64> {
    ARM_CHECKPOINTS
        .windows(2)
        .rev()
        .find(|pair| position >= pair[1])
        .map(|pair| pair[0])
}

/// The left and right arm motors, always commanded together.
///
/// The right motor is mounted mirrored; its direction is reversed when the
/// hardware is constructed so both take the same commands here.
pub struct Arm<M> {
    pub motors: [Shared<M>; 2],
}

impl<M> Clone for Arm<M> {
    fn clone(&self) -> Self {
        Self {
            motors: self.motors.clone(),
        }
    }
}

impl<M: SmartMotor> Arm<M> {
    pub fn new(left: M, right: M) -> Self {
        Self {
            motors: [make_cloneable(left), make_cloneable(right)],
        }
    }

    pub fn left(&self) -> &Shared<M> { &self.motors[0] }

    pub fn right(&self) -> &Shared<M> { &self.motors[1] }

    /// Arm position in degrees, read from the left motor and from the right
    /// one if the left cannot be read.
    pub fn position(&self) -> Result<f64, DeviceError> {
        self.left()
            .borrow()
            .position()
            .or_else(|_| self.right().borrow().position())
    }

    pub fn spin_to(&self, degrees: f64, percent: f64) {
        for motor in &self.motors {
            let _ = motor.borrow_mut().spin_to_position(degrees, percent);
        }
    }

    /// Moves to the next checkpoint up. Returns the target, if any.
    pub fn step_up(&self, percent: f64) -> Option<f64> { self.step(percent, ladder_up) }

    /// Moves to the next checkpoint down. Returns the target, if any.
    pub fn step_down(&self, percent: f64) -> Option<f64> { self.step(percent, ladder_down) }

    fn step(&self, percent: f64, rung: fn(f64) -> Option<f64>) -> Option<f64> {
        let position = self
            .position()
            .inspect_err(|e| debug!("Arm position unavailable: {}", e))
            .ok()?;
        let target = rung(position)?;
        self.spin_to(target, percent);
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::mock::{MockMotor, MotorCommand};

    #[test]
    fn up_goes_to_next_rung_strictly_above() {
        assert_eq!(ladder_up(-35.0), Some(200.0));
        assert_eq!(ladder_up(0.0), Some(200.0));
        assert_eq!(ladder_up(199.9), Some(200.0));
        assert_eq!(ladder_up(200.0), Some(400.0));
        assert_eq!(ladder_up(650.0), Some(800.0));
        assert_eq!(ladder_up(800.0), None);
        assert_eq!(ladder_up(950.0), None);
    }

    #[test]
    fn down_goes_one_rung_below_highest_reached() {
        assert_eq!(ladder_down(1000.0), Some(600.0));
        assert_eq!(ladder_down(800.0), Some(600.0));
        assert_eq!(ladder_down(799.0), Some(400.0));
        assert_eq!(ladder_down(450.0), Some(200.0));
        assert_eq!(ladder_down(200.0), Some(0.0));
        assert_eq!(ladder_down(199.0), None);
        assert_eq!(ladder_down(-20.0), None);
    }

    #[test]
    fn ladder_only_targets_checkpoints() {
        let mut position = -500.0;
        while position <= 1500.0 {
            for target in [ladder_up(position), ladder_down(position)].into_iter().flatten() {
                assert!(ARM_CHECKPOINTS.contains(&target), "{position} -> {target}");
            }
            position += 7.5;
        }
    }

    #[test]
    fn holding_up_climbs_to_the_top_and_stops() {
        let arm = Arm::new(MockMotor::new(), MockMotor::new());
        let mut targets = Vec::new();
        while let Some(target) = arm.step_up(50.0) {
            targets.push(target);
            arm.left().borrow_mut().settle();
            arm.right().borrow_mut().settle();
        }
        assert_eq!(targets, [200.0, 400.0, 600.0, 800.0]);
        assert_eq!(
            arm.right().borrow().last_command(),
            Some(MotorCommand::SpinToPosition {
                degrees: 800.0,
                percent: 50.0,
            })
        );
    }

    #[test]
    fn position_falls_back_to_right_motor() {
        let arm = Arm::new(MockMotor::new(), MockMotor::new());
        arm.left().borrow_mut().connected = false;
        arm.right().borrow_mut().position = 420.0;
        assert_eq!(arm.position(), Ok(420.0));
        assert_eq!(arm.step_down(50.0), Some(200.0));

        arm.right().borrow_mut().connected = false;
        assert_eq!(arm.step_up(50.0), None);
    }
}
