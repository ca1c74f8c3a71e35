//! Operator control for the driver-controlled period.
//!
//! [`OpControl::cycle`] runs once per drive loop tick (every 20 ms) with a
//! fresh controller reading. One cycle:
//!
//! 1. drives the sticks through the published drive configuration,
//! 2. re-runs drive configuration selection on a press of X,
//! 3. runs the intake on L1 / L2,
//! 4. moves the arm on R1 / R2, raw while Up is held and along the
//!    checkpoint ladder otherwise,
//! 5. toggles the clamp on a press of A.
//!
//! [`OpControl::cycle_reading`] wraps a cycle around a raw controller read. An
//! unlinked controller reads as centered sticks with nothing pressed, so the
//! robot stops instead of holding its last command.
//!
//! # Example
//!
//! ```
//! use compbot::{
//!     config::RobotConfig,
//!     drivetrain::{DriveConfig, DriveTrain},
//!     opcontrol::{OpControl, arm::Arm},
//!     peripherals::{
//!         controller::{ControllerButton, GamepadState},
//!         mock::{MockConsole, MockMotor, MockPiston},
//!     },
//!     robot::Subsystems,
//!     snapshot::SnapshotCell,
//! };
//!
//! let mut robot = Subsystems::new(
//!     DriveTrain::new(MockMotor::new(), MockMotor::new(), MockMotor::new(), MockMotor::new()),
//!     Arm::new(MockMotor::new(), MockMotor::new()),
//!     MockMotor::new(),
//!     MockPiston::default(),
//! );
//! let mut monitor = robot.monitor(SnapshotCell::new(DriveConfig::FourWheel));
//! let mut console = MockConsole::default();
//! let mut opcontrol = OpControl::new(&RobotConfig::default(), &robot.clamp);
//!
//! let input = GamepadState::default().with(ControllerButton::ButtonA, true);
//! opcontrol.cycle(&input, &mut robot, &mut monitor, &mut console);
//! assert!(robot.clamp.extended);
//! ```

/// Arm checkpoint ladder.
pub mod arm;

/// Controller input mapping utilities.
///
/// Provides [`ControllerControl`](controller::ControllerControl) for
/// mapping buttons to motors, the arm ladder and pistons.
pub mod controller;

use log::{debug, info, warn};

use self::controller::{ControllerControl, MotorOutput};
use crate::{
    config::RobotConfig,
    drivetrain::DriveMonitor,
    peripherals::{
        DeviceError, OperatorConsole, Piston, SmartMotor,
        controller::{ControllerButton, EdgeDetector, GamepadState, Toggle},
    },
    robot::Subsystems,
};

/// Button held to switch the arm from the ladder to raw velocity control.
pub const ARM_MODIFIER: ControllerButton = ControllerButton::ButtonUp;

/// State carried between operator control cycles.
#[derive(Debug, Clone)]
pub struct OpControl {
    clamp:           Toggle,
    recheck:         EdgeDetector,
    /// Whether the arm modifier was held last cycle.
    arm_manual:      bool,
    /// Whether the last controller read succeeded.
    linked:          bool,
    drive_velocity:  f64,
    arm_velocity:    f64,
    intake_velocity: f64,
}

impl OpControl {
    /// The clamp toggle starts from the piston's current state, so a driver
    /// period entered with the clamp closed releases it on the first press.
    pub fn new<P: Piston>(config: &RobotConfig, clamp: &P) -> Self {
        let extended = clamp.is_extended().unwrap_or_else(|e| {
            debug!("Piston State Error: {}", e);
            false
        });
        Self {
            clamp:           Toggle::new(extended),
            recheck:         EdgeDetector::new(),
            arm_manual:      false,
            linked:          true,
            drive_velocity:  config.drive_velocity,
            arm_velocity:    config.arm_velocity,
            intake_velocity: config.intake_velocity,
        }
    }

    /// Whether the clamp is currently commanded closed.
    pub const fn clamp_engaged(&self) -> bool { self.clamp.state() }

    /// Runs one control cycle for a controller read. A failed read runs the
    /// cycle with nothing pressed; the loss and the relink are logged once.
    pub fn cycle_reading<M: SmartMotor, P: Piston>(
        &mut self,
        reading: Result<GamepadState, DeviceError>,
        robot: &mut Subsystems<M, P>,
        monitor: &mut DriveMonitor<M>,
        console: &mut dyn OperatorConsole,
    ) {
        let input = match reading {
            Ok(input) => {
                if !self.linked {
                    info!("Controller linked");
                    self.linked = true;
                }
                input
            }
            Err(e) => {
                if self.linked {
                    warn!("Controller State Error: {}", e);
                    self.linked = false;
                }
                GamepadState::default()
            }
        };
        self.cycle(&input, robot, monitor, console);
    }

    /// Runs one control cycle for `input`.
    pub fn cycle<M: SmartMotor, P: Piston>(
        &mut self,
        input: &GamepadState,
        robot: &mut Subsystems<M, P>,
        monitor: &mut DriveMonitor<M>,
        console: &mut dyn OperatorConsole,
    ) {
        robot.drive.tank(monitor.current(), input.left_y, input.right_y, self.drive_velocity);

        if self.recheck.rising(input.button_x) {
            let config = monitor.check(console);
            info!("Manual motor recheck: {}", config);
        }

        ControllerControl::unmodified(*input).dual_button_to_motors(
            ControllerButton::ButtonL1,
            ControllerButton::ButtonL2,
            std::slice::from_ref(&robot.intake),
            MotorOutput::Spin(self.intake_velocity),
            MotorOutput::Spin(-self.intake_velocity),
            MotorOutput::Stop,
            false,
        );

        let manual = input.button(ARM_MODIFIER);
        if self.arm_manual && !manual {
            for motor in &robot.arm.motors {
                MotorOutput::Stop.apply(&mut *motor.borrow_mut());
            }
        }
        self.arm_manual = manual;

        let control = ControllerControl::new(*input, ARM_MODIFIER);
        control.dual_button_to_motors(
            ControllerButton::ButtonR1,
            ControllerButton::ButtonR2,
            &robot.arm.motors,
            MotorOutput::Spin(self.arm_velocity),
            MotorOutput::Spin(-self.arm_velocity),
            MotorOutput::Stop,
            true,
        );
        control.dual_button_to_ladder(
            ControllerButton::ButtonR1,
            ControllerButton::ButtonR2,
            &robot.arm,
            self.arm_velocity,
            false,
        );

        control.button_to_piston_toggle(ControllerButton::ButtonA, &mut self.clamp, &mut robot.clamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        drivetrain::{DriveConfig, DriveTrain},
        opcontrol::arm::Arm,
        peripherals::mock::{MockConsole, MockMotor, MockPiston, MotorCommand},
        snapshot::SnapshotCell,
    };

    struct Rig {
        robot:     Subsystems<MockMotor, MockPiston>,
        monitor:   DriveMonitor<MockMotor>,
        console:   MockConsole,
        opcontrol: OpControl,
    }

    impl Rig {
        fn new() -> Self {
            let robot = Subsystems::new(
                DriveTrain::new(MockMotor::new(), MockMotor::new(), MockMotor::new(), MockMotor::new()),
                Arm::new(MockMotor::new(), MockMotor::new()),
                MockMotor::new(),
                MockPiston::default(),
            );
            let monitor = robot.monitor(SnapshotCell::new(DriveConfig::FourWheel));
            let opcontrol = OpControl::new(&RobotConfig::default(), &robot.clamp);
            Self {
                robot,
                monitor,
                console: MockConsole::default(),
                opcontrol,
            }
        }

        fn cycle(&mut self, input: GamepadState) {
            self.opcontrol
                .cycle(&input, &mut self.robot, &mut self.monitor, &mut self.console);
        }

        fn clear_commands(&self) {
            for registered in self.robot.registry.iter() {
                registered.motor.borrow_mut().commands.clear();
            }
        }
    }

    fn pressed(buttons: &[ControllerButton]) -> GamepadState {
        buttons.iter().fold(GamepadState::default(), |s, b| s.with(*b, true))
    }

    #[test]
    fn sticks_drive_the_published_config() {
        let mut rig = Rig::new();
        let input = GamepadState {
            left_y: 80.0,
            right_y: -30.0,
            ..Default::default()
        };
        rig.cycle(input);
        assert_eq!(rig.robot.drive.left_back.borrow().commands, [MotorCommand::Spin(80.0)]);
        assert_eq!(rig.robot.drive.right_front.borrow().commands, [MotorCommand::Spin(-30.0)]);

        rig.clear_commands();
        rig.monitor.cell().publish(DriveConfig::FrontWheel);
        rig.cycle(input);
        assert_eq!(rig.robot.drive.left_front.borrow().commands, [MotorCommand::Spin(80.0)]);
        assert!(rig.robot.drive.left_back.borrow().commands.is_empty());
    }

    #[test]
    fn intake_runs_in_both_arm_modes() {
        let mut rig = Rig::new();
        rig.cycle(pressed(&[ControllerButton::ButtonL1]));
        rig.cycle(pressed(&[ControllerButton::ButtonL2, ARM_MODIFIER]));
        rig.cycle(GamepadState::default());
        assert_eq!(
            rig.robot.intake.borrow().commands,
            [MotorCommand::Spin(100.0), MotorCommand::Spin(-100.0), MotorCommand::Stop]
        );
    }

    #[test]
    fn modifier_gives_raw_arm_control() {
        let mut rig = Rig::new();
        rig.cycle(pressed(&[ARM_MODIFIER, ControllerButton::ButtonR2]));
        assert_eq!(rig.robot.arm.left().borrow().commands, [MotorCommand::Spin(-50.0)]);
        assert_eq!(rig.robot.arm.right().borrow().commands, [MotorCommand::Spin(-50.0)]);

        rig.cycle(pressed(&[ARM_MODIFIER]));
        assert_eq!(rig.robot.arm.left().borrow().last_command(), Some(MotorCommand::Stop));
    }

    #[test]
    fn without_modifier_the_arm_climbs_the_ladder() {
        let mut rig = Rig::new();
        rig.robot.arm.left().borrow_mut().position = 250.0;
        rig.cycle(pressed(&[ControllerButton::ButtonR1]));
        assert_eq!(
            rig.robot.arm.left().borrow().last_command(),
            Some(MotorCommand::SpinToPosition {
                degrees: 400.0,
                percent: 50.0,
            })
        );

        rig.cycle(pressed(&[ControllerButton::ButtonR2]));
        assert_eq!(
            rig.robot.arm.right().borrow().last_command(),
            Some(MotorCommand::SpinToPosition {
                degrees: 0.0,
                percent: 50.0,
            })
        );
    }

    #[test]
    fn one_tap_carries_the_arm_to_its_checkpoint() {
        let mut rig = Rig::new();
        rig.cycle(pressed(&[ControllerButton::ButtonR1]));
        rig.cycle(GamepadState::default());
        rig.cycle(GamepadState::default());

        let target = MotorCommand::SpinToPosition {
            degrees: 200.0,
            percent: 50.0,
        };
        assert_eq!(rig.robot.arm.left().borrow().commands, [target]);
        assert_eq!(rig.robot.arm.right().borrow().commands, [target]);
    }

    #[test]
    fn leaving_manual_mode_stops_the_arm() {
        let mut rig = Rig::new();
        rig.cycle(pressed(&[ARM_MODIFIER, ControllerButton::ButtonR1]));
        rig.cycle(GamepadState::default());
        assert_eq!(
            rig.robot.arm.left().borrow().commands,
            [MotorCommand::Spin(50.0), MotorCommand::Stop]
        );

        rig.cycle(GamepadState::default());
        assert_eq!(rig.robot.arm.left().borrow().commands.len(), 2);
    }

    #[test]
    fn clamp_toggle_starts_from_the_piston() {
        let mut rig = Rig::new();
        let a = pressed(&[ControllerButton::ButtonA]);
        rig.cycle(a);
        assert!(rig.robot.clamp.extended);

        // A new driver period picks up the closed clamp.
        rig.opcontrol = OpControl::new(&RobotConfig::default(), &rig.robot.clamp);
        assert!(rig.opcontrol.clamp_engaged());
        rig.cycle(GamepadState::default());
        rig.cycle(a);
        assert_eq!(rig.robot.clamp.history, [true, false]);
        assert!(!rig.robot.clamp.extended);
    }

    #[test]
    fn lost_controller_stops_the_robot() {
        let mut rig = Rig::new();
        let input = GamepadState {
            left_y: 60.0,
            right_y: 60.0,
            ..pressed(&[ControllerButton::ButtonL1])
        };
        rig.opcontrol
            .cycle_reading(Ok(input), &mut rig.robot, &mut rig.monitor, &mut rig.console);
        rig.clear_commands();

        for _ in 0..2 {
            rig.opcontrol.cycle_reading(
                Err(DeviceError::Disconnected),
                &mut rig.robot,
                &mut rig.monitor,
                &mut rig.console,
            );
        }
        for motor in [&rig.robot.drive.left_front, &rig.robot.drive.right_back] {
            assert_eq!(motor.borrow().commands, [MotorCommand::Spin(0.0), MotorCommand::Spin(0.0)]);
        }
        assert_eq!(rig.robot.intake.borrow().last_command(), Some(MotorCommand::Stop));
    }

    #[test]
    fn clamp_flips_once_per_press() {
        let mut rig = Rig::new();
        let a = pressed(&[ControllerButton::ButtonA]);
        for input in [a, a, a, a, GamepadState::default(), GamepadState::default(), a, a] {
            rig.cycle(input);
        }
        assert_eq!(rig.robot.clamp.history, [true, false]);
        assert!(!rig.opcontrol.clamp_engaged());
    }

    #[test]
    fn x_rechecks_motors_on_press_only() {
        let mut rig = Rig::new();
        rig.robot.drive.right_back.borrow_mut().connected = false;
        let x = pressed(&[ControllerButton::ButtonX]);

        rig.cycle(GamepadState::default());
        assert_eq!(rig.monitor.current(), DriveConfig::FourWheel);

        rig.cycle(x);
        assert_eq!(rig.monitor.current(), DriveConfig::FrontWheel);
        assert_eq!(rig.console.clears, 1);

        rig.cycle(x);
        assert_eq!(rig.console.clears, 1);
    }
}
