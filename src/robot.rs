//! The robot's mechanisms, built once and passed to every loop.
//!
//! [`Subsystems`] owns the device handles for the drivetrain, the arm, the
//! chain intake and the mobile-goal clamp, and registers every motor under its
//! logical name in a fixed order:
//!
//! | Name | Motor |
//! |------|-------|
//! | `LA` | left arm |
//! | `RA` | right arm |
//! | `LB` | left back drive |
//! | `LF` | left front drive |
//! | `RB` | right back drive |
//! | `RF` | right front drive |
//! | `IN` | intake |

use log::info;

use crate::{
    drivetrain::{DriveConfig, DriveMonitor, DriveMotor, DriveTrain},
    opcontrol::arm::Arm,
    peripherals::{
        BrakeMode, OperatorConsole, Piston, Shared, SmartMotor, make_cloneable,
        registry::MotorRegistry,
    },
    snapshot::SnapshotCell,
};

/// Registration order of the drive motors, between the arm and the intake.
const DRIVE_ORDER: [DriveMotor; 4] = [
    DriveMotor::LeftBack,
    DriveMotor::LeftFront,
    DriveMotor::RightBack,
    DriveMotor::RightFront,
];

/// Every mechanism on the robot.
pub struct Subsystems<M, P> {
    pub drive:    DriveTrain<M>,
    pub arm:      Arm<M>,
    pub intake:   Shared<M>,
    pub clamp:    P,
    pub registry: MotorRegistry<M>,
}

impl<M: SmartMotor, P: Piston> Subsystems<M, P> {
    /// Builds the subsystems and registers every motor.
    pub fn new(drive: DriveTrain<M>, arm: Arm<M>, intake: M, clamp: P) -> Self {
        let intake = make_cloneable(intake);
        let mut registry = MotorRegistry::new();
        registry.register(arm.left().clone(), "LA");
        registry.register(arm.right().clone(), "RA");
        for motor in DRIVE_ORDER {
            registry.register(drive.motor(motor).clone(), motor.name());
        }
        registry.register(intake.clone(), "IN");

        Self {
            drive,
            arm,
            intake,
            clamp,
            registry,
        }
    }

    /// A monitor over this robot's motors that publishes into `config`.
    pub fn monitor(&self, config: SnapshotCell<DriveConfig>) -> DriveMonitor<M> {
        DriveMonitor::new(self.registry.clone(), config)
    }

    /// Pre-match setup, run once before the first match phase.
    ///
    /// The arm and intake hold position when stopped and the drive coasts.
    /// Every encoder is zeroed, so trajectories and ladder checkpoints are
    /// measured from the starting pose. Finally the drive configuration is
    /// selected and published.
    pub fn prepare(
        &self,
        monitor: &mut DriveMonitor<M>,
        console: &mut dyn OperatorConsole,
    ) -> DriveConfig {
        for motor in self.arm.motors.iter().chain([&self.intake]) {
            let _ = motor.borrow_mut().set_brake_mode(BrakeMode::Hold);
        }
        self.drive.set_brakemode(BrakeMode::Coast);

        for registered in self.registry.iter() {
            let _ = registered.motor.borrow_mut().reset_position();
        }

        let config = monitor.check(console);
        info!("Robot prepared, drive configuration: {}", config);
        config
    }
}
