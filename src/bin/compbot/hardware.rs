use compbot::{
    auton::selector::AutonSelector,
    competition::MatchPhase,
    config::RobotConfig,
    drivetrain::{DriveConfig, DriveTrain},
    opcontrol::arm::Arm,
    peripherals::{
        Shared, make_cloneable,
        vex::{VexMotor, VexPiston},
    },
    robot::Subsystems,
    snapshot::SnapshotCell,
};
use vexide::{display::Display, prelude::*};

/// Devices owned by a single background loop each.
pub struct LoopDevices {
    /// Brain screen, drawn by the status loop.
    pub display: Display,
    /// Auton selector bumper.
    pub bumper:  AdiDigitalIn,
}

/// Everything the competition callbacks and background loops share.
pub struct Robot {
    pub subsystems:   Subsystems<VexMotor, VexPiston>,
    pub controller:   Shared<Controller>,
    pub selector:     Shared<AutonSelector>,
    pub phase:        SnapshotCell<MatchPhase>,
    pub drive_config: SnapshotCell<DriveConfig>,
    pub config:       RobotConfig,
}

impl Robot {
    /// Wires the robot to its ports.
    pub fn default_config(peripherals: Peripherals, config: RobotConfig) -> (Self, LoopDevices) {
        let drive = DriveTrain::new(
            VexMotor::new(Motor::new(peripherals.port_11, Gearset::Green, Direction::Reverse)),
            VexMotor::new(Motor::new(peripherals.port_5, Gearset::Green, Direction::Reverse)),
            VexMotor::new(Motor::new(peripherals.port_20, Gearset::Green, Direction::Forward)),
            VexMotor::new(Motor::new(peripherals.port_10, Gearset::Green, Direction::Forward)),
        );
        let arm = Arm::new(
            VexMotor::new(Motor::new(peripherals.port_13, Gearset::Red, Direction::Forward)),
            VexMotor::new(Motor::new(peripherals.port_18, Gearset::Red, Direction::Reverse)),
        );
        let intake = VexMotor::new(Motor::new(peripherals.port_17, Gearset::Green, Direction::Forward));
        let clamp = VexPiston::new(AdiDigitalOut::new(peripherals.adi_a));

        let robot = Self {
            subsystems: Subsystems::new(drive, arm, intake, clamp),
            controller: make_cloneable(peripherals.primary_controller),
            selector: make_cloneable(AutonSelector::with_bundled(config.sd_trajectory_path)),
            phase: SnapshotCell::new(MatchPhase::PreMatch),
            drive_config: SnapshotCell::new(DriveConfig::FourWheel),
            config,
        };
        let devices = LoopDevices {
            display: peripherals.display,
            bumper:  AdiDigitalIn::new(peripherals.adi_b),
        };
        (robot, devices)
    }
}
