use compbot::{
    auton::replay::replay,
    competition::MatchPhase,
    config::RobotConfig,
    display::{
        graphics::BrainDisplay,
        status::{StatusInputs, draw_status},
    },
    fs::{logger, recorder::PositionRecorder},
    opcontrol::OpControl,
    peripherals::Gamepad,
};
use log::{info, warn};
use vexide::{display::Display, prelude::*, task::spawn, time::sleep};

pub mod hardware;

use hardware::{LoopDevices, Robot};

impl Robot {
    /// Publishes a phase change from a competition callback.
    fn enter(&self, phase: MatchPhase) {
        let previous = self.phase.publish(phase);
        if previous != phase {
            info!("Match phase: {} -> {}", previous, phase);
        }
    }
}

impl Compete for Robot {
    async fn disabled(&mut self) { self.enter(MatchPhase::Disabled); }

    async fn autonomous(&mut self) {
        self.enter(MatchPhase::Autonomous);
        let routine = self.selector.borrow().selected().clone();
        info!("Autonomous routine: {}", routine.name);
        if let Some(trajectory) = routine.trajectory {
            replay(
                &trajectory,
                &self.subsystems.drive,
                self.config.drive_velocity,
                self.config.replay_step_delay,
                sleep,
            )
            .await;
        }
    }

    async fn driver(&mut self) {
        self.enter(MatchPhase::Teleoperated);
        let mut monitor = self.subsystems.monitor(self.drive_config.clone());
        let mut opcontrol = OpControl::new(&self.config, &self.subsystems.clamp);

        loop {
            let reading = Gamepad::state(&*self.controller.borrow());
            {
                let mut controller = self.controller.borrow_mut();
                opcontrol.cycle_reading(reading, &mut self.subsystems, &mut monitor, &mut *controller);
            }
            sleep(self.config.teleop_period).await;
        }
    }
}

/// Rechecks motor connectivity every connectivity period.
fn spawn_poller(robot: &Robot) {
    let mut monitor = robot.subsystems.monitor(robot.drive_config.clone());
    let controller = robot.controller.clone();
    let period = robot.config.connectivity_period;
    spawn(async move {
        loop {
            sleep(period).await;
            monitor.check(&mut *controller.borrow_mut());
        }
    })
    .detach();
}

/// Redraws the status screen every display period.
fn spawn_status(robot: &Robot, display: Display) {
    let mut screen = BrainDisplay::new(display);
    let registry = robot.subsystems.registry.clone();
    let phase = robot.phase.clone();
    let drive = robot.drive_config.clone();
    let selector = robot.selector.clone();
    let controller = robot.controller.clone();
    let period = robot.config.display_period;
    spawn(async move {
        loop {
            let motors = registry.attributes();
            let auton = selector.borrow().selected().name.clone();
            let inputs = StatusInputs {
                phase:                phase.current(),
                drive:                drive.current(),
                auton:                &auton,
                motors:               &motors,
                battery_capacity:     Some(vexide::battery::capacity()),
                controller_connected: Gamepad::state(&*controller.borrow()).is_ok(),
            };
            let _ = draw_status(&inputs, &mut screen);
            screen.flush();
            sleep(period).await;
        }
    })
    .detach();
}

/// Polls the selector bumper while the match has not started.
fn spawn_selector(robot: &Robot, bumper: AdiDigitalIn) {
    let selector = robot.selector.clone();
    let phase = robot.phase.clone();
    let period = robot.config.teleop_period;
    spawn(async move {
        loop {
            let pressed = bumper.is_high().unwrap_or(false);
            selector.borrow_mut().update(pressed, phase.current());
            sleep(period).await;
        }
    })
    .detach();
}

/// Samples drive positions during driver control, when enabled.
fn spawn_recorder(robot: &Robot) {
    if !robot.config.record_positions {
        return;
    }
    let mut recorder = match PositionRecorder::create(robot.config.recording_path) {
        Ok(recorder) => recorder,
        Err(e) => {
            warn!("Position recording disabled: {}", e);
            return;
        }
    };
    let drive = robot.subsystems.drive.clone();
    let phase = robot.phase.clone();
    let period = robot.config.recorder_period;
    spawn(async move {
        loop {
            if phase.current() == MatchPhase::Teleoperated {
                recorder.tick(&drive);
                let _ = recorder.flush();
            }
            sleep(period).await;
        }
    })
    .detach();
}

#[vexide::main]
async fn main(peripherals: Peripherals) {
    let config = RobotConfig::default();
    logger::init(config.log_level).unwrap_or_else(|e| println!("Logger init failed: {}", e));

    let (robot, devices) = Robot::default_config(peripherals, config);
    let LoopDevices { display, bumper } = devices;

    let mut monitor = robot.subsystems.monitor(robot.drive_config.clone());
    robot
        .subsystems
        .prepare(&mut monitor, &mut *robot.controller.borrow_mut());

    spawn_poller(&robot);
    spawn_status(&robot, display);
    spawn_selector(&robot, bumper);
    spawn_recorder(&robot);

    robot.compete().await;
}
