//! Robot tuning values.
//!
//! Port assignments live with the hardware wiring in the robot program; this
//! struct holds everything else a driver or programmer might want to change
//! between events.

use std::time::Duration;

use log::LevelFilter;

/// Velocities, loop rates and file locations.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// Drive speed at full stick deflection, percent.
    pub drive_velocity:        f64,
    /// Arm speed for manual control and ladder moves, percent.
    pub arm_velocity:          f64,
    /// Intake speed, percent.
    pub intake_velocity:       f64,
    /// Drive loop period.
    pub teleop_period:         Duration,
    /// How often the connectivity poller rechecks the motors.
    pub connectivity_period:   Duration,
    /// How often the status screen is redrawn.
    pub display_period:        Duration,
    /// Wait between trajectory steps during replay.
    pub replay_step_delay:     Duration,
    /// Sample period of the position recorder.
    pub recorder_period:       Duration,
    /// Runs the position recorder during driver control.
    pub record_positions:      bool,
    /// Where the recorder writes on the SD card.
    pub recording_path:        &'static str,
    /// A recorded trajectory on the SD card offered by the auton selector.
    pub sd_trajectory_path:    Option<&'static str>,
    pub log_level:             LevelFilter,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            drive_velocity:        100.0,
            arm_velocity:          50.0,
            intake_velocity:       100.0,
            teleop_period:         Duration::from_millis(20),
            connectivity_period:   Duration::from_secs(3),
            display_period:        Duration::from_secs(5),
            replay_step_delay:     Duration::from_millis(250),
            recorder_period:       Duration::from_millis(250),
            record_positions:      false,
            recording_path:        "recording.traj",
            sd_trajectory_path:    Some("replay.traj"),
            log_level:             LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_samples_at_replay_rate() {
        let config = RobotConfig::default();
        assert_eq!(config.recorder_period, config.replay_step_delay);
        assert_eq!(config.teleop_period, Duration::from_millis(20));
    }
}
