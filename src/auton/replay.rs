//! Open-loop trajectory replay.
//!
//! Replay walks a [`Trajectory`] from the first step to the last. For each
//! step every drive motor is sent to its recorded position at once, then the
//! replay waits one step delay and moves on. There is no feedback: a step is
//! done when its wait has elapsed, whether or not the motors got there, and
//! the last step is followed by no wait at all.
//!
//! [`Playback`] is the cursor that issues the commands; [`replay`] drives it
//! with whatever sleep the caller's executor provides.

use std::{future::Future, time::Duration};

use log::info;

use super::trajectory::Trajectory;
use crate::{drivetrain::DriveTrain, peripherals::SmartMotor};

/// What the replay should do after issuing a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayTick {
    /// Wait this long, then advance again.
    Wait(Duration),
    /// The last step has been issued.
    Finished,
}

/// Position in a trajectory being replayed.
pub struct Playback<'a> {
    trajectory: &'a Trajectory,
    step_delay: Duration,
    next:       usize,
}

impl<'a> Playback<'a> {
    pub fn new(trajectory: &'a Trajectory, step_delay: Duration) -> Self {
        Self {
            trajectory,
            step_delay,
            next: 0,
        }
    }

    /// Issues the next step to `drive` and says whether to wait afterwards.
    ///
    /// Returns [`ReplayTick::Finished`] without commanding anything once every
    /// step has been issued.
    pub fn advance<M: SmartMotor>(&mut self, drive: &DriveTrain<M>, velocity: f64) -> ReplayTick {
        let steps = self.trajectory.steps();
        let Some(step) = steps.get(self.next) else {
            return ReplayTick::Finished;
        };
        drive.move_to(step, velocity);
        self.next += 1;

        if self.next < steps.len() {
            ReplayTick::Wait(self.step_delay)
        } else {
            ReplayTick::Finished
        }
    }

    /// Number of steps issued so far.
    pub const fn issued(&self) -> usize { self.next }
}

/// Replays `trajectory` on `drive`, waiting `step_delay` between steps with
/// `sleep`. Returns the number of steps issued.
///
/// ```ignore
/// replay(&routine, &robot.drive, 100.0, config.replay_step_delay, vexide::time::sleep).await;
/// ```
pub async fn replay<M, S, F>(
    trajectory: &Trajectory,
    drive: &DriveTrain<M>,
    velocity: f64,
    step_delay: Duration,
    mut sleep: S,
) -> usize
where
    M: SmartMotor,
    S: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Replaying {} steps", trajectory.len());
    let mut playback = Playback::new(trajectory, step_delay);
    while let ReplayTick::Wait(delay) = playback.advance(drive, velocity) {
        sleep(delay).await;
    }
    info!("Replay finished after {} steps", playback.issued());
    playback.issued()
}
