//! Drive position recorder.
//!
//! While a driver runs an autonomous route by hand, the recorder samples the
//! four drive encoders at the replay step rate and writes each sample as a
//! trajectory line. The output file loads directly with
//! [`Trajectory::load`](crate::auton::trajectory::Trajectory::load), so a
//! recorded run can be replayed from the SD card without touching code.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::{debug, info};
use snafu::{ResultExt, Snafu};

use crate::{
    auton::trajectory::TrajectoryStep,
    drivetrain::DriveTrain,
    peripherals::{DeviceError, SmartMotor},
};

/// A sample that could not be recorded.
#[derive(Debug, Snafu)]
pub enum RecordError {
    #[snafu(display("could not read drive positions"))]
    Sample { source: DeviceError },

    #[snafu(display("could not write sample"))]
    Write { source: io::Error },
}

/// Writes drive position samples in trajectory format.
pub struct PositionRecorder<W: Write> {
    writer:  W,
    samples: usize,
}

impl PositionRecorder<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created, e.g. when no SD card is inserted.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let recorder = Self::new(BufWriter::new(File::create(path)?))?;
        info!("Recording drive positions to {}", path.display());
        Ok(recorder)
    }
}

impl<W: Write> PositionRecorder<W> {
    /// Wraps `writer`, writing a comment header first.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "# drive positions LF,LB,RF,RB (degrees)")?;
        Ok(Self { writer, samples: 0 })
    }

    /// Samples `drive` once and appends the positions.
    ///
    /// # Errors
    ///
    /// A sample is skipped, not written partially, when any drive motor
    /// cannot be read.
    pub fn record<M: SmartMotor>(&mut self, drive: &DriveTrain<M>) -> Result<TrajectoryStep, RecordError> {
        let step = drive.positions().context(SampleSnafu)?;
        writeln!(self.writer, "{}", step).context(WriteSnafu)?;
        self.samples += 1;
        Ok(step)
    }

    /// Like [`record`](Self::record), logging a skipped sample instead of
    /// returning it.
    pub fn tick<M: SmartMotor>(&mut self, drive: &DriveTrain<M>) {
        if let Err(e) = self.record(drive) {
            debug!("Skipped position sample: {}", e);
        }
    }

    pub const fn samples(&self) -> usize { self.samples }

    pub fn flush(&mut self) -> io::Result<()> { self.writer.flush() }

    pub fn into_inner(self) -> W { self.writer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auton::trajectory::Trajectory, peripherals::mock::MockMotor};

    fn drive() -> DriveTrain<MockMotor> {
        DriveTrain::new(MockMotor::new(), MockMotor::new(), MockMotor::new(), MockMotor::new())
    }

    #[test]
    fn recording_replays_as_a_trajectory() {
        let drive = drive();
        let mut recorder = PositionRecorder::new(Vec::new()).unwrap();

        for i in 0..3 {
            let p = f64::from(i) * 90.0;
            drive.left_front.borrow_mut().position = p;
            drive.left_back.borrow_mut().position = p + 0.5;
            drive.right_front.borrow_mut().position = -p;
            drive.right_back.borrow_mut().position = -p - 0.5;
            recorder.tick(&drive);
        }
        assert_eq!(recorder.samples(), 3);

        let text = String::from_utf8(recorder.into_inner()).unwrap();
        assert!(text.starts_with('#'));
        let trajectory: Trajectory = text.parse().unwrap();
        assert_eq!(
            trajectory.steps(),
            [
                TrajectoryStep::new(0.0, 0.5, 0.0, -0.5),
                TrajectoryStep::new(90.0, 90.5, -90.0, -90.5),
                TrajectoryStep::new(180.0, 180.5, -180.0, -180.5),
            ]
        );
    }

    #[test]
    fn unreadable_motor_skips_the_sample() {
        let drive = drive();
        let mut recorder = PositionRecorder::new(Vec::new()).unwrap();
        drive.right_back.borrow_mut().connected = false;

        let err = recorder.record(&drive).unwrap_err();
        assert!(matches!(err, RecordError::Sample { source: DeviceError::Disconnected }));
        recorder.tick(&drive);
        assert_eq!(recorder.samples(), 0);
        assert_eq!(recorder.into_inner().iter().filter(|b| **b == b'\n').count(), 1);
    }
}
