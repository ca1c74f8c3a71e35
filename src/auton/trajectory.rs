//! Recorded drive trajectories.
//!
//! A trajectory is the list of drive encoder positions captured by the
//! position recorder while a driver ran the autonomous route by hand. It is
//! plain text so a run recorded to the SD card can be replayed, copied into
//! the bundled routines, or edited without touching code:
//!
//! ```text
//! # left side, 4 rings
//! 0.0,0.0,0.0,0.0
//! 41.5,40.8,39.9,41.0
//! ```
//!
//! Each line holds the absolute positions in degrees of `LF`, `LB`, `RF` and
//! `RB`, in that order. Blank lines and lines starting with `#` are skipped.

use std::{fmt, io, num::ParseFloatError, path::Path, str::FromStr};

use snafu::{ResultExt, Snafu, ensure};

use crate::drivetrain::DriveMotor;

/// Errors produced while loading a trajectory.
#[derive(Debug, Snafu)]
pub enum TrajectoryError {
    #[snafu(display("could not read trajectory {path}"))]
    Read { path: String, source: io::Error },

    #[snafu(display("line {line}: expected 4 positions, found {found}"))]
    FieldCount { line: usize, found: usize },

    #[snafu(display("line {line}: invalid position {text:?}"))]
    InvalidPosition {
        line:   usize,
        text:   String,
        source: ParseFloatError,
    },

    #[snafu(display("line {line}: position is not finite"))]
    NonFinite { line: usize },

    #[snafu(display("trajectory has no steps"))]
    Empty,
}

/// Target positions for the four drive motors at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectoryStep {
    pub left_front:  f64,
    pub left_back:   f64,
    pub right_front: f64,
    pub right_back:  f64,
}

impl TrajectoryStep {
    pub const fn new(left_front: f64, left_back: f64, right_front: f64, right_back: f64) -> Self {
        Self {
            left_front,
            left_back,
            right_front,
            right_back,
        }
    }

    pub const fn target(&self, motor: DriveMotor) -> f64 {
        match motor {
            DriveMotor::LeftFront => self.left_front,
            DriveMotor::LeftBack => self.left_back,
            DriveMotor::RightFront => self.right_front,
            DriveMotor::RightBack => self.right_back,
        }
    }

    fn parse_line(line: usize, text: &str) -> Result<Self, TrajectoryError> {
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        ensure!(fields.len() == 4, FieldCountSnafu { line, found: fields.len() });

        let mut values = [0.0; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse::<f64>().context(InvalidPositionSnafu { line, text: *field })?;
            ensure!(value.is_finite(), NonFiniteSnafu { line });
        }
        let [left_front, left_back, right_front, right_back] = values;
        Ok(Self::new(left_front, left_back, right_front, right_back))
    }
}

/// One line of the text format, without the newline.
impl fmt::Display for TrajectoryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1},{:.1},{:.1},{:.1}",
            self.left_front, self.left_back, self.right_front, self.right_back
        )
    }
}

/// An ordered, finite list of steps, replayed exactly as recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<TrajectoryStep>,
}

impl Trajectory {
    pub fn new(steps: Vec<TrajectoryStep>) -> Self { Self { steps } }

    /// Reads a trajectory file, e.g. one written by the recorder to the SD card.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrajectoryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(ReadSnafu {
            path: path.display().to_string(),
        })?;
        text.parse()
    }

    pub fn steps(&self) -> &[TrajectoryStep] { &self.steps }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }
}

impl FromStr for Trajectory {
    type Err = TrajectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        for (index, raw) in s.lines().enumerate() {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            steps.push(TrajectoryStep::parse_line(index + 1, text)?);
        }
        ensure!(!steps.is_empty(), EmptySnafu);
        Ok(Self { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_in_order() {
        let text = "# test run\n\n0,0,0,0\n  12.5, 13 ,-4.25,7\n100,101,102,103\n";
        let trajectory: Trajectory = text.parse().unwrap();
        assert_eq!(
            trajectory.steps(),
            [
                TrajectoryStep::new(0.0, 0.0, 0.0, 0.0),
                TrajectoryStep::new(12.5, 13.0, -4.25, 7.0),
                TrajectoryStep::new(100.0, 101.0, 102.0, 103.0),
            ]
        );
    }

    #[test]
    fn reports_line_numbers() {
        let err = "0,0,0,0\n# note\n1,2,3\n".parse::<Trajectory>().unwrap_err();
        assert!(matches!(err, TrajectoryError::FieldCount { line: 3, found: 3 }));
        assert_eq!(err.to_string(), "line 3: expected 4 positions, found 3");

        let err = "1,2,x,4".parse::<Trajectory>().unwrap_err();
        assert!(matches!(err, TrajectoryError::InvalidPosition { line: 1, ref text, .. } if text == "x"));

        let err = "1,2,inf,4".parse::<Trajectory>().unwrap_err();
        assert!(matches!(err, TrajectoryError::NonFinite { line: 1 }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = "# nothing recorded\n\n".parse::<Trajectory>().unwrap_err();
        assert!(matches!(err, TrajectoryError::Empty));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Trajectory::load("does/not/exist.traj").unwrap_err();
        assert!(matches!(err, TrajectoryError::Read { .. }));
    }

    #[test]
    fn step_formats_as_a_line() {
        let step = TrajectoryStep::new(1.0, -2.26, 300.04, 0.0);
        assert_eq!(step.to_string(), "1.0,-2.3,300.0,0.0");
        let parsed: Trajectory = step.to_string().parse().unwrap();
        assert_eq!(parsed.steps()[0].target(DriveMotor::RightFront), 300.0);
    }
}
