//! Match phase as seen by the robot program.
//!
//! The phase is written only by the competition callbacks in the robot
//! program and read everywhere else through a [`SnapshotCell`](crate::snapshot::SnapshotCell).

use std::fmt;

use crate::snapshot::SnapshotValue;

/// Where the match currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Powered on, before the field has enabled the robot.
    #[default]
    PreMatch,
    Autonomous,
    Teleoperated,
    Disabled,
}

impl MatchPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            MatchPhase::PreMatch => "pre-match",
            MatchPhase::Autonomous => "autonomous",
            MatchPhase::Teleoperated => "driver",
            MatchPhase::Disabled => "disabled",
        }
    }

    /// Whether the auton selector may still change its choice.
    pub const fn accepts_auton_selection(&self) -> bool {
        matches!(self, MatchPhase::PreMatch | MatchPhase::Disabled)
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl SnapshotValue for MatchPhase {
    fn encode(self) -> u8 {
        match self {
            MatchPhase::PreMatch => 0,
            MatchPhase::Autonomous => 1,
            MatchPhase::Teleoperated => 2,
            MatchPhase::Disabled => 3,
        }
    }

    fn decode(raw: u8) -> Self {
        match raw {
            1 => MatchPhase::Autonomous,
            2 => MatchPhase::Teleoperated,
            3 => MatchPhase::Disabled,
            _ => MatchPhase::PreMatch,
        }
    }
}
