//! Pre-match choice of autonomous routine.
//!
//! The selector holds an ordered list of routines. While the robot is waiting
//! for the match (pre-match or disabled), each press of the selector bumper
//! moves to the next routine, wrapping around. Once autonomous starts the
//! choice is read once and never changes.

use log::{info, warn};

use super::trajectory::Trajectory;
use crate::{competition::MatchPhase, peripherals::controller::EdgeDetector};

const LEFT_SIDE: &str = include_str!("../../routines/left_side.traj");
const SKILLS: &str = include_str!("../../routines/skills.traj");

/// A named autonomous program.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub name:       String,
    /// `None` sits still for the whole period.
    pub trajectory: Option<Trajectory>,
}

impl Routine {
    pub fn replay(name: impl Into<String>, trajectory: Trajectory) -> Self {
        Self {
            name:       name.into(),
            trajectory: Some(trajectory),
        }
    }

    pub fn idle() -> Self {
        Self {
            name:       "do nothing".to_owned(),
            trajectory: None,
        }
    }
}

/// Cycles through routines on bumper presses.
#[derive(Debug, Clone)]
pub struct AutonSelector {
    routines: Vec<Routine>,
    selected: usize,
    bumper:   EdgeDetector,
}

impl AutonSelector {
    /// A selector over `routines`, with the first one selected. An empty list
    /// gets the idle routine.
    pub fn new(mut routines: Vec<Routine>) -> Self {
        if routines.is_empty() {
            routines.push(Routine::idle());
        }
        Self {
            routines,
            selected: 0,
            bumper: EdgeDetector::new(),
        }
    }

    /// The routines compiled into the program, then the recording at
    /// `sd_path` if one loads, then the idle routine.
    pub fn with_bundled(sd_path: Option<&str>) -> Self {
        let mut routines = Vec::new();
        for (name, text) in [("left side", LEFT_SIDE), ("skills", SKILLS)] {
            match text.parse() {
                Ok(trajectory) => routines.push(Routine::replay(name, trajectory)),
                Err(e) => warn!("Bundled routine {name} is invalid: {e}"),
            }
        }
        if let Some(path) = sd_path {
            match Trajectory::load(path) {
                Ok(trajectory) => {
                    info!("Loaded {} steps from {path}", trajectory.len());
                    routines.push(Routine::replay("SD recording", trajectory));
                }
                Err(e) => info!("No SD routine: {e}"),
            }
        }
        routines.push(Routine::idle());
        Self::new(routines)
    }

    /// Feeds the bumper state for one poll. Advances the selection on a press
    /// while `phase` still allows it; returns whether the selection changed.
    pub fn update(&mut self, pressed: bool, phase: MatchPhase) -> bool {
        if self.bumper.rising(pressed) && phase.accepts_auton_selection() {
            self.cycle();
            return true;
        }
        false
    }

    /// Moves to the next routine, wrapping to the first.
    pub fn cycle(&mut self) {
        self.selected = (self.selected + 1) % self.routines.len();
        info!("Auton selected: {}", self.selected().name);
    }

    pub fn selected(&self) -> &Routine { &self.routines[self.selected] }

    pub const fn selected_index(&self) -> usize { self.selected }

    pub fn routines(&self) -> &[Routine] { &self.routines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auton::trajectory::TrajectoryStep;

    #[test]
    fn bundled_routines_parse() {
        let selector = AutonSelector::with_bundled(None);
        let names: Vec<&str> = selector.routines().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["left side", "skills", "do nothing"]);

        let lengths: Vec<usize> = selector
            .routines()
            .iter()
            .map(|r| r.trajectory.as_ref().map_or(0, Trajectory::len))
            .collect();
        assert_eq!(lengths, [61, 161, 0]);
    }

    #[test]
    fn bundled_routines_start_at_origin() {
        let selector = AutonSelector::with_bundled(None);
        for routine in selector.routines() {
            if let Some(trajectory) = &routine.trajectory {
                assert_eq!(trajectory.steps()[0], TrajectoryStep::default(), "{}", routine.name);
            }
        }
    }

    #[test]
    fn missing_sd_recording_is_skipped() {
        let selector = AutonSelector::with_bundled(Some("no/such/recording.traj"));
        assert_eq!(selector.routines().len(), 3);
    }

    #[test]
    fn bumper_cycles_once_per_press_and_wraps() {
        let mut selector = AutonSelector::with_bundled(None);
        assert_eq!(selector.selected().name, "left side");

        assert!(selector.update(true, MatchPhase::PreMatch));
        assert!(!selector.update(true, MatchPhase::PreMatch));
        assert_eq!(selector.selected().name, "skills");

        selector.update(false, MatchPhase::Disabled);
        selector.update(true, MatchPhase::Disabled);
        assert_eq!(selector.selected().name, "do nothing");

        selector.update(false, MatchPhase::Disabled);
        selector.update(true, MatchPhase::Disabled);
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn selection_is_locked_during_the_match() {
        let mut selector = AutonSelector::with_bundled(None);
        assert!(!selector.update(true, MatchPhase::Autonomous));
        selector.update(false, MatchPhase::Teleoperated);
        assert!(!selector.update(true, MatchPhase::Teleoperated));
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn empty_list_falls_back_to_idle() {
        let selector = AutonSelector::new(Vec::new());
        assert_eq!(selector.selected(), &Routine::idle());
    }
}
