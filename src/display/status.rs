//! Six-panel status screen.
//!
//! The Brain screen is split into a 3×2 grid of equal panels:
//!
//! | | | |
//! |-|-|-|
//! | controls | auton | mode |
//! | motors | battery | controller |
//!
//! Each panel has a [`Severity`] that colors its border and title. The screen
//! only reads robot state; nothing here feeds back into control.
//!
//! # Example
//!
//! ```
//! use compbot::{
//!     competition::MatchPhase,
//!     display::status::{PanelKind, Severity, StatusInputs, build_panels},
//!     drivetrain::DriveConfig,
//! };
//!
//! let panels = build_panels(&StatusInputs {
//!     phase:                MatchPhase::PreMatch,
//!     drive:                DriveConfig::FourWheel,
//!     auton:                "left side",
//!     motors:               &[],
//!     battery_capacity:     Some(0.35),
//!     controller_connected: true,
//! });
//! assert_eq!(panels[PanelKind::Battery as usize].severity, Severity::Critical);
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::{Rgb888, RgbColor},
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
};

use crate::{competition::MatchPhase, drivetrain::DriveConfig, peripherals::registry::MotorAttributes};

/// Screen size in pixels.
pub const SCREEN_WIDTH: u32 = 480;
pub const SCREEN_HEIGHT: u32 = 240;

const COLUMNS: u32 = 3;
const PANEL_WIDTH: u32 = SCREEN_WIDTH / COLUMNS;
const PANEL_HEIGHT: u32 = SCREEN_HEIGHT / 2;
const BORDER: u32 = 2;
const PADDING: i32 = 5;
const LINE_HEIGHT: i32 = 12;

/// Characters that fit on one panel line in the 6×10 font.
pub const LINE_LEN: usize = 25;
/// Lines below a panel's title.
pub const MAX_LINES: usize = 8;

/// One line of panel text.
pub type Line = heapless::String<LINE_LEN>;

/// How urgently a panel needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Good,
    Warn,
    Critical,
}

impl Severity {
    pub const fn color(self) -> Rgb888 {
        match self {
            Severity::Good => Rgb888::GREEN,
            Severity::Warn => Rgb888::YELLOW,
            Severity::Critical => Rgb888::RED,
        }
    }

    /// Motor temperature in °C: below 45 good, below 55 warn.
    pub fn of_temperature(celsius: f64) -> Self {
        if celsius < 45.0 {
            Severity::Good
        } else if celsius < 55.0 {
            Severity::Warn
        } else {
            Severity::Critical
        }
    }

    /// Battery charge in percent: 70 and up good, 40 and up warn.
    pub fn of_battery(percent: f64) -> Self {
        if percent >= 70.0 {
            Severity::Good
        } else if percent >= 40.0 {
            Severity::Warn
        } else {
            Severity::Critical
        }
    }
}

/// The six panels, in grid order (left to right, top row first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Controls,
    Auton,
    Mode,
    Motors,
    Battery,
    Controller,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Controls,
        PanelKind::Auton,
        PanelKind::Mode,
        PanelKind::Motors,
        PanelKind::Battery,
        PanelKind::Controller,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            PanelKind::Controls => "CONTROLS",
            PanelKind::Auton => "AUTON",
            PanelKind::Mode => "MODE",
            PanelKind::Motors => "MOTORS",
            PanelKind::Battery => "BATTERY",
            PanelKind::Controller => "CONTROLLER",
        }
    }

    /// Screen area of the panel.
    pub fn bounds(self) -> Rectangle {
        let index = self as u32;
        let origin = Point::new(
            ((index % COLUMNS) * PANEL_WIDTH) as i32,
            ((index / COLUMNS) * PANEL_HEIGHT) as i32,
        );
        Rectangle::new(origin, Size::new(PANEL_WIDTH, PANEL_HEIGHT))
    }
}

/// What the screen shows, gathered by the display loop.
#[derive(Debug, Clone, Copy)]
pub struct StatusInputs<'a> {
    pub phase:                MatchPhase,
    pub drive:                DriveConfig,
    /// Name of the selected auton routine.
    pub auton:                &'a str,
    pub motors:               &'a [MotorAttributes],
    /// Remaining charge from 0.0 to 1.0, as vexide reports it. `None` when
    /// the battery could not be read.
    pub battery_capacity:     Option<f64>,
    pub controller_connected: bool,
}

/// One rendered panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind:     PanelKind,
    pub severity: Severity,
    pub lines:    heapless::Vec<Line, MAX_LINES>,
}

impl Panel {
    fn new(kind: PanelKind, severity: Severity) -> Self {
        Self {
            kind,
            severity,
            lines: heapless::Vec::new(),
        }
    }

    /// Appends a line, cut to [`LINE_LEN`]. Lines past [`MAX_LINES`] are dropped.
    fn push(&mut self, text: &str) {
        let mut line = Line::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        let _ = self.lines.push(line);
    }

    fn with_lines(mut self, lines: &[&str]) -> Self {
        for text in lines {
            self.push(text);
        }
        self
    }
}

const CONTROLS_HELP: [&str; 7] = [
    "L1/L2   intake in/out",
    "R1/R2   arm up/down",
    "Up+R1/2 arm manual",
    "A       clamp",
    "X       recheck motors",
    "sticks  tank drive",
    "bumper  next auton",
];

/// Builds every panel from `inputs`, in [`PanelKind::ALL`] order.
pub fn build_panels(inputs: &StatusInputs<'_>) -> [Panel; 6] {
    let controls = Panel::new(PanelKind::Controls, Severity::Good).with_lines(&CONTROLS_HELP);

    let lock = if inputs.phase.accepts_auton_selection() {
        "bumper to change"
    } else {
        "locked"
    };
    let auton = Panel::new(PanelKind::Auton, Severity::Good).with_lines(&[inputs.auton, lock]);

    let drive_severity = if inputs.drive == DriveConfig::FourWheel {
        Severity::Good
    } else {
        Severity::Warn
    };
    let mode = Panel::new(PanelKind::Mode, drive_severity)
        .with_lines(&[inputs.phase.label(), inputs.drive.label()]);

    let hottest = inputs
        .motors
        .iter()
        .filter_map(|m| m.temperature)
        .fold(None, |max: Option<f64>, t| Some(max.map_or(t, |m| m.max(t))));
    let mut motors = Panel::new(PanelKind::Motors, hottest.map_or(Severity::Good, Severity::of_temperature));
    for attributes in inputs.motors {
        motors.push(&attributes.to_string());
    }

    let battery_percent = inputs.battery_capacity.map(|capacity| capacity * 100.0);
    let mut battery = Panel::new(
        PanelKind::Battery,
        battery_percent.map_or(Severity::Warn, Severity::of_battery),
    );
    let mut text = Line::new();
    let _ = match battery_percent {
        Some(percent) => write!(text, "{:.0}%", percent),
        None => write!(text, "unknown"),
    };
    battery.push(&text);

    let controller = if inputs.controller_connected {
        Panel::new(PanelKind::Controller, Severity::Good).with_lines(&["connected"])
    } else {
        Panel::new(PanelKind::Controller, Severity::Critical).with_lines(&["disconnected"])
    };

    [controls, auton, mode, motors, battery, controller]
}

/// Draws one panel into its grid cell.
pub fn draw_panel<D>(panel: &Panel, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let bounds = panel.kind.bounds();
    let color = panel.severity.color();
    bounds
        .into_styled(
            PrimitiveStyleBuilder::new()
                .fill_color(Rgb888::BLACK)
                .stroke_color(color)
                .stroke_width(BORDER)
                .stroke_alignment(StrokeAlignment::Inside)
                .build(),
        )
        .draw(target)?;

    let origin = bounds.top_left + Point::new(PADDING, PADDING);
    Text::with_baseline(
        panel.kind.title(),
        origin,
        MonoTextStyle::new(&FONT_6X10, color),
        Baseline::Top,
    )
    .draw(target)?;

    let body = MonoTextStyle::new(&FONT_6X10, Rgb888::WHITE);
    for (row, line) in panel.lines.iter().enumerate() {
        let position = origin + Point::new(0, LINE_HEIGHT * (row as i32 + 1));
        Text::with_baseline(line, position, body, Baseline::Top).draw(target)?;
    }
    Ok(())
}

/// Draws the full screen.
pub fn draw_status<D>(inputs: &StatusInputs<'_>, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for panel in &build_panels(inputs) {
        draw_panel(panel, target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::peripherals::{Cartridge, MotorKind};

    struct FrameBuffer {
        pixels: Vec<Rgb888>,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb888::BLACK; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            }
        }

        fn pixel(&self, x: u32, y: u32) -> Rgb888 { self.pixels[(y * SCREEN_WIDTH + x) as usize] }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb888;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..SCREEN_WIDTH as i32).contains(&point.x) && (0..SCREEN_HEIGHT as i32).contains(&point.y) {
                    self.pixels[point.y as usize * SCREEN_WIDTH as usize + point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn motor(name: &'static str, temperature: Option<f64>) -> MotorAttributes {
        MotorAttributes {
            name,
            connected: temperature.is_some(),
            cartridge: Some(Cartridge::Green),
            kind: MotorKind::V5,
            temperature,
            position: Some(0.0),
        }
    }

    fn inputs(motors: &[MotorAttributes]) -> StatusInputs<'_> {
        StatusInputs {
            phase: MatchPhase::PreMatch,
            drive: DriveConfig::FourWheel,
            auton: "skills",
            motors,
            battery_capacity: Some(0.9),
            controller_connected: true,
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(Severity::of_temperature(44.9), Severity::Good);
        assert_eq!(Severity::of_temperature(45.0), Severity::Warn);
        assert_eq!(Severity::of_temperature(55.0), Severity::Critical);
        assert_eq!(Severity::of_battery(70.0), Severity::Good);
        assert_eq!(Severity::of_battery(69.0), Severity::Warn);
        assert_eq!(Severity::of_battery(39.0), Severity::Critical);
    }

    #[test]
    fn grid_tiles_the_screen() {
        let area: u32 = PanelKind::ALL.iter().map(|k| k.bounds().size.width * k.bounds().size.height).sum();
        assert_eq!(area, SCREEN_WIDTH * SCREEN_HEIGHT);
        assert_eq!(PanelKind::Battery.bounds().top_left, Point::new(160, 120));
    }

    #[test]
    fn motor_panel_follows_hottest_motor() {
        let motors = [motor("LF", Some(30.0)), motor("RB", Some(52.0)), motor("IN", None)];
        let panels = build_panels(&inputs(&motors));
        let panel = &panels[PanelKind::Motors as usize];
        assert_eq!(panel.severity, Severity::Warn);
        assert_eq!(panel.lines.len(), 3);
        assert_eq!(panel.lines[2].as_str(), "IN disconnected");
    }

    #[test]
    fn degraded_drive_and_lost_controller_are_flagged() {
        let mut inputs = inputs(&[]);
        inputs.drive = DriveConfig::RearWheel;
        inputs.phase = MatchPhase::Teleoperated;
        inputs.controller_connected = false;
        inputs.battery_capacity = None;
        let panels = build_panels(&inputs);

        assert_eq!(panels[PanelKind::Mode as usize].severity, Severity::Warn);
        assert_eq!(panels[PanelKind::Mode as usize].lines[1].as_str(), "rear wheel");
        assert_eq!(panels[PanelKind::Auton as usize].lines[1].as_str(), "locked");
        assert_eq!(panels[PanelKind::Controller as usize].severity, Severity::Critical);
        assert_eq!(panels[PanelKind::Battery as usize].lines[0].as_str(), "unknown");
    }

    #[test]
    fn battery_capacity_is_shown_as_percent() {
        let mut inputs = inputs(&[]);
        inputs.battery_capacity = Some(0.92);
        let panels = build_panels(&inputs);
        let battery = &panels[PanelKind::Battery as usize];
        assert_eq!(battery.severity, Severity::Good);
        assert_eq!(battery.lines[0].as_str(), "92%");

        inputs.battery_capacity = Some(0.385);
        let panels = build_panels(&inputs);
        assert_eq!(panels[PanelKind::Battery as usize].severity, Severity::Critical);
    }

    #[test]
    fn full_line_stays_inside_its_panel() {
        let mut frame = FrameBuffer::new();
        let name = "W".repeat(LINE_LEN * 2);
        draw_status(
            &StatusInputs {
                auton: &name,
                ..inputs(&[])
            },
            &mut frame,
        )
        .unwrap();

        let right = PanelKind::Auton.bounds().top_left.x as u32 + PANEL_WIDTH;
        let top = (PADDING + LINE_HEIGHT) as u32;
        for y in top..top + 10 {
            for x in right - BORDER..right {
                assert_eq!(frame.pixel(x, y), Rgb888::GREEN, "({x}, {y})");
            }
        }
    }

    #[test]
    fn long_lines_are_cut() {
        let name = "a routine name far too long for one panel";
        let panels = build_panels(&StatusInputs {
            auton: name,
            ..inputs(&[])
        });
        assert_eq!(panels[PanelKind::Auton as usize].lines[0].as_str(), &name[..LINE_LEN]);
    }

    #[test]
    fn borders_take_the_panel_color() {
        let mut frame = FrameBuffer::new();
        let motors = [motor("LA", Some(60.0))];
        let mut inputs = inputs(&motors);
        inputs.battery_capacity = Some(0.5);
        draw_status(&inputs, &mut frame).unwrap();

        assert_eq!(frame.pixel(1, 60), Rgb888::GREEN);
        assert_eq!(frame.pixel(1, 180), Rgb888::RED);
        assert_eq!(frame.pixel(200, 238), Rgb888::YELLOW);
        assert_eq!(frame.pixel(479, 130), Rgb888::GREEN);
        assert_eq!(frame.pixel(80, 110), Rgb888::BLACK);
    }
}
