//! V5 Brain display graphics.
//!
//! The status screen is drawn with [`embedded-graphics`](https://crates.io/crates/embedded-graphics)
//! into any `DrawTarget<Color = Rgb888>`. On the Brain that target is
//! [`graphics::BrainDisplay`]; in tests it is an in-memory frame buffer.
//!
//! # Example
//!
//! ```ignore
//! use compbot::display::{graphics::BrainDisplay, status::draw_status};
//!
//! let mut screen = BrainDisplay::new(peripherals.display);
//! draw_status(&inputs, &mut screen).unwrap_or_else(|e| match e {});
//! screen.flush();
//! ```

/// An `embedded-graphics` target for the Brain screen.
#[cfg(feature = "vex")]
pub mod graphics;

/// The six-panel status screen.
pub mod status;
