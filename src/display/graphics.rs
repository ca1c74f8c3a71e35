//! Embedded-graphics driver for the V5 Brain screen.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use vexide::{
    color::Color,
    display::{Display, Rect, RenderMode},
};

use super::status::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An embedded-graphics draw target for the V5 Brain screen.
///
/// Drawing goes into an off-screen frame; [`flush`](Self::flush) copies the
/// frame to the screen in one pass. Touch input is not supported.
pub struct BrainDisplay {
    display: Display,
    frame:   Vec<Rgb888>,
}

impl BrainDisplay {
    /// Takes ownership of the screen, as only one writer may render to it.
    pub fn new(mut display: Display) -> Self {
        display.set_render_mode(RenderMode::DoubleBuffered);
        Self {
            display,
            frame: vec![Rgb888::BLACK; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    /// Copies the frame to the screen.
    pub fn flush(&mut self) {
        let region = Rect::from_dimensions([0, 0], SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16);
        let pixels: Vec<Color> = self.frame.iter().map(|c| Color::new(c.r(), c.g(), c.b())).collect();
        self.display.draw_buffer(region, &pixels);
        self.display.render();
    }
}

impl OriginDimensions for BrainDisplay {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for BrainDisplay {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = SCREEN_WIDTH as i32;
        let height = SCREEN_HEIGHT as i32;
        for Pixel(point, color) in pixels {
            if (0..width).contains(&point.x) && (0..height).contains(&point.y) {
                self.frame[(point.y * width + point.x) as usize] = color;
            }
        }
        Ok(())
    }
}
