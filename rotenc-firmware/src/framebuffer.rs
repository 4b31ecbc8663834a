//! Monochrome frame buffer for the 128x32 panel
//!
//! Laid out the way SSD1306-class controllers expect it: four 8-pixel
//! pages, one byte per column, bit 0 at the top. Implements
//! `embedded-graphics`' `DrawTarget` and the dashboard's `DisplayBackend`.

use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use rotenc_display::{DisplayBackend, DisplayError, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Display dimensions
pub const WIDTH: usize = SCREEN_WIDTH as usize;
pub const PAGES: usize = SCREEN_HEIGHT as usize / 8;

/// 5x7 glyphs in a 6x8 cell
const FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X7
};
const CELL_WIDTH: i32 = 6;
const CELL_HEIGHT: i32 = 8;

/// Off-screen frame
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
    /// Set by `flush`, cleared when the frame is sent
    committed: bool,
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            committed: false,
        }
    }

    /// Raw page data
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Take the pending commit, if any
    pub fn take_committed(&mut self) -> bool {
        core::mem::replace(&mut self.committed, false)
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= PAGES * 8 {
            return;
        }
        let mask = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl DisplayBackend for FrameBuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= PAGES {
            return Err(DisplayError::InvalidCoordinates);
        }

        let origin = Point::new(col as i32 * CELL_WIDTH, row as i32 * CELL_HEIGHT);
        let style = MonoTextStyle::new(&FONT, BinaryColor::On);
        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(self)
            .map_err(|e| match e {})?;
        Ok(())
    }

    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        rectangle(x, y, width, height)?
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self)
            .map_err(|e| match e {})
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        rectangle(x, y, width, height)?
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(self)
            .map_err(|e| match e {})
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.committed = true;
        Ok(())
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

fn rectangle(x: u16, y: u16, width: u16, height: u16) -> Result<Rectangle, DisplayError> {
    if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
        return Err(DisplayError::InvalidCoordinates);
    }
    Ok(Rectangle::new(
        Point::new(x as i32, y as i32),
        Size::new(width as u32, height as u32),
    ))
}
