//! 1-bit frame buffer
//!
//! Pixels are stored page-major exactly as SH1106/SSD1306 controllers expect
//! them: one byte covers eight vertical pixels of a column, bit 0 on top.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Off-screen image of the whole panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank frame
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Turn off every pixel in rows `top..bottom`
    pub fn clear_rows(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(HEIGHT);
        for y in top..bottom {
            let mask = !(1u8 << (y % 8));
            for byte in self.pages[y / 8].iter_mut() {
                *byte &= mask;
            }
        }
    }

    /// Set one pixel; coordinates outside the panel are ignored
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let bit = 1u8 << (y % 8);
        if on {
            self.pages[y / 8][x] |= bit;
        } else {
            self.pages[y / 8][x] &= !bit;
        }
    }

    /// Read one pixel; coordinates outside the panel read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    /// Number of lit pixels in rows `top..bottom`
    pub fn lit_in_rows(&self, top: i32, bottom: i32) -> usize {
        let mut count = 0;
        for y in top.max(0)..bottom.min(HEIGHT as i32) {
            for x in 0..WIDTH as i32 {
                if self.pixel(x, y) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}
