use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Pixel rows indexed as `[y][x]`, one byte per pixel holding 0 or 1
pub type Pixels = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame Buffer
/// The 64x32 monochrome screen.
///
/// Only the draw and clear instructions write to it; renderers get a `FrameView`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Pixels,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs a lit pixel onto `(x, y)`, wrapping both coordinates around the screen.
    /// Returns true if the pixel was already lit, i.e. it was just erased.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let collided = *pixel == 1;
        *pixel ^= 1;
        collided
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            pixels: &self.pixels,
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only look at a `FrameBuffer`, handed to whatever presents it.
#[derive(Copy, Clone)]
pub struct FrameView<'a> {
    pixels: &'a Pixels,
}

impl<'a> FrameView<'a> {
    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    /// Whether the pixel at `(x, y)` is lit. Panics outside the screen.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x] == 1
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// Copies the frame out as a boolean grid indexed `[y][x]`
    pub fn to_grid(&self) -> [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        let mut grid = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        for (out, row) in grid.iter_mut().zip(self.pixels.iter()) {
            for (cell, &pixel) in out.iter_mut().zip(row.iter()) {
                *cell = pixel == 1;
            }
        }
        grid
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&pixel| pixel == 1)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_reports_erased_pixels() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.flip(3, 4));
        assert!(frame.view().pixel(3, 4));
        assert!(frame.flip(3, 4));
        assert!(!frame.view().pixel(3, 4));
    }

    #[test]
    fn test_flip_wraps_both_axes() {
        let mut frame = FrameBuffer::new();
        frame.flip(DISPLAY_WIDTH + 1, DISPLAY_HEIGHT + 2);
        assert!(frame.view().pixel(1, 2));
        assert_eq!(frame.view().lit_pixels(), 1);
    }

    #[test]
    fn test_clear_unlights_everything() {
        let mut frame = FrameBuffer::new();
        frame.flip(0, 0);
        frame.flip(63, 31);
        frame.clear();
        assert_eq!(frame.view().lit_pixels(), 0);
        assert_eq!(
            frame.view().to_grid(),
            [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT]
        );
    }

    #[test]
    fn test_view_rows_are_top_to_bottom() {
        let mut frame = FrameBuffer::new();
        frame.flip(5, 1);
        let rows: Vec<_> = frame.view().rows().collect();
        assert_eq!(rows.len(), DISPLAY_HEIGHT);
        assert_eq!(rows[1][5], 1);
        assert_eq!(rows[0][5], 0);
    }
}
