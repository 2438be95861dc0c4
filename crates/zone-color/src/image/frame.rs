//! Owned in-memory RGB frame

use super::error::RegionError;
use super::view::ZoneImage;
use crate::color::Rgb;
use crate::geometry::Rect;

/// A decoded frame held in memory, row-major.
///
/// The origin does not have to be `(0, 0)`: a frame can carry the
/// coordinates it had in a larger capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    bounds: Rect,
    pixels: Vec<Rgb>,
}

impl RgbFrame {
    /// Black frame of the given size, origin at `(0, 0)`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(Rect::from_size(width, height), Rgb::BLACK)
    }

    /// Frame covering `bounds` with every pixel set to `color`.
    pub fn filled(bounds: Rect, color: Rgb) -> Self {
        Self {
            bounds,
            pixels: vec![color; bounds.area() as usize],
        }
    }

    /// Frame covering `bounds`, each pixel computed from its coordinates.
    pub fn from_fn(bounds: Rect, mut f: impl FnMut(i32, i32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(bounds.area() as usize);
        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                pixels.push(f(x, y));
            }
        }
        Self { bounds, pixels }
    }

    /// Build a frame from packed 8-bit samples.
    ///
    /// Accepts RGB8 (3 bytes per pixel) or RGBA8 (4 bytes per pixel, alpha
    /// dropped); the layout is inferred from the buffer length.
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> Result<Self, RegionError> {
        let count = width as usize * height as usize;
        let stride = if data.len() == count * 3 {
            3
        } else if data.len() == count * 4 {
            4
        } else {
            return Err(RegionError::BufferSize {
                expected: count * 3,
                actual: data.len(),
            });
        };

        let pixels = data
            .chunks_exact(stride)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            bounds: Rect::from_size(width, height),
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Overwrite one pixel.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), RegionError> {
        let requested = Rect::new(x, y, x + 1, y + 1);
        if !self.bounds.contains_rect(&requested) {
            return Err(RegionError::OutOfBounds {
                requested,
                bounds: self.bounds,
            });
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color;
        Ok(())
    }

    /// Paint `rect` (clipped to the frame) with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let clipped = self.bounds.intersect(&rect);
        for y in clipped.min_y..clipped.max_y {
            for x in clipped.min_x..clipped.max_x {
                let idx = self.index(x, y);
                self.pixels[idx] = color;
            }
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y - self.bounds.min_y) as usize * self.bounds.width() as usize
            + (x - self.bounds.min_x) as usize
    }
}

impl ZoneImage for RgbFrame {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn pixel(&self, x: i32, y: i32) -> Rgb {
        self.pixels[self.index(x, y)]
    }
}
