//! Image capability traits and read-only region views

use std::fmt;

use super::error::RegionError;
use crate::color::Rgb;
use crate::geometry::Rect;

/// A read-only source of pixels with integer bounds.
///
/// Implementors only need to report their bounds and read a single pixel;
/// slicing comes for free through [`SubView`]. `pixel` is only ever called
/// with coordinates inside `bounds()`.
pub trait ZoneImage: Send + Sync {
    /// Pixel bounds of the image (half-open).
    fn bounds(&self) -> Rect;

    /// Read the pixel at `(x, y)`. Alpha is not part of the model.
    fn pixel(&self, x: i32, y: i32) -> Rgb;
}

/// The ability to produce a read-only view over part of an image.
///
/// Every [`ZoneImage`] has it, both as a concrete type and as a trait
/// object, so callers never need to check for the capability at runtime.
pub trait SubView {
    /// View of `rect`, which must lie within the image bounds.
    fn sub_view(&self, rect: Rect) -> Result<RegionView<'_>, RegionError>;
}

impl<T: ZoneImage> SubView for T {
    fn sub_view(&self, rect: Rect) -> Result<RegionView<'_>, RegionError> {
        RegionView::new(self, rect)
    }
}

impl SubView for dyn ZoneImage + '_ {
    fn sub_view(&self, rect: Rect) -> Result<RegionView<'_>, RegionError> {
        RegionView::new(self, rect)
    }
}

/// A rectangular window onto a [`ZoneImage`].
///
/// Views are cheap to copy and never outlive the image they borrow.
/// The rectangle may be empty, in which case the view yields no pixels.
#[derive(Clone, Copy)]
pub struct RegionView<'a> {
    source: &'a dyn ZoneImage,
    rect: Rect,
}

impl<'a> RegionView<'a> {
    /// Create a view of `rect` over `source`.
    pub fn new(source: &'a dyn ZoneImage, rect: Rect) -> Result<Self, RegionError> {
        let bounds = source.bounds();
        if !bounds.contains_rect(&rect) {
            return Err(RegionError::OutOfBounds {
                requested: rect,
                bounds,
            });
        }
        Ok(Self { source, rect })
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.rect.area()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Pixel at `(x, y)` in source coordinates, if it lies within the view.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.rect
            .contains_point(x, y)
            .then(|| self.source.pixel(x, y))
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + 'a {
        self.sample(1)
    }

    /// Every `step`-th pixel on every `step`-th row, starting at the top-left
    /// corner. A step of 0 is treated as 1.
    pub fn sample(&self, step: u32) -> impl Iterator<Item = Rgb> + 'a {
        let step = step.max(1) as usize;
        let source = self.source;
        let Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        } = self.rect;

        (min_y..max_y).step_by(step).flat_map(move |y| {
            (min_x..max_x)
                .step_by(step)
                .map(move |x| source.pixel(x, y))
        })
    }

    /// Narrow this view further. `rect` must lie within this view.
    pub fn sub_view(&self, rect: Rect) -> Result<RegionView<'a>, RegionError> {
        if !self.rect.contains_rect(&rect) {
            return Err(RegionError::OutOfBounds {
                requested: rect,
                bounds: self.rect,
            });
        }
        Ok(Self {
            source: self.source,
            rect,
        })
    }
}

impl fmt::Debug for RegionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionView")
            .field("rect", &self.rect)
            .field("source_bounds", &self.source.bounds())
            .finish()
    }
}
