//! Six-zone partitioning of a sampling area
//!
//! The sampling area is cut into three vertical bands (left, middle, right)
//! and two rows (top, bottom):
//!
//! ```text
//!              A         B         A
//!    ----- -----------------------------
//!          |       |           |       |
//!    50%   |   0   |     2     |   4   |
//!          |       |           |       |
//!    ----- -----------------------------
//!          |       |           |       |
//!    50%   |   1   |     3     |   5   |
//!          |       |           |       |
//!    ----- -----------------------------
//!          |  20%  |    60%    |  20%  |
//! ```
//!
//! Both edge bands are `floor(W * edge_percent / 100)` pixels wide and the
//! row split sits at `floor(H / 2)`. The middle band takes whatever is left,
//! so the six rectangles always tile the area exactly.

use std::fmt;

use super::rect::Rect;
use super::zone::ZONE_COUNT;

/// Default width of each edge band, in percent of the area width.
pub const DEFAULT_EDGE_PERCENT: u8 = 20;

/// Largest edge band that still leaves a (possibly empty) middle band.
pub const MAX_EDGE_PERCENT: u8 = 50;

/// Proportional zone layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneLayout {
    edge_percent: u8,
}

impl ZoneLayout {
    /// Create a layout with a custom edge band width.
    pub fn new(edge_percent: u8) -> Result<Self, InvalidLayout> {
        if edge_percent > MAX_EDGE_PERCENT {
            return Err(InvalidLayout { edge_percent });
        }
        Ok(Self { edge_percent })
    }

    #[inline]
    pub fn edge_percent(&self) -> u8 {
        self.edge_percent
    }

    /// Width of each edge band for an area `width` pixels wide.
    #[inline]
    pub fn edge_width(&self, width: u32) -> i32 {
        (width as u64 * self.edge_percent as u64 / 100) as i32
    }

    /// Compute the six zone rectangles for `bounds`, in zone order.
    ///
    /// Pure arithmetic: never fails, never allocates. Small areas
    /// (`W < 5` or `H < 2`) yield some empty rectangles.
    ///
    /// ```
    /// use zone_color::{Rect, ZoneLayout};
    ///
    /// let zones = ZoneLayout::default().partition(Rect::new(0, 0, 100, 100));
    /// assert_eq!(zones[0], Rect::new(0, 0, 20, 50));
    /// assert_eq!(zones[3], Rect::new(20, 50, 80, 100));
    /// assert_eq!(zones[5], Rect::new(80, 50, 100, 100));
    /// ```
    pub fn partition(&self, bounds: Rect) -> [Rect; ZONE_COUNT] {
        let x_a = self.edge_width(bounds.width());
        let y = (bounds.height() / 2) as i32;

        let left = bounds.min_x + x_a;
        let right = bounds.max_x - x_a;
        let mid_y = bounds.min_y + y;

        [
            Rect::new(bounds.min_x, bounds.min_y, left, mid_y),
            Rect::new(bounds.min_x, mid_y, left, bounds.max_y),
            Rect::new(left, bounds.min_y, right, mid_y),
            Rect::new(left, mid_y, right, bounds.max_y),
            Rect::new(right, bounds.min_y, bounds.max_x, mid_y),
            Rect::new(right, mid_y, bounds.max_x, bounds.max_y),
        ]
    }
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            edge_percent: DEFAULT_EDGE_PERCENT,
        }
    }
}

/// Edge band wider than [`MAX_EDGE_PERCENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLayout {
    pub edge_percent: u8,
}

impl fmt::Display for InvalidLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge band of {}% exceeds the maximum of {}%",
            self.edge_percent, MAX_EDGE_PERCENT
        )
    }
}

impl std::error::Error for InvalidLayout {}
