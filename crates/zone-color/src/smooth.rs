//! Per-channel hysteresis smoothing between frames
//!
//! A channel only moves when the new value differs from the last published
//! one by at least `threshold`. Smaller changes are treated as sensor noise
//! and the old value is kept verbatim (no blending), so slow drift in one
//! direction stays pinned until it crosses the threshold.

use crate::color::Rgb;
use crate::geometry::{ZoneId, ZONE_COUNT};

/// Default hysteresis threshold on the 0..=255 channel scale.
pub const DEFAULT_THRESHOLD: u8 = 10;

/// Hysteresis filter applied to each zone's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoother {
    threshold: u8,
}

impl Smoother {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Color to publish given the freshly extracted one and the last
    /// published one (`None` before the first frame).
    ///
    /// ```
    /// use zone_color::{Rgb, Smoother};
    ///
    /// let smoother = Smoother::default();
    /// let last = Rgb::new(100, 100, 100);
    ///
    /// assert_eq!(smoother.apply(Rgb::new(105, 100, 100), Some(last)), last);
    /// assert_eq!(
    ///     smoother.apply(Rgb::new(130, 100, 100), Some(last)),
    ///     Rgb::new(130, 100, 100)
    /// );
    /// assert_eq!(smoother.apply(Rgb::new(1, 2, 3), None), Rgb::new(1, 2, 3));
    /// ```
    pub fn apply(&self, new: Rgb, last: Option<Rgb>) -> Rgb {
        match last {
            None => new,
            Some(last) => Rgb::new(
                self.channel(new.r, last.r),
                self.channel(new.g, last.g),
                self.channel(new.b, last.b),
            ),
        }
    }

    #[inline]
    fn channel(&self, new: u8, last: u8) -> u8 {
        if new.abs_diff(last) < self.threshold {
            last
        } else {
            new
        }
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Last published color per zone.
///
/// Always exactly six slots. A slot is `None` until its zone publishes a
/// color, and stays `None` for zones that are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmoothingState {
    slots: [Option<Rgb>; ZONE_COUNT],
}

impl SmoothingState {
    /// State before the first frame: every slot unset.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, zone: ZoneId) -> Option<Rgb> {
        self.slots[zone.index()]
    }

    /// Copy of this state with `zone` set to `color`.
    #[must_use]
    pub fn with(mut self, zone: ZoneId, color: Rgb) -> Self {
        self.slots[zone.index()] = Some(color);
        self
    }

    /// All slots in zone order.
    pub fn slots(&self) -> &[Option<Rgb>; ZONE_COUNT] {
        &self.slots
    }

    /// Number of zones that have published at least once.
    pub fn published_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
