//! Per-frame output: one color per zone

use crate::color::Rgb;
use crate::geometry::{ZoneId, ZONE_COUNT};

/// The color a zone contributes to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneColor {
    /// Extracted (or fallback) color after smoothing.
    Published(Rgb),
    /// Zone is configured as ignored; carries the placeholder color.
    Ignored(Rgb),
}

impl ZoneColor {
    #[inline]
    pub fn color(self) -> Rgb {
        match self {
            ZoneColor::Published(c) | ZoneColor::Ignored(c) => c,
        }
    }

    #[inline]
    pub fn is_ignored(self) -> bool {
        matches!(self, ZoneColor::Ignored(_))
    }
}

/// Six zone colors in zone order, the result of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePayload {
    zones: [ZoneColor; ZONE_COUNT],
}

impl FramePayload {
    pub fn new(zones: [ZoneColor; ZONE_COUNT]) -> Self {
        Self { zones }
    }

    /// Payload with every zone published.
    pub fn from_colors(colors: [Rgb; ZONE_COUNT]) -> Self {
        Self::new(colors.map(ZoneColor::Published))
    }

    #[inline]
    pub fn get(&self, zone: ZoneId) -> ZoneColor {
        self.zones[zone.index()]
    }

    /// Plain colors in zone order (ignored zones give their placeholder).
    pub fn colors(&self) -> [Rgb; ZONE_COUNT] {
        self.zones.map(ZoneColor::color)
    }

    /// `(zone, color)` pairs in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, ZoneColor)> + '_ {
        ZoneId::all().zip(self.zones.iter().copied())
    }
}
