//! zone-color: six-zone color sampling for ambient lighting
//!
//! This crate holds the algorithmic core of an ambient-light controller. It
//! takes one captured frame, splits the sampling area into six zones, reduces
//! each zone to a single color, and damps frame-to-frame flicker. It does no
//! I/O and has no dependencies; scheduling, decoding and transport live in
//! the application.
//!
//! # Quick Start
//!
//! ```
//! use zone_color::{
//!     ColorExtractor, ExtractionPolicy, Rect, Rgb, RgbFrame, Smoother, SmoothingState,
//!     SubView, ZoneId, ZoneImage, ZoneLayout,
//! };
//!
//! let frame = RgbFrame::filled(Rect::from_size(100, 100), Rgb::new(200, 50, 50));
//! let zones = ZoneLayout::default().partition(frame.bounds());
//!
//! let smoother = Smoother::default();
//! let mut state = SmoothingState::new();
//! for zone in ZoneId::all() {
//!     let view = frame.sub_view(zones[zone.index()]).unwrap();
//!     let raw = ExtractionPolicy::Average.extract(&view).unwrap_or(Rgb::BLACK);
//!     state = state.with(zone, smoother.apply(raw, state.get(zone)));
//! }
//! assert_eq!(state.get(ZoneId::new(5).unwrap()), Some(Rgb::new(200, 50, 50)));
//! ```
//!
//! # Stages
//!
//! | Stage | Type | Notes |
//! |-------|------|-------|
//! | Partition | [`ZoneLayout`] | 20% / 60% / 20% columns, 50% / 50% rows |
//! | Extract | [`ColorExtractor`] | [`AverageExtractor`] or [`DominantExtractor`] |
//! | Smooth | [`Smoother`] | per-channel hysteresis against [`SmoothingState`] |
//! | Assemble | [`FramePayload`] | six [`ZoneColor`]s in zone order |
//!
//! # Zone Layout
//!
//! ```text
//!  -----------------------------
//!  |   0   |     2     |   4   |
//!  -----------------------------
//!  |   1   |     3     |   5   |
//!  -----------------------------
//! ```
//!
//! The six rectangles never overlap and always tile the sampling area. On
//! very small areas some of them are empty; extractors report empty regions
//! as [`NoData`] and the caller substitutes a fallback color.
//!
//! # Smoothing
//!
//! [`Smoother`] keeps the previous channel value whenever the new one is
//! less than `threshold` away from it. The held value is the old value
//! exactly, not a blend, so slow monotonic drift stays hidden until it
//! accumulates past the threshold.

pub mod color;
pub mod extract;
pub mod geometry;
pub mod image;
pub mod payload;
pub mod smooth;


pub use color::{Oklab, ParseColorError, ParseColorReason, Rgb};
pub use extract::{
    AverageExtractor, ColorExtractor, DominantExtractor, ExtractionPolicy, NoData, UnknownPolicy,
};
pub use geometry::{InvalidLayout, InvalidZone, Rect, ZoneId, ZoneLayout, ZONE_COUNT};
pub use image::{RegionError, RegionView, RgbFrame, SubView, ZoneImage};
pub use payload::{FramePayload, ZoneColor};
pub use smooth::{Smoother, SmoothingState, DEFAULT_THRESHOLD};
