//! Error type for image and region access

use std::fmt;

use crate::geometry::Rect;

/// Error returned when slicing an image or building a frame buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// The requested rectangle is not fully contained in the source bounds
    OutOfBounds {
        /// Rectangle that was requested
        requested: Rect,
        /// Bounds of the image it was requested from
        bounds: Rect,
    },
    /// A raw pixel buffer does not match the frame dimensions
    BufferSize {
        /// Length the dimensions call for (RGB8 or RGBA8)
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::OutOfBounds { requested, bounds } => {
                write!(f, "region {} is outside image bounds {}", requested, bounds)
            }
            RegionError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} bytes, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for RegionError {}
