//! Color types
//!
//! - [`Rgb`]: 8-bit sRGB, the color read from images and sent on the wire.
//! - [`Oklab`]: perceptual space used to score dominant-color clusters.

mod error;
mod oklab;
mod rgb;

pub use error::{ParseColorError, ParseColorReason};
pub use oklab::Oklab;
pub use rgb::Rgb;
