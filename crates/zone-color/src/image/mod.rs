//! Image access for the zone pipeline
//!
//! The pipeline never decodes files itself. It works against the
//! [`ZoneImage`] trait; [`RgbFrame`] is the in-memory implementation used by
//! the application and the tests.

mod error;
mod frame;
mod view;

pub use error::RegionError;
pub use frame::RgbFrame;
pub use view::{RegionView, SubView, ZoneImage};
