//! Rectangles, zone identifiers and the six-zone layout

mod layout;
mod rect;
mod zone;

pub use layout::{InvalidLayout, ZoneLayout, DEFAULT_EDGE_PERCENT, MAX_EDGE_PERCENT};
pub use rect::Rect;
pub use zone::{InvalidZone, ZoneId, ZONE_COUNT};
