use std::fmt;

/// The region held no pixels, so it has no defined color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoData;

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region contains no pixels")
    }
}

impl std::error::Error for NoData {}
