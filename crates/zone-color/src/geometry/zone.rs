//! Zone identifiers

use std::fmt;

/// Number of zones tracked per frame.
pub const ZONE_COUNT: usize = 6;

/// Index of one of the six fixed zones.
///
/// ```text
///  ---------------------------
///  |  0   |       2   |   4  |
///  ---------------------------
///  |  1   |       3   |   5  |
///  ---------------------------
///    left    middle     right
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(u8);

impl ZoneId {
    /// Validate a zone index.
    ///
    /// ```
    /// use zone_color::ZoneId;
    ///
    /// assert_eq!(ZoneId::new(3).unwrap().index(), 3);
    /// assert!(ZoneId::new(6).is_err());
    /// ```
    pub fn new(index: usize) -> Result<Self, InvalidZone> {
        if index < ZONE_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(InvalidZone { index })
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All zones in wire order.
    pub fn all() -> impl Iterator<Item = ZoneId> {
        (0..ZONE_COUNT as u8).map(ZoneId)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for ZoneId {
    type Error = InvalidZone;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

/// A zone index outside `0..ZONE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidZone {
    pub index: usize,
}

impl fmt::Display for InvalidZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zone index {} out of range (expected 0..{})",
            self.index, ZONE_COUNT
        )
    }
}

impl std::error::Error for InvalidZone {}
