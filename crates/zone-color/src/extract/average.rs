//! Arithmetic mean extraction

use super::{ColorExtractor, NoData};
use crate::color::Rgb;
use crate::image::RegionView;

/// Channel-wise mean over every pixel of the region.
///
/// Sums are accumulated in `u64` and divided with truncation, so a flat
/// region reproduces its color exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageExtractor;

impl ColorExtractor for AverageExtractor {
    fn extract(&self, region: &RegionView<'_>) -> Result<Rgb, NoData> {
        let mut sum_r = 0u64;
        let mut sum_g = 0u64;
        let mut sum_b = 0u64;
        let mut count = 0u64;

        for pixel in region.pixels() {
            sum_r += pixel.r as u64;
            sum_g += pixel.g as u64;
            sum_b += pixel.b as u64;
            count += 1;
        }

        if count == 0 {
            return Err(NoData);
        }

        Ok(Rgb::new(
            (sum_r / count) as u8,
            (sum_g / count) as u8,
            (sum_b / count) as u8,
        ))
    }
}
