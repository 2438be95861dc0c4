//! Dominant-color extraction by histogram-bucket mode
//!
//! Every sampled pixel is dropped into a coarse RGB bucket (the top
//! `bucket_bits` of each channel). Each bucket is scored by its population,
//! boosted by the Oklab chroma of its mean color:
//!
//! ```text
//! score = count * (1 + chroma_weight * chroma(mean))
//! ```
//!
//! The best-scoring bucket wins and its mean color is returned. Ties go to
//! the lower bucket key (darker red channel first), which keeps the result
//! deterministic regardless of hash order.
//!
//! The chroma boost is what separates this from a plain mode: a zone that
//! is 55% grey wall and 45% red poster reports the poster, which is what an
//! ambient light should show.

use std::collections::HashMap;

use super::{ColorExtractor, NoData};
use crate::color::{Oklab, Rgb};
use crate::image::RegionView;

/// Bits kept per channel when bucketing (4 -> 4096 buckets).
pub const DEFAULT_BUCKET_BITS: u8 = 4;

/// Weight of the chroma boost. 0 disables it.
pub const DEFAULT_CHROMA_WEIGHT: f32 = 2.0;

/// Sample every pixel by default.
pub const DEFAULT_SAMPLE_STEP: u32 = 1;

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    count: u64,
    r: u64,
    g: u64,
    b: u64,
}

impl Bucket {
    fn add(&mut self, pixel: Rgb) {
        self.count += 1;
        self.r += pixel.r as u64;
        self.g += pixel.g as u64;
        self.b += pixel.b as u64;
    }

    /// Rounded mean color of the bucket. `count` is never zero here.
    fn mean(&self) -> Rgb {
        let half = self.count / 2;
        Rgb::new(
            ((self.r + half) / self.count) as u8,
            ((self.g + half) / self.count) as u8,
            ((self.b + half) / self.count) as u8,
        )
    }
}

/// Histogram-mode dominant color extractor.
///
/// # Example
///
/// ```
/// use zone_color::{ColorExtractor, DominantExtractor, Rect, Rgb, RgbFrame, SubView};
///
/// let mut frame = RgbFrame::filled(Rect::from_size(10, 10), Rgb::new(128, 128, 128));
/// frame.fill_rect(Rect::new(0, 0, 10, 5), Rgb::new(220, 20, 20));
///
/// let view = frame.sub_view(Rect::from_size(10, 10)).unwrap();
/// let color = DominantExtractor::new().extract(&view).unwrap();
/// assert_eq!(color, Rgb::new(220, 20, 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantExtractor {
    bucket_bits: u8,
    chroma_weight: f32,
    sample_step: u32,
}

impl DominantExtractor {
    pub fn new() -> Self {
        Self {
            bucket_bits: DEFAULT_BUCKET_BITS,
            chroma_weight: DEFAULT_CHROMA_WEIGHT,
            sample_step: DEFAULT_SAMPLE_STEP,
        }
    }

    /// Bits per channel used for bucketing, clamped to `1..=8`.
    #[inline]
    pub fn bucket_bits(mut self, bits: u8) -> Self {
        self.bucket_bits = bits.clamp(1, 8);
        self
    }

    /// Chroma boost weight. Negative or non-finite values disable the boost.
    #[inline]
    pub fn chroma_weight(mut self, weight: f32) -> Self {
        self.chroma_weight = if weight.is_finite() {
            weight.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Pixel stride in both axes. 0 is treated as 1.
    #[inline]
    pub fn sample_step(mut self, step: u32) -> Self {
        self.sample_step = step.max(1);
        self
    }

    #[inline]
    fn bucket_key(&self, pixel: Rgb) -> u32 {
        let bits = self.bucket_bits as u32;
        let shift = 8 - bits;
        ((pixel.r as u32 >> shift) << (2 * bits))
            | ((pixel.g as u32 >> shift) << bits)
            | (pixel.b as u32 >> shift)
    }

    fn score(&self, bucket: &Bucket) -> f64 {
        let chroma = Oklab::from(bucket.mean()).chroma() as f64;
        bucket.count as f64 * (1.0 + self.chroma_weight as f64 * chroma)
    }
}

impl Default for DominantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorExtractor for DominantExtractor {
    fn extract(&self, region: &RegionView<'_>) -> Result<Rgb, NoData> {
        let mut buckets: HashMap<u32, Bucket> = HashMap::new();
        for pixel in region.sample(self.sample_step) {
            buckets.entry(self.bucket_key(pixel)).or_default().add(pixel);
        }

        let mut best: Option<(f64, u32, Bucket)> = None;
        for (key, bucket) in buckets {
            let score = self.score(&bucket);
            let better = match best {
                None => true,
                Some((best_score, best_key, _)) => {
                    score > best_score || (score == best_score && key < best_key)
                }
            };
            if better {
                best = Some((score, key, bucket));
            }
        }

        best.map(|(_, _, bucket)| bucket.mean()).ok_or(NoData)
    }
}
