//! Reducing a pixel region to one representative color
//!
//! Two policies are available:
//!
//! - [`AverageExtractor`]: arithmetic channel mean. Cheap and exact for
//!   flat regions, but mixed content drifts toward muddy greys.
//! - [`DominantExtractor`]: histogram-bucket mode weighted by Oklab chroma.
//!   Picks the most populous color family, preferring saturated ones.
//!
//! Both report an empty region as [`NoData`] instead of inventing a color.

mod average;
mod dominant;
mod error;

pub use average::AverageExtractor;
pub use dominant::{
    DominantExtractor, DEFAULT_BUCKET_BITS, DEFAULT_CHROMA_WEIGHT, DEFAULT_SAMPLE_STEP,
};
pub use error::NoData;

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::image::RegionView;

/// Strategy for turning a region into a single color.
///
/// Implementations must be safe to call from several threads at once: the
/// pipeline runs one extraction per zone in parallel.
pub trait ColorExtractor: Send + Sync {
    fn extract(&self, region: &RegionView<'_>) -> Result<Rgb, NoData>;
}

/// Deployment-selectable extraction policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExtractionPolicy {
    /// Arithmetic mean over all pixels.
    Average,
    /// Most significant color cluster.
    #[default]
    DominantCluster,
}

impl ExtractionPolicy {
    /// Name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionPolicy::Average => "average",
            ExtractionPolicy::DominantCluster => "dominant-cluster",
        }
    }
}

impl ColorExtractor for ExtractionPolicy {
    fn extract(&self, region: &RegionView<'_>) -> Result<Rgb, NoData> {
        match self {
            ExtractionPolicy::Average => AverageExtractor.extract(region),
            ExtractionPolicy::DominantCluster => DominantExtractor::default().extract(region),
        }
    }
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown extraction policy '{}' (expected 'average' or 'dominant-cluster')",
            self.0
        )
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for ExtractionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "avg" => Ok(ExtractionPolicy::Average),
            "dominant-cluster" | "dominant" => Ok(ExtractionPolicy::DominantCluster),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
