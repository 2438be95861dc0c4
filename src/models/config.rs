use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use zone_color::{
    AverageExtractor, ColorExtractor, DominantExtractor, ExtractionPolicy, Rect, Rgb, Smoother,
    ZoneId, ZoneLayout, ZONE_COUNT,
};

use crate::error::ConfigError;
use crate::services::{Encoding, PipelineSettings};

/// Application configuration loaded from config.yaml
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// How each zone is reduced to one color
    #[serde(deserialize_with = "from_str_field")]
    pub extraction_policy: ExtractionPolicy,

    /// Zones that are never sampled or smoothed
    pub ignored_zones: BTreeSet<usize>,

    /// Per-channel hysteresis threshold (0 disables smoothing)
    pub smoothing_threshold: u8,

    /// Wire format sent to the light controller
    pub encoding: Encoding,

    /// Color sent for ignored zones in the structured encoding
    /// (the fixed text always sends them as black)
    #[serde(deserialize_with = "from_str_field")]
    pub placeholder_color: Rgb,

    /// Color used when a zone has no pixels to sample
    #[serde(deserialize_with = "from_str_field")]
    pub fallback_color: Rgb,

    /// Width of the left and right columns, in percent of the sampling width
    pub edge_percent: u8,

    /// Part of the captured image to sample (whole image if absent)
    pub sampling_area: Option<SamplingArea>,

    /// Tuning for the dominant-cluster policy
    pub dominant: DominantConfig,

    /// Image file read on every tick
    pub image_path: PathBuf,

    /// UDP target as `host:port`
    pub target: String,

    /// Delay between ticks in milliseconds
    pub interval_ms: u64,
}

/// Sampling rectangle given as origin plus size
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SamplingArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SamplingArea {
    /// Covered rectangle, or `None` if the far edge does not fit in `i32`
    pub fn to_rect(self) -> Option<Rect> {
        let max_x = i32::try_from(self.width)
            .ok()
            .and_then(|w| self.x.checked_add(w))?;
        let max_y = i32::try_from(self.height)
            .ok()
            .and_then(|h| self.y.checked_add(h))?;
        Some(Rect::new(self.x, self.y, max_x, max_y))
    }
}

impl std::fmt::Display for SamplingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} at ({},{})", self.width, self.height, self.x, self.y)
    }
}

/// Dominant-cluster tuning knobs
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DominantConfig {
    /// Bits kept per channel when bucketing pixels (1..=8)
    pub bucket_bits: u8,
    /// How strongly saturated buckets are preferred over grey ones
    pub chroma_weight: f32,
    /// Pixel stride in both axes
    pub sample_step: u32,
}

impl Default for DominantConfig {
    fn default() -> Self {
        Self {
            bucket_bits: zone_color::extract::DEFAULT_BUCKET_BITS,
            chroma_weight: zone_color::extract::DEFAULT_CHROMA_WEIGHT,
            sample_step: zone_color::extract::DEFAULT_SAMPLE_STEP,
        }
    }
}

fn from_str_field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extraction_policy: ExtractionPolicy::DominantCluster,
            ignored_zones: BTreeSet::new(),
            smoothing_threshold: zone_color::DEFAULT_THRESHOLD,
            encoding: Encoding::FixedText,
            placeholder_color: Rgb::BLACK,
            fallback_color: Rgb::BLACK,
            edge_percent: zone_color::geometry::DEFAULT_EDGE_PERCENT,
            sampling_area: None,
            dominant: DominantConfig::default(),
            image_path: PathBuf::from("pic.jpg"),
            target: "192.168.2.6:64001".to_string(),
            interval_ms: 1,
        }
    }
}

impl AppConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml treats an empty document as a unit value, not an empty map
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;

        tracing::info!(
            path = %path.display(),
            policy = %config.extraction_policy,
            ignored = config.ignored_zones.len(),
            encoding = %config.encoding,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check every value that serde alone cannot constrain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(zone) = self.ignored_zones.iter().find(|&&z| z >= ZONE_COUNT) {
            return Err(ConfigError::Invalid(format!(
                "ignored zone {zone} out of range (expected 0..{ZONE_COUNT})"
            )));
        }

        ZoneLayout::new(self.edge_percent).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !(1..=8).contains(&self.dominant.bucket_bits) {
            return Err(ConfigError::Invalid(format!(
                "dominant.bucket_bits must be between 1 and 8, got {}",
                self.dominant.bucket_bits
            )));
        }
        if self.dominant.sample_step == 0 {
            return Err(ConfigError::Invalid(
                "dominant.sample_step must be at least 1".to_string(),
            ));
        }
        if !self.dominant.chroma_weight.is_finite() || self.dominant.chroma_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dominant.chroma_weight must be a non-negative number, got {}",
                self.dominant.chroma_weight
            )));
        }

        if let Some(area) = self.sampling_area {
            if area.width == 0 || area.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "sampling_area {area} is empty"
                )));
            }
            if area.to_rect().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "sampling_area {area} extends past the coordinate range"
                )));
            }
        }

        if self.target.trim().is_empty() {
            return Err(ConfigError::Invalid("target must not be empty".to_string()));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "interval_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Extractor for the configured policy, with dominant tuning applied
    pub fn extractor(&self) -> Arc<dyn ColorExtractor> {
        match self.extraction_policy {
            ExtractionPolicy::Average => Arc::new(AverageExtractor),
            ExtractionPolicy::DominantCluster => Arc::new(
                DominantExtractor::new()
                    .bucket_bits(self.dominant.bucket_bits)
                    .chroma_weight(self.dominant.chroma_weight)
                    .sample_step(self.dominant.sample_step),
            ),
        }
    }

    /// Build pipeline settings from this configuration
    pub fn pipeline_settings(&self) -> Result<PipelineSettings, ConfigError> {
        let ignored_zones = self
            .ignored_zones
            .iter()
            .map(|&index| ZoneId::new(index))
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let layout =
            ZoneLayout::new(self.edge_percent).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let sampling_area = self
            .sampling_area
            .map(|area| {
                area.to_rect().ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "sampling_area {area} extends past the coordinate range"
                    ))
                })
            })
            .transpose()?;

        Ok(PipelineSettings {
            extractor: self.extractor(),
            ignored_zones,
            smoother: Smoother::new(self.smoothing_threshold),
            placeholder: self.placeholder_color,
            fallback: self.fallback_color,
            layout,
            sampling_area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.extraction_policy, ExtractionPolicy::DominantCluster);
        assert!(config.ignored_zones.is_empty());
        assert_eq!(config.smoothing_threshold, 10);
        assert_eq!(config.encoding, Encoding::FixedText);
        assert_eq!(config.placeholder_color, Rgb::BLACK);
        assert_eq!(config.fallback_color, Rgb::BLACK);
        assert_eq!(config.edge_percent, 20);
        assert_eq!(config.sampling_area, None);
        assert_eq!(config.image_path, PathBuf::from("pic.jpg"));
        assert_eq!(config.target, "192.168.2.6:64001");
        assert_eq!(config.interval_ms, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
extraction_policy: average
ignored_zones: [3]
smoothing_threshold: 4
encoding: structured
placeholder_color: "#102030"
fallback_color: "#ffffff"
edge_percent: 25
sampling_area:
  x: 1350
  y: 663
  width: 850
  height: 312
dominant:
  bucket_bits: 5
  chroma_weight: 0.5
  sample_step: 2
image_path: /tmp/capture.jpg
target: "127.0.0.1:9000"
interval_ms: 40
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.extraction_policy, ExtractionPolicy::Average);
        assert_eq!(config.ignored_zones, BTreeSet::from([3]));
        assert_eq!(config.smoothing_threshold, 4);
        assert_eq!(config.encoding, Encoding::Structured);
        assert_eq!(config.placeholder_color, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(config.fallback_color, Rgb::WHITE);
        assert_eq!(config.edge_percent, 25);
        assert_eq!(
            config.sampling_area.and_then(SamplingArea::to_rect),
            Some(Rect::new(1350, 663, 2200, 975))
        );
        assert_eq!(config.dominant.bucket_bits, 5);
        assert_eq!(config.dominant.sample_step, 2);
        assert_eq!(config.image_path, PathBuf::from("/tmp/capture.jpg"));
        assert_eq!(config.target, "127.0.0.1:9000");
        assert_eq!(config.interval_ms, 40);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_yaml("smoothing_threshold: 0\n").unwrap();
        assert_eq!(config.smoothing_threshold, 0);
        assert_eq!(config.encoding, Encoding::FixedText);
        assert_eq!(config.dominant, DominantConfig::default());
    }

    #[test]
    fn test_policy_aliases() {
        let config = AppConfig::from_yaml("extraction_policy: dominant\n").unwrap();
        assert_eq!(config.extraction_policy, ExtractionPolicy::DominantCluster);
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = AppConfig::from_yaml("extraction_policy: median\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_bad_hex_color_is_parse_error() {
        let result = AppConfig::from_yaml("placeholder_color: \"#12345\"\n");
        match result {
            Err(ConfigError::Parse(e)) => {
                let msg = e.to_string();
                assert!(msg.contains("#12345"), "message does not name the input: {msg}");
                assert!(msg.contains("found 5"), "message does not say why: {msg}");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let result = AppConfig::from_yaml("smothing_threshold: 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_threshold_out_of_range_is_parse_error() {
        let result = AppConfig::from_yaml("smoothing_threshold: 300\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_ignored_zone_out_of_range() {
        let result = AppConfig::from_yaml("ignored_zones: [1, 6]\n");
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("6")),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_percent_too_large() {
        let result = AppConfig::from_yaml("edge_percent: 51\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(AppConfig::from_yaml("edge_percent: 50\n").is_ok());
    }

    #[test]
    fn test_dominant_tuning_validation() {
        for yaml in [
            "dominant: { bucket_bits: 0 }\n",
            "dominant: { bucket_bits: 9 }\n",
            "dominant: { sample_step: 0 }\n",
            "dominant: { chroma_weight: -1.0 }\n",
            "dominant: { chroma_weight: .nan }\n",
        ] {
            assert!(
                matches!(AppConfig::from_yaml(yaml), Err(ConfigError::Invalid(_))),
                "expected {yaml:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_empty_sampling_area_rejected() {
        let yaml = "sampling_area: { x: 0, y: 0, width: 0, height: 10 }\n";
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_sampling_area_overflow_rejected() {
        for yaml in [
            "sampling_area: { x: 0, y: 0, width: 3000000000, height: 10 }\n",
            "sampling_area: { x: 2147483000, y: 0, width: 1000, height: 10 }\n",
            "sampling_area: { x: 0, y: 2147483647, width: 10, height: 1 }\n",
        ] {
            match AppConfig::from_yaml(yaml) {
                Err(ConfigError::Invalid(msg)) => assert!(msg.contains("coordinate range"), "{msg}"),
                other => panic!("expected {yaml:?} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_sampling_area_at_the_edge_of_the_range() {
        let area = SamplingArea {
            x: i32::MAX - 10,
            y: -5,
            width: 10,
            height: 5,
        };
        assert_eq!(area.to_rect(), Some(Rect::new(i32::MAX - 10, -5, i32::MAX, 0)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            AppConfig::from_yaml("interval_ms: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_pipeline_settings_from_config() {
        let config = AppConfig::from_yaml("ignored_zones: [0, 5]\nsmoothing_threshold: 3\n").unwrap();
        let settings = config.pipeline_settings().unwrap();

        let ignored: Vec<usize> = settings.ignored_zones.iter().map(|z| z.index()).collect();
        assert_eq!(ignored, vec![0, 5]);
        assert_eq!(settings.smoother.threshold(), 3);
        assert_eq!(settings.layout.edge_percent(), 20);
        assert_eq!(settings.sampling_area, None);
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load(Path::new("/nonexistent/ambilight.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
