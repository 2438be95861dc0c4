use thiserror::Error;
use zone_color::{Rect, RegionError};

/// Frame-level failure of one pipeline run.
///
/// Per-zone problems (an empty zone) never show up here; they are absorbed
/// by substituting the fallback color.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Region {requested} is outside image bounds {bounds}")]
    OutOfBounds { requested: Rect, bounds: Rect },

    #[error("Zone worker failed: {0}")]
    Worker(String),
}

impl From<RegionError> for PipelineError {
    fn from(e: RegionError) -> Self {
        match e {
            RegionError::OutOfBounds { requested, bounds } => {
                PipelineError::OutOfBounds { requested, bounds }
            }
            other => PipelineError::Worker(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed fixed-text payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Could not resolve target {0}")]
    Resolve(String),

    #[error("Send truncated: {sent} of {len} bytes")]
    Truncated { sent: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },
}

/// Why image bytes could not be turned into a frame
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Decoded pixels do not fit the frame: {0}")]
    Layout(#[from] RegionError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Anything that can stop a single frame from being produced and sent.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Image source error: {0}")]
    Source(#[from] SourceError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}
