use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use zone_color::RgbFrame;

use crate::error::{DecodeError, SourceError};

/// Reads the captured screen from an image file on disk.
///
/// The capture tool overwrites the file between ticks, so it may be missing
/// at any moment. A missing file is not an error: the frame is skipped.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file, or `Ok(None)` if it does not exist
    pub fn load(&self) -> Result<Option<RgbFrame>, SourceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SourceError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        decode_frame(&bytes)
            .map(Some)
            .map_err(|source| SourceError::Decode {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// Decode JPEG or PNG bytes into an RGB frame, dropping any alpha channel
pub fn decode_frame(bytes: &[u8]) -> Result<RgbFrame, DecodeError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RgbFrame::from_raw(width, height, rgb.as_raw())?)
}
