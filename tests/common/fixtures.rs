//! Test fixtures: frames, image files and instrumented extractors.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ambilight::services::{FramePipeline, PipelineSettings};
use image::{Rgb as Pixel, RgbImage};
use zone_color::{
    AverageExtractor, ColorExtractor, NoData, Rect, RegionView, Rgb, RgbFrame, ZoneImage,
};

/// Colors used across scenarios
pub mod colors {
    use zone_color::Rgb;

    pub const BRICK: Rgb = Rgb::new(200, 50, 50);
    pub const GREY_100: Rgb = Rgb::new(100, 100, 100);
    pub const PLACEHOLDER: Rgb = Rgb::new(1, 2, 3);
}

/// One color per zone, in zone order
pub const ZONE_COLORS: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
];

/// Uniform frame as a shareable image
pub fn uniform(width: u32, height: u32, color: Rgb) -> Arc<dyn ZoneImage> {
    Arc::new(RgbFrame::filled(Rect::from_size(width, height), color))
}

/// 100x100 frame whose six default zones are painted with [`ZONE_COLORS`]
pub fn six_zone_frame() -> RgbFrame {
    let mut frame = RgbFrame::new(100, 100);
    let rects = [
        Rect::new(0, 0, 20, 50),
        Rect::new(0, 50, 20, 100),
        Rect::new(20, 0, 80, 50),
        Rect::new(20, 50, 80, 100),
        Rect::new(80, 0, 100, 50),
        Rect::new(80, 50, 100, 100),
    ];
    for (rect, color) in rects.into_iter().zip(ZONE_COLORS) {
        frame.fill_rect(rect, color);
    }
    frame
}

/// Write a flat-color PNG to `dir/name` and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: Rgb) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Pixel(color.to_bytes()))
        .save(&path)
        .expect("Failed to write test PNG");
    path
}

/// Averaging extractor that counts how often it is called
#[derive(Default)]
pub struct CountingExtractor {
    calls: AtomicUsize,
}

impl CountingExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ColorExtractor for CountingExtractor {
    fn extract(&self, region: &RegionView<'_>) -> Result<Rgb, NoData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        AverageExtractor.extract(region)
    }
}

/// Pipeline over default settings with the averaging extractor
pub fn average_pipeline(settings: PipelineSettings) -> FramePipeline {
    FramePipeline::new(settings).with_extractor(Arc::new(AverageExtractor))
}
