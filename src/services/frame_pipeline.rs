use futures_util::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;

use zone_color::{
    ColorExtractor, DominantExtractor, FramePayload, NoData, Rect, RegionError, Rgb, Smoother,
    SmoothingState, SubView, ZoneColor, ZoneId, ZoneImage, ZoneLayout, ZONE_COUNT,
};

use crate::error::PipelineError;

/// Everything a pipeline run needs besides the image and previous state
#[derive(Clone)]
pub struct PipelineSettings {
    pub extractor: Arc<dyn ColorExtractor>,
    pub ignored_zones: BTreeSet<ZoneId>,
    pub smoother: Smoother,
    pub placeholder: Rgb,
    pub fallback: Rgb,
    pub layout: ZoneLayout,
    /// Sub-rectangle of the image to partition; the whole image if `None`
    pub sampling_area: Option<Rect>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            extractor: Arc::new(DominantExtractor::default()),
            ignored_zones: BTreeSet::new(),
            smoother: Smoother::default(),
            placeholder: Rgb::BLACK,
            fallback: Rgb::BLACK,
            layout: ZoneLayout::default(),
            sampling_area: None,
        }
    }
}

/// Turns one captured image into six smoothed zone colors.
///
/// Each non-ignored zone is extracted on its own blocking task; results are
/// assembled in zone order once all of them have finished. The pipeline holds
/// no state between runs: the previous smoothing state goes in, the next one
/// comes out.
#[derive(Clone)]
pub struct FramePipeline {
    settings: PipelineSettings,
}

impl FramePipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// Replace the extractor chosen by the settings
    pub fn with_extractor(mut self, extractor: Arc<dyn ColorExtractor>) -> Self {
        self.settings.extractor = extractor;
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn is_ignored(&self, zone: ZoneId) -> bool {
        self.settings.ignored_zones.contains(&zone)
    }

    /// Zone rectangles for `image`, checked against its bounds.
    pub fn zone_rects(&self, image: &dyn ZoneImage) -> Result<[Rect; ZONE_COUNT], PipelineError> {
        let bounds = image.bounds();
        let area = self.settings.sampling_area.unwrap_or(bounds);
        if !bounds.contains_rect(&area) {
            return Err(PipelineError::OutOfBounds {
                requested: area,
                bounds,
            });
        }

        let rects = self.settings.layout.partition(area);
        if let Some(rect) = rects.iter().find(|r| !bounds.contains_rect(r)) {
            return Err(PipelineError::OutOfBounds {
                requested: *rect,
                bounds,
            });
        }
        Ok(rects)
    }

    /// Run one frame.
    ///
    /// On error no payload is produced and `previous` stays the state of
    /// record. Zones with no pixels get the fallback color, which is then
    /// smoothed like any extracted color.
    pub async fn run(
        &self,
        image: Arc<dyn ZoneImage>,
        previous: &SmoothingState,
    ) -> Result<(FramePayload, SmoothingState), PipelineError> {
        let rects = self.zone_rects(image.as_ref())?;

        let tasks = ZoneId::all()
            .filter(|zone| !self.is_ignored(*zone))
            .map(|zone| {
                let image = Arc::clone(&image);
                let extractor = Arc::clone(&self.settings.extractor);
                let rect = rects[zone.index()];
                let handle = tokio::task::spawn_blocking(move || {
                    let view = image.sub_view(rect)?;
                    Ok::<_, RegionError>(extractor.extract(&view))
                });
                async move { (zone, handle.await) }
            });
        let results = join_all(tasks).await;

        let mut zones = [ZoneColor::Ignored(self.settings.placeholder); ZONE_COUNT];
        let mut next = *previous;
        for (zone, joined) in results {
            let raw = match joined {
                Ok(Ok(Ok(color))) => color,
                Ok(Ok(Err(NoData))) => {
                    tracing::debug!(
                        zone = zone.index(),
                        rect = %rects[zone.index()],
                        "Zone has no pixels, using fallback color"
                    );
                    self.settings.fallback
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(e) => {
                    return Err(PipelineError::Worker(format!(
                        "zone {} extraction failed: {e}",
                        zone.index()
                    )))
                }
            };

            let published = self.settings.smoother.apply(raw, previous.get(zone));
            zones[zone.index()] = ZoneColor::Published(published);
            next = next.with(zone, published);
        }

        Ok((FramePayload::new(zones), next))
    }
}

/// A [`FramePipeline`] that carries its own smoothing state between frames.
pub struct StatefulPipeline {
    pipeline: FramePipeline,
    state: SmoothingState,
}

impl StatefulPipeline {
    pub fn new(pipeline: FramePipeline) -> Self {
        Self {
            pipeline,
            state: SmoothingState::new(),
        }
    }

    /// Run one frame; state only advances when the frame succeeds.
    pub async fn process(
        &mut self,
        image: Arc<dyn ZoneImage>,
    ) -> Result<FramePayload, PipelineError> {
        let (payload, next) = self.pipeline.run(image, &self.state).await?;
        self.state = next;
        Ok(payload)
    }

    pub fn state(&self) -> &SmoothingState {
        &self.state
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zone_color::{AverageExtractor, RegionView, RgbFrame};

    fn zone(index: usize) -> ZoneId {
        ZoneId::new(index).unwrap()
    }

    fn average_pipeline() -> FramePipeline {
        FramePipeline::new(PipelineSettings::default()).with_extractor(Arc::new(AverageExtractor))
    }

    fn uniform(width: u32, height: u32, color: Rgb) -> Arc<dyn ZoneImage> {
        Arc::new(RgbFrame::filled(Rect::from_size(width, height), color))
    }

    struct PanickingExtractor;

    impl ColorExtractor for PanickingExtractor {
        fn extract(&self, _region: &RegionView<'_>) -> Result<Rgb, NoData> {
            panic!("extractor exploded");
        }
    }

    #[tokio::test]
    async fn test_uniform_frame() {
        let (payload, state) = average_pipeline()
            .run(uniform(100, 100, Rgb::new(200, 50, 50)), &SmoothingState::new())
            .await
            .unwrap();

        assert_eq!(payload.colors(), [Rgb::new(200, 50, 50); ZONE_COUNT]);
        assert_eq!(state.published_count(), ZONE_COUNT);
    }

    #[tokio::test]
    async fn test_zone_results_land_in_zone_order() {
        let mut frame = RgbFrame::new(100, 100);
        frame.fill_rect(Rect::new(0, 0, 20, 50), Rgb::new(10, 0, 0));
        frame.fill_rect(Rect::new(0, 50, 20, 100), Rgb::new(20, 0, 0));
        frame.fill_rect(Rect::new(20, 0, 80, 50), Rgb::new(30, 0, 0));
        frame.fill_rect(Rect::new(20, 50, 80, 100), Rgb::new(40, 0, 0));
        frame.fill_rect(Rect::new(80, 0, 100, 50), Rgb::new(50, 0, 0));
        frame.fill_rect(Rect::new(80, 50, 100, 100), Rgb::new(60, 0, 0));

        let (payload, _) = average_pipeline()
            .run(Arc::new(frame), &SmoothingState::new())
            .await
            .unwrap();

        let reds: Vec<u8> = payload.colors().iter().map(|c| c.r).collect();
        assert_eq!(reds, vec![10, 20, 30, 40, 50, 60]);
    }

    #[tokio::test]
    async fn test_ignored_zone_keeps_previous_state() {
        let settings = PipelineSettings {
            ignored_zones: BTreeSet::from([zone(2)]),
            placeholder: Rgb::new(1, 2, 3),
            ..PipelineSettings::default()
        };
        let pipeline = FramePipeline::new(settings).with_extractor(Arc::new(AverageExtractor));
        let previous = SmoothingState::new().with(zone(2), Rgb::new(77, 77, 77));

        let (payload, next) = pipeline
            .run(uniform(50, 50, Rgb::WHITE), &previous)
            .await
            .unwrap();

        assert_eq!(payload.get(zone(2)), ZoneColor::Ignored(Rgb::new(1, 2, 3)));
        assert_eq!(next.get(zone(2)), Some(Rgb::new(77, 77, 77)));
        assert_eq!(payload.get(zone(0)), ZoneColor::Published(Rgb::WHITE));
    }

    #[tokio::test]
    async fn test_sampling_area_outside_image() {
        let settings = PipelineSettings {
            sampling_area: Some(Rect::new(1350, 663, 2200, 975)),
            ..PipelineSettings::default()
        };
        let result = FramePipeline::new(settings)
            .run(uniform(1920, 1080, Rgb::WHITE), &SmoothingState::new())
            .await;

        match result {
            Err(PipelineError::OutOfBounds { requested, bounds }) => {
                assert_eq!(requested, Rect::new(1350, 663, 2200, 975));
                assert_eq!(bounds, Rect::from_size(1920, 1080));
            }
            other => panic!("Expected OutOfBounds, got {:?}", other.map(|(p, _)| p)),
        }
    }

    #[tokio::test]
    async fn test_sampling_area_restricts_partition() {
        let mut frame = RgbFrame::filled(Rect::from_size(200, 100), Rgb::WHITE);
        frame.fill_rect(Rect::new(100, 0, 200, 100), Rgb::new(0, 0, 200));
        let settings = PipelineSettings {
            sampling_area: Some(Rect::new(100, 0, 200, 100)),
            ..PipelineSettings::default()
        };

        let (payload, _) = FramePipeline::new(settings)
            .with_extractor(Arc::new(AverageExtractor))
            .run(Arc::new(frame), &SmoothingState::new())
            .await
            .unwrap();

        assert_eq!(payload.colors(), [Rgb::new(0, 0, 200); ZONE_COUNT]);
    }

    #[tokio::test]
    async fn test_empty_zones_use_fallback() {
        let settings = PipelineSettings {
            fallback: Rgb::new(9, 9, 9),
            ..PipelineSettings::default()
        };
        let (payload, _) = FramePipeline::new(settings)
            .run(uniform(4, 1, Rgb::WHITE), &SmoothingState::new())
            .await
            .unwrap();

        let colors = payload.colors();
        // 4x1: only the middle-bottom zone has pixels
        assert_eq!(colors[3], Rgb::WHITE);
        for i in [0, 1, 2, 4, 5] {
            assert_eq!(colors[i], Rgb::new(9, 9, 9), "zone {i}");
        }
    }

    #[tokio::test]
    async fn test_fallback_is_smoothed_against_previous() {
        let settings = PipelineSettings {
            fallback: Rgb::new(9, 9, 9),
            ..PipelineSettings::default()
        };
        let previous = SmoothingState::new()
            .with(zone(0), Rgb::new(5, 5, 5))
            .with(zone(4), Rgb::new(60, 60, 60));

        let (payload, next) = FramePipeline::new(settings)
            .run(uniform(4, 1, Rgb::WHITE), &previous)
            .await
            .unwrap();

        let colors = payload.colors();
        // within the threshold: the old color is held
        assert_eq!(colors[0], Rgb::new(5, 5, 5));
        assert_eq!(next.get(zone(0)), Some(Rgb::new(5, 5, 5)));
        // far from the old color: the fallback replaces it
        assert_eq!(colors[4], Rgb::new(9, 9, 9));
        // no history
        assert_eq!(colors[1], Rgb::new(9, 9, 9));
        assert_eq!(next.get(zone(1)), Some(Rgb::new(9, 9, 9)));
    }

    #[tokio::test]
    async fn test_worker_panic_is_frame_error() {
        let previous = SmoothingState::new().with(zone(0), Rgb::WHITE);
        let result = average_pipeline()
            .with_extractor(Arc::new(PanickingExtractor))
            .run(uniform(10, 10, Rgb::BLACK), &previous)
            .await;

        assert!(matches!(result, Err(PipelineError::Worker(_))));
    }

    #[tokio::test]
    async fn test_stateful_pipeline_smooths_across_frames() {
        let mut pipeline = StatefulPipeline::new(average_pipeline());

        let first = pipeline.process(uniform(10, 10, Rgb::new(100, 100, 100))).await.unwrap();
        assert_eq!(first.colors()[0], Rgb::new(100, 100, 100));

        let second = pipeline.process(uniform(10, 10, Rgb::new(105, 100, 100))).await.unwrap();
        assert_eq!(second.colors()[0], Rgb::new(100, 100, 100));

        let third = pipeline.process(uniform(10, 10, Rgb::new(130, 100, 100))).await.unwrap();
        assert_eq!(third.colors()[0], Rgb::new(130, 100, 100));
        assert_eq!(pipeline.state().get(zone(0)), Some(Rgb::new(130, 100, 100)));
    }

    #[tokio::test]
    async fn test_stateful_pipeline_keeps_state_on_error() {
        let mut pipeline = StatefulPipeline::new(average_pipeline());
        pipeline.process(uniform(10, 10, Rgb::WHITE)).await.unwrap();
        let before = *pipeline.state();

        let mut failing =
            StatefulPipeline::new(average_pipeline().with_extractor(Arc::new(PanickingExtractor)));
        failing.state = before;
        assert!(failing.process(uniform(10, 10, Rgb::BLACK)).await.is_err());
        assert_eq!(*failing.state(), before);
    }
}
