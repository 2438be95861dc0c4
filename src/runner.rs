use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::error::{ConfigError, FrameError, PipelineError, TransportError};
use crate::models::AppConfig;
use crate::services::{FileImageSource, FramePipeline, FrameSink, StatefulPipeline, WireEncoder};

/// What happened to one tick
#[derive(Debug)]
pub enum FrameOutcome {
    /// Payload of `bytes` length handed to the sink
    Sent { bytes: usize },
    /// No image was available
    Skipped,
    /// Payload was built but the sink rejected it
    SendFailed(TransportError),
}

/// Counters for a finished [`Runner::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sent: u64,
    pub skipped: u64,
    pub send_failures: u64,
    pub frame_errors: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &FrameOutcome) {
        match outcome {
            FrameOutcome::Sent { .. } => self.sent += 1,
            FrameOutcome::Skipped => self.skipped += 1,
            FrameOutcome::SendFailed(_) => self.send_failures += 1,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.sent + self.skipped + self.send_failures + self.frame_errors
    }
}

/// Load, process, encode and send, once per tick.
pub struct Runner {
    source: FileImageSource,
    pipeline: StatefulPipeline,
    encoder: WireEncoder,
    sink: Arc<dyn FrameSink>,
    interval: Duration,
}

impl Runner {
    pub fn new(config: &AppConfig, sink: Arc<dyn FrameSink>) -> Result<Self, ConfigError> {
        let pipeline = FramePipeline::new(config.pipeline_settings()?);
        Ok(Self::from_parts(
            FileImageSource::new(&config.image_path),
            pipeline,
            WireEncoder::new(config.encoding),
            sink,
            Duration::from_millis(config.interval_ms),
        ))
    }

    pub fn from_parts(
        source: FileImageSource,
        pipeline: FramePipeline,
        encoder: WireEncoder,
        sink: Arc<dyn FrameSink>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            pipeline: StatefulPipeline::new(pipeline),
            encoder,
            sink,
            interval,
        }
    }

    pub fn pipeline(&self) -> &StatefulPipeline {
        &self.pipeline
    }

    /// Run a single frame.
    ///
    /// Send failures are reported as [`FrameOutcome::SendFailed`]; the
    /// smoothing state has already advanced by then and is kept.
    pub async fn tick(&mut self) -> Result<FrameOutcome, FrameError> {
        let source = self.source.clone();
        let loaded = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| PipelineError::Worker(format!("image load task failed: {e}")))??;

        let Some(frame) = loaded else {
            tracing::debug!(path = %self.source.path().display(), "No picture found, skipping frame");
            return Ok(FrameOutcome::Skipped);
        };

        let payload = self.pipeline.process(Arc::new(frame)).await?;
        let bytes = self.encoder.encode(&payload)?;

        match self.sink.send(&bytes).await {
            Ok(()) => Ok(FrameOutcome::Sent { bytes: bytes.len() }),
            Err(e) => {
                tracing::warn!(error = %e, bytes = bytes.len(), "Failed to send frame");
                Ok(FrameOutcome::SendFailed(e))
            }
        }
    }

    /// Tick on a fixed interval until `shutdown` completes.
    ///
    /// Late ticks are delayed rather than fired in a burst. Frame errors are
    /// logged and the loop continues with the next tick.
    pub async fn run<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            path = %self.source.path().display(),
            interval_ms = self.interval.as_millis() as u64,
            encoding = %self.encoder.encoding(),
            "Frame loop started"
        );

        let mut summary = RunSummary::default();
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => match self.tick().await {
                    Ok(outcome) => summary.record(&outcome),
                    Err(e) => {
                        tracing::warn!(error = %e, "Frame failed");
                        summary.frame_errors += 1;
                    }
                },
            }
        }

        tracing::info!(
            sent = summary.sent,
            skipped = summary.skipped,
            send_failures = summary.send_failures,
            frame_errors = summary.frame_errors,
            "Frame loop stopped"
        );
        summary
    }
}
