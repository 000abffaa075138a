use crate::capture::CaptureSource;
use crate::display::{Display, QUIT_KEY};
use crate::error::MotionError;
use crate::motion::{erode, locate, BackgroundSubtractor, BoundingBox};
use crate::output::OutputSink;
use crate::render::{compose, draw_bounds};
use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};
use std::time::{Duration, Instant};

/// Bounded wait for a key press after each displayed frame
pub const KEY_WAIT: Duration = Duration::from_millis(1);

/// Frames between timing reports
const STATS_INTERVAL: u64 = 30;

/// Result of analysing one frame
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// Eroded foreground mask
    pub mask: GrayImage,
    /// Box around all remaining foreground, if any
    pub bounds: Option<BoundingBox>,
}

/// Background model plus mask clean-up and localisation
pub struct MotionPipeline<B> {
    model: B,
    kernel_size: u32,
}

impl<B: BackgroundSubtractor> MotionPipeline<B> {
    pub fn new(model: B, kernel_size: u32) -> Self {
        Self { model, kernel_size }
    }

    pub fn analyze(&mut self, frame: &RgbImage) -> Result<FrameAnalysis, MotionError> {
        let raw = self.model.apply(frame)?;
        let mask = erode(&raw, self.kernel_size);
        let bounds = locate(&mask);
        Ok(FrameAnalysis { mask, bounds })
    }

    pub fn model(&self) -> &B {
        &self.model
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    QuitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// Frames in which a bounding box was found
    pub detections: u64,
    pub stop: StopReason,
}

#[derive(Default)]
struct LoopStats {
    frames: u64,
    analyze: Duration,
    render: Duration,
    output: Duration,
}

impl LoopStats {
    fn report(&self) {
        let per_frame = |total: Duration| total.as_secs_f64() * 1000.0 / self.frames as f64;
        let analyze_ms = per_frame(self.analyze);
        let render_ms = per_frame(self.render);
        let output_ms = per_frame(self.output);
        let total_ms = analyze_ms + render_ms + output_ms;

        tracing::info!(
            "Frame {}: analyze={:.1}ms, render={:.1}ms, output={:.1}ms, total={:.1}ms, fps={:.1}",
            self.frames,
            analyze_ms,
            render_ms,
            output_ms,
            total_ms,
            1000.0 / total_ms
        );
    }
}

/// Pull, analyse, annotate, show and optionally record frames until the
/// source ends or the quit key is pressed
///
/// The recorded frame is the annotated frame at source resolution; the
/// display gets the frame and the mask side by side.
pub fn run_loop<S, B, D, O>(
    source: &mut S,
    pipeline: &mut MotionPipeline<B>,
    display: &mut D,
    mut sink: Option<&mut O>,
) -> Result<RunSummary>
where
    S: CaptureSource + ?Sized,
    B: BackgroundSubtractor,
    D: Display + ?Sized,
    O: OutputSink + ?Sized,
{
    let mut stats = LoopStats::default();
    let mut detections = 0u64;

    tracing::info!("Starting main pipeline loop");
    tracing::info!("Press '{}' in the window to stop", QUIT_KEY);

    let stop = loop {
        let Some(mut frame) = source.next_frame().context("Failed to capture frame")? else {
            tracing::info!("Video has ended or error reading frame.");
            break StopReason::EndOfStream;
        };
        stats.frames += 1;

        let analyze_start = Instant::now();
        let analysis = pipeline
            .analyze(&frame)
            .with_context(|| format!("Failed to analyze frame {}", stats.frames))?;
        stats.analyze += analyze_start.elapsed();

        let render_start = Instant::now();
        if let Some(bounds) = &analysis.bounds {
            detections += 1;
            tracing::debug!(
                "Frame {}: motion at x={} y={} w={} h={}",
                stats.frames,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height
            );
            draw_bounds(&mut frame, bounds);
        }
        let composite = compose(&frame, &analysis.mask);
        display.show(&composite).context("Failed to display frame")?;
        stats.render += render_start.elapsed();

        if let Some(sink) = sink.as_mut() {
            let output_start = Instant::now();
            sink.write_frame(&frame).context("Failed to write frame")?;
            stats.output += output_start.elapsed();
        }

        if stats.frames % STATS_INTERVAL == 0 {
            stats.report();
        }

        if display.poll_key(KEY_WAIT)? == Some(QUIT_KEY) {
            tracing::info!("Quit requested");
            break StopReason::QuitRequested;
        }
    };

    let summary = RunSummary {
        frames: stats.frames,
        detections,
        stop,
    };
    tracing::info!(
        "Processed {} frames, motion in {}",
        summary.frames,
        summary.detections
    );

    Ok(summary)
}
