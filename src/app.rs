//! Resource setup and teardown around the main loop.
//!
//! Resources are opened in order (source, output, window, background
//! model) and owned by locals of [`run`], so a failure at any step drops,
//! and thereby releases, only what was already opened.

use crate::capture::{CaptureSource, StreamProperties};
use crate::config::{Config, SourceMode};
use crate::display::Display;
use crate::error::CaptureError;
use crate::motion::BackgroundSubtractor;
use crate::output::OutputSink;
use crate::pipeline::{run_loop, MotionPipeline, RunSummary};
use anyhow::{Context, Result};
use std::path::Path;

/// Name of the display window
pub const WINDOW_NAME: &str = "frame";

/// Opens the external resources a run needs
pub trait Backend {
    type Source: CaptureSource;
    type Sink: OutputSink;
    type Display: Display;
    type Model: BackgroundSubtractor;

    fn open_source(&mut self, mode: &SourceMode) -> Result<Self::Source, CaptureError>;

    fn create_sink(&mut self, path: &Path, properties: StreamProperties) -> Result<Self::Sink>;

    fn open_display(&mut self) -> Result<Self::Display>;

    fn create_model(&mut self, history: u32) -> Result<Self::Model>;
}

/// Run motion detection for `config` until the source ends or the user quits
pub fn run<B: Backend>(config: &Config, backend: &mut B) -> Result<RunSummary> {
    tracing::info!("Source: {}", config.source.describe());
    tracing::info!("History: {} frames", config.history);
    tracing::info!("Erosion kernel: {}x{}", config.kernel_size, config.kernel_size);

    let mut source = backend.open_source(&config.source)?;
    let properties = source.properties();

    let mut sink = if config.save_video {
        let sink = backend
            .create_sink(config.output_path(), properties)
            .context("Failed to initialize video output")?;
        Some(sink)
    } else {
        None
    };

    let mut display = backend
        .open_display()
        .context("Failed to initialize display")?;

    let model = backend
        .create_model(config.history)
        .context("Failed to create background model")?;
    let mut pipeline = MotionPipeline::new(model, config.kernel_size);

    run_loop(&mut source, &mut pipeline, &mut display, sink.as_mut())
}

#[cfg(all(feature = "camera", feature = "video"))]
pub use native::NativeBackend;

#[cfg(all(feature = "camera", feature = "video"))]
mod native {
    use super::*;
    use crate::capture::{FileCapture, WebcamCapture};
    use crate::display::HighGuiWindow;
    use crate::motion::KnnSubtractor;
    use crate::output::VideoFileWriter;

    /// Camera through nokhwa; files, recording, the window and the
    /// background model through OpenCV
    pub struct NativeBackend;

    impl Backend for NativeBackend {
        type Source = Box<dyn CaptureSource>;
        type Sink = VideoFileWriter;
        type Display = HighGuiWindow;
        type Model = KnnSubtractor;

        fn open_source(&mut self, mode: &SourceMode) -> Result<Self::Source, CaptureError> {
            let source: Self::Source = match mode {
                SourceMode::Camera { index } => Box::new(WebcamCapture::open(*index)?),
                SourceMode::File(path) => Box::new(FileCapture::open(path)?),
            };
            Ok(source)
        }

        fn create_sink(&mut self, path: &Path, properties: StreamProperties) -> Result<Self::Sink> {
            VideoFileWriter::create(path, properties)
        }

        fn open_display(&mut self) -> Result<Self::Display> {
            HighGuiWindow::open(WINDOW_NAME)
        }

        fn create_model(&mut self, history: u32) -> Result<Self::Model> {
            Ok(KnnSubtractor::new(history)?)
        }
    }
}
