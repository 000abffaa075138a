use super::{CaptureSource, StreamProperties};
use crate::convert::mat_to_rgb;
use crate::error::CaptureError;
use anyhow::{Context, Result};
use image::RgbImage;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use std::path::Path;

/// Video file decoded through OpenCV
pub struct FileCapture {
    capture: VideoCapture,
    frame: Mat,
    properties: StreamProperties,
}

impl FileCapture {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        tracing::info!("Opening video file {}", path.display());

        let capture =
            Self::open_capture(path).map_err(|e| CaptureError::open(path.display().to_string(), e))?;
        let properties = Self::query_properties(&capture)
            .map_err(|e| CaptureError::open(path.display().to_string(), e))?;

        tracing::info!(
            "Video opened at {}x{} @ {:.2} fps",
            properties.width,
            properties.height,
            properties.fps
        );

        Ok(Self {
            capture,
            frame: Mat::default(),
            properties,
        })
    }

    fn open_capture(path: &Path) -> Result<VideoCapture> {
        let name = path.to_str().context("Video path is not valid UTF-8")?;
        let capture = VideoCapture::from_file(name, videoio::CAP_ANY)
            .with_context(|| format!("Failed to open input source: {}", name))?;

        if !capture.is_opened()? {
            anyhow::bail!("Failed to open input source: {}", name);
        }

        Ok(capture)
    }

    fn query_properties(capture: &VideoCapture) -> Result<StreamProperties> {
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        Ok(StreamProperties::new(width, height, fps))
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        if !self.capture.read(&mut self.frame)? || self.frame.empty() {
            return Ok(None);
        }
        mat_to_rgb(&self.frame).map(Some)
    }
}

impl CaptureSource for FileCapture {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        match self.read_frame() {
            Ok(frame) => Ok(frame),
            Err(e) => {
                tracing::warn!("Video read failed: {:#}", e);
                Ok(None)
            }
        }
    }

    fn properties(&self) -> StreamProperties {
        self.properties
    }
}

impl Drop for FileCapture {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            tracing::warn!("Failed to release video capture: {}", e);
        }
    }
}
