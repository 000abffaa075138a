use super::{CaptureSource, StreamProperties};
use anyhow::Result;
use image::RgbImage;
use std::collections::VecDeque;

/// In-memory frame source
///
/// Frames are handed out in order; the stream ends when they run out.
/// Properties come from the first frame.
pub struct FrameSequence {
    frames: VecDeque<RgbImage>,
    properties: StreamProperties,
}

impl FrameSequence {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> Self {
        let (width, height) = frames.first().map(|f| f.dimensions()).unwrap_or((0, 0));
        Self {
            frames: frames.into(),
            properties: StreamProperties::new(width, height, fps),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl CaptureSource for FrameSequence {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.pop_front())
    }

    fn properties(&self) -> StreamProperties {
        self.properties
    }
}
