#[cfg(feature = "video")]
mod video_file;

#[cfg(feature = "video")]
pub use video_file::VideoFileWriter;

use anyhow::Result;
use image::RgbImage;

/// Trait for output destinations
pub trait OutputSink {
    /// Append a frame to the output
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()>;

    /// Number of frames written so far
    fn frames_written(&self) -> u64;
}

impl<T: OutputSink + ?Sized> OutputSink for Box<T> {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        (**self).write_frame(frame)
    }

    fn frames_written(&self) -> u64 {
        (**self).frames_written()
    }
}
