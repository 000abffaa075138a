use super::OutputSink;
use crate::capture::StreamProperties;
use crate::convert::rgb_to_mat;
use anyhow::{bail, Context, Result};
use image::RgbImage;
use opencv::core::Size;
use opencv::prelude::*;
use opencv::videoio::VideoWriter;
use std::path::{Path, PathBuf};

/// Codec used for recordings
const FOURCC: [char; 4] = ['X', 'V', 'I', 'D'];

/// Video file written through OpenCV
///
/// Frames must match the resolution given at creation.
pub struct VideoFileWriter {
    writer: VideoWriter,
    path: PathBuf,
    width: u32,
    height: u32,
    frames: u64,
}

impl VideoFileWriter {
    pub fn create<P: AsRef<Path>>(path: P, properties: StreamProperties) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(
            "Recording to {} ({}x{} @ {:.2} fps)",
            path.display(),
            properties.width,
            properties.height,
            properties.fps
        );

        let name = path.to_str().context("Output path is not valid UTF-8")?;
        let fourcc = VideoWriter::fourcc(FOURCC[0], FOURCC[1], FOURCC[2], FOURCC[3])?;
        let size = Size::new(
            i32::try_from(properties.width)?,
            i32::try_from(properties.height)?,
        );

        let writer = VideoWriter::new(name, fourcc, properties.fps, size, true)
            .with_context(|| format!("Failed to create video writer for {}", path.display()))?;
        if !writer.is_opened()? {
            bail!("Failed to open {} for writing", path.display());
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            width: properties.width,
            height: properties.height,
            frames: 0,
        })
    }
}

impl OutputSink for VideoFileWriter {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if frame.dimensions() != (self.width, self.height) {
            bail!(
                "Frame is {}x{}, recording is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
        }

        let mat = rgb_to_mat(frame)?;
        self.writer
            .write(&mat)
            .context("Failed to write frame to video file")?;
        self.frames += 1;

        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.frames
    }
}

impl Drop for VideoFileWriter {
    fn drop(&mut self) {
        match self.writer.release() {
            Ok(()) => tracing::info!(
                "Saved {} frames to {}",
                self.frames,
                self.path.display()
            ),
            Err(e) => tracing::warn!("Failed to release video writer: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureSource, FileCapture};
    use image::Rgb;

    #[test]
    #[ignore = "requires an OpenCV build with XVID encode and decode support"]
    fn recording_keeps_frame_count_and_geometry() {
        let path = std::env::temp_dir().join("motion-detect-writer-test.mp4");
        let properties = StreamProperties::new(64, 48, 15.0);

        {
            let mut writer = VideoFileWriter::create(&path, properties).unwrap();
            for i in 0..12u8 {
                let frame = RgbImage::from_pixel(64, 48, Rgb([i * 20, 0, 0]));
                writer.write_frame(&frame).unwrap();
            }
            assert_eq!(writer.frames_written(), 12);
            assert!(writer.write_frame(&RgbImage::new(32, 32)).is_err());
        }

        let mut capture = FileCapture::open(&path).unwrap();
        let read = capture.properties();
        assert_eq!((read.width, read.height), (64, 48));
        assert!((read.fps - 15.0).abs() < 0.5);

        let mut frames = 0;
        while capture.next_frame().unwrap().is_some() {
            frames += 1;
        }
        assert_eq!(frames, 12);

        drop(capture);
        std::fs::remove_file(&path).unwrap();
    }
}
