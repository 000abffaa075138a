#[cfg(feature = "video")]
mod file;
mod sequence;
#[cfg(feature = "camera")]
mod webcam;

#[cfg(feature = "video")]
pub use file::FileCapture;
pub use sequence::FrameSequence;
#[cfg(feature = "camera")]
pub use webcam::WebcamCapture;

use anyhow::Result;
use image::RgbImage;

/// Frame rate assumed when a source does not report a usable one
pub const FALLBACK_FPS: f64 = 30.0;

/// Properties queried once when a source is opened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamProperties {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl StreamProperties {
    /// Build properties, replacing a missing or nonsensical frame rate
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            tracing::warn!(
                "Source reported frame rate {}, assuming {} fps",
                fps,
                FALLBACK_FPS
            );
            FALLBACK_FPS
        };

        Self { width, height, fps }
    }
}

/// Trait for frame sources
pub trait CaptureSource {
    /// Pull the next frame
    ///
    /// Returns `Ok(None)` once the stream has ended or a read failed.
    /// Callers stop on `None`; it is not a transient condition.
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Resolution and frame rate of the stream
    fn properties(&self) -> StreamProperties;
}

impl<T: CaptureSource + ?Sized> CaptureSource for Box<T> {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        (**self).next_frame()
    }

    fn properties(&self) -> StreamProperties {
        (**self).properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_frame_rate_falls_back() {
        assert_eq!(StreamProperties::new(64, 48, 0.0).fps, FALLBACK_FPS);
        assert_eq!(StreamProperties::new(64, 48, f64::NAN).fps, FALLBACK_FPS);
        assert_eq!(StreamProperties::new(64, 48, 25.0).fps, 25.0);
    }
}
