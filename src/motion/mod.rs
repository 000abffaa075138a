mod bounds;
#[cfg(feature = "video")]
mod knn;
mod morphology;
#[cfg(test)]
pub(crate) mod testing;

pub use bounds::{locate, BoundingBox};
#[cfg(feature = "video")]
pub use knn::KnnSubtractor;
pub use morphology::erode;

use crate::error::MotionError;
use image::{GrayImage, RgbImage};

/// Mask value for foreground pixels
pub const FOREGROUND: u8 = 255;
/// Mask value for background pixels
pub const BACKGROUND: u8 = 0;

/// Trait for background subtraction models
pub trait BackgroundSubtractor {
    /// Classify every pixel of `frame` against the model, then learn from it
    ///
    /// Returns a mask of the frame's size holding [`FOREGROUND`] or
    /// [`BACKGROUND`] per pixel. Frames must be applied in capture order.
    fn apply(&mut self, frame: &RgbImage) -> Result<GrayImage, MotionError>;
}
