//! K-nearest-neighbours background subtraction through OpenCV.

use super::BackgroundSubtractor;
use crate::convert::{mat_to_gray, rgb_to_mat};
use crate::error::MotionError;
use image::{GrayImage, RgbImage};
use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{self, BackgroundSubtractorKNN};

/// Squared distance under which a sample counts as a neighbour (OpenCV default)
const DIST2_THRESHOLD: f64 = 400.0;

/// Negative rate lets the model derive its learning rate from the history
const AUTO_LEARNING_RATE: f64 = -1.0;

/// OpenCV's KNN background subtractor
///
/// Shadow detection is off, so masks hold only 0 and 255.
pub struct KnnSubtractor {
    model: Ptr<BackgroundSubtractorKNN>,
    mask: Mat,
    size: Option<(u32, u32)>,
    frames: u64,
}

impl KnnSubtractor {
    pub fn new(history: u32) -> opencv::Result<Self> {
        let history = i32::try_from(history).unwrap_or(i32::MAX);
        tracing::debug!("Creating KNN background model with history {}", history);

        let model = video::create_background_subtractor_knn(history, DIST2_THRESHOLD, false)?;
        Ok(Self {
            model,
            mask: Mat::default(),
            size: None,
            frames: 0,
        })
    }

    /// Number of frames the model has learned from
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

fn model_error(e: impl std::fmt::Display) -> MotionError {
    MotionError::Model(e.to_string())
}

impl BackgroundSubtractor for KnnSubtractor {
    fn apply(&mut self, frame: &RgbImage) -> Result<GrayImage, MotionError> {
        // OpenCV silently restarts the model on a size change; refuse instead.
        let (width, height) = frame.dimensions();
        let (expected_width, expected_height) = *self.size.get_or_insert((width, height));
        if (width, height) != (expected_width, expected_height) {
            return Err(MotionError::FrameSize {
                expected_width,
                expected_height,
                actual_width: width,
                actual_height: height,
            });
        }

        let input = rgb_to_mat(frame).map_err(|e| model_error(format!("{:#}", e)))?;
        self.model
            .apply(&input, &mut self.mask, AUTO_LEARNING_RATE)
            .map_err(model_error)?;
        self.frames += 1;

        mat_to_gray(&self.mask).map_err(|e| model_error(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{BACKGROUND, FOREGROUND};
    use image::Rgb;

    fn scene(width: u32, height: u32, patch: Option<(u32, u32, u32)>) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| match patch {
            Some((px, py, side)) if x >= px && x < px + side && y >= py && y < py + side => {
                Rgb([250, 250, 250])
            }
            _ => Rgb([20, 40, 60]),
        })
    }

    #[test]
    fn new_object_is_foreground() {
        let mut model = KnnSubtractor::new(3000).unwrap();
        let mut last = GrayImage::new(0, 0);
        for _ in 0..10 {
            last = model.apply(&scene(40, 30, None)).unwrap();
        }
        assert!(last.pixels().all(|p| p[0] == BACKGROUND));

        let mask = model.apply(&scene(40, 30, Some((10, 5, 6)))).unwrap();
        assert_eq!(mask.get_pixel(12, 7)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(30, 20)[0], BACKGROUND);
        assert_eq!(model.frame_count(), 11);
    }

    #[test]
    fn mask_shape_does_not_depend_on_history() {
        let frames = [
            scene(30, 20, None),
            scene(30, 20, None),
            scene(30, 20, Some((3, 3, 5))),
        ];

        for history in [1, 10, 500, 3000] {
            let mut model = KnnSubtractor::new(history).unwrap();
            for frame in &frames {
                let mask = model.apply(frame).unwrap();
                assert_eq!(mask.dimensions(), (30, 20));
                assert!(mask.pixels().all(|p| p[0] == FOREGROUND || p[0] == BACKGROUND));
            }
        }
    }

    #[test]
    fn frame_size_change_is_rejected() {
        let mut model = KnnSubtractor::new(10).unwrap();
        model.apply(&scene(20, 10, None)).unwrap();

        let err = model.apply(&scene(10, 20, None)).unwrap_err();
        assert_eq!(
            err,
            MotionError::FrameSize {
                expected_width: 20,
                expected_height: 10,
                actual_width: 10,
                actual_height: 20,
            }
        );
    }
}
