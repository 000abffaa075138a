use super::{BackgroundSubtractor, BACKGROUND, FOREGROUND};
use crate::error::MotionError;
use image::{GrayImage, RgbImage};

/// Squared RGB distance from the first frame at which a pixel is foreground
const DIST2_THRESHOLD: u32 = 400;

/// Stand-in background model: the first frame is the background, forever
///
/// Deterministic and free of system libraries, so loop and setup tests can
/// run without OpenCV.
#[derive(Debug, Default)]
pub(crate) struct FirstFrameModel {
    background: Option<RgbImage>,
    frames: u64,
}

impl FirstFrameModel {
    pub(crate) fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl BackgroundSubtractor for FirstFrameModel {
    fn apply(&mut self, frame: &RgbImage) -> Result<GrayImage, MotionError> {
        let background = self.background.get_or_insert_with(|| frame.clone());
        if background.dimensions() != frame.dimensions() {
            return Err(MotionError::FrameSize {
                expected_width: background.width(),
                expected_height: background.height(),
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }
        self.frames += 1;

        Ok(GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
            let dist2: u32 = frame
                .get_pixel(x, y)
                .0
                .iter()
                .zip(background.get_pixel(x, y).0)
                .map(|(&a, b)| u32::from(a.abs_diff(b)).pow(2))
                .sum();
            image::Luma([if dist2 >= DIST2_THRESHOLD { FOREGROUND } else { BACKGROUND }])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn differences_from_first_frame_are_foreground() {
        let mut model = FirstFrameModel::default();
        assert!(model.apply(&RgbImage::new(4, 4)).unwrap().pixels().all(|p| p[0] == BACKGROUND));

        let mut frame = RgbImage::new(4, 4);
        frame.put_pixel(1, 2, Rgb([30, 0, 0]));
        frame.put_pixel(3, 3, Rgb([5, 5, 5]));
        let mask = model.apply(&frame).unwrap();
        assert_eq!(mask.get_pixel(1, 2)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(3, 3)[0], BACKGROUND);
        assert_eq!(model.frame_count(), 2);

        assert!(model.apply(&RgbImage::new(2, 2)).is_err());
    }
}
