use crate::motion::BoundingBox;
use image::{imageops, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

pub const DISPLAY_WIDTH: u32 = 1280;
pub const DISPLAY_HEIGHT: u32 = 720;

pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const BOX_THICKNESS: u32 = 2;

/// Draw a rectangle from `(x, y)` to `(x + width, y + height)` onto `frame`
///
/// Parts falling outside the frame are clipped. The 2 px outline grows
/// inward from that edge, where OpenCV would centre the stroke on it.
pub fn draw_bounds(frame: &mut RgbImage, bounds: &BoundingBox) {
    for inset in 0..BOX_THICKNESS {
        let (Some(width), Some(height)) = (
            (bounds.width + 1).checked_sub(2 * inset),
            (bounds.height + 1).checked_sub(2 * inset),
        ) else {
            break;
        };
        if width == 0 || height == 0 {
            break;
        }

        let rect = Rect::at((bounds.x + inset) as i32, (bounds.y + inset) as i32).of_size(width, height);
        draw_hollow_rect_mut(frame, rect, BOX_COLOR);
    }
}

/// Replicate a single-channel mask into three channels
pub fn mask_to_rgb(mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let value = mask.get_pixel(x, y)[0];
        Rgb([value, value, value])
    })
}

/// Place the annotated frame and the mask side by side, scaled for display
pub fn compose(frame: &RgbImage, mask: &GrayImage) -> RgbImage {
    let _span = tracing::debug_span!("compose").entered();

    let (width, height) = frame.dimensions();
    let mut stacked = RgbImage::new(width + mask.width(), height.max(mask.height()));
    imageops::replace(&mut stacked, frame, 0, 0);
    imageops::replace(&mut stacked, &mask_to_rgb(mask), i64::from(width), 0);

    imageops::resize(
        &stacked,
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        imageops::FilterType::Triangle,
    )
}
