use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_erode, Mask};

/// Side used when a zero kernel size is requested, as OpenCV does for an
/// empty structuring element
const EMPTY_KERNEL_FALLBACK: u32 = 3;

/// Largest side a structuring element can have
const MAX_KERNEL_SIZE: u32 = 511;

/// Erode `mask` with a `kernel_size` x `kernel_size` square
///
/// The square is anchored at `(kernel_size / 2, kernel_size / 2)`. Pixels
/// outside the image do not take part, so regions touching the border are
/// not eroded from that side. Foreground regions narrower than the kernel
/// disappear. Sizes above 511 are clamped to 511.
pub fn erode(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    let size = match kernel_size {
        0 => EMPTY_KERNEL_FALLBACK,
        1 => return mask.clone(),
        size => size.min(MAX_KERNEL_SIZE),
    };

    let anchor = (size / 2) as u8;
    let square = GrayImage::from_pixel(size, size, Luma([255]));
    grayscale_erode(mask, &Mask::from_image(&square, anchor, anchor))
}
