//! Conversions between `image` buffers and OpenCV matrices.
//!
//! OpenCV stores colour frames as interleaved BGR; the rest of the crate
//! works on RGB.

use anyhow::{bail, Context, Result};
use image::{GrayImage, RgbImage};
use opencv::core::{self, Mat, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

fn dimensions(mat: &Mat) -> Result<(u32, u32)> {
    let width = u32::try_from(mat.cols()).context("Negative frame width")?;
    let height = u32::try_from(mat.rows()).context("Negative frame height")?;
    Ok((width, height))
}

/// Copy an 8-bit, 3-channel BGR matrix into an RGB image
pub fn mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
    if mat.typ() != core::CV_8UC3 {
        bail!("Unsupported frame type {}, expected 8-bit BGR", mat.typ());
    }
    let (width, height) = dimensions(mat)?;

    // The destination is freshly allocated, hence continuous.
    let mut rgb = Mat::default();
    imgproc::cvt_color_def(mat, &mut rgb, imgproc::COLOR_BGR2RGB)
        .context("Failed to convert frame to RGB")?;

    let data = rgb.data_bytes().context("Failed to access frame data")?;
    RgbImage::from_raw(width, height, data.to_vec())
        .context("Frame data does not match its dimensions")
}

/// Copy an RGB image into a new 8-bit BGR matrix
pub fn rgb_to_mat(image: &RgbImage) -> Result<Mat> {
    let (width, height) = image.dimensions();
    let mut rgb = Mat::new_rows_cols_with_default(
        i32::try_from(height)?,
        i32::try_from(width)?,
        core::CV_8UC3,
        Scalar::all(0.0),
    )
    .context("Failed to allocate frame matrix")?;
    rgb.data_bytes_mut()
        .context("Failed to access frame data")?
        .copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR)
        .context("Failed to convert frame to BGR")?;

    Ok(bgr)
}

/// Copy an 8-bit single-channel matrix into a grayscale image
pub fn mat_to_gray(mat: &Mat) -> Result<GrayImage> {
    if mat.typ() != core::CV_8UC1 {
        bail!("Unsupported mask type {}, expected 8-bit single channel", mat.typ());
    }
    let (width, height) = dimensions(mat)?;

    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone().context("Failed to copy mask")?;
        &owned
    };

    let data = mat.data_bytes().context("Failed to access mask data")?;
    GrayImage::from_raw(width, height, data.to_vec())
        .context("Mask data does not match its dimensions")
}
