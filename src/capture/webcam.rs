use super::{CaptureSource, StreamProperties};
use crate::error::CaptureError;
use anyhow::{Context, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

pub struct WebcamCapture {
    camera: Camera,
    properties: StreamProperties,
}

impl WebcamCapture {
    pub fn open(device_index: u32) -> Result<Self, CaptureError> {
        tracing::info!("Initializing webcam {}", device_index);

        let camera = Self::start_camera(device_index)
            .map_err(|e| CaptureError::open(format!("camera {}", device_index), e))?;

        let resolution = camera.resolution();
        let properties = StreamProperties::new(
            resolution.width(),
            resolution.height(),
            f64::from(camera.frame_rate()),
        );

        tracing::info!(
            "Webcam initialized at {}x{} @ {} fps",
            properties.width,
            properties.height,
            properties.fps
        );

        Ok(Self { camera, properties })
    }

    fn start_camera(device_index: u32) -> Result<Camera> {
        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

        let mut camera = Camera::new(index, requested).context("Failed to open camera")?;

        camera
            .open_stream()
            .context("Failed to open camera stream")?;

        Ok(camera)
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        let frame = self.camera.frame().context("Failed to capture frame")?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .context("Failed to decode frame")?;

        Ok(decoded)
    }
}

impl CaptureSource for WebcamCapture {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        match self.read_frame() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => {
                tracing::warn!("Camera read failed: {:#}", e);
                Ok(None)
            }
        }
    }

    fn properties(&self) -> StreamProperties {
        self.properties
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop camera stream: {}", e);
        } else {
            tracing::debug!("Camera stream stopped");
        }
    }
}
