use super::Display;
use crate::convert::rgb_to_mat;
use anyhow::{Context, Result};
use image::RgbImage;
use opencv::highgui;
use std::time::Duration;

/// OpenCV HighGUI window, destroyed on drop
pub struct HighGuiWindow {
    name: String,
}

impl HighGuiWindow {
    pub fn open(name: &str) -> Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("Failed to open display window '{}'", name))?;
        tracing::debug!("Opened window '{}'", name);

        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl Display for HighGuiWindow {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        let mat = rgb_to_mat(frame)?;
        highgui::imshow(&self.name, &mat).context("Failed to show frame")?;
        Ok(())
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        // wait_key(0) blocks forever, so never ask for less than 1 ms
        let millis = i32::try_from(wait.as_millis()).unwrap_or(i32::MAX).max(1);
        let key = highgui::wait_key(millis)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.name) {
            tracing::warn!("Failed to destroy window '{}': {}", self.name, e);
        }
    }
}
