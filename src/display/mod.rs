#[cfg(feature = "video")]
mod highgui;

#[cfg(feature = "video")]
pub use highgui::HighGuiWindow;

use anyhow::Result;
use image::RgbImage;
use std::time::Duration;

/// Key that stops the loop
pub const QUIT_KEY: char = 'q';

/// Trait for interactive display surfaces
pub trait Display {
    /// Show a frame, replacing the previous one
    fn show(&mut self, frame: &RgbImage) -> Result<()>;

    /// Wait up to `wait` for a key press
    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>>;
}

impl<T: Display + ?Sized> Display for Box<T> {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        (**self).show(frame)
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        (**self).poll_key(wait)
    }
}
