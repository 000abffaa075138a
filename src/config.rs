use crate::cli::Args;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY: u32 = 3000;
pub const DEFAULT_KERNEL_SIZE: u32 = 10;

/// Where frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    Camera { index: u32 },
    File(PathBuf),
}

impl SourceMode {
    /// Name of the recording written when saving is enabled
    pub fn output_file_name(&self) -> &'static str {
        match self {
            SourceMode::Camera { .. } => "output_live_video.mp4",
            SourceMode::File(_) => "output_video.mp4",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceMode::Camera { index } => format!("camera {}", index),
            SourceMode::File(path) => path.display().to_string(),
        }
    }
}

/// Immutable run parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceMode,
    pub history: u32,
    pub kernel_size: u32,
    pub save_video: bool,
}

impl Config {
    pub fn new(source: SourceMode) -> Self {
        Self {
            source,
            history: DEFAULT_HISTORY,
            kernel_size: DEFAULT_KERNEL_SIZE,
            save_video: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        Path::new(self.source.output_file_name())
    }
}

impl TryFrom<&Args> for Config {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let source = match (args.live, &args.video_path) {
            (false, None) => return Err(ConfigError::MissingSource),
            (true, Some(_)) => return Err(ConfigError::ConflictingSources),
            (true, None) => SourceMode::Camera {
                index: args.camera_index,
            },
            (false, Some(path)) => SourceMode::File(path.clone()),
        };

        Ok(Self {
            source,
            history: args.history,
            kernel_size: args.kernel_size,
            save_video: args.save_video,
        })
    }
}
