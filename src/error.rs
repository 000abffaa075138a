use thiserror::Error;

/// Invalid input-source selection on the command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Either provide --live as an argument or specify the --video_path. Please check --help.")]
    MissingSource,

    #[error("You cannot provide both --live and --video_path argument together. Please check --help.")]
    ConflictingSources,
}

/// Failure to establish a capture handle
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Error in streaming video, please check --help. (failed to open {source_name})")]
    Open {
        source_name: String,
        #[source]
        cause: anyhow::Error,
    },
}

impl CaptureError {
    pub fn open(source_name: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Open {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    #[error("frame is {actual_width}x{actual_height}, model expects {expected_width}x{expected_height}")]
    FrameSize {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("background model failed: {0}")]
    Model(String),
}
