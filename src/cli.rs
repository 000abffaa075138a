use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Detect motion from a live camera or a video.")]
pub struct Args {
    /// Use the camera to detect motion in a livestream
    #[arg(long)]
    pub live: bool,

    /// Path of the video to be used for motion detection
    #[arg(long = "video_path")]
    pub video_path: Option<PathBuf>,

    /// Number of previous frames the background subtraction model remembers
    #[arg(long, default_value_t = 3000)]
    pub history: u32,

    /// Kernel size used for the erosion operation
    #[arg(long = "kernel_size", default_value_t = 10)]
    pub kernel_size: u32,

    /// Save the annotated output video
    #[arg(long = "save_video")]
    pub save_video: bool,

    /// Camera device index used with --live
    #[arg(long = "camera_index", default_value_t = 0)]
    pub camera_index: u32,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn setup_logging(&self) {
        let log_level = if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_target(false)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::try_parse_from(["motion-detect", "--live"]).unwrap();
        assert!(args.live);
        assert_eq!(args.video_path, None);
        assert_eq!(args.history, 3000);
        assert_eq!(args.kernel_size, 10);
        assert!(!args.save_video);
        assert_eq!(args.camera_index, 0);
    }

    #[test]
    fn underscore_flags_are_accepted() {
        let args = Args::try_parse_from([
            "motion-detect",
            "--video_path",
            "clip.mp4",
            "--history",
            "500",
            "--kernel_size",
            "4",
            "--save_video",
        ])
        .unwrap();
        assert_eq!(args.video_path, Some(PathBuf::from("clip.mp4")));
        assert_eq!(args.history, 500);
        assert_eq!(args.kernel_size, 4);
        assert!(args.save_video);
    }
}
