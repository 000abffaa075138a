use clap::Parser;
use motion_detect::app::{self, NativeBackend};
use motion_detect::cli::Args;
use motion_detect::config::Config;

fn main() {
    let args = Args::parse();
    args.setup_logging();

    tracing::info!("motion-detect starting");

    let config = match Config::try_from(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Every resource opened by `run` has been released by the time it returns.
    match app::run(&config, &mut NativeBackend) {
        Ok(summary) => tracing::info!("Stopped: {:?}", summary.stop),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
