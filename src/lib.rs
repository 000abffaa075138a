pub mod app;
pub mod capture;
pub mod cli;
pub mod config;
#[cfg(feature = "video")]
pub mod convert;
pub mod display;
pub mod error;
pub mod motion;
pub mod output;
pub mod pipeline;
pub mod render;
