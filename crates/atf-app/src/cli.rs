use std::path::PathBuf;

use clap::Parser;

/// Replays a recorded OCR transcript through the league/team selection loop
#[derive(Debug, Parser)]
#[command(name = "atf", version, about, disable_version_flag = true)]
pub struct Args {
    /// Teams list YAML file
    #[arg(long)]
    pub list: PathBuf,

    /// Game version, selects the OCR regions in the config
    #[arg(long = "version")]
    pub game_version: String,

    /// Configuration file
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// OCR transcript, one sample per line
    #[arg(long)]
    pub transcript: PathBuf,

    #[arg(long, default_value_t = 1920)]
    pub frame_width: u32,

    #[arg(long, default_value_t = 1080)]
    pub frame_height: u32,

    /// Log as JSON lines
    #[arg(long)]
    pub json: bool,
}
