use std::path::PathBuf;

use clap::Parser;

/// Inspect pixel coordinates and select regions of an image.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image to open on start
    pub filename: Option<PathBuf>,

    /// Most verbose log level to print (trace, debug, info, warn, error)
    #[arg(long, default_value_t = tracing::Level::ERROR)]
    pub log_level: tracing::Level,

    /// Name of the color theme, e.g. "Nord" or "Tokyo Night"
    #[arg(long)]
    pub theme: Option<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
