use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidfetch")]
#[command(author, version, about = "Download videos, remuxing HLS streams into MP4")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a video, remuxing it to MP4 if it is an HLS stream
    Fetch {
        /// Source URL (an .m3u8 playlist or a direct file link)
        #[arg(required = true)]
        url: String,

        /// Name for the saved file (sanitized, .mp4 is appended)
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to write the MP4 into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Print alternative download instructions for a URL as JSON
    Advise {
        /// Source URL
        #[arg(required = true)]
        url: String,

        /// Name for the saved file
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },
}
