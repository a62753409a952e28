use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediarage")]
#[command(about = "Media converter: format compatibility and ffmpeg option resolution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported formats grouped by kind
    Formats,

    /// Detect the format of a file or extension
    Classify {
        /// File path or bare extension (e.g. "clip.mov", "mp4")
        file: String,
    },

    /// List the formats a source can be converted to
    Targets {
        /// Source format (e.g. MOV)
        source: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the video encoding options, their choices and defaults
    Options,

    /// Show the ffmpeg command for a conversion without running it
    DryRun(DryRunArgs),

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(clap::Args)]
pub struct DryRunArgs {
    /// File to convert
    pub file: PathBuf,

    /// Target format (e.g. MP4)
    #[arg(long = "to", value_name = "FORMAT")]
    pub target: String,

    /// Constant Rate Factor, 0-51 (overrides config)
    #[arg(long)]
    pub crf: Option<String>,

    /// Output size, e.g. 1280x720 or "no change" (overrides config)
    #[arg(long)]
    pub resolution: Option<String>,

    /// Speed preset, ultrafast..veryslow (overrides config)
    #[arg(long)]
    pub preset: Option<String>,

    /// Frame rate, "auto" or one of 60/30/24/15/12/10/8/6/5 (overrides config)
    #[arg(long)]
    pub fps: Option<String>,

    /// Trim start, HH:MM:SS
    #[arg(long, value_name = "HH:MM:SS")]
    pub trim_start: Option<String>,

    /// Trim end, HH:MM:SS
    #[arg(long, value_name = "HH:MM:SS")]
    pub trim_end: Option<String>,

    /// Output directory (defaults to the input file's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output filename pattern: {basename}, {filename}, {source}, {target}
    #[arg(long)]
    pub pattern: Option<String>,

    /// Overwrite existing output (-y instead of -n)
    #[arg(long)]
    pub overwrite: bool,

    /// Print the conversion request as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
