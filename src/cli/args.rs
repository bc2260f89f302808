//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the set-half-starts command
#[derive(Args, Debug)]
pub struct SetHalfStartsArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Start of the first half in video time (mm:ss)
    pub first_half_start: String,

    /// Start of the second half in video time (mm:ss)
    pub second_half_start: String,

    /// Where to write the video with anchors (default: overwrite the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the read-anchors command
#[derive(Args, Debug)]
pub struct ReadAnchorsArgs {
    /// Video file path
    pub video: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Video file path
    pub video: PathBuf,

    /// Clip range as PERIOD@START-END in match clock, e.g. 2@45:00-45:30.
    /// Repeat to stitch several clips together in order.
    #[arg(short, long = "range", value_name = "PERIOD@START-END", required = true)]
    pub ranges: Vec<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,
}
