// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Collect Options:
    --source, -s <SOURCE>  Path to the input video file
    --output, -o <OUTPUT>  Path of the CSV table to write
    --joints <JOINTS>      Comma-separated joint names to collect, or 'all' [default: all]
    --model, -m <MODEL>    Path to a YOLO-pose ONNX model (requires the 'onnx' feature)
    --mirror               Mirrored detection: flip the horizontal axis and swap left/right joints
    --multiplier <K>       Uniform coordinate multiplier [default: 1.0]
    --skip-incomplete      Skip frames with missing joints instead of aborting
    --verbose              Show verbose output

Examples:
    joint-collector collect -s walk.mp4 -o walk.csv -m yolo11n-pose.onnx
    joint-collector collect -s walk.mp4 -o walk.csv -m yolo11n-pose.onnx --joints root,nose,left_wrist
    joint-collector collect -s mirror_feed.mp4 -o out.csv -m yolo11n-pose.onnx --mirror
    joint-collector collect -s noisy.mp4 -o out.csv -m yolo11n-pose.onnx --skip-incomplete"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect joint coordinates from a video into a CSV table
    Collect(CollectArgs),
}

/// Arguments for the collect command.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Path to the input video file
    #[arg(short, long)]
    pub source: String,

    /// Path of the CSV table to write
    #[arg(short, long)]
    pub output: String,

    /// Comma-separated joint names to collect, or 'all'
    #[arg(long, default_value = "all")]
    pub joints: String,

    /// Path to a YOLO-pose ONNX model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Mirrored detection (flip horizontal axis, swap left/right joints)
    #[arg(long, default_value_t = false)]
    pub mirror: bool,

    /// Uniform coordinate multiplier
    #[arg(long, default_value_t = 1.0)]
    pub multiplier: f64,

    /// Skip frames with missing joints instead of aborting the run
    #[arg(long, default_value_t = false)]
    pub skip_incomplete: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
