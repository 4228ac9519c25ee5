// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use joint_collector::cli::args::{Cli, Commands};
use joint_collector::cli::collect::run_collection;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Collect(args) => run_collection(&args),
    }
}
