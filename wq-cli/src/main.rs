//! WQ CLI - Command line tool for recording and browsing water quality measurements.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wq-cli",
    version,
    about = "Water quality measurement toolkit"
)]
struct Cli {
    /// Measurement spreadsheet (CSV)
    #[arg(long, global = true, default_value = wq_cmd::DEFAULT_DATA_FILE)]
    data: PathBuf,

    #[command(subcommand)]
    command: wq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using measurement file {}", cli.data.display());
    wq_cmd::run(cli.command, &cli.data)
}
