use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "scouting",
    about = "Produce scouting records from trigger-level events"
)]
pub struct Opt {
    /// Producer configuration in JSON format
    #[clap(short, long)]
    pub config: PathBuf,

    /// Output file for the produced records, one JSON line per event.
    /// Defaults to standard output.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[clap(short, long, default_value = "info")]
    pub verbosity: String,

    /// Event files to import
    pub files: Vec<PathBuf>,
}
