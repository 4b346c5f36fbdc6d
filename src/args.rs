use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "apply-sidecar",
    version,
    about = "Write Takeout sidecar timestamps and GPS data back into movie files with exiftool"
)]
pub struct Args {
    /// Directory containing movie files and their .json sidecars
    #[arg(value_name = "DIR")]
    pub media_dir: PathBuf,

    /// exiftool executable to invoke
    #[arg(long, value_name = "PROGRAM", default_value = "exiftool")]
    pub exiftool: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
