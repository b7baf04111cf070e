//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Download the artifacts of a TeamCity build and extract them.
///
/// The token is read from `TEAMCITY_TOKEN` (or `TOKEN`), the server from
/// `TEAMCITY_URL` (or `BASE_URL`).
#[derive(Parser, Debug)]
#[command(name = "tcfetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TeamCity build id
    #[arg(value_name = "BUILD_ID")]
    pub build_id: String,

    /// Directory that receives the archive and the extracted files
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}
