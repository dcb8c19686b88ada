//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "rangegen")]
#[command(
    author,
    version,
    about = "Generate Russia IP ranges plus camera hotspot target lists (ports 80, 3000, 8000, 37777)"
)]
pub struct Cli {
    /// Combined output file [default: all_russia_combined.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the per-category files [default: russia_ranges]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Also generate masscan/nmap/NESCA configs
    #[arg(short, long)]
    pub configs: bool,

    /// Directory for scanner configs [default: scan_configs]
    #[arg(long)]
    pub configs_dir: Option<PathBuf>,

    /// Optional YAML config file (sources, timeout, output paths)
    #[arg(long = "config")]
    pub config_file: Option<PathBuf>,

    /// Continue with curated categories only if every bulk source fails
    #[arg(long)]
    pub allow_empty_bulk: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply explicitly given flags on top of a loaded or default config
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(directory) = &self.directory {
            config.directory = directory.clone();
        }
        if let Some(configs_dir) = &self.configs_dir {
            config.configs_dir = configs_dir.clone();
        }
        config
    }
}
