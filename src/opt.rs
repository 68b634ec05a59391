use std::path::PathBuf;

use jetmatch::Variant;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "jetmatch",
    about = "Match reconstructed jets to generator-level jets"
)]
pub struct Opt {
    /// Matching variant: 'basic' or 'electron-veto'
    #[structopt(long)]
    pub variant: Option<Variant>,

    /// Largest ΔR of an accepted jet pair
    #[structopt(long)]
    pub max_delta_r: Option<f64>,

    /// Settings file in JSON format
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Output directory for histograms and plots
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    pub output: PathBuf,

    /// Only write histograms, no plots
    #[structopt(long)]
    pub no_plots: bool,

    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[structopt(short, long, default_value = "info")]
    pub verbosity: String,

    /// Event files with one JSON event record per line
    #[structopt(parse(from_os_str), required = true)]
    pub files: Vec<PathBuf>,
}
