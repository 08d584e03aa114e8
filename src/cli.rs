use clap::Parser;

/// Runs a wavelet or Fourier transform over a signal and prints every stage.
#[derive(Parser)]
#[command(
    name = "dwt-engine",
    version,
    about = "Fast wavelet, wavelet packet and discrete Fourier transforms"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Transform: dft, fwt or wpt.
    pub transform: String,

    /// Wavelet for fwt/wpt, e.g. haar02, daub04, coif06.
    #[arg(default_value = "haar02")]
    pub wavelet: String,

    /// Stop the decomposition after this many levels.
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Accept signals of any length (power-of-two segments).
    #[arg(short, long = "any-length")]
    pub any_length: bool,

    /// Input samples; eight ones when omitted.
    #[arg(last = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}
