mod cli;
mod logging;

use std::{process, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use dwt_engine::{Transform1D, TransformConfig, TransformKind, WaveletType};
use tracing::info;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_domain(label: &str, values: &[f64]) {
    let joined = values
        .iter()
        .map(|x| format!("{x:.6}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{label:<16}{joined}");
}

fn run(cli: Cli) -> Result<()> {
    let kind: TransformKind = cli.transform.parse()?;
    let mut config = TransformConfig::new(kind).with_any_length(cli.any_length);
    if kind != TransformKind::Dft {
        let wavelet: WaveletType = cli.wavelet.parse()?;
        config = config.with_wavelet(wavelet);
    }
    if let Some(steps) = cli.steps {
        config = config.with_steps(steps);
    }
    let transform = config
        .build::<f64>()
        .context("invalid transform configuration")?;

    let arr_time = if cli.values.is_empty() {
        vec![1.; 8]
    } else {
        cli.values
    };
    info!(transform = %transform.describe(), len = arr_time.len(), "running");

    let now = Instant::now();
    let arr_hilb = transform.forward(&arr_time).context("forward transform failed")?;
    let arr_reco = transform.reverse(&arr_hilb).context("reverse transform failed")?;
    let elapsed = now.elapsed();

    let coeff_label = if kind == TransformKind::Dft {
        "frequency"
    } else {
        "hilbert"
    };
    println!("{}", transform.describe());
    print_domain("time", &arr_time);
    print_domain(coeff_label, &arr_hilb);
    print_domain("reconstructed", &arr_reco);
    info!("round trip took {} us", elapsed.as_micros());
    Ok(())
}
