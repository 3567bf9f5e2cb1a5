mod data;
mod error;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Convert the `/entry/data/data` frame of every `*data*.h5` file in a
/// directory into an 8-bit TIFF.
#[derive(Parser, Debug)]
#[command(name = "hdf2tiff")]
#[command(version)]
struct Cli {
    /// Directory containing the HDF5 containers
    input_dir: PathBuf,

    /// Directory receiving the TIFF files (created if missing)
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    pipeline::hdf2tiff(&cli.input_dir, &cli.output_dir)?;
    Ok(())
}
