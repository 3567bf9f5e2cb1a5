//! Write a sample input directory that exercises every conversion outcome.
//!
//! ```text
//! cargo run --bin generate_sample -- sample_input
//! cargo run -- sample_input sample_output
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hdf5::types::VarLenUnicode;
use hdf5::H5Type;
use ndarray::{Array, Array1, Array3, Dimension};

/// Write sample HDF5 containers covering every conversion outcome.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory to populate (created if missing)
    #[arg(default_value = "sample_input")]
    dir: PathBuf,
}

fn write_frame<T, D>(dir: &Path, name: &str, frame: &Array<T, D>) -> Result<()>
where
    T: H5Type,
    D: Dimension,
{
    let file = hdf5::File::create(dir.join(name)).with_context(|| format!("creating {name}"))?;
    file.create_group("entry")?
        .create_group("data")?
        .new_dataset_builder()
        .with_data(frame)
        .create("data")
        .with_context(|| format!("writing /entry/data/data in {name}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let Args { dir } = Args::parse();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    // 4x4 ramp in a leading singleton axis, as detectors write single frames
    let ramp = Array3::from_shape_fn((1, 4, 4), |(_, y, x)| (y * 4 + x) as u8 * 17);
    write_frame(&dir, "run1_data.h5", &ramp)?;

    // 16-bit gradient; values above 255 wrap when narrowed
    let gradient = Array3::from_shape_fn((1, 64, 64), |(_, y, x)| (y * 64 + x) as u16);
    write_frame(&dir, "run2_data.h5", &gradient)?;

    // Same gradient, LZF-compressed as detector writers often do
    let lzf = hdf5::File::create(dir.join("lzf_data.h5"))?;
    lzf.create_group("entry")?
        .create_group("data")?
        .new_dataset_builder()
        .lzf()
        .with_data(&gradient)
        .create("data")
        .context("writing /entry/data/data in lzf_data.h5")?;
    drop(lzf);

    // Colour page
    let rgb = Array3::from_shape_fn((16, 16, 3), |(y, x, c)| match c {
        0 => (x * 16) as u8,
        1 => (y * 16) as u8,
        _ => 128,
    });
    write_frame(&dir, "rgb_data.h5", &rgb)?;

    // Valid container without /entry/data
    let calib = hdf5::File::create(dir.join("calib_data.h5"))?;
    calib
        .create_group("entry")?
        .create_group("instrument")?
        .new_dataset_builder()
        .with_data(&Array1::from_vec(vec![0.98f64, 1.02]))
        .create("flatfield")?;
    drop(calib);

    // Text instead of pixels
    let labels: Vec<VarLenUnicode> = ["dark", "flat", "signal"]
        .iter()
        .map(|s| s.parse::<VarLenUnicode>())
        .collect::<Result<_, _>>()?;
    write_frame(&dir, "labels_data.h5", &Array1::from_vec(labels))?;

    // Ignored by the filename filter
    std::fs::write(dir.join("notes.txt"), "beamtime notes\n")?;

    println!("Wrote sample containers to {}", dir.display());
    Ok(())
}
