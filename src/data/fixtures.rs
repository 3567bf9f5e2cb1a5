//! HDF5 containers shaped like detector output, for tests.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use hdf5::types::VarLenUnicode;
use hdf5::H5Type;
use log::{Level, LevelFilter, Log, Metadata, Record};
use ndarray::{Array, Array1, Dimension};

/// Per-pixel exposure tag, stored as an HDF5 enum over `u8`.
#[derive(H5Type, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Exposure {
    Dark = 0,
    Flat = 1,
    Signal = 200,
}

/// Write `frame` to `<dir>/<name>` at `/entry/data/data`.
pub fn write_frame<T, D>(dir: &Path, name: &str, frame: &Array<T, D>) -> hdf5::Result<PathBuf>
where
    T: H5Type,
    D: Dimension,
{
    let path = dir.join(name);
    let file = hdf5::File::create(&path)?;
    let data = file.create_group("entry")?.create_group("data")?;
    data.new_dataset_builder().with_data(frame).create("data")?;
    Ok(path)
}

/// Like [`write_frame`], with the dataset LZF-compressed.
pub fn write_lzf_frame<T, D>(dir: &Path, name: &str, frame: &Array<T, D>) -> hdf5::Result<PathBuf>
where
    T: H5Type,
    D: Dimension,
{
    let path = dir.join(name);
    let file = hdf5::File::create(&path)?;
    let data = file.create_group("entry")?.create_group("data")?;
    data.new_dataset_builder()
        .lzf()
        .with_data(frame)
        .create("data")?;
    Ok(path)
}

/// A valid container with an `/entry` group but no `/entry/data`.
pub fn write_without_data_group(dir: &Path, name: &str) -> hdf5::Result<PathBuf> {
    let path = dir.join(name);
    let file = hdf5::File::create(&path)?;
    let instrument = file.create_group("entry")?.create_group("instrument")?;
    instrument
        .new_dataset_builder()
        .with_data(&Array1::from_vec(vec![1.0f64, 2.0]))
        .create("calibration")?;
    Ok(path)
}

/// Variable-length UTF-8 strings at `/entry/data/data`.
pub fn write_strings(dir: &Path, name: &str, values: &[&str]) -> hdf5::Result<PathBuf> {
    let strings: Vec<VarLenUnicode> = values
        .iter()
        .map(|s| s.parse::<VarLenUnicode>())
        .collect::<Result<_, _>>()
        .map_err(|e| hdf5::Error::from(e.to_string()))?;
    write_frame(dir, name, &Array1::from_vec(strings))
}

// ---------------------------------------------------------------------------
// Log capture: records every message so tests can assert on status lines
// ---------------------------------------------------------------------------

struct LogCollector {
    entries: Mutex<Vec<(Level, String)>>,
}

impl Log for LogCollector {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static COLLECTOR: OnceLock<LogCollector> = OnceLock::new();

/// Install the collector as the global logger. Safe to call from every test.
pub fn capture_logs() {
    let collector = COLLECTOR.get_or_init(|| LogCollector {
        entries: Mutex::new(Vec::new()),
    });
    if log::set_logger(collector).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Captured messages containing `needle`, in emission order.
pub fn logged_lines_mentioning(needle: &str) -> Vec<(Level, String)> {
    COLLECTOR
        .get()
        .map(|c| {
            c.entries
                .lock()
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|(_, msg)| msg.contains(needle))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default()
}
