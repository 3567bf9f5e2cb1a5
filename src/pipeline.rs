use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

use crate::data::loader::extract_directory;
use crate::data::writer::{write_tiff, WriteOutcome};

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Per-outcome counts for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Candidates whose dataset was read into memory.
    pub extracted: usize,
    /// Candidates lacking `/entry/data`.
    pub missing_path: usize,
    /// Candidates that could not be opened or read.
    pub read_failures: usize,
    pub written: usize,
    /// Extracted arrays holding text.
    pub skipped: usize,
    pub write_failures: usize,
}

impl ConversionSummary {
    pub fn candidates(&self) -> usize {
        self.extracted + self.missing_path + self.read_failures
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Convert every `*data*.h5` container in `input_dir` into a TIFF in
/// `output_dir`.
///
/// All extraction happens before any writing. A failure to write one file
/// is logged and counted; the remaining files are still written. Only an
/// unusable input or output directory aborts the run.
pub fn hdf2tiff(input_dir: &Path, output_dir: &Path) -> Result<ConversionSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let extraction = extract_directory(input_dir)?;

    let mut summary = ConversionSummary {
        extracted: extraction.len(),
        missing_path: extraction.missing_path_count(),
        read_failures: extraction.read_failure_count(),
        ..Default::default()
    };

    for (file_name, array) in &extraction.arrays {
        match write_tiff(array, output_dir, file_name) {
            Ok(WriteOutcome::Written(_)) => summary.written += 1,
            Ok(WriteOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(err) => {
                error!("Failed to write {file_name}: {err}");
                summary.write_failures += 1;
            }
        }
    }

    info!(
        "Converted {} of {} candidate files ({} skipped, {} without {}, {} unreadable, {} write failures)",
        summary.written,
        summary.candidates(),
        summary.skipped,
        summary.missing_path,
        crate::data::loader::DATA_GROUP,
        summary.read_failures,
        summary.write_failures,
    );

    Ok(summary)
}
