use std::ffi::OsStr;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::tiff::TiffEncoder;
use image::ExtendedColorType;
use log::{info, warn};
use ndarray::ArrayD;

use super::model::ExtractedArray;
use crate::error::WriteError;

/// Extension given to every output image.
pub const OUTPUT_EXTENSION: &str = "tiff";

/// What [`write_tiff`] did with one array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Textual data; nothing was written.
    Skipped { element_type: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// `<output_dir>/<stem of original_filename>.tiff`
pub fn output_path(output_dir: &Path, original_filename: &str) -> PathBuf {
    let stem = Path::new(original_filename)
        .file_stem()
        .unwrap_or_else(|| OsStr::new(original_filename));
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    output_dir.join(file_name)
}

/// Encode `array` as a single-page 8-bit TIFF in `output_dir`.
///
/// An existing file of the same name is overwritten. Textual arrays are
/// skipped. Encoding problems are returned, not logged.
pub fn write_tiff(
    array: &ExtractedArray,
    output_dir: &Path,
    original_filename: &str,
) -> Result<WriteOutcome, WriteError> {
    let Some(pixels) = array.data.to_u8() else {
        warn!(
            "Data is not numerical: {}. Skipping conversion for {original_filename}.",
            array.element_type
        );
        return Ok(WriteOutcome::Skipped {
            element_type: array.element_type.clone(),
        });
    };

    let path = output_path(output_dir, original_filename);
    encode_page(&pixels, &path)?;
    info!("Saved TIFF to {}", path.display());
    Ok(WriteOutcome::Written(path))
}

// ---------------------------------------------------------------------------
// Page layout and encoding
// ---------------------------------------------------------------------------

/// Geometry of a single TIFF page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageLayout {
    width: u32,
    height: u32,
    color: ExtendedColorType,
}

/// Map a squeezed shape onto one page:
/// * `()`        → 1×1 grey
/// * `(w)`       → one grey row
/// * `(h, w)`    → grey
/// * `(h, w, 3)` → RGB
/// * `(h, w, 4)` → RGBA
fn page_layout(shape: &[usize]) -> Result<PageLayout, WriteError> {
    let (height, width, color) = match *shape {
        [] => (1, 1, ExtendedColorType::L8),
        [w] => (1, w, ExtendedColorType::L8),
        [h, w] => (h, w, ExtendedColorType::L8),
        [h, w, 3] => (h, w, ExtendedColorType::Rgb8),
        [h, w, 4] => (h, w, ExtendedColorType::Rgba8),
        _ => return Err(WriteError::UnsupportedShape(shape.to_vec())),
    };

    if width == 0 || height == 0 {
        return Err(WriteError::EmptyImage(shape.to_vec()));
    }

    Ok(PageLayout {
        width: u32::try_from(width).map_err(|_| WriteError::DimensionOverflow(width))?,
        height: u32::try_from(height).map_err(|_| WriteError::DimensionOverflow(height))?,
        color,
    })
}

fn encode_page(pixels: &ArrayD<u8>, path: &Path) -> Result<(), WriteError> {
    let layout = page_layout(pixels.shape())?;
    // Logical (row-major) order regardless of memory layout.
    let buf: Vec<u8> = pixels.iter().copied().collect();

    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let encoder = TiffEncoder::new(BufWriter::new(file));
    encoder.encode(&buf, layout.width, layout.height, layout.color)?;
    Ok(())
}
