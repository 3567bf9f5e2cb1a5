use std::path::Path;

use anyhow::{Context, Result};
use hdf5::types::TypeDescriptor;
use log::{debug, error, info, warn};

use super::filter::is_candidate;
use super::model::{ArrayData, ExtractedArray, Extraction};
use crate::error::ExtractError;

/// Group whose presence marks a container as carrying image data.
pub const DATA_GROUP: &str = "/entry/data";

/// Dataset holding the detector frame(s).
pub const DATASET_PATH: &str = "/entry/data/data";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extract the image dataset from every candidate container in `dir`.
///
/// Only the listing itself can fail; per-file problems are logged and
/// recorded in [`Extraction::excluded`]. Entries keep listing order.
pub fn extract_directory(dir: &Path) -> Result<Extraction> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("listing input directory {}", dir.display()))?;

    let mut extraction = Extraction::default();

    for entry in entries {
        let entry = entry.with_context(|| format!("listing input directory {}", dir.display()))?;
        let file_name = entry.file_name();
        if !is_candidate(&file_name) {
            continue;
        }
        // Candidates are valid UTF-8 by construction.
        let name = file_name.to_string_lossy().into_owned();

        match extract_file(&entry.path()) {
            Ok(array) => {
                info!("Successfully read image data from: {name}");
                debug!("{name}: {array}");
                extraction.arrays.push((name, array));
            }
            Err(err @ ExtractError::PathNotFound(_)) => {
                warn!("{DATA_GROUP} not found in {name}");
                extraction.excluded.push((name, err));
            }
            Err(err) => {
                error!("Failed to read {name}: {err}");
                extraction.excluded.push((name, err));
            }
        }
    }

    Ok(extraction)
}

/// Read `/entry/data/data` from one container and squeeze it.
///
/// The file handle lives only for the duration of this call and is closed
/// on every return path when it is dropped.
pub fn extract_file(path: &Path) -> Result<ExtractedArray, ExtractError> {
    let file = hdf5::File::open(path)?;

    if !path_exists(&file, DATA_GROUP) {
        return Err(ExtractError::PathNotFound(DATA_GROUP));
    }

    let dataset = file.dataset(DATASET_PATH)?;
    let descriptor = dataset.dtype()?.to_descriptor()?;
    let raw_shape = dataset.shape();

    let data = match &descriptor {
        TypeDescriptor::Integer(_) => ArrayData::Signed(dataset.read_dyn::<i64>()?),
        TypeDescriptor::Unsigned(_) => ArrayData::Unsigned(dataset.read_dyn::<u64>()?),
        TypeDescriptor::Float(_) => ArrayData::Float(dataset.read_dyn::<f64>()?),
        TypeDescriptor::Boolean => ArrayData::Bool(dataset.read_dyn::<bool>()?),
        // Enum values are read through their integer base type.
        TypeDescriptor::Enum(e) if e.signed => ArrayData::Signed(dataset.read_dyn::<i64>()?),
        TypeDescriptor::Enum(_) => ArrayData::Unsigned(dataset.read_dyn::<u64>()?),
        TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => ArrayData::Text {
            shape: raw_shape.clone(),
        },
        other => return Err(ExtractError::UnsupportedType(other.to_string())),
    };

    let data = data.squeeze();
    debug!(
        "{}: {descriptor} dataset, shape {raw_shape:?} squeezed to {:?}",
        path.display(),
        data.shape()
    );

    Ok(ExtractedArray {
        data,
        element_type: descriptor.to_string(),
    })
}

// -- HDF5 helpers --

/// Walk `path` one link at a time so a missing intermediate group reads as
/// "absent" instead of an HDF5 error.
fn path_exists(root: &hdf5::Group, path: &str) -> bool {
    let mut group = root.clone();
    let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();

    while let Some(component) = components.next() {
        if !group.link_exists(component) {
            return false;
        }
        if components.peek().is_some() {
            match group.group(component) {
                Ok(child) => group = child,
                Err(_) => return false,
            }
        }
    }
    true
}
