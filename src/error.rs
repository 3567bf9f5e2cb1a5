use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Per-file outcomes
// ---------------------------------------------------------------------------

/// Why a candidate container contributed nothing to the extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The container opened but has no `/entry/data` group.
    #[error("{0} not found")]
    PathNotFound(&'static str),

    /// Opening or reading the container failed.
    #[error("{0}")]
    Read(String),

    /// The dataset exists but holds neither numbers nor text.
    #[error("unsupported element type: {0}")]
    UnsupportedType(String),
}

impl From<hdf5::Error> for ExtractError {
    fn from(err: hdf5::Error) -> Self {
        ExtractError::Read(err.to_string())
    }
}

/// Failure to turn an extracted array into a TIFF on disk.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shapes other than a single grey, RGB or RGBA page.
    #[error("cannot store an array of shape {0:?} as a single TIFF page")]
    UnsupportedShape(Vec<usize>),

    #[error("cannot encode an empty image of shape {0:?}")]
    EmptyImage(Vec<usize>),

    #[error("image dimension {0} exceeds the TIFF limit")]
    DimensionOverflow(usize),

    #[error("TIFF encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
