/// Data layer: filtering, extraction, and TIFF output.
///
/// Architecture:
/// ```text
///  input dir (*data*.h5)
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name contains "data", ends with ".h5"
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  /entry/data/data → squeezed ExtractedArray
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  narrow to u8 → <stem>.tiff
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;
