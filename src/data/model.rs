use std::fmt;

use ndarray::{ArrayD, Axis};

use crate::error::ExtractError;

// ---------------------------------------------------------------------------
// ArrayData – element storage, one variant per family of HDF5 types
// ---------------------------------------------------------------------------

/// Dense element storage for a dataset read into memory.
///
/// Integers are widened to 64 bits on read so the later `u8` narrowing
/// wraps exactly as it would from the source width.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Signed(ArrayD<i64>),
    Unsigned(ArrayD<u64>),
    Float(ArrayD<f64>),
    Bool(ArrayD<bool>),
    /// Textual content is never written, so only the shape is kept.
    Text { shape: Vec<usize> },
}

impl ArrayData {
    pub fn shape(&self) -> &[usize] {
        match self {
            ArrayData::Signed(a) => a.shape(),
            ArrayData::Unsigned(a) => a.shape(),
            ArrayData::Float(a) => a.shape(),
            ArrayData::Bool(a) => a.shape(),
            ArrayData::Text { shape } => shape,
        }
    }

    #[cfg(test)]
    pub fn is_textual(&self) -> bool {
        matches!(self, ArrayData::Text { .. })
    }

    /// Drop every axis of length 1.
    pub fn squeeze(self) -> Self {
        match self {
            ArrayData::Signed(a) => ArrayData::Signed(squeeze(a)),
            ArrayData::Unsigned(a) => ArrayData::Unsigned(squeeze(a)),
            ArrayData::Float(a) => ArrayData::Float(squeeze(a)),
            ArrayData::Bool(a) => ArrayData::Bool(squeeze(a)),
            ArrayData::Text { shape } => ArrayData::Text {
                shape: squeeze_shape(&shape),
            },
        }
    }

    /// Narrow every element to `u8`, wrapping rather than clamping.
    /// `None` for textual data.
    pub fn to_u8(&self) -> Option<ArrayD<u8>> {
        match self {
            ArrayData::Signed(a) => Some(a.mapv(|v| v as u8)),
            ArrayData::Unsigned(a) => Some(a.mapv(|v| v as u8)),
            ArrayData::Float(a) => Some(a.mapv(narrow_float)),
            ArrayData::Bool(a) => Some(a.mapv(u8::from)),
            ArrayData::Text { .. } => None,
        }
    }
}

/// Truncate toward zero, then wrap modulo 256. NaN maps to 0.
fn narrow_float(v: f64) -> u8 {
    (v as i64) as u8
}

/// Remove all length-1 axes. An all-ones shape collapses to 0-d.
pub fn squeeze<T>(mut array: ArrayD<T>) -> ArrayD<T> {
    for axis in (0..array.ndim()).rev() {
        if array.len_of(Axis(axis)) == 1 {
            array = array.index_axis_move(Axis(axis), 0);
        }
    }
    array
}

pub fn squeeze_shape(shape: &[usize]) -> Vec<usize> {
    shape.iter().copied().filter(|&n| n != 1).collect()
}

// ---------------------------------------------------------------------------
// ExtractedArray – one dataset pulled out of one container
// ---------------------------------------------------------------------------

/// A squeezed dataset together with the element type it was stored as.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArray {
    pub data: ArrayData,
    /// HDF5 type as described by the file, e.g. `uint16` or `string`.
    pub element_type: String,
}

impl ExtractedArray {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

impl fmt::Display for ExtractedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} array of shape {:?}", self.element_type, self.shape())
    }
}

// ---------------------------------------------------------------------------
// Extraction – the result mapping for one run
// ---------------------------------------------------------------------------

/// Everything the extractor learned about one input directory.
///
/// `arrays` keeps directory listing order; filenames are unique because
/// they come from a single listing.
#[derive(Debug, Default)]
pub struct Extraction {
    pub arrays: Vec<(String, ExtractedArray)>,
    /// Candidates that matched the filename filter but yielded no array.
    pub excluded: Vec<(String, ExtractError)>,
}

impl Extraction {
    #[cfg(test)]
    pub fn get(&self, filename: &str) -> Option<&ExtractedArray> {
        self.arrays
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, array)| array)
    }

    #[cfg(test)]
    pub fn contains(&self, filename: &str) -> bool {
        self.get(filename).is_some()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn missing_path_count(&self) -> usize {
        self.excluded
            .iter()
            .filter(|(_, err)| matches!(err, ExtractError::PathNotFound(_)))
            .count()
    }

    pub fn read_failure_count(&self) -> usize {
        self.excluded.len() - self.missing_path_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array, IxDyn};

    #[test]
    fn squeeze_removes_leading_singleton() {
        let a = Array::from_shape_fn(IxDyn(&[1, 10, 10]), |ix| ix[1] * 10 + ix[2]);
        let s = squeeze(a);
        assert_eq!(s.shape(), &[10, 10]);
        assert_eq!(s[[3, 4]], 34);
    }

    #[test]
    fn squeeze_removes_interior_and_trailing_singletons() {
        let a = ArrayD::<u8>::zeros(IxDyn(&[1, 5, 1, 3, 1]));
        assert_eq!(squeeze(a).shape(), &[5, 3]);
    }

    #[test]
    fn squeeze_all_ones_yields_scalar() {
        let a = ArrayD::from_elem(IxDyn(&[1, 1]), 7i64);
        let s = squeeze(a);
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn text_squeeze_touches_shape_only() {
        let data = ArrayData::Text { shape: vec![1, 2, 1] }.squeeze();
        assert_eq!(data.shape(), &[2]);
        assert!(data.to_u8().is_none());
    }

    #[test]
    fn integer_narrowing_wraps() {
        let signed = ArrayData::Signed(arr1(&[0i64, 255, 256, 300, -1]).into_dyn());
        assert_eq!(
            signed.to_u8().unwrap().into_raw_vec_and_offset().0,
            vec![0, 255, 0, 44, 255]
        );

        let unsigned = ArrayData::Unsigned(arr1(&[511u64, 65535]).into_dyn());
        assert_eq!(
            unsigned.to_u8().unwrap().into_raw_vec_and_offset().0,
            vec![255, 255]
        );
    }

    #[test]
    fn float_narrowing_truncates_then_wraps() {
        let floats = ArrayData::Float(arr1(&[1.9, 255.5, 256.2, -1.0, f64::NAN]).into_dyn());
        assert_eq!(
            floats.to_u8().unwrap().into_raw_vec_and_offset().0,
            vec![1, 255, 0, 255, 0]
        );
    }

    #[test]
    fn extraction_counts_exclusions_by_kind() {
        let mut extraction = Extraction::default();
        extraction
            .excluded
            .push(("a_data.h5".into(), ExtractError::PathNotFound("/entry/data")));
        extraction
            .excluded
            .push(("b_data.h5".into(), ExtractError::Read("truncated".into())));
        extraction
            .excluded
            .push(("c_data.h5".into(), ExtractError::UnsupportedType("compound".into())));

        assert_eq!(extraction.missing_path_count(), 1);
        assert_eq!(extraction.read_failure_count(), 2);
        assert!(extraction.is_empty());
        assert!(!extraction.contains("a_data.h5"));
    }
}
