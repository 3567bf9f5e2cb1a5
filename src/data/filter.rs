use std::ffi::OsStr;

// ---------------------------------------------------------------------------
// Filename filter: which directory entries are worth opening
// ---------------------------------------------------------------------------

/// Substring every candidate filename must contain.
pub const NAME_MARKER: &str = "data";

/// Extension every candidate filename must end with.
pub const CONTAINER_SUFFIX: &str = ".h5";

/// Whether a directory entry name looks like a detector data container.
///
/// Matching is case sensitive. Names that are not valid UTF-8 never match.
pub fn is_candidate(name: &OsStr) -> bool {
    name.to_str().is_some_and(is_candidate_str)
}

pub fn is_candidate_str(name: &str) -> bool {
    name.contains(NAME_MARKER) && name.ends_with(CONTAINER_SUFFIX)
}
