//! Structural limits applied while walking geometry payloads.

/// Minimum number of ordinates in a coordinate.
pub const MIN_COORDINATE_DIMS: usize = 2;

/// Maximum number of ordinates in a coordinate (x, y, z, m).
pub const MAX_COORDINATE_DIMS: usize = 4;

/// Maximum depth of nested geometry collections and arrays that is
/// followed before giving up.
pub const MAX_NESTING_DEPTH: usize = 64;
