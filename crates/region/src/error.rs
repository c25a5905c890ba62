//! Error types for the wavebank-region crate.

/// Error type for region construction and region iteration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// Returned when two shapes or index vectors disagree on dimensionality.
    #[error("dimension mismatch: expected {expected} axes, got {actual}")]
    DimensionMismatch {
        /// Number of axes expected.
        expected: usize,
        /// Number of axes provided.
        actual: usize,
    },

    /// Returned when a stride is zero.
    #[error("stride along axis {axis} must be at least 1, got {stride}")]
    InvalidStride {
        /// Axis carrying the stride.
        axis: usize,
        /// Stride provided.
        stride: usize,
    },

    /// Returned when a region does not lie inside the buffer it iterates.
    #[error("region origin {origin:?} extent {extent:?} exceeds buffer shape {shape:?}")]
    OutOfBounds {
        /// Region origin.
        origin: Vec<isize>,
        /// Region extent.
        extent: Vec<usize>,
        /// Shape of the buffer.
        shape: Vec<usize>,
    },

    /// Returned when a linear offset lies past the end of the visitable indices.
    #[error("offset {offset} exceeds the {len} visitable indices")]
    OffsetOutOfRange {
        /// Requested offset.
        offset: usize,
        /// Number of visitable indices.
        len: usize,
    },
}
