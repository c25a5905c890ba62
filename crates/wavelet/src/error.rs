//! Error types for the wavebank-wavelet crate.

use wavebank_filter::FilterError;
use wavebank_region::RegionError;

/// Error type for all fallible operations in the wavebank-wavelet crate.
///
/// Covers input validation, filter support checks, and the consistency of
/// sub-band lists and decomposition trees handed to the inverse transforms.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Filter derivation failed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Region construction or iteration failed.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Returned when the input image contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when an image has a zero-length axis.
    #[error("image shape {shape:?} has an empty axis")]
    EmptyImage {
        /// Shape of the image.
        shape: Vec<usize>,
    },

    /// Returned when the number of axes is zero or above the supported maximum.
    #[error("unsupported dimensionality {ndim}, expected 1 to {max} axes")]
    UnsupportedDimension {
        /// Number of axes provided.
        ndim: usize,
        /// Largest supported number of axes.
        max: usize,
    },

    /// Returned when an axis is shorter than the filter support at a level.
    #[error(
        "insufficient support at level {level}: axis {axis} has extent {extent}, filter support is {support}"
    )]
    InsufficientSupport {
        /// Decomposition level (tree depth) being processed.
        level: usize,
        /// Axis that is too short.
        axis: usize,
        /// Extent of that axis.
        extent: usize,
        /// Span of the up-sampled filter.
        support: usize,
    },

    /// Returned when the à-trous up-sampling factor `2^level` overflows.
    #[error("level too high: requested {requested}, max is {max}")]
    LevelTooHigh {
        /// Level that was requested.
        requested: usize,
        /// Maximum representable level.
        max: usize,
    },

    /// Returned when zero decomposition levels are requested.
    #[error("number of levels must be at least 1, got {0}")]
    InvalidLevels(usize),

    /// Returned when a sub-sampling factor other than 1 or 2 is requested.
    #[error("sub-sample factor must be 1 or 2, got {0}")]
    InvalidSubsampleFactor(usize),

    /// Returned when an axis index is out of range.
    #[error("axis {axis} out of range for {ndim} dimensions")]
    InvalidAxis {
        /// Axis requested.
        axis: usize,
        /// Number of axes available.
        ndim: usize,
    },

    /// Returned when a sub-band list has a length the transform cannot
    /// have produced.
    #[error("{len} sub-bands is not a valid count for {ndim}-dimensional input")]
    BandCountMismatch {
        /// Number of sub-bands provided.
        len: usize,
        /// Dimensionality of the sub-bands.
        ndim: usize,
    },

    /// Returned when a sub-band sits at the wrong position of a list.
    #[error(
        "sub-band {index} has level {level} orientation {orientation}, expected level {expected_level} orientation {expected_orientation}"
    )]
    UnexpectedBand {
        /// Position in the list.
        index: usize,
        /// Level found.
        level: usize,
        /// Orientation mask found.
        orientation: u32,
        /// Level expected at this position.
        expected_level: usize,
        /// Orientation mask expected at this position.
        expected_orientation: u32,
    },

    /// Returned when sub-bands disagree on dimensionality.
    #[error("dimension mismatch: expected {expected} axes, got {actual}")]
    DimensionMismatch {
        /// Number of axes expected.
        expected: usize,
        /// Number of axes found.
        actual: usize,
    },

    /// Returned when a buffer does not have the shape its position implies.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape expected.
        expected: Vec<usize>,
        /// Shape found.
        actual: Vec<usize>,
    },

    /// Returned when a decomposition tree disagrees with a sub-band list.
    #[error(
        "decomposition tree of {nodes} nodes with {decomposed} splits does not match {bands} sub-bands"
    )]
    TreeMismatch {
        /// Number of flags in the tree.
        nodes: usize,
        /// Number of `true` flags.
        decomposed: usize,
        /// Number of sub-bands provided.
        bands: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_filter_is_transparent() {
        let err: WaveletError = FilterError::UnsupportedFamily("coif4".into()).into();
        assert_eq!(err.to_string(), "unsupported wavelet family: coif4");
    }

    #[test]
    fn error_region_is_transparent() {
        let err: WaveletError = RegionError::InvalidStride { axis: 0, stride: 0 }.into();
        assert_eq!(
            err.to_string(),
            "stride along axis 0 must be at least 1, got 0"
        );
    }

    #[test]
    fn error_non_finite_data() {
        let err = WaveletError::NonFiniteData;
        assert_eq!(err.to_string(), "input data contains non-finite values");
    }

    #[test]
    fn error_insufficient_support() {
        let err = WaveletError::InsufficientSupport {
            level: 2,
            axis: 1,
            extent: 5,
            support: 13,
        };
        assert_eq!(
            err.to_string(),
            "insufficient support at level 2: axis 1 has extent 5, filter support is 13"
        );
    }

    #[test]
    fn error_invalid_subsample_factor() {
        let err = WaveletError::InvalidSubsampleFactor(3);
        assert_eq!(err.to_string(), "sub-sample factor must be 1 or 2, got 3");
    }

    #[test]
    fn error_band_count_mismatch() {
        let err = WaveletError::BandCountMismatch { len: 5, ndim: 2 };
        assert_eq!(
            err.to_string(),
            "5 sub-bands is not a valid count for 2-dimensional input"
        );
    }

    #[test]
    fn error_unexpected_band() {
        let err = WaveletError::UnexpectedBand {
            index: 3,
            level: 0,
            orientation: 2,
            expected_level: 1,
            expected_orientation: 3,
        };
        assert_eq!(
            err.to_string(),
            "sub-band 3 has level 0 orientation 2, expected level 1 orientation 3"
        );
    }

    #[test]
    fn error_tree_mismatch() {
        let err = WaveletError::TreeMismatch {
            nodes: 5,
            decomposed: 1,
            bands: 3,
        };
        assert_eq!(
            err.to_string(),
            "decomposition tree of 5 nodes with 1 splits does not match 3 sub-bands"
        );
    }

    #[test]
    fn error_shape_mismatch() {
        let err = WaveletError::ShapeMismatch {
            expected: vec![4, 4],
            actual: vec![4, 3],
        };
        assert_eq!(err.to_string(), "shape mismatch: expected [4, 4], got [4, 3]");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<WaveletError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<WaveletError>();
    }
}
