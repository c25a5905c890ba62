//! Error types for the wavebank-synopsis crate.

use wavebank_region::RegionError;
use wavebank_wavelet::WaveletError;

/// Error type for synopsis layout and conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynopsisError {
    /// Sub-band bookkeeping failed.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// Rectangle construction failed.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Returned when the decimation ratio is below 2.
    #[error("decimation ratio must be at least 2, got {0}")]
    InvalidRatio(usize),

    /// Returned when zero levels are requested.
    #[error("number of levels must be at least 1, got {0}")]
    InvalidLevels(usize),

    /// Returned when an axis of the full extent cannot be split `levels` times.
    #[error("axis {axis} of extent {extent} is not divisible by {divisor}")]
    Indivisible {
        /// Offending axis.
        axis: usize,
        /// Extent of that axis.
        extent: usize,
        /// `ratio^levels`, or 0 when that overflows.
        divisor: usize,
    },

    /// Returned when a sub-band list does not have one band per rectangle.
    #[error("expected {expected} sub-bands, got {actual}")]
    BandCountMismatch {
        /// Number of rectangles in the layout.
        expected: usize,
        /// Number of sub-bands provided.
        actual: usize,
    },

    /// Returned when a sub-band does not fit its rectangle.
    #[error("sub-band {index} has shape {actual:?}, its rectangle is {expected:?}")]
    ShapeMismatch {
        /// Position in the list.
        index: usize,
        /// Rectangle extent.
        expected: Vec<usize>,
        /// Sub-band extent.
        actual: Vec<usize>,
    },

    /// Returned when a synopsis image does not have the full extent.
    #[error("synopsis image has shape {actual:?}, layout expects {expected:?}")]
    ExtentMismatch {
        /// Full extent of the layout.
        expected: Vec<usize>,
        /// Shape of the image.
        actual: Vec<usize>,
    },

    /// Returned by [`SynopsisLayout::locate`](crate::SynopsisLayout::locate)
    /// for a region that is not one of the layout's rectangles.
    #[error("region at {origin:?} of extent {extent:?} is not a synopsis rectangle")]
    UnknownRectangle {
        /// Region origin.
        origin: Vec<isize>,
        /// Region extent.
        extent: Vec<usize>,
    },
}
