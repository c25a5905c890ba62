//! Error types for the wavebank-filter crate.

/// Error type for coefficient lookup and filter operator derivation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Returned when a wavelet family name is not recognized.
    #[error("unsupported wavelet family: {0}")]
    UnsupportedFamily(String),

    /// Returned when a coefficient vector or a derived operator has no
    /// non-zero tap.
    #[error("degenerate filter: {0}")]
    DegenerateFilter(String),

    /// Returned when a coefficient vector does not have an odd length.
    #[error("coefficient vector must have odd length, got {len}")]
    EvenLength {
        /// Number of taps provided.
        len: usize,
    },

    /// Returned when an up-sampling factor of zero is requested.
    #[error("up-sampling factor must be at least 1, got {0}")]
    InvalidUpsampleFactor(usize),
}
