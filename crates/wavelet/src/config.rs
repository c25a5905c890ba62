//! Transform configuration.

use wavebank_filter::WaveletFamily;

use crate::error::WaveletError;

/// Family, depth and sub-sampling of a pyramid or packet transform.
///
/// A sub-sample factor of 1 selects the undecimated (stationary) scheme,
/// where every level keeps the input extent and the filters are dilated
/// by `2^level` instead. A factor of 2 decimates each axis.
///
/// # Example
///
/// ```ignore
/// use wavebank_filter::WaveletFamily;
/// use wavebank_wavelet::TransformConfig;
///
/// let config = TransformConfig::new(WaveletFamily::Db4)
///     .with_levels(3)
///     .with_subsample_factor(2);
/// config.validate()?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformConfig {
    family: WaveletFamily,
    levels: usize,
    subsample_factor: usize,
}

impl TransformConfig {
    /// Creates a one-level undecimated configuration.
    pub fn new(family: WaveletFamily) -> Self {
        Self {
            family,
            levels: 1,
            subsample_factor: 1,
        }
    }

    /// Sets the number of pyramid levels.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the sub-sampling factor.
    pub fn with_subsample_factor(mut self, factor: usize) -> Self {
        self.subsample_factor = factor;
        self
    }

    pub fn family(&self) -> WaveletFamily {
        self.family
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn subsample_factor(&self) -> usize {
        self.subsample_factor
    }

    /// Returns `true` for the undecimated scheme.
    pub fn is_stationary(&self) -> bool {
        self.subsample_factor == 1
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidLevels`] | `levels == 0` |
    /// | [`WaveletError::InvalidSubsampleFactor`] | `subsample_factor` is not 1 or 2 |
    pub fn validate(&self) -> Result<(), WaveletError> {
        if self.levels == 0 {
            return Err(WaveletError::InvalidLevels(self.levels));
        }
        if !(1..=2).contains(&self.subsample_factor) {
            return Err(WaveletError::InvalidSubsampleFactor(self.subsample_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TransformConfig::new(WaveletFamily::Haar);
        assert_eq!(config.levels(), 1);
        assert_eq!(config.subsample_factor(), 1);
        assert!(config.is_stationary());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_accessors() {
        let config = TransformConfig::new(WaveletFamily::Db8)
            .with_levels(4)
            .with_subsample_factor(2);
        assert_eq!(config.family(), WaveletFamily::Db8);
        assert_eq!(config.levels(), 4);
        assert_eq!(config.subsample_factor(), 2);
        assert!(!config.is_stationary());
    }

    #[test]
    fn validate_rejects_zero_levels() {
        let err = TransformConfig::new(WaveletFamily::Haar)
            .with_levels(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidLevels(0)));
    }

    #[test]
    fn validate_rejects_unsupported_factor() {
        for factor in [0, 3, 4] {
            let err = TransformConfig::new(WaveletFamily::Haar)
                .with_subsample_factor(factor)
                .validate()
                .unwrap_err();
            assert!(matches!(err, WaveletError::InvalidSubsampleFactor(f) if f == factor));
        }
    }

    #[test]
    fn config_is_copy() {
        let a = TransformConfig::new(WaveletFamily::Symlet8);
        let b = a;
        assert_eq!(a, b);
    }
}
