//! Wavelet family identifiers.

use std::fmt;

use crate::error::FilterError;

/// Wavelet families with a registered coefficient table.
///
/// Orthogonal families (Haar, Daubechies, Symlet) use a single scaling
/// filter for analysis and synthesis. The spline biorthogonal families pair
/// an analysis scaling filter with a distinct dual.
///
/// # Example
///
/// ```ignore
/// use wavebank_filter::WaveletFamily;
///
/// let family = WaveletFamily::from_name("db4")?;
/// assert!(family.is_orthogonal());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletFamily {
    /// Haar wavelet (2 taps).
    Haar,
    /// Daubechies wavelet with 4 taps (2 vanishing moments).
    Db4,
    /// Daubechies wavelet with 6 taps.
    Db6,
    /// Daubechies wavelet with 8 taps.
    Db8,
    /// Daubechies wavelet with 12 taps.
    Db12,
    /// Daubechies wavelet with 20 taps.
    Db20,
    /// Cohen-Daubechies-Feauveau spline wavelet, 5/3 dual with 9 analysis taps.
    SplineBiorthogonal24,
    /// Cohen-Daubechies-Feauveau 9/7 wavelet.
    SplineBiorthogonal44,
    /// Symlet with 8 taps.
    Symlet8,
}

impl Default for WaveletFamily {
    /// Returns `WaveletFamily::Haar` as the default family.
    fn default() -> Self {
        Self::Haar
    }
}

impl WaveletFamily {
    /// Every registered family, in declaration order.
    pub const ALL: [WaveletFamily; 9] = [
        Self::Haar,
        Self::Db4,
        Self::Db6,
        Self::Db8,
        Self::Db12,
        Self::Db20,
        Self::SplineBiorthogonal24,
        Self::SplineBiorthogonal44,
        Self::Symlet8,
    ];

    /// Returns the canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Db4 => "db4",
            Self::Db6 => "db6",
            Self::Db8 => "db8",
            Self::Db12 => "db12",
            Self::Db20 => "db20",
            Self::SplineBiorthogonal24 => "spline_biorthogonal_2_4",
            Self::SplineBiorthogonal44 => "spline_biorthogonal_4_4",
            Self::Symlet8 => "symlet8",
        }
    }

    /// Returns `true` when analysis and synthesis share one scaling filter.
    pub fn is_orthogonal(&self) -> bool {
        !matches!(
            self,
            Self::SplineBiorthogonal24 | Self::SplineBiorthogonal44
        )
    }

    /// Parses a wavelet family from a case-insensitive name.
    ///
    /// # Supported Names
    ///
    /// | Input | Family |
    /// |-------|--------|
    /// | `"haar"` | [`WaveletFamily::Haar`] |
    /// | `"db4"` | [`WaveletFamily::Db4`] |
    /// | `"db6"` | [`WaveletFamily::Db6`] |
    /// | `"db8"` | [`WaveletFamily::Db8`] |
    /// | `"db12"` | [`WaveletFamily::Db12`] |
    /// | `"db20"` | [`WaveletFamily::Db20`] |
    /// | `"spline_biorthogonal_2_4"` | [`WaveletFamily::SplineBiorthogonal24`] |
    /// | `"spline_biorthogonal_4_4"` | [`WaveletFamily::SplineBiorthogonal44`] |
    /// | `"symlet8"` | [`WaveletFamily::Symlet8`] |
    ///
    /// Hyphens are accepted in place of underscores.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedFamily`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FilterError> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "haar" => Ok(Self::Haar),
            "db4" => Ok(Self::Db4),
            "db6" => Ok(Self::Db6),
            "db8" => Ok(Self::Db8),
            "db12" => Ok(Self::Db12),
            "db20" => Ok(Self::Db20),
            "spline_biorthogonal_2_4" => Ok(Self::SplineBiorthogonal24),
            "spline_biorthogonal_4_4" => Ok(Self::SplineBiorthogonal44),
            "symlet8" => Ok(Self::Symlet8),
            _ => Err(FilterError::UnsupportedFamily(name.to_string())),
        }
    }
}

impl fmt::Display for WaveletFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
