//! Multiresolution pyramid: repeated splits of the low-pass band.

use ndarray::{ArrayD, CowArray, IxDyn};
use tracing::{debug, instrument};

use crate::band::{Orientation, SubBand, extent_at_depth, validate_image, validate_ndim};
use crate::bank::ensure_support;
use crate::cache::BankCache;
use crate::config::TransformConfig;
use crate::error::WaveletError;

/// Pyramid decomposition and reconstruction.
///
/// Level `ℓ` splits the low-pass band of level `ℓ - 1` (the input image at
/// level 0). The output list holds the final low-pass band followed by the
/// detail bands from the coarsest level to the finest, each level in
/// orientation order, for `1 + L·(2^D - 1)` bands in total.
///
/// # Example
///
/// ```ignore
/// use wavebank_filter::WaveletFamily;
/// use wavebank_wavelet::{PyramidTransform, TransformConfig};
///
/// let config = TransformConfig::new(WaveletFamily::Db4).with_levels(3).with_subsample_factor(2);
/// let pyramid = PyramidTransform::new(config)?;
/// let bands = pyramid.forward(&image)?;
/// let rebuilt = pyramid.inverse(&bands)?;
/// ```
#[derive(Debug)]
pub struct PyramidTransform {
    config: TransformConfig,
    banks: BankCache,
}

impl PyramidTransform {
    /// Creates a pyramid transform.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TransformConfig::validate`].
    pub fn new(config: TransformConfig) -> Result<Self, WaveletError> {
        config.validate()?;
        Ok(Self {
            banks: BankCache::new(config.family(), config.subsample_factor()),
            config,
        })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Number of bands [`forward`](Self::forward) produces for `ndim` axes.
    pub fn band_count(&self, ndim: usize) -> usize {
        1 + self.config.levels() * (Orientation::band_count(ndim) - 1)
    }

    /// Decomposes `image` into `1 + L·(2^D - 1)` sub-bands.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::UnsupportedDimension`] | image has 0 or too many axes |
    /// | [`WaveletError::EmptyImage`] | an axis has extent 0 |
    /// | [`WaveletError::NonFiniteData`] | NaN or infinite pixel |
    /// | [`WaveletError::InsufficientSupport`] | an axis is shorter than the filter at some level |
    #[instrument(skip_all, fields(family = %self.config.family(), levels = self.config.levels(), shape = ?image.shape()))]
    pub fn forward(&self, image: &ArrayD<f64>) -> Result<Vec<SubBand>, WaveletError> {
        validate_image(&image.view())?;
        let signal_extent = image.shape().to_vec();
        let levels = self.config.levels();

        let mut details: Vec<Vec<SubBand>> = Vec::with_capacity(levels);
        let mut low: Option<SubBand> = None;
        for level in 0..levels {
            let current = low.as_ref().map_or(image.view(), SubBand::view);
            ensure_support(
                self.config.family(),
                self.config.subsample_factor(),
                level,
                current.shape(),
            )?;
            let bank = self.banks.get(level)?;
            let mut bands = bank.split(&current, &signal_extent)?;
            let next = bands.remove(0);
            debug!(level, low_shape = ?next.extent(), "pyramid level");
            details.push(bands);
            low = Some(next);
        }

        let low = low.ok_or(WaveletError::InvalidLevels(levels))?;
        let mut out = Vec::with_capacity(self.band_count(image.ndim()));
        out.push(low);
        out.extend(details.into_iter().rev().flatten());
        Ok(out)
    }

    /// Rebuilds the image from a band list in [`forward`](Self::forward)
    /// order. The number of levels follows from the list length.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::UnsupportedDimension`] | the first band has zero or more than [`MAX_DIMENSIONS`](crate::MAX_DIMENSIONS) axes |
    /// | [`WaveletError::BandCountMismatch`] | length is not `1 + L·(2^D - 1)` with `L ≥ 1` |
    /// | [`WaveletError::DimensionMismatch`] | bands disagree on the number of axes |
    /// | [`WaveletError::UnexpectedBand`] | a band carries the wrong level or orientation |
    /// | [`WaveletError::ShapeMismatch`] | bands disagree on the signal extent or band shape |
    #[instrument(skip_all, fields(family = %self.config.family(), bands = bands.len()))]
    pub fn inverse(&self, bands: &[SubBand]) -> Result<ArrayD<f64>, WaveletError> {
        let first = bands
            .first()
            .ok_or(WaveletError::BandCountMismatch { len: 0, ndim: 0 })?;
        let ndim = first.ndim();
        validate_ndim(ndim)?;
        let per_level = Orientation::band_count(ndim) - 1;
        if bands.len() < 1 + per_level || (bands.len() - 1) % per_level != 0 {
            return Err(WaveletError::BandCountMismatch {
                len: bands.len(),
                ndim,
            });
        }
        let levels = (bands.len() - 1) / per_level;
        let signal_extent = first.signal_extent();

        for (index, band) in bands.iter().enumerate() {
            if band.ndim() != ndim {
                return Err(WaveletError::DimensionMismatch {
                    expected: ndim,
                    actual: band.ndim(),
                });
            }
            if band.signal_extent() != signal_extent {
                return Err(WaveletError::ShapeMismatch {
                    expected: signal_extent.to_vec(),
                    actual: band.signal_extent().to_vec(),
                });
            }
            let (expected_level, expected_orientation) = match index {
                0 => (levels - 1, 0),
                i => (levels - 1 - (i - 1) / per_level, ((i - 1) % per_level + 1) as u32),
            };
            if band.level() != expected_level || band.orientation().mask() != expected_orientation {
                return Err(WaveletError::UnexpectedBand {
                    index,
                    level: band.level(),
                    orientation: band.orientation().mask(),
                    expected_level,
                    expected_orientation,
                });
            }
        }

        let mut low: CowArray<'_, f64, IxDyn> = CowArray::from(first.view());
        for (group, details) in bands[1..].chunks(per_level).enumerate() {
            let level = levels - 1 - group;
            let node = extent_at_depth(signal_extent, self.config.subsample_factor(), level);
            ensure_support(
                self.config.family(),
                self.config.subsample_factor(),
                level,
                &node,
            )?;
            let bank = self.banks.get(level)?;
            let merged = {
                let mut views = Vec::with_capacity(per_level + 1);
                views.push(low.view());
                views.extend(details.iter().map(SubBand::view));
                bank.merge(&views, signal_extent)?
            };
            debug!(level, shape = ?merged.shape(), "pyramid level rebuilt");
            low = CowArray::from(merged);
        }
        Ok(low.into_owned())
    }
}
