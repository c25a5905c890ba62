//! Sub-bands and their orientation masks.

use std::borrow::Cow;

use ndarray::{ArrayD, ArrayViewD};
use wavebank_region::Region;

use crate::error::WaveletError;

/// Largest number of axes a transform accepts.
pub const MAX_DIMENSIONS: usize = 16;

/// Low/high-pass choice per axis, packed as a bit mask.
///
/// Axis 0 is the most significant of the `ndim` bits, so for two axes the
/// masks `0, 1, 2, 3` read `LL, LH, HL, HH`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u32);

impl Orientation {
    /// Low-pass along every axis.
    pub const LOW_PASS: Orientation = Orientation(0);

    pub fn new(mask: u32) -> Self {
        Self(mask)
    }

    pub fn mask(&self) -> u32 {
        self.0
    }

    pub fn is_low_pass(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the band went through the high-pass filter along `axis`.
    pub fn is_high_pass(&self, axis: usize, ndim: usize) -> bool {
        self.0 & Self::bit(axis, ndim) != 0
    }

    /// Returns a copy with the high-pass bit of `axis` set.
    pub fn with_high(&self, axis: usize, ndim: usize) -> Self {
        Self(self.0 | Self::bit(axis, ndim))
    }

    /// Returns `2^ndim`, the number of bands one split produces.
    pub fn band_count(ndim: usize) -> usize {
        1 << ndim
    }

    /// Returns the per-axis letters, e.g. `"HL"`.
    pub fn label(&self, ndim: usize) -> String {
        (0..ndim)
            .map(|axis| if self.is_high_pass(axis, ndim) { 'H' } else { 'L' })
            .collect()
    }

    fn bit(axis: usize, ndim: usize) -> u32 {
        1 << (ndim - 1 - axis)
    }
}

/// Applies forward sub-sampling `depth` times: `n -> (n - 1) / f + 1`.
pub fn extent_at_depth(signal_extent: &[usize], subsample_factor: usize, depth: usize) -> Vec<usize> {
    let mut extent = signal_extent.to_vec();
    if subsample_factor <= 1 {
        return extent;
    }
    for _ in 0..depth {
        for e in extent.iter_mut() {
            *e = (e.saturating_sub(1)) / subsample_factor + 1;
        }
    }
    extent
}

/// One output of a filter-bank split.
///
/// `signal_extent` is the shape of the original image the decomposition
/// started from. The extent of any ancestor follows from it through
/// [`extent_at_depth`], which lets the inverse undo odd-length padding.
#[derive(Clone, Debug, PartialEq)]
pub struct SubBand {
    image: ArrayD<f64>,
    region: Region,
    level: usize,
    orientation: Orientation,
    signal_extent: Vec<usize>,
}

impl SubBand {
    /// Creates a sub-band produced at `level` (0 is the first split).
    pub fn new(image: ArrayD<f64>, level: usize, orientation: Orientation, signal_extent: Vec<usize>) -> Self {
        let region = Region::from_shape(image.shape());
        Self {
            image,
            region,
            level,
            orientation,
            signal_extent,
        }
    }

    /// Wraps an undecomposed image as the root of a decomposition.
    pub fn root(image: ArrayD<f64>) -> Self {
        let signal_extent = image.shape().to_vec();
        Self::new(image, 0, Orientation::LOW_PASS, signal_extent)
    }

    pub fn image(&self) -> &ArrayD<f64> {
        &self.image
    }

    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.image.view()
    }

    pub fn into_image(self) -> ArrayD<f64> {
        self.image
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn signal_extent(&self) -> &[usize] {
        &self.signal_extent
    }

    pub fn extent(&self) -> &[usize] {
        self.image.shape()
    }

    pub fn ndim(&self) -> usize {
        self.image.ndim()
    }

    /// Extent of the image this band was split from.
    pub fn parent_extent(&self, subsample_factor: usize) -> Vec<usize> {
        extent_at_depth(&self.signal_extent, subsample_factor, self.level)
    }

    /// Pixels in row-major order, borrowed when the buffer is contiguous.
    pub fn values(&self) -> Cow<'_, [f64]> {
        match self.image.as_slice() {
            Some(values) => Cow::Borrowed(values),
            None => Cow::Owned(self.image.iter().copied().collect()),
        }
    }

    /// Mean energy of the pixels.
    pub fn energy(&self) -> f64 {
        wavebank_stats::energy(&self.values())
    }
}

/// Checks dimensionality, non-empty axes and finiteness of an input image.
pub(crate) fn validate_ndim(ndim: usize) -> Result<(), WaveletError> {
    if ndim == 0 || ndim > MAX_DIMENSIONS {
        return Err(WaveletError::UnsupportedDimension {
            ndim,
            max: MAX_DIMENSIONS,
        });
    }
    Ok(())
}

pub(crate) fn validate_image(image: &ArrayViewD<'_, f64>) -> Result<(), WaveletError> {
    validate_ndim(image.ndim())?;
    if image.shape().contains(&0) {
        return Err(WaveletError::EmptyImage {
            shape: image.shape().to_vec(),
        });
    }
    if image.iter().any(|v| !v.is_finite()) {
        return Err(WaveletError::NonFiniteData);
    }
    Ok(())
}
