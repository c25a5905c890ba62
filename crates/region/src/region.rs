//! N-dimensional index regions and their mapping through sub-sampling.

use crate::error::RegionError;

/// A rectangular block of indices: signed origin plus extent per axis.
///
/// Origins may be negative once a region is padded for filter support.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Region {
    origin: Vec<isize>,
    extent: Vec<usize>,
}

impl Region {
    /// Creates a region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DimensionMismatch`] if `origin` and `extent`
    /// have different lengths.
    pub fn new(origin: Vec<isize>, extent: Vec<usize>) -> Result<Self, RegionError> {
        if origin.len() != extent.len() {
            return Err(RegionError::DimensionMismatch {
                expected: origin.len(),
                actual: extent.len(),
            });
        }
        Ok(Self { origin, extent })
    }

    /// Returns the region covering a whole buffer of `shape`.
    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            origin: vec![0; shape.len()],
            extent: shape.to_vec(),
        }
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.extent.len()
    }

    /// Returns the origin.
    pub fn origin(&self) -> &[isize] {
        &self.origin
    }

    /// Returns the extent.
    pub fn extent(&self) -> &[usize] {
        &self.extent
    }

    /// Returns the number of indices covered.
    pub fn len(&self) -> usize {
        self.extent.iter().product()
    }

    /// Returns `true` if some axis has zero extent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `index` lies inside the region.
    pub fn contains(&self, index: &[isize]) -> bool {
        index.len() == self.ndim()
            && index
                .iter()
                .zip(self.origin.iter().zip(&self.extent))
                .all(|(&i, (&o, &e))| i >= o && i < o + e as isize)
    }

    /// Returns `true` if the region lies inside a buffer of `shape`.
    pub fn is_inside(&self, shape: &[usize]) -> bool {
        shape.len() == self.ndim()
            && self
                .origin
                .iter()
                .zip(&self.extent)
                .zip(shape)
                .all(|((&o, &e), &s)| o >= 0 && o as usize + e <= s)
    }

    /// Maps the region through forward sub-sampling by `factor` along `axis`:
    /// `index / factor`, `size (size - 1) / factor + 1`.
    pub fn downsampled(&self, axis: usize, factor: usize) -> Self {
        let mut out = self.clone();
        let f = factor.max(1);
        out.origin[axis] = self.origin[axis].div_euclid(f as isize);
        out.extent[axis] = match self.extent[axis] {
            0 => 0,
            size => (size - 1) / f + 1,
        };
        out
    }

    /// Maps the region through inverse up-sampling by `factor` along `axis`:
    /// `index * factor`, `size (size - 1) * factor + 1`.
    pub fn upsampled(&self, axis: usize, factor: usize) -> Self {
        let mut out = self.clone();
        let f = factor.max(1);
        out.origin[axis] = self.origin[axis] * f as isize;
        out.extent[axis] = match self.extent[axis] {
            0 => 0,
            size => (size - 1) * f + 1,
        };
        out
    }

    /// Grows the region by `radius` on both sides of `axis`.
    pub fn padded(&self, axis: usize, radius: usize) -> Self {
        let mut out = self.clone();
        out.origin[axis] -= radius as isize;
        out.extent[axis] += 2 * radius;
        out
    }

    /// Replaces the range covered along `axis`.
    pub fn with_axis_range(&self, axis: usize, start: isize, len: usize) -> Self {
        let mut out = self.clone();
        out.origin[axis] = start;
        out.extent[axis] = len;
        out
    }

    /// Input region a forward filter of `radius` reads to produce `self`
    /// when sub-sampling by `factor` along `axis`.
    pub fn forward_request(&self, axis: usize, factor: usize, radius: usize) -> Self {
        self.upsampled(axis, factor).padded(axis, radius)
    }

    /// Input region an inverse filter of `radius` reads to produce `self`
    /// when up-sampling by `factor` along `axis`.
    pub fn inverse_request(&self, axis: usize, factor: usize, radius: usize) -> Self {
        self.padded(axis, radius).downsampled(axis, factor)
    }
}
