//! Rectangle placement of pyramid sub-bands inside a synopsis image.

use std::sync::{Arc, PoisonError, RwLock};

use ndarray::{ArrayD, IxDyn, Slice};
use tracing::debug;
use wavebank_region::Region;
use wavebank_wavelet::{MAX_DIMENSIONS, Orientation, SubBand, WaveletError};

use crate::error::SynopsisError;

/// Default decimation ratio between consecutive levels.
pub const DEFAULT_RATIO: usize = 2;

#[derive(Debug)]
enum Geometry {
    Stale,
    Fresh(Arc<[Region]>),
}

/// Synopsis layout for a pyramid of `levels` levels over an image of
/// `full_extent`.
///
/// The rectangle table is computed on first use and cached until the ratio
/// or the number of levels changes. Readers on other threads share the
/// published table.
///
/// # Example
///
/// ```ignore
/// use wavebank_synopsis::SynopsisLayout;
///
/// let layout = SynopsisLayout::new(vec![64, 64]).with_levels(3);
/// let mosaic = layout.to_synopsis(&bands)?;
/// let bands = layout.to_sub_bands(&mosaic)?;
/// ```
#[derive(Debug)]
pub struct SynopsisLayout {
    full_extent: Vec<usize>,
    ratio: usize,
    levels: usize,
    geometry: RwLock<Geometry>,
}

impl SynopsisLayout {
    /// Creates a one-level layout with ratio [`DEFAULT_RATIO`].
    pub fn new(full_extent: Vec<usize>) -> Self {
        Self {
            full_extent,
            ratio: DEFAULT_RATIO,
            levels: 1,
            geometry: RwLock::new(Geometry::Stale),
        }
    }

    pub fn with_ratio(mut self, ratio: usize) -> Self {
        self.set_ratio(ratio);
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.set_levels(levels);
        self
    }

    pub fn set_ratio(&mut self, ratio: usize) {
        if ratio != self.ratio {
            self.ratio = ratio;
            self.invalidate();
        }
    }

    pub fn set_levels(&mut self, levels: usize) {
        if levels != self.levels {
            self.levels = levels;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        *self
            .geometry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner) = Geometry::Stale;
    }

    pub fn full_extent(&self) -> &[usize] {
        &self.full_extent
    }

    pub fn ratio(&self) -> usize {
        self.ratio
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn ndim(&self) -> usize {
        self.full_extent.len()
    }

    /// `1 + levels·(2^D - 1)`.
    pub fn band_count(&self) -> usize {
        1 + self.levels * (Orientation::band_count(self.ndim()) - 1)
    }

    /// Whether the rectangle table is computed for the current parameters.
    pub fn is_fresh(&self) -> bool {
        matches!(
            *self.geometry.read().unwrap_or_else(PoisonError::into_inner),
            Geometry::Fresh(_)
        )
    }

    /// Rectangles of every sub-band, in pyramid band order.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SynopsisError::InvalidRatio`] | ratio below 2 |
    /// | [`SynopsisError::InvalidLevels`] | zero levels |
    /// | [`SynopsisError::Indivisible`] | an axis is not a multiple of `ratio^levels` |
    /// | [`SynopsisError::Wavelet`] | zero or too many axes |
    pub fn rectangles(&self) -> Result<Arc<[Region]>, SynopsisError> {
        if let Geometry::Fresh(rects) = &*self.geometry.read().unwrap_or_else(PoisonError::into_inner) {
            return Ok(Arc::clone(rects));
        }
        let mut geometry = self.geometry.write().unwrap_or_else(PoisonError::into_inner);
        if let Geometry::Fresh(rects) = &*geometry {
            return Ok(Arc::clone(rects));
        }
        let rects: Arc<[Region]> = self.compute()?.into();
        debug!(
            rectangles = rects.len(),
            ratio = self.ratio,
            levels = self.levels,
            "synopsis geometry computed"
        );
        *geometry = Geometry::Fresh(Arc::clone(&rects));
        Ok(rects)
    }

    fn compute(&self) -> Result<Vec<Region>, SynopsisError> {
        let ndim = self.ndim();
        if ndim == 0 || ndim > MAX_DIMENSIONS {
            return Err(WaveletError::UnsupportedDimension {
                ndim,
                max: MAX_DIMENSIONS,
            }
            .into());
        }
        if self.ratio < 2 {
            return Err(SynopsisError::InvalidRatio(self.ratio));
        }
        if self.levels == 0 {
            return Err(SynopsisError::InvalidLevels(self.levels));
        }
        let divisor = u32::try_from(self.levels)
            .ok()
            .and_then(|levels| self.ratio.checked_pow(levels))
            .unwrap_or(0);
        for (axis, &extent) in self.full_extent.iter().enumerate() {
            if divisor == 0 || extent == 0 || extent % divisor != 0 {
                return Err(SynopsisError::Indivisible {
                    axis,
                    extent,
                    divisor,
                });
            }
        }

        let mut rects = Vec::with_capacity(self.band_count());
        rects.push(Region::new(vec![0; ndim], self.group_extent(0))?);
        let per_level = Orientation::band_count(ndim) - 1;
        for group in 0..self.levels {
            let extent = self.group_extent(group);
            for k in 0..per_level {
                let orientation = Orientation::new(k as u32 + 1);
                let origin = (0..ndim)
                    .map(|axis| {
                        if orientation.is_high_pass(axis, ndim) {
                            extent[axis] as isize
                        } else {
                            0
                        }
                    })
                    .collect();
                rects.push(Region::new(origin, extent.clone())?);
            }
        }
        Ok(rects)
    }

    /// Extent of the rectangles of detail group `group`, coarsest first.
    /// Group 0 shares its extent with the low-pass band.
    fn group_extent(&self, group: usize) -> Vec<usize> {
        let mut divisor = 1;
        for _ in group..self.levels {
            divisor *= self.ratio;
        }
        self.full_extent.iter().map(|&n| n / divisor).collect()
    }

    /// Pyramid level and orientation of the band at `index`.
    fn band_tag(&self, index: usize) -> (usize, Orientation) {
        if index == 0 {
            return (self.levels - 1, Orientation::LOW_PASS);
        }
        let per_level = Orientation::band_count(self.ndim()) - 1;
        let group = (index - 1) / per_level;
        let k = (index - 1) % per_level;
        (self.levels - 1 - group, Orientation::new(k as u32 + 1))
    }

    /// Index of the band placed at `region`.
    ///
    /// Recovers the level group from the rectangle extent and the
    /// orientation from the origin, without consulting the cached table.
    ///
    /// # Errors
    ///
    /// [`SynopsisError::UnknownRectangle`] when `region` is not one of the
    /// layout's rectangles, plus the errors of [`rectangles`](Self::rectangles)
    /// for invalid parameters.
    pub fn locate(&self, region: &Region) -> Result<usize, SynopsisError> {
        self.rectangles()?;
        let unknown = || SynopsisError::UnknownRectangle {
            origin: region.origin().to_vec(),
            extent: region.extent().to_vec(),
        };
        let ndim = self.ndim();
        if region.ndim() != ndim {
            return Err(unknown());
        }
        let group = (0..self.levels)
            .find(|&g| self.group_extent(g) == region.extent())
            .ok_or_else(unknown)?;

        let mut mask = 0u32;
        for (axis, (&origin, &size)) in region.origin().iter().zip(region.extent()).enumerate() {
            let bit = match origin {
                0 => 0,
                o if o == size as isize => 1,
                _ => return Err(unknown()),
            };
            mask |= bit << (ndim - 1 - axis);
        }
        match (mask, group) {
            (0, 0) => Ok(0),
            (0, _) => Err(unknown()),
            (mask, group) => {
                let per_level = Orientation::band_count(ndim) - 1;
                Ok(1 + group * per_level + mask as usize - 1)
            }
        }
    }

    /// Copies every band into its rectangle of one image of the full extent.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SynopsisError::BandCountMismatch`] | list length is not [`band_count`](Self::band_count) |
    /// | [`SynopsisError::ShapeMismatch`] | a band does not fit its rectangle |
    ///
    /// plus the errors of [`rectangles`](Self::rectangles).
    pub fn to_synopsis(&self, bands: &[SubBand]) -> Result<ArrayD<f64>, SynopsisError> {
        let rects = self.rectangles()?;
        if bands.len() != rects.len() {
            return Err(SynopsisError::BandCountMismatch {
                expected: rects.len(),
                actual: bands.len(),
            });
        }
        let mut image = ArrayD::zeros(IxDyn(&self.full_extent));
        for (index, (band, rect)) in bands.iter().zip(rects.iter()).enumerate() {
            if band.extent() != rect.extent() {
                return Err(SynopsisError::ShapeMismatch {
                    index,
                    expected: rect.extent().to_vec(),
                    actual: band.extent().to_vec(),
                });
            }
            image
                .slice_each_axis_mut(|ax| window(rect, ax.axis.index()))
                .assign(band.image());
        }
        debug!(bands = bands.len(), shape = ?self.full_extent, "synopsis assembled");
        Ok(image)
    }

    /// Splits a synopsis image back into sub-bands tagged with their level,
    /// orientation and the full extent as signal extent.
    ///
    /// # Errors
    ///
    /// [`SynopsisError::ExtentMismatch`] when `image` does not have the full
    /// extent, plus the errors of [`rectangles`](Self::rectangles).
    pub fn to_sub_bands(&self, image: &ArrayD<f64>) -> Result<Vec<SubBand>, SynopsisError> {
        if image.shape() != self.full_extent.as_slice() {
            return Err(SynopsisError::ExtentMismatch {
                expected: self.full_extent.clone(),
                actual: image.shape().to_vec(),
            });
        }
        let rects = self.rectangles()?;
        let bands = rects
            .iter()
            .enumerate()
            .map(|(index, rect)| {
                let (level, orientation) = self.band_tag(index);
                let pixels = image
                    .slice_each_axis(|ax| window(rect, ax.axis.index()))
                    .to_owned();
                SubBand::new(pixels, level, orientation, self.full_extent.clone())
            })
            .collect();
        Ok(bands)
    }
}

fn window(rect: &Region, axis: usize) -> Slice {
    let start = rect.origin()[axis];
    Slice::from(start..start + rect.extent()[axis] as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(origin: &[isize], extent: &[usize]) -> Region {
        Region::new(origin.to_vec(), extent.to_vec()).unwrap()
    }

    #[test]
    fn two_level_placement() {
        let layout = SynopsisLayout::new(vec![8, 8]).with_levels(2);
        let rects = layout.rectangles().unwrap();
        assert_eq!(rects.len(), 7);
        assert_eq!(rects[0], region(&[0, 0], &[2, 2]));
        assert_eq!(rects[1], region(&[0, 2], &[2, 2]));
        assert_eq!(rects[2], region(&[2, 0], &[2, 2]));
        assert_eq!(rects[3], region(&[2, 2], &[2, 2]));
        assert_eq!(rects[4], region(&[0, 4], &[4, 4]));
        assert_eq!(rects[5], region(&[4, 0], &[4, 4]));
        assert_eq!(rects[6], region(&[4, 4], &[4, 4]));
    }

    #[test]
    fn ratio_two_rectangles_tile_the_image() {
        let layout = SynopsisLayout::new(vec![16, 8, 24]).with_levels(2);
        let rects = layout.rectangles().unwrap();
        let covered: usize = rects.iter().map(Region::len).sum();
        assert_eq!(covered, 16 * 8 * 24);
        for rect in rects.iter() {
            assert!(rect.is_inside(layout.full_extent()));
        }
    }

    #[test]
    fn larger_ratio_leaves_rectangles_disjoint() {
        let layout = SynopsisLayout::new(vec![27, 9]).with_ratio(3).with_levels(2);
        let rects = layout.rectangles().unwrap();
        assert_eq!(rects[0].extent(), &[3, 1]);
        assert_eq!(rects[4].extent(), &[9, 3]);
        let mut hits = ndarray::Array2::<u8>::zeros((27, 9));
        for rect in rects.iter() {
            assert!(rect.is_inside(layout.full_extent()));
            for i in 0..rect.extent()[0] {
                for j in 0..rect.extent()[1] {
                    hits[[rect.origin()[0] as usize + i, rect.origin()[1] as usize + j]] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&h| h <= 1));
    }

    #[test]
    fn band_tags_follow_pyramid_order() {
        let layout = SynopsisLayout::new(vec![16, 16]).with_levels(3);
        assert_eq!(layout.band_tag(0), (2, Orientation::LOW_PASS));
        assert_eq!(layout.band_tag(1), (2, Orientation::new(1)));
        assert_eq!(layout.band_tag(3), (2, Orientation::new(3)));
        assert_eq!(layout.band_tag(4), (1, Orientation::new(1)));
        assert_eq!(layout.band_tag(9), (0, Orientation::new(3)));
    }

    #[test]
    fn locate_inverts_placement() {
        let layout = SynopsisLayout::new(vec![32, 16, 8]).with_levels(3);
        let rects = layout.rectangles().unwrap();
        for (index, rect) in rects.iter().enumerate() {
            assert_eq!(layout.locate(rect).unwrap(), index);
        }
    }

    #[test]
    fn locate_rejects_foreign_regions() {
        let layout = SynopsisLayout::new(vec![8, 8]).with_levels(2);
        for (origin, extent) in [
            (&[0, 0][..], &[4, 4][..]),
            (&[1, 0][..], &[2, 2][..]),
            (&[0, 0][..], &[2, 4][..]),
            (&[0, 0, 0][..], &[2, 2, 2][..]),
        ] {
            let err = layout.locate(&region(origin, extent)).unwrap_err();
            assert!(matches!(err, SynopsisError::UnknownRectangle { .. }));
        }
    }

    #[test]
    fn setters_invalidate_geometry() {
        let mut layout = SynopsisLayout::new(vec![16, 16]);
        assert!(!layout.is_fresh());
        assert_eq!(layout.rectangles().unwrap().len(), 4);
        assert!(layout.is_fresh());
        layout.set_levels(2);
        assert!(!layout.is_fresh());
        assert_eq!(layout.rectangles().unwrap().len(), 7);
        layout.set_ratio(4);
        assert!(!layout.is_fresh());
        assert_eq!(layout.rectangles().unwrap()[0].extent(), &[1, 1]);
        layout.set_ratio(4);
        assert!(layout.is_fresh());
    }

    #[test]
    fn invalid_parameters() {
        let err = SynopsisLayout::new(vec![8, 8]).with_ratio(1).rectangles().unwrap_err();
        assert!(matches!(err, SynopsisError::InvalidRatio(1)));
        let err = SynopsisLayout::new(vec![8, 8]).with_levels(0).rectangles().unwrap_err();
        assert!(matches!(err, SynopsisError::InvalidLevels(0)));
        let err = SynopsisLayout::new(vec![8, 12]).with_levels(3).rectangles().unwrap_err();
        assert!(matches!(
            err,
            SynopsisError::Indivisible {
                axis: 1,
                extent: 12,
                divisor: 8
            }
        ));
        let err = SynopsisLayout::new(vec![]).rectangles().unwrap_err();
        assert!(matches!(
            err,
            SynopsisError::Wavelet(WaveletError::UnsupportedDimension { ndim: 0, .. })
        ));
        let err = SynopsisLayout::new(vec![8]).with_levels(usize::MAX).rectangles().unwrap_err();
        assert!(matches!(err, SynopsisError::Indivisible { divisor: 0, .. }));
    }

    #[test]
    fn concurrent_readers_share_table() {
        let layout = SynopsisLayout::new(vec![64, 64]).with_levels(3);
        let tables: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| layout.rectangles().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for table in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], table));
        }
    }

    #[test]
    fn wrong_band_shape_is_rejected() {
        let layout = SynopsisLayout::new(vec![4, 4]);
        let mut bands: Vec<_> = (0..4)
            .map(|k| SubBand::new(ArrayD::zeros(IxDyn(&[2, 2])), 0, Orientation::new(k), vec![4, 4]))
            .collect();
        bands[3] = SubBand::new(ArrayD::zeros(IxDyn(&[3, 2])), 0, Orientation::new(3), vec![4, 4]);
        let err = layout.to_synopsis(&bands).unwrap_err();
        assert!(matches!(err, SynopsisError::ShapeMismatch { index: 3, .. }));
        let err = layout.to_synopsis(&bands[..2]).unwrap_err();
        assert!(matches!(
            err,
            SynopsisError::BandCountMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn wrong_image_extent_is_rejected() {
        let layout = SynopsisLayout::new(vec![4, 4]);
        let err = layout.to_sub_bands(&ArrayD::zeros(IxDyn(&[4, 5]))).unwrap_err();
        assert!(matches!(err, SynopsisError::ExtentMismatch { .. }));
    }
}
