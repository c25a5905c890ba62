//! Separable N-dimensional two-channel filter bank.
//!
//! A split filters the input along axis 0, then along axis 1 on both
//! results, and so on, producing `2^D` sub-bands. A merge walks the axes in
//! reverse, pairing neighbours of the band list along the last axis first.
//!
//! Axes are extended periodically. When sub-sampling by `f ≥ 2`, an axis of
//! extent `n` is first padded to `⌈n/f⌉·f` by repeating its last sample, so
//! every input index has a partner in the padded period and the merge can
//! crop back to `n` exactly.
//!
//! Two channels are critically sampled at `f = 2`, so factors are limited
//! to 1 (undecimated) and 2 (decimated).

use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, IxDyn};
use rayon::prelude::*;
use tracing::{debug, trace};
use wavebank_filter::{CoefficientTable, Direction, FilterOperatorBuilder, FilterSet, Pass, WaveletFamily};
use wavebank_region::{Region, SubsampledRegionIter, SubsampledRegionIterMut};

use crate::band::{Orientation, SubBand, extent_at_depth};
use crate::error::WaveletError;

/// Filter bank for one decomposition level.
#[derive(Clone, Debug)]
pub struct SeparableFilterBank {
    filters: FilterSet,
    subsample_factor: usize,
    level: usize,
}

impl SeparableFilterBank {
    /// Builds the bank for `level` of a transform.
    ///
    /// With `subsample_factor == 1` the operators are dilated by `2^level`
    /// and scaled by `1/√2`, which keeps the undecimated bank at unit gain.
    /// Otherwise the plain prototypes are used at every level.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidSubsampleFactor`] | `subsample_factor` is not 1 or 2 |
    /// | [`WaveletError::LevelTooHigh`] | `2^level` overflows |
    /// | [`WaveletError::Filter`] | operator derivation failed |
    pub fn new(family: WaveletFamily, subsample_factor: usize, level: usize) -> Result<Self, WaveletError> {
        if !(1..=2).contains(&subsample_factor) {
            return Err(WaveletError::InvalidSubsampleFactor(subsample_factor));
        }
        let builder = FilterOperatorBuilder::new(family);
        let builder = if subsample_factor == 1 {
            builder.upsample(dilation(level)?).normalize(FRAC_1_SQRT_2)
        } else {
            builder
        };
        let filters = builder.build()?;
        debug!(%family, subsample_factor, level, "built filter bank");
        Ok(Self {
            filters,
            subsample_factor,
            level,
        })
    }

    /// Span of the widest forward operator a bank for `level` would use,
    /// computed without building the bank.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::LevelTooHigh`] if the support overflows.
    pub fn required_support(family: WaveletFamily, subsample_factor: usize, level: usize) -> Result<usize, WaveletError> {
        let pair = CoefficientTable::lookup(family)?;
        let support = pair.low().support().max(pair.high().support());
        if subsample_factor != 1 {
            return Ok(support);
        }
        (support - 1)
            .checked_mul(dilation(level)?)
            .and_then(|s| s.checked_add(1))
            .ok_or(WaveletError::LevelTooHigh {
                requested: level,
                max: usize::BITS as usize - 1,
            })
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn subsample_factor(&self) -> usize {
        self.subsample_factor
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Filters `input` along `axis` with the forward operator of `pass`,
    /// keeping every `f`-th output. The output extent along `axis` is
    /// `⌈n/f⌉`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidAxis`] | `axis >= input.ndim()` |
    /// | [`WaveletError::InsufficientSupport`] | the axis is shorter than the operator |
    pub fn forward_axis(&self, input: &ArrayViewD<'_, f64>, axis: usize, pass: Pass) -> Result<ArrayD<f64>, WaveletError> {
        let ndim = input.ndim();
        if axis >= ndim {
            return Err(WaveletError::InvalidAxis { axis, ndim });
        }
        let operator = self.filters.operator(Direction::Forward, pass);
        let extent = input.shape()[axis];
        self.check_support(axis, extent, operator.support())?;

        let f = self.subsample_factor;
        let input_region = Region::from_shape(input.shape());
        let output_region = input_region.downsampled(axis, f);
        let period = output_region.extent()[axis] * f;
        let strides = axis_strides(ndim, axis, f);
        let mut output = ArrayD::zeros(IxDyn(output_region.extent()));

        for_each_slab(&mut output, axis, |split, start, mut slab| {
            let source_region = slab_region(&input_region, split, start, slab.shape());
            trace!(
                level = self.level,
                axis,
                ?pass,
                requested = ?source_region
                    .downsampled(axis, f)
                    .forward_request(axis, f, operator.radius()),
                "forward slab"
            );
            let base: Vec<usize> = source_region.origin().iter().map(|&o| o as usize).collect();
            let mut source = SubsampledRegionIter::new(input.view(), &source_region, &strides)?;
            let mut neighbour = vec![0; ndim];
            let mut target = vec![0; ndim];
            while !source.is_at_end() {
                let index = source.index();
                neighbour.copy_from_slice(index);
                for (t, (&i, &b)) in target.iter_mut().zip(index.iter().zip(&base)) {
                    *t = i - b;
                }
                target[axis] /= f;
                let centre = index[axis] as isize;

                let mut acc = 0.0;
                for &(offset, weight) in operator.taps() {
                    neighbour[axis] = wrap(centre + offset, period, extent);
                    acc += weight * input[neighbour.as_slice()];
                }
                slab[target.as_slice()] = acc;
                source.advance();
            }
            Ok(())
        })?;
        Ok(output)
    }

    /// Rebuilds an axis of extent `extent` from its low-pass and high-pass
    /// halves: zero-upsample both, filter with the inverse operators, sum.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidAxis`] | `axis` out of range |
    /// | [`WaveletError::ShapeMismatch`] | halves differ, or do not sub-sample from `extent` |
    /// | [`WaveletError::InsufficientSupport`] | the padded axis is shorter than the operators |
    pub fn inverse_axis(
        &self,
        low: &ArrayViewD<'_, f64>,
        high: &ArrayViewD<'_, f64>,
        axis: usize,
        extent: usize,
    ) -> Result<ArrayD<f64>, WaveletError> {
        let ndim = low.ndim();
        if axis >= ndim {
            return Err(WaveletError::InvalidAxis { axis, ndim });
        }
        if low.shape() != high.shape() {
            return Err(WaveletError::ShapeMismatch {
                expected: low.shape().to_vec(),
                actual: high.shape().to_vec(),
            });
        }
        let mut shape = low.shape().to_vec();
        shape[axis] = extent;
        let output_region = Region::from_shape(&shape);
        let expected = output_region.downsampled(axis, self.subsample_factor);
        if extent == 0 || expected.extent() != low.shape() {
            return Err(WaveletError::ShapeMismatch {
                expected: expected.extent().to_vec(),
                actual: low.shape().to_vec(),
            });
        }

        let f = self.subsample_factor;
        let period = low.shape()[axis] * f;
        self.check_support(axis, period, self.filters.support(Direction::Inverse))?;
        let up_low = self.zero_upsample(low, axis)?;
        let up_high = self.zero_upsample(high, axis)?;
        let branches = [
            (self.filters.operator(Direction::Inverse, Pass::Low), &up_low),
            (self.filters.operator(Direction::Inverse, Pass::High), &up_high),
        ];
        let radius = self.filters.radius(Direction::Inverse);
        let mut output = ArrayD::zeros(IxDyn(&shape));

        for_each_slab(&mut output, axis, |split, start, slab| {
            trace!(
                level = self.level,
                axis,
                requested = ?slab_region(&output_region, split, start, slab.shape())
                    .inverse_request(axis, f, radius),
                "inverse slab"
            );
            let local = Region::from_shape(slab.shape());
            let mut target = SubsampledRegionIterMut::new(slab, &local, &vec![1; ndim])?;
            let mut source = vec![0; ndim];
            while !target.is_at_end() {
                source.copy_from_slice(target.index());
                if let Some(s) = split {
                    source[s] += start;
                }
                let centre = source[axis] as isize;

                let mut acc = 0.0;
                for (operator, band) in &branches {
                    for &(offset, weight) in operator.taps() {
                        source[axis] = (centre - offset).rem_euclid(period as isize) as usize;
                        acc += weight * band[source.as_slice()];
                    }
                }
                target.set(acc);
                target.advance();
            }
            Ok(())
        })?;
        Ok(output)
    }

    /// Splits `image` into `2^D` sub-bands, ordered by orientation mask
    /// with axis 0 most significant.
    ///
    /// # Errors
    ///
    /// Propagates [`forward_axis`](Self::forward_axis) errors.
    pub fn split(&self, image: &ArrayViewD<'_, f64>, signal_extent: &[usize]) -> Result<Vec<SubBand>, WaveletError> {
        let ndim = image.ndim();
        let mut stage = self.split_axis(&[(Orientation::LOW_PASS, image.view())], 0)?;
        for axis in 1..ndim {
            stage = {
                let views: Vec<_> = stage.iter().map(|(o, a)| (*o, a.view())).collect();
                self.split_axis(&views, axis)?
            };
        }
        debug!(
            level = self.level,
            bands = stage.len(),
            shape = ?stage.first().map(|(_, a)| a.shape().to_vec()),
            "split"
        );
        Ok(stage
            .into_iter()
            .map(|(orientation, image)| SubBand::new(image, self.level, orientation, signal_extent.to_vec()))
            .collect())
    }

    /// Splits a sub-band. See [`split`](Self::split).
    pub fn forward(&self, band: &SubBand) -> Result<Vec<SubBand>, WaveletError> {
        self.split(&band.view(), band.signal_extent())
    }

    /// Merges `2^D` sibling images back into the node they were split from.
    ///
    /// The node sits at depth `level` of a decomposition of a signal of
    /// `signal_extent`, which fixes the output shape.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::BandCountMismatch`] | `images.len() != 2^D` |
    /// | [`WaveletError::DimensionMismatch`] | an image has the wrong number of axes |
    /// | [`WaveletError::ShapeMismatch`] | an image does not have the child shape |
    pub fn merge(&self, images: &[ArrayViewD<'_, f64>], signal_extent: &[usize]) -> Result<ArrayD<f64>, WaveletError> {
        let ndim = signal_extent.len();
        if ndim == 0 || images.len() != Orientation::band_count(ndim) {
            return Err(WaveletError::BandCountMismatch {
                len: images.len(),
                ndim,
            });
        }
        let target = extent_at_depth(signal_extent, self.subsample_factor, self.level);
        let child = extent_at_depth(&target, self.subsample_factor, 1);
        for image in images {
            if image.ndim() != ndim {
                return Err(WaveletError::DimensionMismatch {
                    expected: ndim,
                    actual: image.ndim(),
                });
            }
            if image.shape() != child.as_slice() {
                return Err(WaveletError::ShapeMismatch {
                    expected: child.clone(),
                    actual: image.shape().to_vec(),
                });
            }
        }

        let last = ndim - 1;
        let mut stage = self.merge_axis(images, last, target[last])?;
        for axis in (0..last).rev() {
            stage = {
                let views: Vec<_> = stage.iter().map(|a| a.view()).collect();
                self.merge_axis(&views, axis, target[axis])?
            };
        }
        debug!(level = self.level, shape = ?target, "merged");
        stage.pop().ok_or(WaveletError::BandCountMismatch {
            len: images.len(),
            ndim,
        })
    }

    /// Merges a full set of sub-bands produced by this bank.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::UnexpectedBand`] if the bands are not in
    /// orientation order or carry another level, plus the errors of
    /// [`merge`](Self::merge).
    pub fn inverse(&self, bands: &[SubBand]) -> Result<ArrayD<f64>, WaveletError> {
        let first = bands.first().ok_or(WaveletError::BandCountMismatch { len: 0, ndim: 0 })?;
        for (index, band) in bands.iter().enumerate() {
            if band.level() != self.level || band.orientation().mask() as usize != index {
                return Err(WaveletError::UnexpectedBand {
                    index,
                    level: band.level(),
                    orientation: band.orientation().mask(),
                    expected_level: self.level,
                    expected_orientation: index as u32,
                });
            }
            if band.signal_extent() != first.signal_extent() {
                return Err(WaveletError::ShapeMismatch {
                    expected: first.signal_extent().to_vec(),
                    actual: band.signal_extent().to_vec(),
                });
            }
        }
        let views: Vec<_> = bands.iter().map(SubBand::view).collect();
        self.merge(&views, first.signal_extent())
    }

    fn split_axis(
        &self,
        inputs: &[(Orientation, ArrayViewD<'_, f64>)],
        axis: usize,
    ) -> Result<Vec<(Orientation, ArrayD<f64>)>, WaveletError> {
        let pairs = inputs
            .par_iter()
            .map(|(orientation, view)| -> Result<_, WaveletError> {
                let low = self.forward_axis(view, axis, Pass::Low)?;
                let high = self.forward_axis(view, axis, Pass::High)?;
                Ok([
                    (*orientation, low),
                    (orientation.with_high(axis, view.ndim()), high),
                ])
            })
            .collect::<Result<Vec<_>, WaveletError>>()?;
        Ok(pairs.into_iter().flatten().collect())
    }

    fn merge_axis(&self, inputs: &[ArrayViewD<'_, f64>], axis: usize, extent: usize) -> Result<Vec<ArrayD<f64>>, WaveletError> {
        inputs
            .par_chunks(2)
            .map(|pair| self.inverse_axis(&pair[0], &pair[1], axis, extent))
            .collect()
    }

    fn zero_upsample(&self, band: &ArrayViewD<'_, f64>, axis: usize) -> Result<ArrayD<f64>, WaveletError> {
        let f = self.subsample_factor;
        if f == 1 {
            return Ok(band.to_owned());
        }
        let ndim = band.ndim();
        let band_region = Region::from_shape(band.shape());
        let mut shape = band.shape().to_vec();
        shape[axis] *= f;
        let mut upsampled = ArrayD::zeros(IxDyn(&shape));

        let mut source = SubsampledRegionIter::new(band.view(), &band_region, &vec![1; ndim])?;
        let mut target = SubsampledRegionIterMut::new(
            upsampled.view_mut(),
            &band_region.upsampled(axis, f),
            &axis_strides(ndim, axis, f),
        )?;
        while let Some(value) = source.get() {
            target.set(value);
            source.advance();
            target.advance();
        }
        Ok(upsampled)
    }

    fn check_support(&self, axis: usize, extent: usize, support: usize) -> Result<(), WaveletError> {
        if extent < support {
            return Err(WaveletError::InsufficientSupport {
                level: self.level,
                axis,
                extent,
                support,
            });
        }
        Ok(())
    }
}

/// Fails with [`WaveletError::InsufficientSupport`] if any axis of `shape`
/// is shorter than the forward support at `level`.
pub(crate) fn ensure_support(
    family: WaveletFamily,
    subsample_factor: usize,
    level: usize,
    shape: &[usize],
) -> Result<(), WaveletError> {
    let support = SeparableFilterBank::required_support(family, subsample_factor, level)?;
    match shape.iter().position(|&extent| extent < support) {
        Some(axis) => Err(WaveletError::InsufficientSupport {
            level,
            axis,
            extent: shape[axis],
            support,
        }),
        None => Ok(()),
    }
}

fn dilation(level: usize) -> Result<usize, WaveletError> {
    u32::try_from(level)
        .ok()
        .and_then(|l| 1usize.checked_shl(l))
        .ok_or(WaveletError::LevelTooHigh {
            requested: level,
            max: usize::BITS as usize - 1,
        })
}

fn axis_strides(ndim: usize, axis: usize, factor: usize) -> Vec<usize> {
    let mut strides = vec![1; ndim];
    strides[axis] = factor;
    strides
}

/// Periodic wrap over the padded period, then replicate the last sample for
/// the padding positions.
fn wrap(position: isize, period: usize, extent: usize) -> usize {
    (position.rem_euclid(period as isize) as usize).min(extent - 1)
}

/// The part of `region` covered by a slab starting at `start` on `split`.
fn slab_region(region: &Region, split: Option<usize>, start: usize, slab: &[usize]) -> Region {
    match split {
        Some(s) => region.with_axis_range(s, region.origin()[s] + start as isize, slab[s]),
        None => region.clone(),
    }
}

/// Runs `worker` on disjoint slabs of `output` cut along the first axis other
/// than `axis`. The worker gets the split axis and the slab's start on it.
fn for_each_slab<F>(output: &mut ArrayD<f64>, axis: usize, worker: F) -> Result<(), WaveletError>
where
    F: Fn(Option<usize>, usize, ArrayViewMutD<'_, f64>) -> Result<(), WaveletError> + Sync,
{
    let Some(split) = (0..output.ndim()).find(|&a| a != axis) else {
        return worker(None, 0, output.view_mut());
    };
    let chunk = output.shape()[split].div_ceil(rayon::current_num_threads()).max(1);
    output
        .axis_chunks_iter_mut(Axis(split), chunk)
        .into_par_iter()
        .enumerate()
        .try_for_each(|(i, slab)| worker(Some(split), i * chunk, slab))
}
