//! Wavelet packet decomposition driven by a [`Cost`] policy.

use std::slice;

use ndarray::{ArrayD, CowArray, IxDyn};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::band::{Orientation, SubBand, extent_at_depth, validate_image, validate_ndim};
use crate::bank::ensure_support;
use crate::cache::BankCache;
use crate::config::TransformConfig;
use crate::cost::Cost;
use crate::error::WaveletError;
use crate::tree::DecompositionTree;

/// Packet decomposition: any node, low-pass or not, may be split again.
///
/// The [`DecompositionTree`] records every decision in pre-order and the
/// leaves are returned in the same order; the pair is all the inverse needs.
/// The configured number of levels is ignored: depth is up to the cost.
///
/// # Example
///
/// ```ignore
/// use wavebank_filter::WaveletFamily;
/// use wavebank_wavelet::{EnergyThreshold, PacketTransform, TransformConfig};
///
/// let packet = PacketTransform::new(TransformConfig::new(WaveletFamily::Haar).with_subsample_factor(2))?;
/// let (bands, tree) = packet.forward(&image, &EnergyThreshold::new(3, 1e-3))?;
/// let rebuilt = packet.inverse(&bands, &tree)?;
/// ```
#[derive(Debug)]
pub struct PacketTransform {
    config: TransformConfig,
    banks: BankCache,
}

struct Replay<'a> {
    flags: slice::Iter<'a, bool>,
    leaves: slice::Iter<'a, SubBand>,
}

impl PacketTransform {
    /// Creates a packet transform.
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

    /// Decomposes `image`, asking `cost` at every node whether to split.
    ///
    /// # Errors
    ///
    /// The input checks of [`PyramidTransform::forward`](crate::PyramidTransform::forward),
    /// plus [`WaveletError::InsufficientSupport`] when the cost asks to split
    /// a node whose axes are shorter than the filter.
    #[instrument(skip_all, fields(family = %self.config.family(), shape = ?image.shape()))]
    pub fn forward(&self, image: &ArrayD<f64>, cost: &dyn Cost) -> Result<(Vec<SubBand>, DecompositionTree), WaveletError> {
        validate_image(&image.view())?;
        let (flags, leaves) = self.decompose(SubBand::root(image.clone()), 0, cost)?;
        let tree = DecompositionTree::new(flags);
        debug!(nodes = tree.len(), leaves = leaves.len(), "packet decomposed");
        Ok((leaves, tree))
    }

    fn decompose(&self, band: SubBand, depth: usize, cost: &dyn Cost) -> Result<(Vec<bool>, Vec<SubBand>), WaveletError> {
        if !cost.evaluate(depth, &band) {
            return Ok((vec![false], vec![band]));
        }
        ensure_support(
            self.config.family(),
            self.config.subsample_factor(),
            depth,
            band.extent(),
        )?;
        let children = self.banks.get(depth)?.forward(&band)?;
        let subtrees = children
            .into_par_iter()
            .map(|child| self.decompose(child, depth + 1, cost))
            .collect::<Result<Vec<_>, _>>()?;

        let mut flags = vec![true];
        let mut leaves = Vec::new();
        for (child_flags, child_leaves) in subtrees {
            flags.extend(child_flags);
            leaves.extend(child_leaves);
        }
        Ok((flags, leaves))
    }

    /// Rebuilds the image by replaying `tree` over `bands`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::UnsupportedDimension`] | the first band has zero or more than [`MAX_DIMENSIONS`](crate::MAX_DIMENSIONS) axes |
    /// | [`WaveletError::TreeMismatch`] | tree and band list disagree |
    /// | [`WaveletError::DimensionMismatch`] | bands disagree on the number of axes |
    /// | [`WaveletError::ShapeMismatch`] | a band does not have the shape its tree position implies |
    #[instrument(skip_all, fields(family = %self.config.family(), bands = bands.len(), nodes = tree.len()))]
    pub fn inverse(&self, bands: &[SubBand], tree: &DecompositionTree) -> Result<ArrayD<f64>, WaveletError> {
        let mismatch = WaveletError::TreeMismatch {
            nodes: tree.len(),
            decomposed: tree.decomposed(),
            bands: bands.len(),
        };
        let first = bands.first().ok_or_else(|| mismatch.clone())?;
        let ndim = first.ndim();
        validate_ndim(ndim)?;
        tree.validate(ndim, bands.len())?;
        let signal_extent = first.signal_extent();
        for band in bands {
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
        }

        let mut replay = Replay {
            flags: tree.flags().iter(),
            leaves: bands.iter(),
        };
        let image = self.rebuild(0, &mut replay, signal_extent, &mismatch)?;
        if replay.flags.next().is_some() || replay.leaves.next().is_some() {
            return Err(mismatch);
        }
        Ok(image.into_owned())
    }

    fn rebuild<'a>(
        &self,
        depth: usize,
        replay: &mut Replay<'a>,
        signal_extent: &[usize],
        mismatch: &WaveletError,
    ) -> Result<CowArray<'a, f64, IxDyn>, WaveletError> {
        let split = *replay.flags.next().ok_or_else(|| mismatch.clone())?;
        if !split {
            let leaf = replay.leaves.next().ok_or_else(|| mismatch.clone())?;
            let expected = extent_at_depth(signal_extent, self.config.subsample_factor(), depth);
            if leaf.extent() != expected.as_slice() {
                return Err(WaveletError::ShapeMismatch {
                    expected,
                    actual: leaf.extent().to_vec(),
                });
            }
            return Ok(CowArray::from(leaf.view()));
        }

        let children = (0..Orientation::band_count(signal_extent.len()))
            .map(|_| self.rebuild(depth + 1, replay, signal_extent, mismatch))
            .collect::<Result<Vec<_>, _>>()?;
        ensure_support(
            self.config.family(),
            self.config.subsample_factor(),
            depth,
            &extent_at_depth(signal_extent, self.config.subsample_factor(), depth),
        )?;
        let bank = self.banks.get(depth)?;
        let views: Vec<_> = children.iter().map(|c| c.view()).collect();
        Ok(CowArray::from(bank.merge(&views, signal_extent)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::FullyDecomposed;
    use approx::assert_abs_diff_eq;
    use wavebank_filter::WaveletFamily;

    fn image(shape: &[usize]) -> ArrayD<f64> {
        let len: usize = shape.iter().product();
        ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|v| ((v as f64) * 0.37).cos()).collect()).unwrap()
    }

    fn decimated(family: WaveletFamily) -> PacketTransform {
        PacketTransform::new(TransformConfig::new(family).with_subsample_factor(2)).unwrap()
    }

    #[test]
    fn no_split_returns_root() {
        let packet = decimated(WaveletFamily::Haar);
        let x = image(&[4, 4]);
        let (bands, tree) = packet.forward(&x, &FullyDecomposed::new(0)).unwrap();
        assert_eq!(tree.flags(), &[false]);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].image(), &x);
        assert_eq!(packet.inverse(&bands, &tree).unwrap(), x);
    }

    #[test]
    fn full_tree_two_levels() {
        let packet = decimated(WaveletFamily::Db4);
        let x = image(&[16, 12]);
        let (bands, tree) = packet.forward(&x, &FullyDecomposed::new(2)).unwrap();
        assert_eq!(tree.len(), 1 + 4 + 16);
        assert_eq!(tree.decomposed(), 5);
        assert_eq!(bands.len(), 16);
        for band in &bands {
            assert_eq!(band.level(), 1);
            assert_eq!(band.extent(), &[4, 3]);
        }
        let back = packet.inverse(&bands, &tree).unwrap();
        for (a, b) in back.iter().zip(x.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn uneven_tree_from_closure() {
        let packet = decimated(WaveletFamily::Haar);
        let x = image(&[8, 8]);
        // split the root, then only its last child
        let cost = |depth: usize, band: &SubBand| depth == 0 || (depth == 1 && band.orientation().mask() == 3);
        let (bands, tree) = packet.forward(&x, &cost).unwrap();
        assert_eq!(
            tree.flags(),
            &[true, false, false, false, true, false, false, false, false]
        );
        assert_eq!(bands.len(), 7);
        let back = packet.inverse(&bands, &tree).unwrap();
        for (a, b) in back.iter().zip(x.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_rejects_mismatched_tree() {
        let packet = decimated(WaveletFamily::Haar);
        let (bands, _) = packet.forward(&image(&[4, 4]), &FullyDecomposed::new(1)).unwrap();
        let tree = DecompositionTree::new(vec![false]);
        let err = packet.inverse(&bands, &tree).unwrap_err();
        assert!(matches!(
            err,
            WaveletError::TreeMismatch {
                nodes: 1,
                decomposed: 0,
                bands: 4
            }
        ));
    }

    #[test]
    fn inverse_rejects_leaf_of_wrong_shape() {
        let packet = decimated(WaveletFamily::Haar);
        let x = image(&[8, 8]);
        let (mut bands, tree) = packet.forward(&x, &FullyDecomposed::new(1)).unwrap();
        bands[2] = SubBand::new(ArrayD::zeros(IxDyn(&[3, 4])), 0, Orientation::new(2), vec![8, 8]);
        let err = packet.inverse(&bands, &tree).unwrap_err();
        assert!(matches!(err, WaveletError::ShapeMismatch { .. }));
    }

    #[test]
    fn split_beyond_support_fails() {
        let packet = decimated(WaveletFamily::Db8);
        let err = packet
            .forward(&image(&[16, 16]), &FullyDecomposed::new(3))
            .unwrap_err();
        assert!(matches!(err, WaveletError::InsufficientSupport { level: 2, .. }));
    }
}
