//! Pre-order decomposition flags of a wavelet packet.

use crate::band::Orientation;
use crate::error::WaveletError;

/// Pre-order list of split decisions: `true` for a node that was split into
/// `2^D` children, `false` for a leaf.
///
/// A root that was not split is `[false]`. One split of a 2-D root with all
/// children kept is `[true, false, false, false, false]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecompositionTree {
    flags: Vec<bool>,
}

impl DecompositionTree {
    pub fn new(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn into_flags(self) -> Vec<bool> {
        self.flags
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of split nodes.
    pub fn decomposed(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Number of leaves, i.e. sub-bands.
    pub fn leaves(&self) -> usize {
        self.len() - self.decomposed()
    }

    /// Depth of the deepest node, `None` for flags that do not parse as
    /// one pre-order tree.
    pub fn depth(&self, ndim: usize) -> Option<usize> {
        let children = Orientation::band_count(ndim);
        // children still expected by each open node, innermost last
        let mut open: Vec<usize> = Vec::new();
        let mut deepest = 0;
        for (i, &flag) in self.flags.iter().enumerate() {
            if i > 0 {
                *open.last_mut()? -= 1;
            }
            deepest = deepest.max(open.len());
            if flag {
                open.push(children);
            }
            while open.last() == Some(&0) {
                open.pop();
            }
        }
        (!self.flags.is_empty() && open.is_empty()).then_some(deepest)
    }

    /// Checks the tree against a list of `bands` sub-bands of `ndim` axes:
    /// `len == 1 + 2^D·decomposed`, `bands == 1 + decomposed·(2^D - 1)`, and
    /// the flags parse as exactly one pre-order tree.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::TreeMismatch`] on any disagreement.
    pub fn validate(&self, ndim: usize, bands: usize) -> Result<(), WaveletError> {
        let decomposed = self.decomposed();
        let children = Orientation::band_count(ndim);
        let mismatch = WaveletError::TreeMismatch {
            nodes: self.len(),
            decomposed,
            bands,
        };
        if self.len() != 1 + children * decomposed || bands != 1 + decomposed * (children - 1) {
            return Err(mismatch);
        }
        if self.depth(ndim).is_none() {
            return Err(mismatch);
        }
        Ok(())
    }
}

impl From<Vec<bool>> for DecompositionTree {
    fn from(flags: Vec<bool>) -> Self {
        Self::new(flags)
    }
}
