//! Split decisions for wavelet packet decomposition.

use crate::band::SubBand;

/// Decides whether a packet node is split further.
///
/// Implemented for the built-in policies and for any
/// `Fn(usize, &SubBand) -> bool + Sync` closure.
pub trait Cost: Sync {
    /// Returns `true` to split `band`, found at tree `depth` (the root is 0).
    fn evaluate(&self, depth: usize, band: &SubBand) -> bool;
}

impl<F> Cost for F
where
    F: Fn(usize, &SubBand) -> bool + Sync,
{
    fn evaluate(&self, depth: usize, band: &SubBand) -> bool {
        self(depth, band)
    }
}

/// Splits every node above `max_depth`, giving a complete tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FullyDecomposed {
    max_depth: usize,
}

impl FullyDecomposed {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Cost for FullyDecomposed {
    fn evaluate(&self, depth: usize, _band: &SubBand) -> bool {
        depth < self.max_depth
    }
}

/// Splits a node above `max_depth` while its mean energy exceeds
/// `min_energy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyThreshold {
    max_depth: usize,
    min_energy: f64,
}

impl EnergyThreshold {
    pub fn new(max_depth: usize, min_energy: f64) -> Self {
        Self {
            max_depth,
            min_energy,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn min_energy(&self) -> f64 {
        self.min_energy
    }
}

impl Cost for EnergyThreshold {
    fn evaluate(&self, depth: usize, band: &SubBand) -> bool {
        depth < self.max_depth && band.energy() > self.min_energy
    }
}
