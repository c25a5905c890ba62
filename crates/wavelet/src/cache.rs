//! Lazily built filter banks, one per level, shared by a transform.

use std::sync::{Arc, PoisonError, RwLock};

use wavebank_filter::WaveletFamily;

use crate::bank::SeparableFilterBank;
use crate::error::WaveletError;

#[derive(Debug)]
pub(crate) struct BankCache {
    family: WaveletFamily,
    subsample_factor: usize,
    banks: RwLock<Vec<Arc<SeparableFilterBank>>>,
}

impl BankCache {
    pub(crate) fn new(family: WaveletFamily, subsample_factor: usize) -> Self {
        Self {
            family,
            subsample_factor,
            banks: RwLock::new(Vec::new()),
        }
    }

    /// Returns the bank of `level`, building it and every lower level on
    /// first use.
    pub(crate) fn get(&self, level: usize) -> Result<Arc<SeparableFilterBank>, WaveletError> {
        {
            let banks = self.banks.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(bank) = banks.get(level) {
                return Ok(Arc::clone(bank));
            }
        }
        let mut banks = self.banks.write().unwrap_or_else(PoisonError::into_inner);
        while banks.len() <= level {
            let next = banks.len();
            banks.push(Arc::new(SeparableFilterBank::new(
                self.family,
                self.subsample_factor,
                next,
            )?));
        }
        Ok(Arc::clone(&banks[level]))
    }

    #[cfg(test)]
    fn built(&self) -> usize {
        self.banks.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
