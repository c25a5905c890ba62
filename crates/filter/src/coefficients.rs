//! Centred, odd-length coefficient vectors.

use crate::error::FilterError;

/// Odd-length filter taps with a centre tap.
///
/// Tap `i` sits at signed offset `i - radius`, where `radius = len / 2`.
/// Analysis is a correlation: `y[i] = Σ_j c(j)·x[i + j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientVector {
    taps: Vec<f64>,
}

impl CoefficientVector {
    /// Creates a coefficient vector from centred taps.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::EvenLength`] | `taps.len()` is even (including zero) |
    /// | [`FilterError::DegenerateFilter`] | every tap is zero |
    pub fn new(taps: Vec<f64>) -> Result<Self, FilterError> {
        if taps.len() % 2 == 0 {
            return Err(FilterError::EvenLength { len: taps.len() });
        }
        if taps.iter().all(|&t| t == 0.0) {
            return Err(FilterError::DegenerateFilter(
                "coefficient vector has no non-zero tap".into(),
            ));
        }
        Ok(Self { taps })
    }

    /// Centres a causal, even-length scaling filter by prepending a zero tap,
    /// so that `h[0]` lands at offset `-(len/2 - 1)`.
    pub(crate) fn centred(scaling: &[f64]) -> Self {
        let mut taps = Vec::with_capacity(scaling.len() + 1);
        if scaling.len() % 2 == 0 {
            taps.push(0.0);
        }
        taps.extend_from_slice(scaling);
        Self { taps }
    }

    /// Returns the taps, centre at index [`radius`](Self::radius).
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Returns the number of taps (always odd).
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Returns `true` if the vector holds no taps.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Returns the radius `len / 2`.
    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    /// Returns the tap at signed `offset`, zero outside the vector.
    pub fn at(&self, offset: isize) -> f64 {
        let index = offset + self.radius() as isize;
        if index < 0 {
            return 0.0;
        }
        self.taps.get(index as usize).copied().unwrap_or(0.0)
    }

    /// Returns `(offset, weight)` for every non-zero tap, in offset order.
    pub fn nonzero_taps(&self) -> Vec<(isize, f64)> {
        let radius = self.radius() as isize;
        self.taps
            .iter()
            .enumerate()
            .filter(|(_, t)| **t != 0.0)
            .map(|(i, &t)| (i as isize - radius, t))
            .collect()
    }

    /// Returns the span between the first and last non-zero tap, inclusive.
    pub fn support(&self) -> usize {
        let first = self.taps.iter().position(|&t| t != 0.0);
        let last = self.taps.iter().rposition(|&t| t != 0.0);
        match (first, last) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    /// Up-samples à-trous, `H(z) -> H(z^f)`.
    ///
    /// A vector of length `2r+1` becomes `2rf+1` with the original taps at
    /// indices `rf ± f·k` and zeros in between.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidUpsampleFactor`] if `factor == 0`.
    pub fn upsample(&self, factor: usize) -> Result<Self, FilterError> {
        if factor == 0 {
            return Err(FilterError::InvalidUpsampleFactor(factor));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let mut taps = vec![0.0; 2 * self.radius() * factor + 1];
        for (i, &t) in self.taps.iter().enumerate() {
            taps[i * factor] = t;
        }
        Ok(Self { taps })
    }

    /// Multiplies every tap by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            taps: self.taps.iter().map(|t| t * scale).collect(),
        }
    }

    /// Returns the quadrature mirror `w(j) = (-1)^j c(1 - j)`.
    ///
    /// The result is built one tap wider on each side than `self` and then
    /// passed through [`reduce_filter_length`](Self::reduce_filter_length).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::DegenerateFilter`] if the mirror has no
    /// non-zero tap.
    pub fn quadrature_mirror(&self) -> Result<Self, FilterError> {
        let radius = self.radius() as isize + 1;
        let taps = (-radius..=radius)
            .map(|j| {
                let sign = if j.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
                sign * self.at(1 - j)
            })
            .collect();
        let mirror = Self { taps }.reduce_filter_length();
        if mirror.support() == 0 {
            return Err(FilterError::DegenerateFilter(
                "quadrature mirror has no non-zero tap".into(),
            ));
        }
        Ok(mirror)
    }

    /// Strips leading and trailing zero taps in pairs while both ends are
    /// exactly zero, keeping the centre in place.
    pub fn reduce_filter_length(mut self) -> Self {
        let mut start = 0;
        let mut end = self.taps.len();
        while end - start > 1 && self.taps[start] == 0.0 && self.taps[end - 1] == 0.0 {
            start += 1;
            end -= 1;
        }
        self.taps.truncate(end);
        self.taps.drain(..start);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn new_rejects_even_length() {
        let err = CoefficientVector::new(vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, FilterError::EvenLength { len: 2 });
        let err = CoefficientVector::new(Vec::new()).unwrap_err();
        assert_eq!(err, FilterError::EvenLength { len: 0 });
    }

    #[test]
    fn new_rejects_all_zero() {
        let err = CoefficientVector::new(vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, FilterError::DegenerateFilter(_)));
    }

    #[test]
    fn centred_prepends_zero() {
        let v = CoefficientVector::centred(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.taps(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.radius(), 2);
        assert_eq!(v.at(-1), 1.0);
        assert_eq!(v.at(2), 4.0);
        assert_eq!(v.at(3), 0.0);
        assert_eq!(v.at(-3), 0.0);
    }

    #[test]
    fn support_spans_nonzero_taps() {
        let v = CoefficientVector::new(vec![0.0, 0.0, 1.0, 0.0, 2.0]).unwrap();
        assert_eq!(v.support(), 3);
        assert_eq!(v.nonzero_taps(), vec![(0, 1.0), (2, 2.0)]);
    }

    #[test]
    fn upsample_inserts_zeros() {
        let v = CoefficientVector::new(vec![1.0, 2.0, 3.0]).unwrap();
        let up = v.upsample(3).unwrap();
        assert_eq!(up.len(), 7);
        assert_eq!(up.taps(), &[1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 3.0]);
        assert_eq!(up.radius(), 3);
    }

    #[test]
    fn upsample_by_one_is_identity() {
        let v = CoefficientVector::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.upsample(1).unwrap(), v);
    }

    #[test]
    fn upsample_rejects_zero_factor() {
        let v = CoefficientVector::new(vec![1.0]).unwrap();
        assert_eq!(
            v.upsample(0).unwrap_err(),
            FilterError::InvalidUpsampleFactor(0)
        );
    }

    #[test]
    fn haar_mirror() {
        let low = CoefficientVector::centred(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
        let high = low.quadrature_mirror().unwrap();
        assert_eq!(high.len(), 3);
        assert_abs_diff_eq!(high.at(-1), 0.0);
        assert_abs_diff_eq!(high.at(0), FRAC_1_SQRT_2);
        assert_abs_diff_eq!(high.at(1), -FRAC_1_SQRT_2);
    }

    #[test]
    fn mirror_twice_negates_odd_taps_back() {
        let v = CoefficientVector::new(vec![0.5, 1.0, -0.25]).unwrap();
        let twice = v.quadrature_mirror().unwrap().quadrature_mirror().unwrap();
        // w(w(c))(j) = (-1)^j (-1)^(1-j) c(j) = -c(j)
        for j in -1..=1 {
            assert_abs_diff_eq!(twice.at(j), -v.at(j));
        }
    }

    #[test]
    fn reduce_strips_zero_pairs_only() {
        let v = CoefficientVector {
            taps: vec![0.0, 0.0, 1.0, 2.0, 0.0],
        };
        assert_eq!(v.reduce_filter_length().taps(), &[0.0, 1.0, 2.0]);

        let v = CoefficientVector {
            taps: vec![0.0, 1.0, 2.0, 3.0, 4.0],
        };
        assert_eq!(v.clone().reduce_filter_length(), v);
    }

    #[test]
    fn scaled_multiplies_taps() {
        let v = CoefficientVector::new(vec![1.0, -2.0, 4.0]).unwrap();
        assert_eq!(v.scaled(0.5).taps(), &[0.5, -1.0, 2.0]);
    }
}
