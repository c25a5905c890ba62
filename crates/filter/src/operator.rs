//! Forward and inverse filter operators derived from a coefficient table.

use tracing::debug;

use crate::coefficients::CoefficientVector;
use crate::error::FilterError;
use crate::family::WaveletFamily;
use crate::table::CoefficientTable;

/// Analysis (forward) or synthesis (inverse) side of a filter bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Decomposition.
    Forward,
    /// Reconstruction.
    Inverse,
}

/// Low-pass or high-pass branch of a filter bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Scaling branch.
    Low,
    /// Wavelet branch.
    High,
}

/// One ready-to-apply filter: centred coefficients plus their non-zero taps.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterOperator {
    coefficients: CoefficientVector,
    taps: Vec<(isize, f64)>,
    direction: Direction,
    pass: Pass,
    upsample_factor: usize,
}

impl FilterOperator {
    fn new(
        coefficients: CoefficientVector,
        direction: Direction,
        pass: Pass,
        upsample_factor: usize,
    ) -> Result<Self, FilterError> {
        let taps = coefficients.nonzero_taps();
        if taps.is_empty() {
            return Err(FilterError::DegenerateFilter(format!(
                "{direction:?} {pass:?} operator has no non-zero tap"
            )));
        }
        Ok(Self {
            coefficients,
            taps,
            direction,
            pass,
            upsample_factor,
        })
    }

    /// Returns the centred coefficient vector.
    pub fn coefficients(&self) -> &CoefficientVector {
        &self.coefficients
    }

    /// Returns `(offset, weight)` pairs of the non-zero taps.
    pub fn taps(&self) -> &[(isize, f64)] {
        &self.taps
    }

    /// Returns the bank side this operator belongs to.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the branch this operator belongs to.
    pub fn pass(&self) -> Pass {
        self.pass
    }

    /// Returns the à-trous up-sampling factor applied to the prototype.
    pub fn upsample_factor(&self) -> usize {
        self.upsample_factor
    }

    /// Returns the coefficient radius.
    pub fn radius(&self) -> usize {
        self.coefficients.radius()
    }

    /// Returns the span of non-zero taps.
    pub fn support(&self) -> usize {
        self.coefficients.support()
    }
}

/// The four operators of a two-channel filter bank.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSet {
    family: WaveletFamily,
    forward_low: FilterOperator,
    forward_high: FilterOperator,
    inverse_low: FilterOperator,
    inverse_high: FilterOperator,
}

impl FilterSet {
    /// Returns the family the set was derived from.
    pub fn family(&self) -> WaveletFamily {
        self.family
    }

    /// Returns the operator for `direction` and `pass`.
    pub fn operator(&self, direction: Direction, pass: Pass) -> &FilterOperator {
        match (direction, pass) {
            (Direction::Forward, Pass::Low) => &self.forward_low,
            (Direction::Forward, Pass::High) => &self.forward_high,
            (Direction::Inverse, Pass::Low) => &self.inverse_low,
            (Direction::Inverse, Pass::High) => &self.inverse_high,
        }
    }

    /// Returns the largest support of the two operators of `direction`.
    pub fn support(&self, direction: Direction) -> usize {
        self.operator(direction, Pass::Low)
            .support()
            .max(self.operator(direction, Pass::High).support())
    }

    /// Returns the largest radius of the two operators of `direction`.
    pub fn radius(&self, direction: Direction) -> usize {
        self.operator(direction, Pass::Low)
            .radius()
            .max(self.operator(direction, Pass::High).radius())
    }
}

/// Derives a [`FilterSet`] for one family, up-sampling factor and scale.
///
/// The inverse operators come from the analysis prototypes before
/// up-sampling:
///
/// | Operator | Derivation |
/// |----------|------------|
/// | inverse high | `g̃(j) = (-1)^j h(1-j)` |
/// | inverse low | `h̃(j) = (-1)^(j+1) g(1-j)` |
///
/// All four are then up-sampled à-trous by the same factor and multiplied
/// by the scale.
///
/// # Example
///
/// ```ignore
/// use wavebank_filter::{Direction, FilterOperatorBuilder, Pass, WaveletFamily};
///
/// let set = FilterOperatorBuilder::new(WaveletFamily::Db4).upsample(2).build()?;
/// assert_eq!(set.operator(Direction::Forward, Pass::Low).coefficients().len(), 9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterOperatorBuilder {
    family: WaveletFamily,
    upsample: usize,
    scale: f64,
}

impl FilterOperatorBuilder {
    /// Creates a builder with up-sampling factor 1 and unit scale.
    pub fn new(family: WaveletFamily) -> Self {
        Self {
            family,
            upsample: 1,
            scale: 1.0,
        }
    }

    /// Sets the à-trous up-sampling factor.
    pub fn upsample(mut self, factor: usize) -> Self {
        self.upsample = factor;
        self
    }

    /// Sets the scale applied to every tap.
    pub fn normalize(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Builds the four operators.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::InvalidUpsampleFactor`] | up-sampling factor is 0 |
    /// | [`FilterError::DegenerateFilter`] | a derived operator has no non-zero tap (e.g. scale 0) |
    pub fn build(&self) -> Result<FilterSet, FilterError> {
        if self.upsample == 0 {
            return Err(FilterError::InvalidUpsampleFactor(self.upsample));
        }
        let pair = CoefficientTable::lookup(self.family)?;
        let inverse_high = pair.low().quadrature_mirror()?;
        let inverse_low = pair.high().quadrature_mirror()?.scaled(-1.0);

        let make = |prototype: &CoefficientVector, direction: Direction, pass: Pass| {
            let coefficients = prototype.upsample(self.upsample)?.scaled(self.scale);
            FilterOperator::new(coefficients, direction, pass, self.upsample)
        };

        let set = FilterSet {
            family: self.family,
            forward_low: make(pair.low(), Direction::Forward, Pass::Low)?,
            forward_high: make(pair.high(), Direction::Forward, Pass::High)?,
            inverse_low: make(&inverse_low, Direction::Inverse, Pass::Low)?,
            inverse_high: make(&inverse_high, Direction::Inverse, Pass::High)?,
        };
        debug!(
            family = %self.family,
            upsample = self.upsample,
            scale = self.scale,
            forward_support = set.support(Direction::Forward),
            inverse_support = set.support(Direction::Inverse),
            "built filter set"
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn haar_operators() {
        let set = FilterOperatorBuilder::new(WaveletFamily::Haar).build().unwrap();
        let s = FRAC_1_SQRT_2;
        assert_eq!(
            set.operator(Direction::Forward, Pass::Low).taps(),
            &[(0, s), (1, s)]
        );
        assert_eq!(
            set.operator(Direction::Forward, Pass::High).taps(),
            &[(0, s), (1, -s)]
        );
        assert_eq!(
            set.operator(Direction::Inverse, Pass::Low).taps(),
            &[(0, s), (1, s)]
        );
        assert_eq!(
            set.operator(Direction::Inverse, Pass::High).taps(),
            &[(0, s), (1, -s)]
        );
    }

    #[test]
    fn operators_have_odd_length() {
        for family in WaveletFamily::ALL {
            for factor in 1..=4 {
                let set = FilterOperatorBuilder::new(family).upsample(factor).build().unwrap();
                for direction in [Direction::Forward, Direction::Inverse] {
                    for pass in [Pass::Low, Pass::High] {
                        let op = set.operator(direction, pass);
                        assert_eq!(op.coefficients().len() % 2, 1, "{family} {direction:?} {pass:?}");
                        assert_eq!(op.upsample_factor(), factor);
                        assert_eq!(op.direction(), direction);
                        assert_eq!(op.pass(), pass);
                    }
                }
            }
        }
    }

    #[test]
    fn normalize_scales_every_tap() {
        let plain = FilterOperatorBuilder::new(WaveletFamily::Db4).build().unwrap();
        let scaled = FilterOperatorBuilder::new(WaveletFamily::Db4)
            .normalize(0.5)
            .build()
            .unwrap();
        for direction in [Direction::Forward, Direction::Inverse] {
            for pass in [Pass::Low, Pass::High] {
                let a = plain.operator(direction, pass).coefficients();
                let b = scaled.operator(direction, pass).coefficients();
                for (x, y) in a.taps().iter().zip(b.taps()) {
                    assert_abs_diff_eq!(0.5 * x, *y);
                }
            }
        }
    }

    #[test]
    fn zero_scale_is_degenerate() {
        let err = FilterOperatorBuilder::new(WaveletFamily::Haar)
            .normalize(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, FilterError::DegenerateFilter(_)));
    }

    #[test]
    fn zero_upsample_rejected() {
        let err = FilterOperatorBuilder::new(WaveletFamily::Haar)
            .upsample(0)
            .build()
            .unwrap_err();
        assert_eq!(err, FilterError::InvalidUpsampleFactor(0));
    }

    #[test]
    fn support_grows_with_upsampling() {
        let set = FilterOperatorBuilder::new(WaveletFamily::Db4).upsample(4).build().unwrap();
        // 4 taps spread 4 apart
        assert_eq!(set.support(Direction::Forward), 13);
        assert_eq!(set.family(), WaveletFamily::Db4);
    }
}
