//! Registered analysis coefficients per wavelet family.
//!
//! Orthogonal families store the causal Daubechies (1992) scaling filter,
//! normalized so the taps sum to √2. Spline biorthogonal families store the
//! centred analysis scaling filter and its centred dual.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::coefficients::CoefficientVector;
use crate::error::FilterError;
use crate::family::WaveletFamily;

const HAAR: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];

const DB4: [f64; 4] = [
    0.4829629131445341,
    0.8365163037378077,
    0.2241438680420134,
    -0.12940952255126034,
];

const DB6: [f64; 6] = [
    0.3326705529509569,
    0.8068915093133388,
    0.4598775021193313,
    -0.13501102001039084,
    -0.08544127388224149,
    0.035226291882100656,
];

const DB8: [f64; 8] = [
    0.23037781330885523,
    0.7148465705525415,
    0.6308807679295904,
    -0.02798376941698385,
    -0.18703481171888114,
    0.030841381835986965,
    0.032883011666982945,
    -0.010597401784997278,
];

const DB12: [f64; 12] = [
    0.11154074335008017,
    0.4946238903983854,
    0.7511339080215775,
    0.3152503517092432,
    -0.22626469396516913,
    -0.12976686756709563,
    0.09750160558707936,
    0.02752286553001629,
    -0.031582039318031156,
    0.0005538422009938016,
    0.004777257511010651,
    -0.00107730108499558,
];

const DB20: [f64; 20] = [
    0.026670057900555553,
    0.1881768000776347,
    0.5272011889315757,
    0.6884590394534363,
    0.2811723436605715,
    -0.24984642432648865,
    -0.19594627437659665,
    0.12736934033574265,
    0.09305736460380659,
    -0.07139414716586077,
    -0.02945753682194567,
    0.03321267405893324,
    0.0036065535669883944,
    -0.010733175482979604,
    0.0013953517469940798,
    0.00199240529499085,
    -0.0006858566950046825,
    -0.0001164668549943862,
    9.358867000108985e-05,
    -1.326420300235487e-05,
];

const SYMLET8: [f64; 8] = [
    0.032223100604042702,
    -0.012603967262037833,
    -0.09921954357684722,
    0.29785779560527736,
    0.8037387518059161,
    0.49761866763201545,
    -0.02963552764599851,
    -0.07576571478927333,
];

const BIOR24_ANALYSIS: [f64; 9] = [
    0.03314563036811942,
    -0.06629126073623884,
    -0.1767766952966369,
    0.4198446513295126,
    0.9943689110435825,
    0.4198446513295126,
    -0.1767766952966369,
    -0.06629126073623884,
    0.03314563036811942,
];

const BIOR24_DUAL: [f64; 3] = [0.3535533905932738, 0.7071067811865476, 0.3535533905932738];

const BIOR44_ANALYSIS: [f64; 9] = [
    0.03782845550726404,
    -0.023849465019556843,
    -0.11062440441843718,
    0.37740285561283066,
    0.8526986790088938,
    0.37740285561283066,
    -0.11062440441843718,
    -0.023849465019556843,
    0.03782845550726404,
];

const BIOR44_DUAL: [f64; 7] = [
    -0.06453888262869706,
    -0.04068941760916406,
    0.41809227322161724,
    0.7884856164055829,
    0.41809227322161724,
    -0.04068941760916406,
    -0.06453888262869706,
];

enum Prototype {
    Orthogonal(&'static [f64]),
    Biorthogonal {
        analysis: &'static [f64],
        dual: &'static [f64],
    },
}

fn prototype(family: WaveletFamily) -> Prototype {
    match family {
        WaveletFamily::Haar => Prototype::Orthogonal(&HAAR),
        WaveletFamily::Db4 => Prototype::Orthogonal(&DB4),
        WaveletFamily::Db6 => Prototype::Orthogonal(&DB6),
        WaveletFamily::Db8 => Prototype::Orthogonal(&DB8),
        WaveletFamily::Db12 => Prototype::Orthogonal(&DB12),
        WaveletFamily::Db20 => Prototype::Orthogonal(&DB20),
        WaveletFamily::Symlet8 => Prototype::Orthogonal(&SYMLET8),
        WaveletFamily::SplineBiorthogonal24 => Prototype::Biorthogonal {
            analysis: &BIOR24_ANALYSIS,
            dual: &BIOR24_DUAL,
        },
        WaveletFamily::SplineBiorthogonal44 => Prototype::Biorthogonal {
            analysis: &BIOR44_ANALYSIS,
            dual: &BIOR44_DUAL,
        },
    }
}

/// Analysis low-pass and high-pass prototypes of one family.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisPair {
    low: CoefficientVector,
    high: CoefficientVector,
}

impl AnalysisPair {
    /// Returns the analysis low-pass (scaling) prototype.
    pub fn low(&self) -> &CoefficientVector {
        &self.low
    }

    /// Returns the analysis high-pass (wavelet) prototype.
    pub fn high(&self) -> &CoefficientVector {
        &self.high
    }
}

/// Static lookup of analysis prototypes.
pub struct CoefficientTable;

impl CoefficientTable {
    /// Returns the analysis prototypes of `family`.
    ///
    /// The high-pass prototype is the quadrature mirror of the scaling
    /// filter for orthogonal families and of the dual scaling filter for
    /// biorthogonal ones.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::DegenerateFilter`] if the mirror collapses,
    /// which no registered family does.
    pub fn lookup(family: WaveletFamily) -> Result<AnalysisPair, FilterError> {
        match prototype(family) {
            Prototype::Orthogonal(scaling) => {
                let low = CoefficientVector::centred(scaling);
                let high = low.quadrature_mirror()?;
                Ok(AnalysisPair { low, high })
            }
            Prototype::Biorthogonal { analysis, dual } => {
                let low = CoefficientVector::centred(analysis);
                let high = CoefficientVector::centred(dual).quadrature_mirror()?;
                Ok(AnalysisPair { low, high })
            }
        }
    }

    /// Returns the raw stored scaling taps of `family` (causal for
    /// orthogonal families, centred for biorthogonal ones).
    pub fn scaling(family: WaveletFamily) -> &'static [f64] {
        match prototype(family) {
            Prototype::Orthogonal(scaling) => scaling,
            Prototype::Biorthogonal { analysis, .. } => analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::SQRT_2;

    fn correlation(h: &[f64], lag: usize) -> f64 {
        h.iter().zip(h.iter().skip(lag)).map(|(a, b)| a * b).sum()
    }

    #[test]
    fn orthogonal_scaling_filters_are_orthonormal() {
        for family in WaveletFamily::ALL.into_iter().filter(|f| f.is_orthogonal()) {
            let h = CoefficientTable::scaling(family);
            assert_abs_diff_eq!(h.iter().sum::<f64>(), SQRT_2, epsilon = 1e-10);
            assert_abs_diff_eq!(correlation(h, 0), 1.0, epsilon = 1e-10);
            for lag in (2..h.len()).step_by(2) {
                assert_abs_diff_eq!(correlation(h, lag), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn biorthogonal_pairs_are_dual() {
        for (analysis, dual) in [
            (&BIOR24_ANALYSIS[..], &BIOR24_DUAL[..]),
            (&BIOR44_ANALYSIS[..], &BIOR44_DUAL[..]),
        ] {
            let a = CoefficientVector::centred(analysis);
            let d = CoefficientVector::centred(dual);
            // Σ_k a(k) d(k + 2m) = δ(m)
            for m in -3isize..=3 {
                let sum: f64 = (-6isize..=6).map(|k| a.at(k) * d.at(k + 2 * m)).sum();
                let expected = if m == 0 { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(sum, expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn haar_pair() {
        let pair = CoefficientTable::lookup(WaveletFamily::Haar).unwrap();
        assert_eq!(pair.low().taps(), &[0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
        assert_eq!(pair.high().taps(), &[0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2]);
    }

    #[test]
    fn high_pass_has_zero_mean() {
        for family in WaveletFamily::ALL {
            let pair = CoefficientTable::lookup(family).unwrap();
            let sum: f64 = pair.high().taps().iter().sum();
            assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-10);
            assert_eq!(pair.low().len() % 2, 1);
            assert_eq!(pair.high().len() % 2, 1);
        }
    }

    #[test]
    fn lookup_lengths() {
        let pair = CoefficientTable::lookup(WaveletFamily::Db20).unwrap();
        assert_eq!(pair.low().len(), 21);
        assert_eq!(pair.low().support(), 20);
        let pair = CoefficientTable::lookup(WaveletFamily::SplineBiorthogonal24).unwrap();
        assert_eq!(pair.low().len(), 9);
        assert_eq!(pair.high().support(), 3);
    }
}
