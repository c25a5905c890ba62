//! Integration tests for à-trous up-sampling of filter operators.

use approx::assert_abs_diff_eq;
use wavebank_filter::{
    CoefficientTable, CoefficientVector, Direction, FilterOperatorBuilder, Pass, WaveletFamily,
};

// ---------------------------------------------------------------------------
// Tap placement
// ---------------------------------------------------------------------------

#[test]
fn upsampled_taps_sit_at_multiples_of_factor() {
    for family in WaveletFamily::ALL {
        let pair = CoefficientTable::lookup(family).unwrap();
        let prototype = pair.low();
        let r = prototype.radius();
        for factor in [2, 3, 4, 8] {
            let up = prototype.upsample(factor).unwrap();
            assert_eq!(up.len(), 2 * r * factor + 1);
            for (i, &t) in up.taps().iter().enumerate() {
                if i % factor == 0 {
                    assert_eq!(t, prototype.taps()[i / factor]);
                } else {
                    assert_eq!(t, 0.0, "{family} factor {factor} index {i}");
                }
            }
            // offsets relative to the centre are k·f
            for k in -(r as isize)..=(r as isize) {
                assert_eq!(up.at(k * factor as isize), prototype.at(k));
            }
        }
    }
}

#[test]
fn builder_upsamples_every_operator() {
    let plain = FilterOperatorBuilder::new(WaveletFamily::Db6).build().unwrap();
    let up = FilterOperatorBuilder::new(WaveletFamily::Db6)
        .upsample(4)
        .build()
        .unwrap();
    for direction in [Direction::Forward, Direction::Inverse] {
        for pass in [Pass::Low, Pass::High] {
            let a = plain.operator(direction, pass);
            let b = up.operator(direction, pass);
            assert_eq!(a.taps().len(), b.taps().len());
            for ((oa, wa), (ob, wb)) in a.taps().iter().zip(b.taps()) {
                assert_eq!(*ob, 4 * oa);
                assert_abs_diff_eq!(*wa, *wb);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Perfect reconstruction condition of the prototypes
// ---------------------------------------------------------------------------

/// Critically sampled analysis then synthesis returns a periodic impulse.
#[test]
fn prototypes_reconstruct_an_impulse() {
    for family in WaveletFamily::ALL {
        let set = FilterOperatorBuilder::new(family).build().unwrap();
        let n = 64usize;
        let mut x = vec![0.0; n];
        x[17] = 1.0;

        let analyse = |pass: Pass| -> Vec<f64> {
            let taps = set.operator(Direction::Forward, pass).taps();
            (0..n / 2)
                .map(|k| {
                    taps.iter()
                        .map(|&(o, w)| w * x[(2 * k as isize + o).rem_euclid(n as isize) as usize])
                        .sum()
                })
                .collect()
        };
        let low = analyse(Pass::Low);
        let high = analyse(Pass::High);

        let synthesise = |pass: Pass, band: &[f64], i: usize| -> f64 {
            set.operator(Direction::Inverse, pass)
                .taps()
                .iter()
                .map(|&(o, w)| {
                    let j = (i as isize - o).rem_euclid(n as isize) as usize;
                    if j % 2 == 0 { w * band[j / 2] } else { 0.0 }
                })
                .sum()
        };
        for (i, &expected) in x.iter().enumerate() {
            let value = synthesise(Pass::Low, &low, i) + synthesise(Pass::High, &high, i);
            assert_abs_diff_eq!(value, expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn user_vector_can_be_mirrored() {
    let v = CoefficientVector::new(vec![0.25, 0.5, 0.25]).unwrap();
    let mirror = v.quadrature_mirror().unwrap();
    let sum: f64 = mirror.taps().iter().sum();
    assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-12);
}
