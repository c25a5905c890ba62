//! Integration tests: forward then inverse reproduces the input for every
//! family, level count and sub-sampling mode.

use approx::assert_abs_diff_eq;
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wavebank_filter::WaveletFamily;
use wavebank_wavelet::{
    DecompositionTree, MAX_DIMENSIONS, Orientation, PacketTransform, PyramidTransform, SeparableFilterBank,
    SubBand, TransformConfig, WaveletError,
};

fn noise(shape: &[usize], seed: u64) -> ArrayD<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = shape.iter().product();
    let data = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    ArrayD::from_shape_vec(IxDyn(shape), data).unwrap()
}

/// Odd, non-square shape large enough for three levels of `family` in
/// either mode.
fn shape_for(family: WaveletFamily) -> Vec<usize> {
    let support = SeparableFilterBank::required_support(family, 2, 0).unwrap();
    vec![4 * support + 3, 4 * support + 1]
}

fn assert_close(a: &ArrayD<f64>, b: &ArrayD<f64>, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_abs_diff_eq!(x, y, epsilon = tol);
    }
}

// ---------------------------------------------------------------------------
// Pyramid round trips
// ---------------------------------------------------------------------------

#[test]
fn pyramid_round_trip_all_families() {
    for family in WaveletFamily::ALL {
        let shape = shape_for(family);
        let image = noise(&shape, 11);
        for levels in 1..=3 {
            for factor in [1, 2] {
                let config = TransformConfig::new(family)
                    .with_levels(levels)
                    .with_subsample_factor(factor);
                let pyramid = PyramidTransform::new(config).unwrap();
                let bands = pyramid.forward(&image).unwrap();
                assert_eq!(bands.len(), 1 + levels * 3, "{family} levels {levels} factor {factor}");
                let rebuilt = pyramid.inverse(&bands).unwrap();
                assert_close(&rebuilt, &image, 1e-9);
            }
        }
    }
}

#[test]
fn pyramid_round_trip_one_dimension() {
    for family in [WaveletFamily::Haar, WaveletFamily::Db12, WaveletFamily::SplineBiorthogonal44] {
        let n = shape_for(family)[0];
        let image = noise(&[n], 5);
        for factor in [1, 2] {
            let config = TransformConfig::new(family).with_levels(3).with_subsample_factor(factor);
            let pyramid = PyramidTransform::new(config).unwrap();
            let bands = pyramid.forward(&image).unwrap();
            assert_eq!(bands.len(), 4);
            assert_close(&pyramid.inverse(&bands).unwrap(), &image, 1e-9);
        }
    }
}

#[test]
fn pyramid_round_trip_three_dimensions() {
    let image = noise(&[19, 17, 18], 99);
    for factor in [1, 2] {
        let config = TransformConfig::new(WaveletFamily::Db4)
            .with_levels(2)
            .with_subsample_factor(factor);
        let pyramid = PyramidTransform::new(config).unwrap();
        let bands = pyramid.forward(&image).unwrap();
        assert_eq!(bands.len(), 1 + 2 * 7);
        assert_close(&pyramid.inverse(&bands).unwrap(), &image, 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Band bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn band_count_matches_formula() {
    let image = noise(&[32, 32], 1);
    for levels in 1..=4 {
        let config = TransformConfig::new(WaveletFamily::Haar)
            .with_levels(levels)
            .with_subsample_factor(2);
        let pyramid = PyramidTransform::new(config).unwrap();
        let bands = pyramid.forward(&image).unwrap();
        assert_eq!(bands.len(), 1 + levels * (Orientation::band_count(2) - 1));
        assert_eq!(bands.len(), pyramid.band_count(2));
    }
}

#[test]
fn decimated_extents_and_parent_extents() {
    let image = noise(&[41, 40], 2);
    let config = TransformConfig::new(WaveletFamily::Db4)
        .with_levels(2)
        .with_subsample_factor(2);
    let bands = PyramidTransform::new(config).unwrap().forward(&image).unwrap();
    assert_eq!(bands[0].extent(), &[11, 10]);
    assert_eq!(bands[0].parent_extent(2), vec![21, 20]);
    let finest = bands.last().unwrap();
    assert_eq!(finest.level(), 0);
    assert_eq!(finest.extent(), &[21, 20]);
    assert_eq!(finest.parent_extent(2), vec![41, 40]);
}

#[test]
fn orthogonal_decimated_transform_preserves_energy() {
    let image = noise(&[64, 64], 3);
    let total: f64 = image.iter().map(|v| v * v).sum();
    let config = TransformConfig::new(WaveletFamily::Db8)
        .with_levels(3)
        .with_subsample_factor(2);
    let bands = PyramidTransform::new(config).unwrap().forward(&image).unwrap();
    let split: f64 = bands
        .iter()
        .map(|b| b.image().iter().map(|v| v * v).sum::<f64>())
        .sum();
    assert_abs_diff_eq!(split, total, epsilon = 1e-8 * total);
}

#[test]
fn tampered_band_list_is_rejected() {
    let image = noise(&[16, 16], 4);
    let config = TransformConfig::new(WaveletFamily::Haar)
        .with_levels(2)
        .with_subsample_factor(2);
    let pyramid = PyramidTransform::new(config).unwrap();
    let mut bands = pyramid.forward(&image).unwrap();
    bands.pop();
    let err = pyramid.inverse(&bands).unwrap_err();
    assert!(matches!(err, WaveletError::BandCountMismatch { len: 6, ndim: 2 }));
}

#[test]
fn inverse_rejects_unsupported_dimension_counts() {
    let config = TransformConfig::new(WaveletFamily::Haar).with_subsample_factor(2);
    let pyramid = PyramidTransform::new(config).unwrap();
    let packet = PacketTransform::new(config).unwrap();
    let leaf = DecompositionTree::new(vec![false]);

    let scalar = vec![SubBand::root(ArrayD::zeros(IxDyn(&[])))];
    assert!(matches!(
        pyramid.inverse(&scalar),
        Err(WaveletError::UnsupportedDimension { ndim: 0, .. })
    ));
    assert!(matches!(
        packet.inverse(&scalar, &leaf),
        Err(WaveletError::UnsupportedDimension { ndim: 0, .. })
    ));

    let too_many = vec![SubBand::root(ArrayD::zeros(IxDyn(&[1; MAX_DIMENSIONS + 1])))];
    assert!(matches!(
        pyramid.inverse(&too_many),
        Err(WaveletError::UnsupportedDimension { ndim: 17, max: MAX_DIMENSIONS })
    ));
    assert!(matches!(
        packet.inverse(&too_many, &leaf),
        Err(WaveletError::UnsupportedDimension { ndim: 17, .. })
    ));
}
