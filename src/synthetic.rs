//! Deterministic synthetic input images.

use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic image pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Uniform noise in `[-1, 1)`.
    Noise,
    /// Sum of per-axis ramps, normalised to `[0, 1]`.
    Gradient,
    /// Alternating 8-pixel cells of 0 and 1.
    Checkerboard,
}

const CHECKER_CELL: usize = 8;

/// Builds an image of `shape`. Only [`Pattern::Noise`] reads `seed`.
pub fn generate(shape: &[usize], pattern: Pattern, seed: u64) -> ArrayD<f64> {
    match pattern {
        Pattern::Noise => {
            let mut rng = StdRng::seed_from_u64(seed);
            ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.random_range(-1.0..1.0))
        }
        Pattern::Gradient => {
            let span: usize = shape.iter().map(|n| n.saturating_sub(1)).sum();
            let scale = if span == 0 { 0.0 } else { 1.0 / span as f64 };
            ArrayD::from_shape_fn(IxDyn(shape), |ix| {
                (0..shape.len()).map(|axis| ix[axis]).sum::<usize>() as f64 * scale
            })
        }
        Pattern::Checkerboard => ArrayD::from_shape_fn(IxDyn(shape), |ix| {
            let parity: usize = (0..shape.len()).map(|axis| ix[axis] / CHECKER_CELL).sum();
            (parity % 2) as f64
        }),
    }
}
