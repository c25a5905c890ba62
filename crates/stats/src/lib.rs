//! Statistical helpers for sub-band analysis and reconstruction checks.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Mean energy `Σ x² / N`. Returns 0.0 if empty.
pub fn energy(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|&x| x * x).sum::<f64>() / data.len() as f64
}

/// Euclidean norm `sqrt(Σ x²)`.
pub fn l2_norm(data: &[f64]) -> f64 {
    data.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Largest absolute value. Returns 0.0 if empty.
pub fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0, |acc, &x| acc.max(x.abs()))
}

/// Largest absolute element-wise difference over the common prefix of `a`
/// and `b`.
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .fold(0.0, |acc, (&x, &y)| acc.max((x - y).abs()))
}

/// Shannon entropy (natural log) of the normalized energy distribution
/// `p_i = x_i² / Σ x²`.
///
/// Returns 0.0 for empty or all-zero input. Ranges from 0 (energy in one
/// sample) to `ln(N)` (energy spread evenly).
pub fn shannon_entropy(data: &[f64]) -> f64 {
    let total: f64 = data.iter().map(|&x| x * x).sum();
    if total == 0.0 {
        return 0.0;
    }
    data.iter()
        .map(|&x| x * x / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}
