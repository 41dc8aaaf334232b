//! Descriptive statistics over plain score vectors.
//!
//! Used for standardizing network scores and for comparing them against an
//! externally fitted latent-variable vector.

use crate::error::{NetworkError, Result};

#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (`n - 1` denominator). Zero for fewer than two
/// values.
#[must_use]
pub fn sample_sd(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// z-scores: zero sample mean, unit sample standard deviation.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] when there are fewer than two
/// values or the values have zero variance.
pub fn standardize(values: &[f64]) -> Result<Vec<f64>> {
    if values.len() < 2 {
        return Err(NetworkError::invalid_input(
            "standardization needs at least two values",
        ));
    }
    let m = mean(values);
    let sd = sample_sd(values);
    if !(sd.is_finite() && sd > f64::EPSILON * m.abs().max(1.0)) {
        return Err(NetworkError::invalid_input(
            "cannot standardize a zero-variance vector",
        ));
    }
    Ok(values.iter().map(|v| (v - m) / sd).collect())
}

/// Pearson correlation. Zero when either vector has no variance.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] on a length mismatch or fewer
/// than two values.
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    let (ma, mb) = (mean(a), mean(b));
    let mut sab = 0.0;
    let mut saa = 0.0;
    let mut sbb = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }
    let denom = (saa * sbb).sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        return Ok(0.0);
    }
    Ok((sab / denom).clamp(-1.0, 1.0))
}

/// Spearman rank correlation (average ranks for ties).
///
/// # Errors
///
/// Same conditions as [`pearson`].
pub fn spearman(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    pearson(&ranks(a), &ranks(b))
}

/// Root mean squared difference.
///
/// # Errors
///
/// Same conditions as [`pearson`].
pub fn rmse(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    let ss: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Ok((ss / a.len() as f64).sqrt())
}

/// 1-based ranks with ties sharing their average rank.
#[must_use]
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&x, &y| values[x].total_cmp(&values[y]).then(x.cmp(&y)));

    let mut out = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share ranks start+1..=end
        let avg = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            out[idx] = avg;
        }
        start = end;
    }
    out
}

fn check_pair(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(NetworkError::invalid_input(format!(
            "vector lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() < 2 {
        return Err(NetworkError::invalid_input(
            "need at least two paired values",
        ));
    }
    Ok(())
}
