// Percentile bootstrap confidence intervals
//
// All resampling is seeded so two runs over the same JSONL produce
// byte-identical reports.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Linear-interpolation percentile of sorted data (numpy convention)
///
/// `p` is in `[0, 100]`. Returns 0.0 for empty input.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

fn resample(data: &[f64], rng: &mut StdRng) -> Vec<f64> {
    (0..data.len())
        .map(|_| data[rng.gen_range(0..data.len())])
        .collect()
}

/// 95% percentile bootstrap CI for the difference of means `mean(x) - mean(y)`
///
/// # Example
/// ```
/// use rigor::enforcement::mean_diff_ci;
///
/// let x = vec![10.0, 11.0, 12.0, 10.0, 11.0, 12.0];
/// let y = vec![20.0, 21.0, 22.0, 20.0, 21.0, 22.0];
/// let (lo, hi) = mean_diff_ci(&x, &y, 2000, 42);
/// assert!(lo < -8.0 && hi > -12.0); // true difference is -10
/// ```
pub fn mean_diff_ci(x: &[f64], y: &[f64], resamples: usize, seed: u64) -> (f64, f64) {
    if x.is_empty() || y.is_empty() {
        return (0.0, 0.0);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut diffs = Vec::with_capacity(resamples);

    for _ in 0..resamples {
        let xb = resample(x, &mut rng);
        let yb = resample(y, &mut rng);
        diffs.push(mean(&xb) - mean(&yb));
    }

    diffs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    (percentile(&diffs, 2.5), percentile(&diffs, 97.5))
}

/// Percentile bootstrap CI for the median
///
/// Degenerate inputs follow the summary-statistics convention: a single
/// observation yields a zero-width interval at that value, an empty slice
/// yields `(0, 0)`.
pub fn median_ci(data: &[f64], resamples: usize, confidence: f64, seed: u64) -> (f64, f64) {
    match data.len() {
        0 => return (0.0, 0.0),
        1 => return (data[0], data[0]),
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut estimates = Vec::with_capacity(resamples);

    for _ in 0..resamples {
        let mut sample = resample(data, &mut rng);
        sample.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        estimates.push(median_of_sorted(&sample));
    }

    estimates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let alpha = 1.0 - confidence;
    (
        percentile(&estimates, 100.0 * alpha / 2.0),
        percentile(&estimates, 100.0 * (1.0 - alpha / 2.0)),
    )
}
