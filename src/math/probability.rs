//! Probability gates, weighted draws and binomial tail approximations
//!
//! Every stochastic pass draws through these helpers with an injected RNG so
//! a seeded generator reproduces the same level.

use rand::Rng;

/// Roll a 1-in-`n` gate
///
/// A gate of 0 or 1 always passes.
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n <= 1 || rng.random_range(1..=n) == 1
}

/// Draw an index with probability proportional to its weight
///
/// Returns 0 when every weight is zero.
pub fn weighted_choice<R: Rng + ?Sized>(rng: &mut R, weights: &[u32]) -> usize {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 0;
    }

    let mut remaining = rng.random_range(0..total);
    for (i, &weight) in weights.iter().enumerate() {
        if remaining < weight {
            return i;
        }
        remaining -= weight;
    }
    weights.len().saturating_sub(1)
}

/// Error function approximation using Abramowitz and Stegun method
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

/// Normal approximation of P(X ≤ k) for X ~ Binomial(n, p)
pub fn binomial_normal_approximate_cdf(n: usize, p: f64, k: usize) -> f64 {
    if k >= n {
        return 1.0;
    }
    if p <= 0.0 {
        return 1.0;
    }
    if p >= 1.0 {
        return 0.0;
    }

    let n_f64 = n as f64;
    let mean = n_f64 * p;
    let std_dev = (n_f64 * p * (1.0 - p)).sqrt();

    // k + 0.5 is the continuity correction
    let z = (k as f64 + 0.5 - mean) / (std::f64::consts::SQRT_2 * std_dev);

    0.5 * (1.0 - erf(-z))
}

/// Two-sided tail probability of observing `k` successes in `n` gate rolls
///
/// Small values mean the observed count is implausible for a gate with
/// success probability `p`. Zero rolls are never implausible.
pub fn binomial_two_sided_tail(n: usize, p: f64, k: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let lower = binomial_normal_approximate_cdf(n, p, k);
    let upper = if k == 0 {
        1.0
    } else {
        1.0 - binomial_normal_approximate_cdf(n, p, k - 1)
    };

    (2.0 * lower.min(upper)).min(1.0)
}
