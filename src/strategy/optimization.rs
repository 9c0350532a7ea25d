// src/strategy/optimization.rs

//! Closed-form inventory targets under normally distributed daily demand.
//!
//! All functions return unrounded values; rounding to whole units happens in
//! [`crate::strategy::base_stock`].

/// Approximate quantile function of the standard normal distribution.
///
/// Abramowitz and Stegun formula 26.2.23, absolute error below 4.5e-4.
/// Probabilities at or beyond the bounds saturate at +/-5 sigma.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p >= 1.0 {
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // The rational approximation covers the lower tail; mirror for p > 0.5.
    let q = p.min(1.0 - p);
    let t = (-2.0 * q.ln()).sqrt();

    const C: [f64; 3] = [2.515517, 0.802853, 0.010328];
    const D: [f64; 3] = [1.432788, 0.189269, 0.001308];

    let numerator = C[0] + C[1] * t + C[2] * t * t;
    let denominator = 1.0 + D[0] * t + D[1] * t * t + D[2] * t * t * t;
    let x = t - numerator / denominator;

    if p < 0.5 {
        -x
    } else {
        x
    }
}

/// Order-up-to level covering one node's demand over its lead time.
///
/// `S = mu * L + z * sigma * sqrt(L)`
pub fn lead_time_base_stock(mean: f64, sigma: f64, z: f64, lead_time: u32) -> f64 {
    let l = f64::from(lead_time);
    mean * l + z * sigma * l.sqrt()
}

/// Standard deviation of the summed daily demand of `n` identical retailers
/// with pairwise correlation `rho`.
///
/// `sigma_agg^2 = N sigma^2 + rho N (N - 1) sigma^2`
pub fn pooled_sigma(n: usize, sigma: f64, rho: f64) -> f64 {
    let n = n as f64;
    let variance = n * sigma * sigma + rho * n * (n - 1.0) * sigma * sigma;
    variance.max(0.0).sqrt()
}

/// Order-up-to level of a warehouse that pools `n` retailers.
///
/// `S_CW = N mu L + z sigma_agg sqrt(L)`
pub fn pooled_base_stock(n: usize, mean: f64, sigma: f64, rho: f64, z: f64, lead_time: u32) -> f64 {
    lead_time_base_stock(n as f64 * mean, pooled_sigma(n, sigma, rho), z, lead_time)
}
