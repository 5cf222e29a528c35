//! Optimal filter parameter calculation.
//!
//! Formulas:
//! - m = round(-n*ln(p) / ln(2)^2)  -- bits for n elements at rate p
//! - k = round((m/n) * ln(2))       -- hash rounds for m bits over n elements
//!
//! Both use `round`, not `ceil`: the rounding behavior is part of the sizing
//! contract, and two builds sizing the same `(n, p)` must agree bit-for-bit.

use std::f64::consts::LN_2;

/// Optimal number of bits for `approx_size` elements at the target
/// false positive rate.
///
/// Callers validate `approx_size > 0` and `fp_rate` in `(0, 1)` before
/// calling; out-of-domain inputs here produce a degenerate size that the
/// downstream constructors reject.
pub fn optimal_bit_count(approx_size: usize, fp_rate: f64) -> usize {
    let n = approx_size as f64;
    (-(n * fp_rate.ln()) / (LN_2 * LN_2)).round() as usize
}

/// Optimal number of hash rounds for `bit_count` bits over `approx_size`
/// elements.
pub fn optimal_hasher_count(bit_count: usize, approx_size: usize) -> usize {
    ((bit_count as f64 / approx_size as f64) * LN_2).round() as usize
}

/// Expected false positive rate for a filter of `bit_count` bits holding
/// `element_count` elements under `hasher_count` hash rounds.
///
/// Formula: (1 - e^(-kn/m))^k
pub fn false_positive_rate(bit_count: usize, element_count: usize, hasher_count: usize) -> f64 {
    if bit_count == 0 {
        return 1.0;
    }
    let exponent = -(hasher_count as f64) * (element_count as f64) / (bit_count as f64);
    (1.0 - exponent.exp()).powi(hasher_count as i32)
}
