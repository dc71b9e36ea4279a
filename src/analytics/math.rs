//! Guarded arithmetic for percentage and ratio math.
//!
//! Every ratio the engine computes goes through [`safe_ratio`] so that
//! degenerate data (zero denominators, non-finite intermediates) resolves to
//! a documented fallback instead of leaking `NaN`/`Infinity` into dashboard
//! payloads.

/// Divide `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or the quotient is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return fallback;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_normally() {
        assert_eq!(safe_ratio(1.0, 4.0, 0.0), 0.25);
    }

    #[test]
    fn zero_denominator_yields_fallback() {
        assert_eq!(safe_ratio(5.0, 0.0, 0.0), 0.0);
        assert_eq!(safe_ratio(5.0, 0.0, 1.0), 1.0);
        assert_eq!(safe_ratio(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn non_finite_inputs_yield_fallback() {
        assert_eq!(safe_ratio(1.0, f64::NAN, 7.0), 7.0);
        assert_eq!(safe_ratio(f64::INFINITY, 2.0, 7.0), 7.0);
    }
}
