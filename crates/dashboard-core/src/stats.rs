//! Small numeric helpers shared by the brand aggregator and summary metrics.

/// Arithmetic mean of `values`.
///
/// Returns `0.0` for an empty slice; call sites only pass non-empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `n`, not `n - 1`).
///
/// Returns `0.0` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Linearly rescale `value` from `[min, max]` onto `[0, 1]`.
///
/// A degenerate range (`min == max`) yields `0.5`. Values outside the range
/// are not clamped.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    (value - min) / (max - min)
}

/// Smallest and largest element of `values`, or `None` when it is empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── mean ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[80.0, 60.0]) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&[42.0]), 42.0);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    // ── population_std_dev ───────────────────────────────────────────────────

    #[test]
    fn test_std_dev_empty_is_zero() {
        assert_eq!(population_std_dev(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_uses_population_divisor() {
        // Sample std-dev would be ~35.36; population std-dev is exactly 25.
        let sd = population_std_dev(&[100.0, 50.0]);
        assert!((sd - 25.0).abs() < 1e-9, "sd = {sd}");
    }

    #[test]
    fn test_std_dev_known_value() {
        let sd = population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.0).abs() < 1e-9, "sd = {sd}");
    }

    #[test]
    fn test_std_dev_zero_iff_all_equal() {
        assert_eq!(population_std_dev(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(population_std_dev(&[7.5]), 0.0);
        assert!(population_std_dev(&[3.0, 3.0, 3.5]) > 0.0);
    }

    #[test]
    fn test_std_dev_non_negative() {
        let samples: [&[f64]; 4] = [
            &[-5.0, 5.0],
            &[0.0, 1e6, -1e6],
            &[0.1, 0.2, 0.3],
            &[12.0, 12.0, 13.0, 400.0],
        ];
        for values in samples {
            assert!(population_std_dev(values) >= 0.0);
        }
    }

    // ── normalize ────────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_degenerate_range_is_half() {
        for v in [-10.0, 0.0, 3.0, 1e9] {
            assert_eq!(normalize(v, 3.0, 3.0), 0.5);
        }
    }

    #[test]
    fn test_normalize_endpoints() {
        assert_eq!(normalize(10.0, 10.0, 30.0), 0.0);
        assert_eq!(normalize(30.0, 10.0, 30.0), 1.0);
        assert!((normalize(20.0, 10.0, 30.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_does_not_clamp() {
        assert!((normalize(40.0, 10.0, 30.0) - 1.5).abs() < 1e-12);
        assert!((normalize(0.0, 10.0, 30.0) + 0.5).abs() < 1e-12);
    }

    // ── min_max ──────────────────────────────────────────────────────────────

    #[test]
    fn test_min_max_empty() {
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn test_min_max_values() {
        assert_eq!(min_max(&[4.0, -1.0, 9.0, 2.0]), Some((-1.0, 9.0)));
        assert_eq!(min_max(&[5.0]), Some((5.0, 5.0)));
    }
}
