//! Activation functions used by the feedforward scorer.

/// Hyperbolic tangent, saturated outside `[-20, 20]`.
///
/// Beyond |20| `tanh` equals ±1 to well past double precision.
#[inline]
pub fn hyperbolic_tangent(x: f64) -> f64 {
    if x < -20.0 {
        -1.0
    } else if x > 20.0 {
        1.0
    } else {
        x.tanh()
    }
}

/// Softmax over all output sums at once, shifted by the maximum sum so that
/// `exp` never overflows.
///
/// Returns an empty vector for empty input. NaN sums propagate.
pub fn softmax(sums: &[f64]) -> Vec<f64> {
    let Some(&first) = sums.first() else {
        return Vec::new();
    };
    let max = sums.iter().fold(first, |m, &s| if s > m { s } else { m });

    let scale: f64 = sums.iter().map(|s| (s - max).exp()).sum();
    sums.iter().map(|s| (s - max).exp() / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tanh_saturates_outside_twenty() {
        assert_eq!(hyperbolic_tangent(-25.0), -1.0);
        assert_eq!(hyperbolic_tangent(25.0), 1.0);
        assert_eq!(hyperbolic_tangent(0.0), 0.0);
        assert_eq!(hyperbolic_tangent(0.5), 0.5f64.tanh());
    }

    #[test]
    fn softmax_survives_huge_sums() {
        let out = softmax(&[1000.0, 1000.0, -1000.0]);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] - 0.5).abs() < 1e-12);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn softmax_sums_to_one() {
        let out = softmax(&[0.3, -1.2, 2.5, 0.0]);
        let total: f64 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(out[2] > out[0] && out[0] > out[3] && out[3] > out[1]);
    }

    #[test]
    fn softmax_of_nothing_is_empty() {
        assert!(softmax(&[]).is_empty());
    }
}
