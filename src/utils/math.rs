/// `sqrt(Σ (a_i - b_i)^2)` over the common prefix of `a` and `b`.
///
/// Callers are expected to have checked that the lengths agree.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    libm::sqrt(sum)
}

/// Log-compressed imbalance weight: `min(log10(max_count / count * 10), ceiling)`.
///
/// The most populated class gets exactly `1.0`; rarer classes grow
/// logarithmically until they hit `ceiling`.
#[inline]
pub fn smoothed_class_weight(max_count: usize, count: usize, ceiling: f64) -> f64 {
    let raw = max_count as f64 / count as f64;
    libm::log10(raw * 10.0).min(ceiling)
}

/// `(1 / (distance + epsilon))^exponent`
#[inline]
pub fn inverse_distance_weight(distance: f64, epsilon: f64, exponent: f64) -> f64 {
    libm::pow(1.0 / (distance + epsilon), exponent)
}

/// Pearson correlation from running sums, `0.0` when either variance term
/// is not strictly positive.
pub fn pearson_from_sums(
    n: f64,
    sum_x: f64,
    sum_y: f64,
    sum_x2: f64,
    sum_y2: f64,
    sum_xy: f64,
) -> f64 {
    let numerator = n * sum_xy - sum_x * sum_y;
    let var_x = n * sum_x2 - sum_x * sum_x;
    let var_y = n * sum_y2 - sum_y * sum_y;
    if var_x > 0.0 && var_y > 0.0 {
        numerator / libm::sqrt(var_x * var_y)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn euclidean_on_known_triangle() {
        assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < EPS);
        assert_eq!(euclidean_distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn largest_class_weight_is_one() {
        assert!((smoothed_class_weight(10, 10, 50.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn class_weight_is_log_compressed_and_capped() {
        // 1000 / 1 * 10 = 10^4
        assert!((smoothed_class_weight(1000, 1, 50.0) - 4.0).abs() < EPS);
        assert_eq!(smoothed_class_weight(1000, 1, 2.5), 2.5);
    }

    #[test]
    fn inverse_distance_weight_decreases_with_distance() {
        let near = inverse_distance_weight(0.5, 1e-5, 2.0);
        let far = inverse_distance_weight(1.0, 1e-5, 2.0);
        assert!(near > far);
        assert!((inverse_distance_weight(1.0, 0.0, 2.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn pearson_of_identical_series_is_one() {
        // x = y = [0, 1, 2]
        let r = pearson_from_sums(3.0, 3.0, 3.0, 5.0, 5.0, 5.0);
        assert!((r - 1.0).abs() < EPS);
    }

    #[test]
    fn pearson_with_constant_series_is_zero() {
        // x = [1, 1], y = [0, 1]
        assert_eq!(pearson_from_sums(2.0, 2.0, 1.0, 2.0, 1.0, 1.0), 0.0);
    }
}
