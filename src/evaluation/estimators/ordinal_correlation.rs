use crate::utils::math::pearson_from_sums;
use std::collections::HashMap;

/// Squared Pearson correlation between actual and predicted label ordinals.
///
/// Each distinct label gets an integer ordinal (0, 1, 2, ...) the first time
/// it is observed, the actual label before the predicted one. The ordinals
/// are nominal, so the resulting score is a compatibility proxy and *not* a
/// coefficient of determination: relabeling the classes changes it.
#[derive(Debug, Default, Clone)]
pub struct OrdinalCorrelation {
    ordinals: HashMap<String, usize>,
    n: f64,
    sum_actual: f64,
    sum_predicted: f64,
    sum_actual_sq: f64,
    sum_predicted_sq: f64,
    sum_product: f64,
}

impl OrdinalCorrelation {
    pub fn observe(&mut self, actual: &str, predicted: &str) {
        let a = self.ordinal_of(actual) as f64;
        let p = self.ordinal_of(predicted) as f64;
        self.n += 1.0;
        self.sum_actual += a;
        self.sum_predicted += p;
        self.sum_actual_sq += a * a;
        self.sum_predicted_sq += p * p;
        self.sum_product += a * p;
    }

    /// Ordinal already assigned to `label`, if it has been observed.
    pub fn ordinal(&self, label: &str) -> Option<usize> {
        self.ordinals.get(label).copied()
    }

    pub fn observations(&self) -> usize {
        self.n as usize
    }

    pub fn correlation(&self) -> f64 {
        pearson_from_sums(
            self.n,
            self.sum_actual,
            self.sum_predicted,
            self.sum_actual_sq,
            self.sum_predicted_sq,
            self.sum_product,
        )
    }

    /// `r²`, `0.0` when either side has no variance.
    pub fn score(&self) -> f64 {
        let r = self.correlation();
        r * r
    }

    fn ordinal_of(&mut self, label: &str) -> usize {
        if let Some(&o) = self.ordinals.get(label) {
            return o;
        }
        let next = self.ordinals.len();
        self.ordinals.insert(label.to_string(), next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_first_sight() {
        let mut c = OrdinalCorrelation::default();
        c.observe("B", "A");
        c.observe("C", "C");
        assert_eq!(c.ordinal("B"), Some(0));
        assert_eq!(c.ordinal("A"), Some(1));
        assert_eq!(c.ordinal("C"), Some(2));
        assert_eq!(c.ordinal("D"), None);
    }

    #[test]
    fn perfect_predictions_score_one() {
        let mut c = OrdinalCorrelation::default();
        for label in ["A", "B", "C", "A", "B"] {
            c.observe(label, label);
        }
        assert!((c.score() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_predictions_score_zero() {
        let mut c = OrdinalCorrelation::default();
        for label in ["A", "B", "C"] {
            c.observe(label, "A");
        }
        assert_eq!(c.score(), 0.0);
        assert_eq!(c.observations(), 3);
    }

    #[test]
    fn score_depends_on_label_order_not_just_hits() {
        // Same single mistake, different ordinals: the proxy is not a
        // property of the confusion matrix alone.
        let mut near = OrdinalCorrelation::default();
        for (a, p) in [("A", "A"), ("B", "B"), ("C", "C"), ("A", "B")] {
            near.observe(a, p);
        }
        let mut far = OrdinalCorrelation::default();
        for (a, p) in [("A", "A"), ("B", "B"), ("C", "C"), ("A", "C")] {
            far.observe(a, p);
        }
        assert!(near.score() > far.score());
    }
}
