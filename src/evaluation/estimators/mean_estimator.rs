use crate::evaluation::estimators::Estimator;

/// Running mean: `sum / len`, `0.0` before the first observation.
///
/// Fed with 0/1 hit indicators it yields accuracy.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MeanEstimator {
    len: f64,
    sum: f64,
}

impl MeanEstimator {
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0.0
    }
}

impl Estimator for MeanEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.len += 1.0;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.len > 0.0 {
            self.sum / self.len
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mean_is_zero() {
        let e = MeanEstimator::default();
        assert!(e.is_empty());
        assert_eq!(e.estimation(), 0.0);
    }

    #[test]
    fn nan_is_ignored() {
        let mut e = MeanEstimator::default();
        for v in [1.0, 0.0, f64::NAN, 1.0, 1.0] {
            e.add(v);
        }
        assert_eq!(e.len(), 4);
        assert_eq!(e.estimation(), 0.75);
    }
}
