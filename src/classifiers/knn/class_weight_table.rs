use crate::core::TrainingSet;
use crate::utils::math::smoothed_class_weight;
use std::collections::BTreeMap;

/// Per-label weight correcting for class imbalance.
///
/// An empty table is the disabled state: every label weighs `1.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassWeightTable {
    weights: BTreeMap<String, f64>,
}

impl ClassWeightTable {
    pub fn uniform() -> Self {
        Self::default()
    }

    /// `min(log10(max_count / count * 10), max_class_weight)` for each label.
    pub fn from_training_set(training_set: &TrainingSet, max_class_weight: f64) -> Self {
        let counts = training_set.label_counts();
        let max_count = counts.values().copied().max().unwrap_or(0);

        let weights = counts
            .into_iter()
            .map(|(label, count)| {
                let weight = smoothed_class_weight(max_count, count, max_class_weight);
                log::debug!(
                    "class '{label}': raw weight {:.4}, smoothed {weight:.4}",
                    max_count as f64 / count as f64
                );
                (label, weight)
            })
            .collect();

        Self { weights }
    }

    /// Weight for `label`; `1.0` for labels the table does not know.
    #[inline]
    pub fn weight(&self, label: &str) -> f64 {
        self.weights.get(label).copied().unwrap_or(1.0)
    }

    pub fn is_uniform(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(l, w)| (l.as_str(), *w))
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.weights.clone()
    }
}
