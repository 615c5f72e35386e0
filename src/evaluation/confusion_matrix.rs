use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Actual label → predicted label → count.
///
/// Dense: every row carries a column for every known label, zero-filled.
/// Recording a label that was not declared up front extends the matrix in
/// both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix {
    rows: BTreeMap<String, BTreeMap<String, usize>>,
}

impl ConfusionMatrix {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut m = Self::default();
        for label in labels {
            m.ensure_label(label.as_ref());
        }
        m
    }

    pub fn record(&mut self, actual: &str, predicted: &str) {
        self.ensure_label(actual);
        self.ensure_label(predicted);
        if let Some(cell) = self
            .rows
            .get_mut(actual)
            .and_then(|row| row.get_mut(predicted))
        {
            *cell += 1;
        }
    }

    pub fn count(&self, actual: &str, predicted: &str) -> usize {
        self.rows
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn label_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, actual: &str) -> Option<&BTreeMap<String, usize>> {
        self.rows.get(actual)
    }

    pub fn total(&self) -> usize {
        self.rows.values().flat_map(|row| row.values()).sum()
    }

    /// Sum of the diagonal: the number of correct predictions.
    pub fn trace(&self) -> usize {
        self.rows
            .iter()
            .map(|(label, row)| row.get(label).copied().unwrap_or(0))
            .sum()
    }

    pub fn true_positives(&self, label: &str) -> usize {
        self.count(label, label)
    }

    /// Samples of other labels predicted as `label`.
    pub fn false_positives(&self, label: &str) -> usize {
        self.rows
            .iter()
            .filter(|(actual, _)| actual.as_str() != label)
            .map(|(_, row)| row.get(label).copied().unwrap_or(0))
            .sum()
    }

    /// Samples of `label` predicted as something else.
    pub fn false_negatives(&self, label: &str) -> usize {
        self.rows.get(label).map_or(0, |row| {
            row.iter()
                .filter(|(predicted, _)| predicted.as_str() != label)
                .map(|(_, &c)| c)
                .sum()
        })
    }

    /// `TP / (TP + FP)`, `0.0` when the label was never predicted.
    pub fn precision(&self, label: &str) -> f64 {
        ratio(
            self.true_positives(label),
            self.true_positives(label) + self.false_positives(label),
        )
    }

    /// `TP / (TP + FN)`, `0.0` when the label never occurred.
    pub fn recall(&self, label: &str) -> f64 {
        ratio(
            self.true_positives(label),
            self.true_positives(label) + self.false_negatives(label),
        )
    }

    /// `trace / total`, `0.0` for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.trace(), self.total())
    }

    /// Unweighted means of per-label precision and recall over `labels`.
    pub fn macro_precision_recall<'a, I>(&self, labels: I) -> (f64, f64)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (n, p, r) = labels.into_iter().fold((0usize, 0.0, 0.0), |(n, p, r), l| {
            (n + 1, p + self.precision(l), r + self.recall(l))
        });
        if n == 0 {
            return (0.0, 0.0);
        }
        (p / n as f64, r / n as f64)
    }

    fn ensure_label(&mut self, label: &str) {
        if self.rows.contains_key(label) {
            return;
        }
        for row in self.rows.values_mut() {
            row.insert(label.to_string(), 0);
        }
        let mut row: BTreeMap<String, usize> =
            self.rows.keys().map(|l| (l.clone(), 0)).collect();
        row.insert(label.to_string(), 0);
        self.rows.insert(label.to_string(), row);
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
