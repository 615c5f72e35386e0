use crate::evaluation::estimators::{Estimator, MeanEstimator, OrdinalCorrelation};
use crate::evaluation::{ConfusionMatrix, Measurement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result};

/// Precision, recall and F1 of a single label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Samples of this label in the evaluated set.
    pub support: usize,
}

/// Result of a cross-validation run.
///
/// Serialized field names are `accuracy`, `precision`, `recall`, `f1Score`,
/// `r2Score`, `classCounts` and `confusionMatrix`.
///
/// `r2_score` is the squared Pearson correlation of label *ordinals*; see
/// [`OrdinalCorrelation`]. It is kept for compatibility and does not measure
/// regression quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    accuracy: f64,
    precision: f64,
    recall: f64,
    f1_score: f64,
    r2_score: f64,
    class_counts: BTreeMap<String, usize>,
    confusion_matrix: ConfusionMatrix,
}

impl EvaluationOutcome {
    /// Derives every metric from the accumulated per-sample statistics.
    ///
    /// Macro averages run over the labels of `class_counts`.
    pub fn from_accumulators(
        class_counts: BTreeMap<String, usize>,
        confusion_matrix: ConfusionMatrix,
        hits: &MeanEstimator,
        correlation: &OrdinalCorrelation,
    ) -> Self {
        let (precision, recall) =
            confusion_matrix.macro_precision_recall(class_counts.keys().map(String::as_str));
        Self {
            accuracy: hits.estimation(),
            precision,
            recall,
            f1_score: f1(precision, recall),
            r2_score: correlation.score(),
            class_counts,
            confusion_matrix,
        }
    }

    #[inline]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Macro-averaged precision.
    #[inline]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Macro-averaged recall.
    #[inline]
    pub fn recall(&self) -> f64 {
        self.recall
    }

    #[inline]
    pub fn f1_score(&self) -> f64 {
        self.f1_score
    }

    #[inline]
    pub fn r2_score(&self) -> f64 {
        self.r2_score
    }

    pub fn class_counts(&self) -> &BTreeMap<String, usize> {
        &self.class_counts
    }

    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.confusion_matrix
    }

    /// Number of predictions that went into the outcome.
    pub fn evaluated(&self) -> usize {
        self.confusion_matrix.total()
    }

    pub fn label_metrics(&self) -> Vec<LabelMetrics> {
        self.class_counts
            .iter()
            .map(|(label, &support)| {
                let precision = self.confusion_matrix.precision(label);
                let recall = self.confusion_matrix.recall(label);
                LabelMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support,
                }
            })
            .collect()
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy),
            Measurement::new("precision", self.precision),
            Measurement::new("recall", self.recall),
            Measurement::new("f1_score", self.f1_score),
            Measurement::new("r2_score", self.r2_score),
        ]
    }

    /// Returns (name, Some(value)|None) for each requested metric, preserving order.
    pub fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let all = self.measurements();
        names
            .into_iter()
            .map(|n| {
                let value = all.iter().find(|m| m.name == n).map(|m| m.value);
                (n.to_string(), value)
            })
            .collect()
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

impl Display for EvaluationOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "accuracy={:.4}", self.accuracy)?;
        writeln!(f, "precision={:.4}", self.precision)?;
        writeln!(f, "recall={:.4}", self.recall)?;
        writeln!(f, "f1={:.4}", self.f1_score)?;
        writeln!(f, "r2(proxy)={:.4}", self.r2_score)?;
        writeln!(f)?;
        for (label, count) in &self.class_counts {
            writeln!(f, "{label}: {count}")?;
        }
        writeln!(f)?;
        write!(f, "actual\\predicted")?;
        for label in self.confusion_matrix.labels() {
            write!(f, "\t{label}")?;
        }
        for actual in self.confusion_matrix.labels() {
            writeln!(f)?;
            write!(f, "{actual}")?;
            for predicted in self.confusion_matrix.labels() {
                write!(f, "\t{}", self.confusion_matrix.count(actual, predicted))?;
            }
        }
        Ok(())
    }
}
