use crate::classifiers::knn::KnnClassifier;
use crate::evaluation::{CrossValidationEvaluator, FoldSnapshot, ReportFormat, export_outcome};
use crate::ui::types::choices::{EvaluationSettings, TaskChoice};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::mpsc::Sender;

/// Runs one [`TaskChoice`] against a trained classifier.
pub struct TaskRunner<'a> {
    classifier: &'a KnnClassifier,
    evaluation: &'a EvaluationSettings,
    progress_tx: Option<Sender<FoldSnapshot>>,
    report_path: Option<&'a Path>,
}

impl<'a> TaskRunner<'a> {
    pub fn new(classifier: &'a KnnClassifier, evaluation: &'a EvaluationSettings) -> Self {
        Self {
            classifier,
            evaluation,
            progress_tx: None,
            report_path: None,
        }
    }

    /// Receives a snapshot after every evaluated fold.
    pub fn with_progress(mut self, tx: Sender<FoldSnapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Evaluation outcomes are also written here, in the format the
    /// extension names.
    pub fn with_report(mut self, path: &'a Path) -> Self {
        self.report_path = Some(path);
        self
    }

    pub fn run(self, task: &TaskChoice) -> Result<Value> {
        match task {
            TaskChoice::Classify(p) => {
                let label = self
                    .classifier
                    .predict_point(p.latitude, p.longitude)
                    .with_context(|| {
                        format!("failed to classify ({}, {})", p.latitude, p.longitude)
                    })?;
                log::info!("({}, {}) -> {label}", p.latitude, p.longitude);
                Ok(json!({
                    "label": label,
                    "latitude": p.latitude,
                    "longitude": p.longitude,
                }))
            }
            TaskChoice::Evaluate(_) => {
                let mut evaluator = CrossValidationEvaluator::try_from(self.evaluation)?;
                if let Some(tx) = self.progress_tx {
                    evaluator = evaluator.with_progress(tx);
                }
                let outcome = self
                    .classifier
                    .evaluate_with(&evaluator)
                    .context("cross-validation failed")?;
                log::info!(
                    "evaluated {} samples over {} folds: accuracy={:.4} f1={:.4}",
                    outcome.evaluated(),
                    evaluator.folds(),
                    outcome.accuracy(),
                    outcome.f1_score()
                );
                if let Some(path) = self.report_path {
                    let format = ReportFormat::from_path(path);
                    export_outcome(&outcome, path, format)
                        .with_context(|| format!("cannot write report {}", path.display()))?;
                    log::info!("wrote {format} report to {}", path.display());
                }
                Ok(serde_json::to_value(&outcome)?)
            }
            TaskChoice::Info(_) => Ok(serde_json::to_value(self.classifier.info())?),
        }
    }
}

pub fn run_task(
    classifier: &KnnClassifier,
    task: &TaskChoice,
    evaluation: &EvaluationSettings,
) -> Result<Value> {
    TaskRunner::new(classifier, evaluation).run(task)
}
