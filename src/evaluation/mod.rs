mod confusion_matrix;
pub mod estimators;
mod evaluators;
mod measurement;
mod outcome;
mod preview;
pub mod report;

pub use confusion_matrix::ConfusionMatrix;
pub use estimators::{Estimator, MeanEstimator, OrdinalCorrelation};
pub use evaluators::{
    CrossValidationEvaluator, DEFAULT_FOLDS, DEFAULT_MAX_PER_FOLD, FoldPlan, fold_ranges,
    plan_folds,
};
pub use measurement::Measurement;
pub use outcome::{EvaluationOutcome, LabelMetrics};
pub use preview::FoldSnapshot;
pub use report::{ReportFormat, export_outcome};
