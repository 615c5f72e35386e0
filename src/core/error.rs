use thiserror::Error;

/// Reasons an argument handed to the classifier or evaluator is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("training data must not be empty")]
    EmptyTrainingData,

    #[error("feature vectors must have at least one component")]
    EmptyFeatureVector,

    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("feature vector contains a non-finite component")]
    NonFiniteFeature,

    #[error("sample index {index} is out of range for {len} samples")]
    SampleIndex { index: usize, len: usize },

    #[error("invalid hyperparameter `{name}`: {reason}")]
    Hyperparameter { name: &'static str, reason: String },

    #[error("invalid evaluation setting `{name}`: {reason}")]
    EvaluationSetting { name: &'static str, reason: String },
}

/// Failures of the classification core.
///
/// Every variant is deterministic: retrying with the same inputs yields the
/// same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("classifier has not been trained")]
    NotTrained,

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("insufficient data: {samples} samples cannot be split into {folds} folds")]
    InsufficientData { samples: usize, folds: usize },
}

impl ClassifierError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ClassifierError::InvalidArgument(_))
    }
}
