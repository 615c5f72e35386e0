use crate::core::ClassifierError;
use crate::core::instances::{FeatureVector, LabeledSample};

/// A batch-trained classifier mapping feature vectors to string labels.
pub trait Classifier {
    /// Replaces any previous model with one trained on `samples`.
    fn train(&mut self, samples: Vec<LabeledSample>) -> Result<(), ClassifierError>;

    /// Predicted label for `features`; fails with `NotTrained` before `train`.
    fn predict(&self, features: &FeatureVector) -> Result<&str, ClassifierError>;

    fn is_trained(&self) -> bool;
}
