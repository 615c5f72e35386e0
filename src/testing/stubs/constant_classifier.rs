use crate::classifiers::Classifier;
use crate::core::instances::{FeatureVector, LabeledSample};
use crate::core::{ArgumentError, ClassifierError};

/// Predicts one fixed label for every query once trained.
pub struct ConstantClassifier {
    label: String,
    trained: bool,
}

impl ConstantClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            trained: false,
        }
    }
}

impl Classifier for ConstantClassifier {
    fn train(&mut self, samples: Vec<LabeledSample>) -> Result<(), ClassifierError> {
        if samples.is_empty() {
            return Err(ArgumentError::EmptyTrainingData.into());
        }
        self.trained = true;
        Ok(())
    }

    fn predict(&self, _features: &FeatureVector) -> Result<&str, ClassifierError> {
        if !self.trained {
            return Err(ClassifierError::NotTrained);
        }
        Ok(&self.label)
    }

    fn is_trained(&self) -> bool {
        self.trained
    }
}
