use crate::core::instances::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A feature vector paired with its ground-truth category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    features: FeatureVector,
    label: String,
}

impl LabeledSample {
    pub fn new(features: impl Into<FeatureVector>, label: impl Into<String>) -> Self {
        Self {
            features: features.into(),
            label: label.into(),
        }
    }

    pub fn point(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self::new(FeatureVector::point(x, y), label)
    }

    #[inline]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Display for LabeledSample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.features, self.label)
    }
}
