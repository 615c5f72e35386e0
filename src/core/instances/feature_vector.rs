use crate::core::error::{ArgumentError, ClassifierError};
use crate::utils::math::euclidean_distance;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed-length, ordered sequence of real-valued features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Two-component vector, e.g. `(latitude, longitude)`.
    pub fn point(x: f64, y: f64) -> Self {
        Self(vec![x, y])
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Euclidean distance to `other`, failing when the dimensions differ.
    pub fn distance_to(&self, other: &FeatureVector) -> Result<f64, ClassifierError> {
        if self.dimension() != other.dimension() {
            return Err(ArgumentError::DimensionMismatch {
                expected: other.dimension(),
                found: self.dimension(),
            }
            .into());
        }
        Ok(euclidean_distance(&self.0, &other.0))
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for FeatureVector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl Display for FeatureVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
