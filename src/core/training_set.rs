use crate::core::error::{ArgumentError, ClassifierError};
use crate::core::instances::{FeatureVector, LabeledSample};
use std::collections::BTreeMap;

/// Ordered, validated collection of labeled samples.
///
/// All samples share one dimensionality. The label index is derived from the
/// sample list when the set is built and is never mutated on its own; a new
/// set is built whenever the training data changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    samples: Vec<LabeledSample>,
    dimension: usize,
    label_index: BTreeMap<String, Vec<usize>>,
}

impl TrainingSet {
    pub fn new(samples: Vec<LabeledSample>) -> Result<Self, ClassifierError> {
        let Some(first) = samples.first() else {
            return Err(ArgumentError::EmptyTrainingData.into());
        };
        let dimension = first.features().dimension();
        if dimension == 0 {
            return Err(ArgumentError::EmptyFeatureVector.into());
        }
        for sample in &samples {
            let found = sample.features().dimension();
            if found != dimension {
                return Err(ArgumentError::DimensionMismatch {
                    expected: dimension,
                    found,
                }
                .into());
            }
            if !sample.features().is_finite() {
                return Err(ArgumentError::NonFiniteFeature.into());
            }
        }

        let label_index = index_by_label(&samples);
        Ok(Self {
            samples,
            dimension,
            label_index,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    /// Distinct labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.label_index.keys().map(String::as_str)
    }

    pub fn label_count(&self) -> usize {
        self.label_index.len()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.label_index.contains_key(label)
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.label_index.get(label).map_or(0, Vec::len)
    }

    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        self.label_index
            .iter()
            .map(|(label, idx)| (label.clone(), idx.len()))
            .collect()
    }

    /// Copies of the samples carrying `label`, in training order.
    pub fn points_by_label(&self, label: &str) -> Vec<LabeledSample> {
        self.label_index
            .get(label)
            .map(|idx| idx.iter().map(|&i| self.samples[i].clone()).collect())
            .unwrap_or_default()
    }

    pub fn label_to_points(&self) -> BTreeMap<String, Vec<LabeledSample>> {
        self.label_index
            .keys()
            .map(|label| (label.clone(), self.points_by_label(label)))
            .collect()
    }

    /// Validates that `query` can be compared against this set.
    pub fn check_query(&self, query: &FeatureVector) -> Result<(), ClassifierError> {
        if query.dimension() != self.dimension {
            return Err(ArgumentError::DimensionMismatch {
                expected: self.dimension,
                found: query.dimension(),
            }
            .into());
        }
        if !query.is_finite() {
            return Err(ArgumentError::NonFiniteFeature.into());
        }
        Ok(())
    }

    /// Copies of the samples at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<LabeledSample>, ClassifierError> {
        indices
            .iter()
            .map(|&index| {
                self.samples.get(index).cloned().ok_or_else(|| {
                    ClassifierError::from(ArgumentError::SampleIndex {
                        index,
                        len: self.samples.len(),
                    })
                })
            })
            .collect()
    }
}

fn index_by_label(samples: &[LabeledSample]) -> BTreeMap<String, Vec<usize>> {
    let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, sample) in samples.iter().enumerate() {
        index.entry(sample.label().to_string()).or_default().push(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<LabeledSample> {
        vec![
            LabeledSample::point(0.0, 0.0, "A"),
            LabeledSample::point(5.0, 5.0, "B"),
            LabeledSample::point(1.0, 1.0, "A"),
        ]
    }

    #[test]
    fn rejects_empty_training_data() {
        let err = TrainingSet::new(vec![]).unwrap_err();
        assert_eq!(err, ArgumentError::EmptyTrainingData.into());
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let mut s = samples();
        s.push(LabeledSample::new([1.0, 2.0, 3.0], "C"));
        let err = TrainingSet::new(s).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::DimensionMismatch {
                expected: 2,
                found: 3
            }
            .into()
        );
    }

    #[test]
    fn rejects_non_finite_and_zero_length_features() {
        let err = TrainingSet::new(vec![LabeledSample::point(f64::NAN, 0.0, "A")]).unwrap_err();
        assert_eq!(err, ArgumentError::NonFiniteFeature.into());

        let err = TrainingSet::new(vec![LabeledSample::new(Vec::<f64>::new(), "A")]).unwrap_err();
        assert_eq!(err, ArgumentError::EmptyFeatureVector.into());
    }

    #[test]
    fn label_index_groups_samples_in_training_order() {
        let set = TrainingSet::new(samples()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.dimension(), 2);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(set.count_of("A"), 2);
        assert_eq!(set.count_of("Z"), 0);

        let a = set.points_by_label("A");
        assert_eq!(a[0].features().values(), &[0.0, 0.0]);
        assert_eq!(a[1].features().values(), &[1.0, 1.0]);
        assert!(set.points_by_label("Z").is_empty());
    }

    #[test]
    fn views_are_copies() {
        let set = TrainingSet::new(samples()).unwrap();
        let mut view = set.label_to_points();
        view.get_mut("A").unwrap().clear();
        view.remove("B");
        assert_eq!(set.count_of("A"), 2);
        assert_eq!(set.label_to_points().len(), 2);
    }

    #[test]
    fn check_query_validates_dimension_and_finiteness() {
        let set = TrainingSet::new(samples()).unwrap();
        assert!(set.check_query(&FeatureVector::point(1.0, 1.0)).is_ok());
        assert!(
            set.check_query(&FeatureVector::from([1.0, 1.0, 1.0]))
                .unwrap_err()
                .is_invalid_argument()
        );
        assert_eq!(
            set.check_query(&FeatureVector::point(f64::INFINITY, 0.0)),
            Err(ArgumentError::NonFiniteFeature.into())
        );
    }

    #[test]
    fn select_copies_in_index_order() {
        let set = TrainingSet::new(samples()).unwrap();
        let picked = set.select(&[2, 0]).unwrap();
        assert_eq!(picked[0].features().values(), &[1.0, 1.0]);
        assert_eq!(picked[1].features().values(), &[0.0, 0.0]);
        assert!(set.select(&[]).unwrap().is_empty());
    }

    #[test]
    fn select_rejects_out_of_range_indices() {
        let set = TrainingSet::new(samples()).unwrap();
        assert_eq!(
            set.select(&[0, 3]),
            Err(ArgumentError::SampleIndex { index: 3, len: 3 }.into())
        );
    }
}
