use crate::core::instances::FeatureVector;
use crate::core::{ClassifierError, TrainingSet};
use crate::utils::math::euclidean_distance;

/// One training sample seen from a query: its distance and label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborCandidate<'a> {
    pub distance: f64,
    pub label: &'a str,
}

/// Brute-force scan over every sample of a [`TrainingSet`].
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighborSearch<'a> {
    training_set: &'a TrainingSet,
}

impl<'a> NearestNeighborSearch<'a> {
    pub fn new(training_set: &'a TrainingSet) -> Self {
        Self { training_set }
    }

    /// All samples ordered by ascending Euclidean distance to `query`.
    ///
    /// The sort is stable: samples at equal distance keep their training
    /// order.
    pub fn rank(&self, query: &FeatureVector) -> Result<Vec<NeighborCandidate<'a>>, ClassifierError> {
        self.training_set.check_query(query)?;

        let mut candidates: Vec<NeighborCandidate<'a>> = self
            .training_set
            .samples()
            .iter()
            .map(|sample| NeighborCandidate {
                distance: euclidean_distance(query.values(), sample.features().values()),
                label: sample.label(),
            })
            .collect();

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(candidates)
    }

    /// The first `k` candidates of [`rank`](Self::rank); `k` is clamped to
    /// the training-set size.
    pub fn k_nearest(
        &self,
        query: &FeatureVector,
        k: usize,
    ) -> Result<Vec<NeighborCandidate<'a>>, ClassifierError> {
        let mut ranked = self.rank(query)?;
        ranked.truncate(k.min(self.training_set.len()));
        Ok(ranked)
    }
}
