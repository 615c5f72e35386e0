use crate::classifiers::knn::voters::voter::accumulate;
use crate::classifiers::knn::voters::{LabelVote, Voter};
use crate::classifiers::knn::{ClassWeightTable, NeighborCandidate};
use crate::utils::math::inverse_distance_weight;

/// Each neighbor votes `(1 / (distance + epsilon))^distance_weight_factor`,
/// scaled by the class weight of its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedDistanceVoter {
    epsilon: f64,
    distance_weight_factor: f64,
}

impl WeightedDistanceVoter {
    pub fn new(epsilon: f64, distance_weight_factor: f64) -> Self {
        Self {
            epsilon,
            distance_weight_factor,
        }
    }

    /// Distance part of a single vote, before the class weight.
    #[inline]
    pub fn distance_weight(&self, distance: f64) -> f64 {
        inverse_distance_weight(distance, self.epsilon, self.distance_weight_factor)
    }
}

impl Voter for WeightedDistanceVoter {
    fn tally<'a>(
        &self,
        neighbors: &[NeighborCandidate<'a>],
        class_weights: &ClassWeightTable,
    ) -> Vec<LabelVote<'a>> {
        accumulate(neighbors, |n| {
            self.distance_weight(n.distance) * class_weights.weight(n.label)
        })
    }
}
