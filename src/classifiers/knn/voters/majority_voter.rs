use crate::classifiers::knn::voters::voter::accumulate;
use crate::classifiers::knn::voters::{LabelVote, Voter};
use crate::classifiers::knn::{ClassWeightTable, NeighborCandidate};

/// One neighbor, one vote. Distances and class weights are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVoter;

impl Voter for MajorityVoter {
    fn tally<'a>(
        &self,
        neighbors: &[NeighborCandidate<'a>],
        _class_weights: &ClassWeightTable,
    ) -> Vec<LabelVote<'a>> {
        accumulate(neighbors, |_| 1.0)
    }
}
