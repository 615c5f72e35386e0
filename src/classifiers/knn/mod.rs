mod class_weight_table;
mod knn_classifier;
mod nearest_neighbor_search;
mod parameters;
pub mod voters;

pub use class_weight_table::ClassWeightTable;
pub use knn_classifier::{KnnClassifier, ModelInfo};
pub use nearest_neighbor_search::{NearestNeighborSearch, NeighborCandidate};
pub use parameters::{
    DEFAULT_DISTANCE_WEIGHT_FACTOR, DEFAULT_EPSILON, DEFAULT_MAX_CLASS_WEIGHT, KnnParameters,
    KnnParametersBuilder, VotingPolicy,
};
