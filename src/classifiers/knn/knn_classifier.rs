use crate::classifiers::Classifier;
use crate::classifiers::knn::voters::{LabelVote, MajorityVoter, Voter, WeightedDistanceVoter};
use crate::classifiers::knn::{
    ClassWeightTable, KnnParameters, NearestNeighborSearch, NeighborCandidate, VotingPolicy,
};
use crate::core::instances::{FeatureVector, LabeledSample};
use crate::core::{ArgumentError, ClassifierError, TrainingSet};
use crate::evaluation::{CrossValidationEvaluator, EvaluationOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Training data and everything derived from it, swapped in as one unit.
#[derive(Debug, Clone)]
struct TrainedModel {
    training_set: TrainingSet,
    class_weights: ClassWeightTable,
}

impl TrainedModel {
    fn build(training_set: TrainingSet, params: &KnnParameters) -> Self {
        let class_weights = class_weights_for(&training_set, params);
        Self {
            training_set,
            class_weights,
        }
    }
}

fn class_weights_for(training_set: &TrainingSet, params: &KnnParameters) -> ClassWeightTable {
    if params.use_class_weights() {
        ClassWeightTable::from_training_set(training_set, params.max_class_weight())
    } else {
        ClassWeightTable::uniform()
    }
}

/// Summary of a classifier's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub is_trained: bool,
    pub k: usize,
    pub training_data_size: usize,
}

/// Brute-force k-nearest-neighbor classifier.
///
/// ```
/// use geoknn::classifiers::knn::{KnnClassifier, KnnParameters};
/// use geoknn::core::instances::LabeledSample;
///
/// let mut knn = KnnClassifier::new(KnnParameters::builder(1).build().unwrap());
/// knn.train(vec![
///     LabeledSample::point(0.0, 0.0, "A"),
///     LabeledSample::point(5.0, 5.0, "B"),
/// ])
/// .unwrap();
/// assert_eq!(knn.predict_point(0.2, 0.1).unwrap(), "A");
/// ```
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    params: KnnParameters,
    model: Option<TrainedModel>,
}

impl KnnClassifier {
    pub fn new(params: KnnParameters) -> Self {
        Self {
            params,
            model: None,
        }
    }

    /// Classifier with default hyperparameters and the given `k`.
    pub fn with_k(k: usize) -> Result<Self, ClassifierError> {
        Ok(Self::new(KnnParameters::builder(k).build()?))
    }

    pub fn train(&mut self, samples: Vec<LabeledSample>) -> Result<(), ClassifierError> {
        let training_set = TrainingSet::new(samples)?;
        self.train_on_set(training_set);
        Ok(())
    }

    /// Installs an already validated training set.
    pub fn train_on_set(&mut self, training_set: TrainingSet) {
        let model = TrainedModel::build(training_set, &self.params);
        log_training_summary(&model, &self.params);
        self.model = Some(model);
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<&str, ClassifierError> {
        let model = self.model()?;
        let neighbors = self.neighbors_in(model, features)?;
        let elected = match self.params.voting() {
            VotingPolicy::Majority => MajorityVoter.elect(&neighbors, &model.class_weights),
            VotingPolicy::WeightedDistance => {
                self.weighted_voter().elect(&neighbors, &model.class_weights)
            }
        };
        elected
            .or_else(|| neighbors.first().map(|n| n.label))
            .ok_or_else(|| {
                ArgumentError::Hyperparameter {
                    name: "k",
                    reason: "no neighbor was selected".to_string(),
                }
                .into()
            })
    }

    pub fn predict_point(&self, x: f64, y: f64) -> Result<&str, ClassifierError> {
        self.predict(&FeatureVector::point(x, y))
    }

    /// Per-label scores among the k nearest neighbors, nearest label first.
    pub fn votes_for(&self, features: &FeatureVector) -> Result<Vec<LabelVote<'_>>, ClassifierError> {
        let model = self.model()?;
        let neighbors = self.neighbors_in(model, features)?;
        Ok(match self.params.voting() {
            VotingPolicy::Majority => MajorityVoter.tally(&neighbors, &model.class_weights),
            VotingPolicy::WeightedDistance => {
                self.weighted_voter().tally(&neighbors, &model.class_weights)
            }
        })
    }

    pub fn k_nearest(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<NeighborCandidate<'_>>, ClassifierError> {
        let model = self.model()?;
        self.neighbors_in(model, features)
    }

    /// Cross-validates the current hyperparameters on the current training
    /// data with an unseeded shuffle.
    pub fn evaluate(
        &self,
        folds: usize,
        max_per_fold: usize,
    ) -> Result<EvaluationOutcome, ClassifierError> {
        self.evaluate_with(&CrossValidationEvaluator::new(folds, max_per_fold))
    }

    pub fn evaluate_with(
        &self,
        evaluator: &CrossValidationEvaluator,
    ) -> Result<EvaluationOutcome, ClassifierError> {
        let model = self.model()?;
        let params = self.params;
        evaluator.evaluate(&model.training_set, move || KnnClassifier::new(params))
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn training_data_size(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.training_set.len())
    }

    pub fn training_set(&self) -> Result<&TrainingSet, ClassifierError> {
        Ok(&self.model()?.training_set)
    }

    pub fn points_by_label(&self, label: &str) -> Result<Vec<LabeledSample>, ClassifierError> {
        Ok(self.model()?.training_set.points_by_label(label))
    }

    pub fn label_to_points(&self) -> Result<BTreeMap<String, Vec<LabeledSample>>, ClassifierError> {
        Ok(self.model()?.training_set.label_to_points())
    }

    pub fn class_counts(&self) -> Result<BTreeMap<String, usize>, ClassifierError> {
        Ok(self.model()?.training_set.label_counts())
    }

    pub fn class_weights(&self) -> Result<ClassWeightTable, ClassifierError> {
        Ok(self.model()?.class_weights.clone())
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            is_trained: self.is_trained(),
            k: self.params.k(),
            training_data_size: self.training_data_size(),
        }
    }

    pub fn parameters(&self) -> KnnParameters {
        self.params
    }

    pub fn k(&self) -> usize {
        self.params.k()
    }

    pub fn set_k(&mut self, k: usize) -> Result<(), ClassifierError> {
        self.params.set_k(k)
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), ClassifierError> {
        self.params.set_epsilon(epsilon)
    }

    pub fn distance_weight_factor(&self) -> f64 {
        self.params.distance_weight_factor()
    }

    pub fn set_distance_weight_factor(&mut self, factor: f64) -> Result<(), ClassifierError> {
        self.params.set_distance_weight_factor(factor)
    }

    pub fn use_class_weights(&self) -> bool {
        self.params.use_class_weights()
    }

    /// Takes effect immediately: the class weight table is rebuilt from the
    /// current training data.
    pub fn set_use_class_weights(&mut self, enabled: bool) {
        self.params.set_use_class_weights(enabled);
        self.refresh_class_weights();
    }

    pub fn max_class_weight(&self) -> f64 {
        self.params.max_class_weight()
    }

    pub fn set_max_class_weight(&mut self, ceiling: f64) -> Result<(), ClassifierError> {
        self.params.set_max_class_weight(ceiling)?;
        self.refresh_class_weights();
        Ok(())
    }

    pub fn voting(&self) -> VotingPolicy {
        self.params.voting()
    }

    pub fn set_voting(&mut self, voting: VotingPolicy) {
        self.params.set_voting(voting);
    }

    fn model(&self) -> Result<&TrainedModel, ClassifierError> {
        self.model.as_ref().ok_or(ClassifierError::NotTrained)
    }

    fn neighbors_in<'a>(
        &self,
        model: &'a TrainedModel,
        features: &FeatureVector,
    ) -> Result<Vec<NeighborCandidate<'a>>, ClassifierError> {
        NearestNeighborSearch::new(&model.training_set).k_nearest(features, self.params.k())
    }

    fn weighted_voter(&self) -> WeightedDistanceVoter {
        WeightedDistanceVoter::new(self.params.epsilon(), self.params.distance_weight_factor())
    }

    fn refresh_class_weights(&mut self) {
        let params = self.params;
        if let Some(model) = self.model.as_mut() {
            model.class_weights = class_weights_for(&model.training_set, &params);
        }
    }
}

fn log_training_summary(model: &TrainedModel, params: &KnnParameters) {
    let set = &model.training_set;
    log::info!(
        "trained on {} samples across {} labels (k = {}, voting = {})",
        set.len(),
        set.label_count(),
        params.k(),
        params.voting()
    );
    for (label, count) in set.label_counts() {
        let weight = model.class_weights.weight(&label);
        log::debug!("label '{label}': {count} samples, weight {weight:.4}");
        if count == 1 && params.use_class_weights() {
            log::debug!("label '{label}' has a single sample; its votes rely on distance");
        }
    }
}

impl Classifier for KnnClassifier {
    fn train(&mut self, samples: Vec<LabeledSample>) -> Result<(), ClassifierError> {
        KnnClassifier::train(self, samples)
    }

    fn predict(&self, features: &FeatureVector) -> Result<&str, ClassifierError> {
        KnnClassifier::predict(self, features)
    }

    fn is_trained(&self) -> bool {
        KnnClassifier::is_trained(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_points() -> Vec<LabeledSample> {
        vec![
            LabeledSample::point(0.0, 0.0, "A"),
            LabeledSample::point(1.0, 1.0, "A"),
            LabeledSample::point(5.0, 5.0, "B"),
            LabeledSample::point(6.0, 6.0, "B"),
        ]
    }

    fn knn(k: usize, voting: VotingPolicy) -> KnnClassifier {
        KnnClassifier::new(KnnParameters::builder(k).voting(voting).build().unwrap())
    }

    #[test]
    fn predicts_nearest_cluster_with_k_one() {
        for voting in [VotingPolicy::Majority, VotingPolicy::WeightedDistance] {
            let mut c = knn(1, voting);
            c.train(four_points()).unwrap();
            assert_eq!(c.predict_point(0.1, 0.1).unwrap(), "A");
            assert_eq!(c.predict_point(5.9, 5.9).unwrap(), "B");
        }
    }

    #[test]
    fn untrained_classifier_refuses_to_predict() {
        let c = knn(3, VotingPolicy::Majority);
        assert_eq!(
            c.predict_point(0.0, 0.0).unwrap_err(),
            ClassifierError::NotTrained
        );
        assert_eq!(c.points_by_label("A").unwrap_err(), ClassifierError::NotTrained);
        assert_eq!(c.evaluate(2, 10).unwrap_err(), ClassifierError::NotTrained);
        assert!(!c.info().is_trained);
    }

    #[test]
    fn empty_training_data_is_rejected_and_keeps_previous_model() {
        let mut c = knn(1, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        let err = c.train(vec![]).unwrap_err();
        assert_eq!(err, ArgumentError::EmptyTrainingData.into());
        assert_eq!(c.training_data_size(), 4);
    }

    #[test]
    fn query_with_wrong_dimension_is_invalid_argument() {
        let mut c = knn(1, VotingPolicy::WeightedDistance);
        c.train(four_points()).unwrap();
        let err = c
            .predict(&FeatureVector::from([0.0, 0.0, 0.0]))
            .unwrap_err();
        assert_eq!(
            err,
            ClassifierError::InvalidArgument(ArgumentError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn k_larger_than_training_set_is_clamped() {
        let mut c = knn(1000, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        let label = c.predict_point(3.0, 3.0).unwrap();
        assert!(label == "A" || label == "B");
        assert_eq!(c.k_nearest(&FeatureVector::point(0.0, 0.0)).unwrap().len(), 4);
    }

    #[test]
    fn majority_tie_goes_to_the_nearest_label() {
        let mut c = knn(4, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        // two votes each; B has the closest neighbor
        assert_eq!(c.predict_point(4.0, 4.0).unwrap(), "B");
        assert_eq!(c.predict_point(2.0, 2.0).unwrap(), "A");
    }

    #[test]
    fn prediction_is_always_a_training_label() {
        let mut c = knn(3, VotingPolicy::WeightedDistance);
        c.train(four_points()).unwrap();
        for i in -5..15 {
            for j in -5..15 {
                let label = c.predict_point(i as f64 * 0.7, j as f64 * 0.7).unwrap();
                assert!(c.training_set().unwrap().contains_label(label));
            }
        }
    }

    #[test]
    fn disabling_class_weights_is_uniform() {
        let mut samples = four_points();
        samples.push(LabeledSample::point(9.0, 0.0, "C"));
        let mut c = knn(3, VotingPolicy::WeightedDistance);
        c.train(samples).unwrap();
        assert!(c.class_weights().unwrap().weight("C") > 1.0);

        c.set_use_class_weights(false);
        let weights = c.class_weights().unwrap();
        assert!(weights.is_uniform());
        for label in ["A", "B", "C"] {
            assert_eq!(weights.weight(label), 1.0);
        }
    }

    #[test]
    fn max_class_weight_setter_rebuilds_weights() {
        let mut samples = four_points();
        samples.push(LabeledSample::point(9.0, 0.0, "C"));
        let mut c = knn(3, VotingPolicy::WeightedDistance);
        c.train(samples).unwrap();
        c.set_max_class_weight(1.1).unwrap();
        assert_eq!(c.class_weights().unwrap().weight("C"), 1.1);
        assert!(c.set_max_class_weight(-3.0).is_err());
        assert_eq!(c.max_class_weight(), 1.1);
    }

    #[test]
    fn votes_are_listed_nearest_label_first() {
        let mut c = knn(4, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        let votes = c.votes_for(&FeatureVector::point(6.0, 6.0)).unwrap();
        assert_eq!(votes[0].label, "B");
        assert_eq!(votes[0].score, 2.0);
        assert_eq!(votes[1].label, "A");
    }

    #[test]
    fn label_views_are_defensive_copies() {
        let mut c = knn(1, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        let mut points = c.points_by_label("A").unwrap();
        points.clear();
        let mut all = c.label_to_points().unwrap();
        all.clear();
        assert_eq!(c.points_by_label("A").unwrap().len(), 2);
        assert!(c.points_by_label("missing").unwrap().is_empty());
        assert_eq!(c.class_counts().unwrap().get("B"), Some(&2));
    }

    #[test]
    fn setters_validate() {
        let mut c = knn(3, VotingPolicy::Majority);
        assert!(c.set_k(0).is_err());
        assert_eq!(c.k(), 3);
        c.set_k(5).unwrap();
        assert_eq!(c.info().k, 5);
        assert!(c.set_epsilon(0.0).is_err());
        assert!(c.set_distance_weight_factor(f64::INFINITY).is_err());
        c.set_voting(VotingPolicy::WeightedDistance);
        assert_eq!(c.voting(), VotingPolicy::WeightedDistance);
    }

    #[test]
    fn model_info_serializes_in_camel_case() {
        let mut c = knn(2, VotingPolicy::Majority);
        c.train(four_points()).unwrap();
        let v = serde_json::to_value(c.info()).unwrap();
        assert_eq!(v["isTrained"], true);
        assert_eq!(v["k"], 2);
        assert_eq!(v["trainingDataSize"], 4);
    }

    #[test]
    fn parameters_from_json_cannot_carry_zero_k() {
        let json = r#"{"k":0,"epsilon":1e-5,"distance_weight_factor":2.0,
            "use_class_weights":true,"max_class_weight":50.0,"voting":"majority"}"#;
        assert!(serde_json::from_str::<KnnParameters>(json).is_err());

        let params: KnnParameters = serde_json::from_str(&json.replace("\"k\":0", "\"k\":1")).unwrap();
        let mut c = KnnClassifier::new(params);
        c.train(vec![LabeledSample::point(3.0, 3.0, "only")]).unwrap();
        assert_eq!(c.predict_point(0.0, 0.0).unwrap(), "only");
    }
}
