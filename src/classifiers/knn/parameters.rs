use crate::core::{ArgumentError, ClassifierError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const DEFAULT_EPSILON: f64 = 1e-5;
pub const DEFAULT_DISTANCE_WEIGHT_FACTOR: f64 = 2.0;
pub const DEFAULT_MAX_CLASS_WEIGHT: f64 = 50.0;

/// How the k nearest neighbors are turned into a prediction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VotingPolicy {
    Majority,
    #[default]
    WeightedDistance,
}

/// Hyperparameters of a [`KnnClassifier`](crate::classifiers::knn::KnnClassifier).
///
/// A plain `Copy` value: every classifier (including the per-fold ones built
/// during cross-validation) owns its own copy. Deserialized values go through
/// [`validate`](Self::validate) like built ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKnnParameters")]
pub struct KnnParameters {
    k: usize,
    epsilon: f64,
    distance_weight_factor: f64,
    use_class_weights: bool,
    max_class_weight: f64,
    voting: VotingPolicy,
}

/// Wire shape of [`KnnParameters`] before validation.
#[derive(Deserialize)]
struct RawKnnParameters {
    k: usize,
    epsilon: f64,
    distance_weight_factor: f64,
    use_class_weights: bool,
    max_class_weight: f64,
    voting: VotingPolicy,
}

impl TryFrom<RawKnnParameters> for KnnParameters {
    type Error = ClassifierError;

    fn try_from(raw: RawKnnParameters) -> Result<Self, Self::Error> {
        let params = KnnParameters {
            k: raw.k,
            epsilon: raw.epsilon,
            distance_weight_factor: raw.distance_weight_factor,
            use_class_weights: raw.use_class_weights,
            max_class_weight: raw.max_class_weight,
            voting: raw.voting,
        };
        params.validate()?;
        Ok(params)
    }
}

impl KnnParameters {
    pub fn builder(k: usize) -> KnnParametersBuilder {
        KnnParametersBuilder {
            params: KnnParameters {
                k,
                epsilon: DEFAULT_EPSILON,
                distance_weight_factor: DEFAULT_DISTANCE_WEIGHT_FACTOR,
                use_class_weights: true,
                max_class_weight: DEFAULT_MAX_CLASS_WEIGHT,
                voting: VotingPolicy::default(),
            },
        }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn distance_weight_factor(&self) -> f64 {
        self.distance_weight_factor
    }

    #[inline]
    pub fn use_class_weights(&self) -> bool {
        self.use_class_weights
    }

    #[inline]
    pub fn max_class_weight(&self) -> f64 {
        self.max_class_weight
    }

    #[inline]
    pub fn voting(&self) -> VotingPolicy {
        self.voting
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        check_k(self.k)?;
        check_epsilon(self.epsilon)?;
        check_distance_weight_factor(self.distance_weight_factor)?;
        check_max_class_weight(self.max_class_weight)?;
        Ok(())
    }

    pub(crate) fn set_k(&mut self, k: usize) -> Result<(), ClassifierError> {
        check_k(k)?;
        self.k = k;
        Ok(())
    }

    pub(crate) fn set_epsilon(&mut self, epsilon: f64) -> Result<(), ClassifierError> {
        check_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    pub(crate) fn set_distance_weight_factor(&mut self, factor: f64) -> Result<(), ClassifierError> {
        check_distance_weight_factor(factor)?;
        self.distance_weight_factor = factor;
        Ok(())
    }

    pub(crate) fn set_max_class_weight(&mut self, ceiling: f64) -> Result<(), ClassifierError> {
        check_max_class_weight(ceiling)?;
        self.max_class_weight = ceiling;
        Ok(())
    }

    pub(crate) fn set_use_class_weights(&mut self, enabled: bool) {
        self.use_class_weights = enabled;
    }

    pub(crate) fn set_voting(&mut self, voting: VotingPolicy) {
        self.voting = voting;
    }
}

/// Builder for [`KnnParameters`]; values are checked once in [`build`](Self::build).
#[derive(Debug, Clone, Copy)]
pub struct KnnParametersBuilder {
    params: KnnParameters,
}

impl KnnParametersBuilder {
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.params.epsilon = epsilon;
        self
    }

    pub fn distance_weight_factor(mut self, factor: f64) -> Self {
        self.params.distance_weight_factor = factor;
        self
    }

    pub fn use_class_weights(mut self, enabled: bool) -> Self {
        self.params.use_class_weights = enabled;
        self
    }

    pub fn max_class_weight(mut self, ceiling: f64) -> Self {
        self.params.max_class_weight = ceiling;
        self
    }

    pub fn voting(mut self, voting: VotingPolicy) -> Self {
        self.params.voting = voting;
        self
    }

    pub fn build(self) -> Result<KnnParameters, ClassifierError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

fn invalid(name: &'static str, reason: &str) -> ClassifierError {
    ArgumentError::Hyperparameter {
        name,
        reason: reason.to_string(),
    }
    .into()
}

fn check_k(k: usize) -> Result<(), ClassifierError> {
    if k == 0 {
        return Err(invalid("k", "must be at least 1"));
    }
    Ok(())
}

fn check_epsilon(epsilon: f64) -> Result<(), ClassifierError> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(invalid("epsilon", "must be finite and > 0"));
    }
    Ok(())
}

fn check_distance_weight_factor(factor: f64) -> Result<(), ClassifierError> {
    if !(factor.is_finite() && factor >= 0.0) {
        return Err(invalid("distance_weight_factor", "must be finite and >= 0"));
    }
    Ok(())
}

fn check_max_class_weight(ceiling: f64) -> Result<(), ClassifierError> {
    if !(ceiling.is_finite() && ceiling > 0.0) {
        return Err(invalid("max_class_weight", "must be finite and > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn builder_defaults() {
        let p = KnnParameters::builder(10).build().unwrap();
        assert_eq!(p.k(), 10);
        assert_eq!(p.epsilon(), 1e-5);
        assert_eq!(p.distance_weight_factor(), 2.0);
        assert!(p.use_class_weights());
        assert_eq!(p.max_class_weight(), 50.0);
        assert_eq!(p.voting(), VotingPolicy::WeightedDistance);
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(KnnParameters::builder(0).build().is_err());
        assert!(KnnParameters::builder(3).epsilon(0.0).build().is_err());
        assert!(KnnParameters::builder(3).epsilon(f64::NAN).build().is_err());
        assert!(
            KnnParameters::builder(3)
                .distance_weight_factor(-1.0)
                .build()
                .is_err()
        );
        assert!(
            KnnParameters::builder(3)
                .max_class_weight(0.0)
                .build()
                .is_err()
        );
        let err = KnnParameters::builder(0).build().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("`k`"));
    }

    #[test]
    fn copies_are_independent() {
        let original = KnnParameters::builder(5).build().unwrap();
        let mut copy = original;
        copy.set_k(9).unwrap();
        copy.set_voting(VotingPolicy::Majority);
        assert_eq!(original.k(), 5);
        assert_eq!(original.voting(), VotingPolicy::WeightedDistance);
        assert_eq!(copy.k(), 9);
    }

    #[test]
    fn failed_setter_leaves_value_untouched() {
        let mut p = KnnParameters::builder(5).build().unwrap();
        assert!(p.set_epsilon(-1.0).is_err());
        assert_eq!(p.epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn voting_policy_names_are_kebab_case() {
        let names: Vec<&'static str> = VotingPolicy::iter().map(Into::into).collect();
        assert_eq!(names, vec!["majority", "weighted-distance"]);
        assert_eq!(
            VotingPolicy::from_str("weighted-distance").unwrap(),
            VotingPolicy::WeightedDistance
        );
        assert_eq!(
            serde_json::to_string(&VotingPolicy::Majority).unwrap(),
            "\"majority\""
        );
    }

    #[test]
    fn deserialization_validates() {
        let p = KnnParameters::builder(4).build().unwrap();
        let text = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<KnnParameters>(&text).unwrap(), p);

        let zero_k = text.replace("\"k\":4", "\"k\":0");
        let err = serde_json::from_str::<KnnParameters>(&zero_k).unwrap_err();
        assert!(err.to_string().contains("`k`"));

        let bad_epsilon = r#"{"k":3,"epsilon":-1.0,"distance_weight_factor":2.0,
            "use_class_weights":true,"max_class_weight":50.0,"voting":"majority"}"#;
        assert!(serde_json::from_str::<KnnParameters>(bad_epsilon).is_err());
    }
}
