use crate::classifiers::knn::{KnnClassifier, KnnParameters, VotingPolicy};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ClassifierSettings, VoterChoice};

/// Hyperparameters for a classifier that will be trained on `sample_count`
/// samples; `k = 0` resolves to `floor(sqrt(sample_count))`.
pub fn build_parameters(
    settings: &ClassifierSettings,
    sample_count: usize,
) -> Result<KnnParameters, BuildError> {
    let k = settings.resolve_k(sample_count);
    let builder = KnnParameters::builder(k);
    let builder = match &settings.voter {
        VoterChoice::Majority(_) => builder.voting(VotingPolicy::Majority),
        VoterChoice::WeightedDistance(p) => builder
            .voting(VotingPolicy::WeightedDistance)
            .epsilon(p.epsilon)
            .distance_weight_factor(p.distance_weight_factor)
            .use_class_weights(p.use_class_weights)
            .max_class_weight(p.max_class_weight),
    };
    Ok(builder.build()?)
}

pub fn build_classifier(
    settings: &ClassifierSettings,
    sample_count: usize,
) -> Result<KnnClassifier, BuildError> {
    Ok(KnnClassifier::new(build_parameters(settings, sample_count)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{NoParams, WeightedDistanceParameters};

    #[test]
    fn weighted_settings_map_onto_parameters() {
        let settings = ClassifierSettings {
            k: 7,
            voter: VoterChoice::WeightedDistance(WeightedDistanceParameters {
                epsilon: 0.01,
                distance_weight_factor: 1.0,
                use_class_weights: false,
                max_class_weight: 5.0,
            }),
        };
        let p = build_parameters(&settings, 1000).unwrap();
        assert_eq!(p.k(), 7);
        assert_eq!(p.voting(), VotingPolicy::WeightedDistance);
        assert_eq!(p.epsilon(), 0.01);
        assert_eq!(p.distance_weight_factor(), 1.0);
        assert!(!p.use_class_weights());
        assert_eq!(p.max_class_weight(), 5.0);
    }

    #[test]
    fn auto_k_and_majority() {
        let settings = ClassifierSettings {
            k: 0,
            voter: VoterChoice::Majority(NoParams {}),
        };
        let c = build_classifier(&settings, 400).unwrap();
        assert_eq!(c.k(), 20);
        assert_eq!(c.voting(), VotingPolicy::Majority);
        assert!(!c.is_trained());
    }

    #[test]
    fn invalid_voter_params_fail() {
        let settings = ClassifierSettings {
            k: 3,
            voter: VoterChoice::WeightedDistance(WeightedDistanceParameters {
                epsilon: 0.0,
                ..WeightedDistanceParameters::default()
            }),
        };
        assert!(matches!(
            build_parameters(&settings, 10),
            Err(BuildError::Classifier(_))
        ));
    }
}
