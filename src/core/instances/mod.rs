mod feature_vector;
mod labeled_sample;

pub use feature_vector::FeatureVector;
pub use labeled_sample::LabeledSample;
