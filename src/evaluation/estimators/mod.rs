mod estimator;
mod mean_estimator;
mod ordinal_correlation;

pub use estimator::Estimator;
pub use mean_estimator::MeanEstimator;
pub use ordinal_correlation::OrdinalCorrelation;
