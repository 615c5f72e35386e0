mod classifier;
mod error;
mod evaluator;

pub use classifier::{build_classifier, build_parameters};
pub use error::BuildError;
