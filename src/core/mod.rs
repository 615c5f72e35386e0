pub mod error;
pub mod instances;
pub mod training_set;

pub use error::{ArgumentError, ClassifierError};
pub use training_set::TrainingSet;
