pub mod constant_classifier;
pub mod scripted_driver;

pub use constant_classifier::ConstantClassifier;
pub use scripted_driver::ScriptedDriver;
