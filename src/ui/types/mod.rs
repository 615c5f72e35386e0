pub mod build;
pub mod choices;
pub mod config;
