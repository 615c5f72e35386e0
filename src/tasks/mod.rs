mod bootstrap;
mod task_runner;

pub use bootstrap::{bootstrap_classifier, train_from_dataset};
pub use task_runner::{TaskRunner, run_task};
