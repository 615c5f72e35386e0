mod samples;

pub use samples::{two_cluster_samples, two_clusters};
