use crate::core::TrainingSet;
use crate::core::instances::LabeledSample;

/// `per_cluster` points labeled `"near"` around the origin and as many
/// labeled `"far"` around (100, 100). Deterministic.
pub fn two_cluster_samples(per_cluster: usize) -> Vec<LabeledSample> {
    let jitter = |i: usize| ((i * 7) % 11) as f64 * 0.1;
    let mut samples = Vec::with_capacity(per_cluster * 2);
    for i in 0..per_cluster {
        samples.push(LabeledSample::point(jitter(i), jitter(i + 3), "near"));
        samples.push(LabeledSample::point(
            100.0 + jitter(i + 5),
            100.0 + jitter(i),
            "far",
        ));
    }
    samples
}

pub fn two_clusters(per_cluster: usize) -> TrainingSet {
    TrainingSet::new(two_cluster_samples(per_cluster)).unwrap()
}

