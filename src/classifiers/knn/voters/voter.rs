use crate::classifiers::knn::{ClassWeightTable, NeighborCandidate};
use serde::Serialize;

/// Accumulated score of one label among the k nearest neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelVote<'a> {
    pub label: &'a str,
    pub score: f64,
}

/// Turns a distance-ordered neighbor list into per-label scores.
pub trait Voter {
    /// Per-label scores, in the order each label first appears in `neighbors`.
    fn tally<'a>(
        &self,
        neighbors: &[NeighborCandidate<'a>],
        class_weights: &ClassWeightTable,
    ) -> Vec<LabelVote<'a>>;

    /// The winning label, or `None` when `neighbors` is empty.
    ///
    /// Ties go to the label whose nearest neighbor ranks first.
    fn elect<'a>(
        &self,
        neighbors: &[NeighborCandidate<'a>],
        class_weights: &ClassWeightTable,
    ) -> Option<&'a str> {
        winner(&self.tally(neighbors, class_weights))
    }
}

/// Sums `score(neighbor)` per label, keeping first-appearance order.
pub(crate) fn accumulate<'a, F>(neighbors: &[NeighborCandidate<'a>], mut score: F) -> Vec<LabelVote<'a>>
where
    F: FnMut(&NeighborCandidate<'a>) -> f64,
{
    let mut votes: Vec<LabelVote<'a>> = Vec::new();
    for neighbor in neighbors {
        let s = score(neighbor);
        match votes.iter_mut().find(|v| v.label == neighbor.label) {
            Some(vote) => vote.score += s,
            None => votes.push(LabelVote {
                label: neighbor.label,
                score: s,
            }),
        }
    }
    votes
}

/// Highest score wins; a later label must be strictly greater to displace
/// an earlier one.
pub fn winner<'a>(votes: &[LabelVote<'a>]) -> Option<&'a str> {
    let mut best: Option<&LabelVote<'a>> = None;
    for vote in votes {
        if vote.score.is_nan() {
            continue;
        }
        if best.is_none_or(|b| vote.score > b.score) {
            best = Some(vote);
        }
    }
    best.map(|b| b.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(distance: f64, label: &str) -> NeighborCandidate<'_> {
        NeighborCandidate { distance, label }
    }

    #[test]
    fn accumulate_groups_by_label_in_first_seen_order() {
        let neighbors = [n(0.1, "B"), n(0.2, "A"), n(0.3, "B")];
        let votes = accumulate(&neighbors, |_| 1.0);
        assert_eq!(
            votes,
            vec![
                LabelVote {
                    label: "B",
                    score: 2.0
                },
                LabelVote {
                    label: "A",
                    score: 1.0
                }
            ]
        );
    }

    #[test]
    fn winner_prefers_earlier_label_on_ties() {
        let votes = [
            LabelVote {
                label: "Z",
                score: 1.0,
            },
            LabelVote {
                label: "A",
                score: 1.0,
            },
        ];
        assert_eq!(winner(&votes), Some("Z"));
    }

    #[test]
    fn winner_skips_nan_and_handles_empty() {
        let votes = [
            LabelVote {
                label: "nan",
                score: f64::NAN,
            },
            LabelVote {
                label: "ok",
                score: 0.5,
            },
        ];
        assert_eq!(winner(&votes), Some("ok"));
        assert_eq!(winner(&[]), None);
    }
}
