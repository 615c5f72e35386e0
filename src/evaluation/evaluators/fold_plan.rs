use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::Range;

/// Train and test sample indices of one fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPlan {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// `folds` contiguous ranges over `0..n`, each `n / folds` long except the
/// last, which absorbs the remainder.
///
/// Callers guarantee `folds >= 1` and `n >= folds`.
pub fn fold_ranges(n: usize, folds: usize) -> Vec<Range<usize>> {
    let size = n / folds;
    (0..folds)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == folds { n } else { start + size };
            start..end
        })
        .collect()
}

/// Draws one permutation of `0..n`, cuts it into folds and caps every test
/// fold at `max_per_fold` samples by shuffling and truncating it.
///
/// Samples dropped by the cap belong to neither side of that fold.
pub fn plan_folds<R: Rng + ?Sized>(
    n: usize,
    folds: usize,
    max_per_fold: usize,
    rng: &mut R,
) -> Vec<FoldPlan> {
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(&mut *rng);

    fold_ranges(n, folds)
        .into_iter()
        .map(|range| {
            let mut test = permutation[range.clone()].to_vec();
            if test.len() > max_per_fold {
                test.shuffle(&mut *rng);
                test.truncate(max_per_fold);
            }
            let train = permutation[..range.start]
                .iter()
                .chain(&permutation[range.end..])
                .copied()
                .collect();
            FoldPlan { train, test }
        })
        .collect()
}
