use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// Progress report emitted once per finished cross-validation fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoldSnapshot {
    /// Zero-based fold index.
    pub fold: usize,
    pub folds: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub correct: usize,
    /// Accuracy over every fold merged so far.
    pub running_accuracy: f64,
    pub seconds: f64,
}

impl FoldSnapshot {
    pub fn fold_accuracy(&self) -> f64 {
        if self.test_size == 0 {
            0.0
        } else {
            self.correct as f64 / self.test_size as f64
        }
    }
}

impl Display for FoldSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "fold={}/{}, train={}, test={}, acc={:.6}, running_acc={:.6}, t={:.3}s",
            self.fold + 1,
            self.folds,
            self.train_size,
            self.test_size,
            self.fold_accuracy(),
            self.running_accuracy,
            self.seconds
        )
    }
}
