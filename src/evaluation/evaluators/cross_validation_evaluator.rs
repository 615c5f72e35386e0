use crate::classifiers::Classifier;
use crate::core::{ArgumentError, ClassifierError, TrainingSet};
use crate::evaluation::estimators::{Estimator, MeanEstimator, OrdinalCorrelation};
use crate::evaluation::evaluators::fold_plan::{FoldPlan, plan_folds};
use crate::evaluation::{ConfusionMatrix, EvaluationOutcome, FoldSnapshot};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

pub const DEFAULT_FOLDS: usize = 3;
pub const DEFAULT_MAX_PER_FOLD: usize = 100;

/// Predictions of one fold, aligned with its plan's test indices.
struct FoldRun {
    predictions: Vec<String>,
    seconds: f64,
}

/// k-fold cross-validation over a [`TrainingSet`].
///
/// Every fold trains a fresh classifier from the factory passed to
/// [`evaluate`](Self::evaluate). Randomness (the permutation and the test
/// fold caps) is drawn up front, so a seeded evaluator gives the same outcome
/// whether folds run sequentially or on scoped threads.
#[derive(Debug, Clone)]
pub struct CrossValidationEvaluator {
    folds: usize,
    max_per_fold: usize,
    seed: Option<u64>,
    parallel: bool,
    progress_tx: Option<Sender<FoldSnapshot>>,
}

impl Default for CrossValidationEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS, DEFAULT_MAX_PER_FOLD)
    }
}

impl CrossValidationEvaluator {
    pub fn new(folds: usize, max_per_fold: usize) -> Self {
        Self {
            folds,
            max_per_fold,
            seed: None,
            parallel: false,
            progress_tx: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, tx: Sender<FoldSnapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn max_per_fold(&self) -> usize {
        self.max_per_fold
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Checks the fold settings on their own, before any data is seen.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.folds < 2 {
            return Err(ArgumentError::EvaluationSetting {
                name: "folds",
                reason: "must be at least 2".to_string(),
            }
            .into());
        }
        if self.max_per_fold == 0 {
            return Err(ArgumentError::EvaluationSetting {
                name: "max_per_fold",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn evaluate<C, F>(
        &self,
        set: &TrainingSet,
        make_classifier: F,
    ) -> Result<EvaluationOutcome, ClassifierError>
    where
        C: Classifier,
        F: Fn() -> C + Sync,
    {
        self.validate()?;
        if set.len() < self.folds {
            return Err(ClassifierError::InsufficientData {
                samples: set.len(),
                folds: self.folds,
            });
        }

        log::info!(
            "cross-validating {} samples: {} folds, at most {} tested per fold{}",
            set.len(),
            self.folds,
            self.max_per_fold,
            if self.parallel { ", parallel" } else { "" }
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let plans = plan_folds(set.len(), self.folds, self.max_per_fold, &mut rng);

        let mut merger = FoldMerger::new(set, self.folds, self.progress_tx.as_ref());
        if self.parallel {
            let runs = run_parallel(set, &plans, &make_classifier)?;
            for (plan, run) in plans.iter().zip(&runs) {
                merger.merge(plan, run);
            }
        } else {
            for plan in &plans {
                let run = run_fold(set, plan, &make_classifier)?;
                merger.merge(plan, &run);
            }
        }

        let outcome = merger.finish();
        log::info!(
            "cross-validation done: accuracy {:.4}, f1 {:.4} over {} predictions",
            outcome.accuracy(),
            outcome.f1_score(),
            outcome.evaluated()
        );
        Ok(outcome)
    }
}

fn run_fold<C, F>(
    set: &TrainingSet,
    plan: &FoldPlan,
    make_classifier: &F,
) -> Result<FoldRun, ClassifierError>
where
    C: Classifier,
    F: Fn() -> C,
{
    let start = Instant::now();
    let test = set.select(&plan.test)?;
    let mut classifier = make_classifier();
    classifier.train(set.select(&plan.train)?)?;

    let predictions = test
        .iter()
        .map(|sample| Ok(classifier.predict(sample.features())?.to_string()))
        .collect::<Result<Vec<_>, ClassifierError>>()?;
    Ok(FoldRun {
        predictions,
        seconds: start.elapsed().as_secs_f64(),
    })
}

fn run_parallel<C, F>(
    set: &TrainingSet,
    plans: &[FoldPlan],
    make_classifier: &F,
) -> Result<Vec<FoldRun>, ClassifierError>
where
    C: Classifier,
    F: Fn() -> C + Sync,
{
    thread::scope(|scope| {
        let handles: Vec<_> = plans
            .iter()
            .map(|plan| scope.spawn(move || run_fold(set, plan, make_classifier)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

/// Folds per-fold predictions into the running statistics, in fold order.
struct FoldMerger<'a> {
    set: &'a TrainingSet,
    folds: usize,
    progress_tx: Option<&'a Sender<FoldSnapshot>>,
    merged: usize,
    matrix: ConfusionMatrix,
    hits: MeanEstimator,
    correlation: OrdinalCorrelation,
}

impl<'a> FoldMerger<'a> {
    fn new(
        set: &'a TrainingSet,
        folds: usize,
        progress_tx: Option<&'a Sender<FoldSnapshot>>,
    ) -> Self {
        Self {
            set,
            folds,
            progress_tx,
            merged: 0,
            matrix: ConfusionMatrix::new(set.labels()),
            hits: MeanEstimator::default(),
            correlation: OrdinalCorrelation::default(),
        }
    }

    fn merge(&mut self, plan: &FoldPlan, run: &FoldRun) {
        let mut correct = 0;
        // run_fold selected every test index, so they are all in range
        for (&i, predicted) in plan.test.iter().zip(&run.predictions) {
            let actual = self.set.samples()[i].label();
            let hit = actual == predicted.as_str();
            if hit {
                correct += 1;
            }
            self.matrix.record(actual, predicted);
            self.hits.add(if hit { 1.0 } else { 0.0 });
            self.correlation.observe(actual, predicted);
        }

        let snapshot = FoldSnapshot {
            fold: self.merged,
            folds: self.folds,
            train_size: plan.train.len(),
            test_size: run.predictions.len(),
            correct,
            running_accuracy: self.hits.estimation(),
            seconds: run.seconds,
        };
        log::debug!("{snapshot}");
        if let Some(tx) = self.progress_tx {
            let _ = tx.send(snapshot);
        }
        self.merged += 1;
    }

    fn finish(self) -> EvaluationOutcome {
        EvaluationOutcome::from_accumulators(
            self.set.label_counts(),
            self.matrix,
            &self.hits,
            &self.correlation,
        )
    }
}
