mod cross_validation_evaluator;
mod fold_plan;

pub use cross_validation_evaluator::{
    CrossValidationEvaluator, DEFAULT_FOLDS, DEFAULT_MAX_PER_FOLD,
};
pub use fold_plan::{FoldPlan, fold_ranges, plan_folds};
