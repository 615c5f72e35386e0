use crate::datasets::ColumnLayout;
use crate::evaluation::CrossValidationEvaluator;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{DatasetSettings, EvaluationSettings};

impl TryFrom<&EvaluationSettings> for CrossValidationEvaluator {
    type Error = BuildError;

    fn try_from(s: &EvaluationSettings) -> Result<Self, Self::Error> {
        let mut evaluator =
            CrossValidationEvaluator::new(s.folds, s.max_per_fold).with_parallel(s.parallel);
        if let Some(seed) = s.seed {
            evaluator = evaluator.with_seed(seed);
        }
        evaluator.validate()?;
        Ok(evaluator)
    }
}

impl TryFrom<&DatasetSettings> for ColumnLayout {
    type Error = BuildError;

    fn try_from(s: &DatasetSettings) -> Result<Self, Self::Error> {
        if s.feature_columns.is_empty() {
            return Err(BuildError::InvalidParameter(
                "feature_columns must name at least one column".into(),
            ));
        }
        if s.label_column.trim().is_empty() {
            return Err(BuildError::InvalidParameter(
                "label_column must not be empty".into(),
            ));
        }
        Ok(ColumnLayout {
            feature_columns: s.feature_columns.clone(),
            label_column: s.label_column.clone(),
            label_must_contain: s.label_must_contain.clone().filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_settings_carry_over() {
        let s = EvaluationSettings {
            folds: 5,
            max_per_fold: 20,
            seed: Some(3),
            parallel: true,
        };
        let e = CrossValidationEvaluator::try_from(&s).unwrap();
        assert_eq!(e.folds(), 5);
        assert_eq!(e.max_per_fold(), 20);
        assert_eq!(e.seed(), Some(3));
        assert!(e.is_parallel());
    }

    #[test]
    fn one_fold_is_rejected() {
        let s = EvaluationSettings {
            folds: 1,
            ..EvaluationSettings::default()
        };
        assert!(CrossValidationEvaluator::try_from(&s).is_err());
    }

    #[test]
    fn dataset_layout() {
        let layout = ColumnLayout::try_from(&DatasetSettings::default()).unwrap();
        assert_eq!(layout, ColumnLayout::default());

        let s = DatasetSettings {
            label_must_contain: Some(String::new()),
            ..DatasetSettings::default()
        };
        assert_eq!(ColumnLayout::try_from(&s).unwrap().label_must_contain, None);

        let s = DatasetSettings {
            feature_columns: vec![],
            ..DatasetSettings::default()
        };
        assert!(matches!(
            ColumnLayout::try_from(&s),
            Err(BuildError::InvalidParameter(_))
        ));
    }
}
