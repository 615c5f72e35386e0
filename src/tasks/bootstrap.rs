use crate::classifiers::knn::KnnClassifier;
use crate::datasets::{ColumnLayout, read_labeled_csv};
use crate::persistence::{load_model, save_model};
use crate::ui::types::build::build_classifier;
use crate::ui::types::config::AppConfig;
use anyhow::{Context, Result};

/// Reads the configured dataset and trains a fresh classifier on it.
pub fn train_from_dataset(config: &AppConfig) -> Result<KnnClassifier> {
    let layout = ColumnLayout::try_from(&config.dataset)?;
    let path = &config.dataset.path;
    let (samples, _) = read_labeled_csv(path, &layout)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;

    let mut classifier = build_classifier(&config.classifier, samples.len())?;
    classifier
        .train(samples)
        .with_context(|| format!("failed to train on {}", path.display()))?;
    Ok(classifier)
}

/// Produces a ready classifier.
///
/// With `retrain` set the dataset is always read and the result saved to
/// `model_path`. Otherwise the saved model is loaded, and training from the
/// dataset is the fallback when it is missing or unreadable. A failed save is
/// logged and does not abort.
pub fn bootstrap_classifier(config: &AppConfig) -> Result<KnnClassifier> {
    if !config.retrain {
        if config.model_path.exists() {
            match load_model(&config.model_path) {
                Ok(classifier) => return Ok(classifier),
                Err(e) => log::warn!(
                    "could not load {} ({e}), training from dataset",
                    config.model_path.display()
                ),
            }
        } else {
            log::warn!(
                "no saved model at {}, training from dataset",
                config.model_path.display()
            );
        }
    }

    let classifier = train_from_dataset(config)?;
    if let Err(e) = save_model(&classifier, &config.model_path) {
        log::warn!("could not save model to {}: {e}", config.model_path.display());
    }
    Ok(classifier)
}
