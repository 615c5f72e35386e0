use crate::classifiers::knn::{KnnClassifier, KnnParameters};
use crate::core::ClassifierError;
use crate::core::instances::LabeledSample;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unsupported model format version {found} (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("stored model is invalid: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("malformed model data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Everything needed to rebuild a trained classifier.
///
/// Derived state (label index, class weights) is not stored; restoring
/// retrains from `samples`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub format_version: u32,
    /// RFC 3339, UTC.
    pub saved_at: String,
    pub parameters: KnnParameters,
    pub samples: Vec<LabeledSample>,
}

impl ModelSnapshot {
    pub fn capture(classifier: &KnnClassifier) -> Result<Self, StoreError> {
        let samples = classifier.training_set()?.samples().to_vec();
        Ok(Self {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            parameters: classifier.parameters(),
            samples,
        })
    }

    pub fn restore(self) -> Result<KnnClassifier, StoreError> {
        if self.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }
        self.parameters.validate()?;
        let mut classifier = KnnClassifier::new(self.parameters);
        classifier.train(self.samples)?;
        Ok(classifier)
    }
}

pub fn to_bytes(classifier: &KnnClassifier) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(&ModelSnapshot::capture(classifier)?)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<KnnClassifier, StoreError> {
    let snapshot: ModelSnapshot = serde_json::from_slice(bytes)?;
    snapshot.restore()
}

pub fn save_model<P: AsRef<Path>>(classifier: &KnnClassifier, path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    let bytes = to_bytes(classifier)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)?;
    log::info!(
        "saved model with {} samples to {}",
        classifier.training_data_size(),
        path.display()
    );
    Ok(())
}

pub fn load_model<P: AsRef<Path>>(path: P) -> Result<KnnClassifier, StoreError> {
    let path = path.as_ref();
    let classifier = from_bytes(&fs::read(path)?)?;
    log::info!(
        "loaded model with {} samples from {}",
        classifier.training_data_size(),
        path.display()
    );
    Ok(classifier)
}
