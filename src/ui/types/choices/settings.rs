use crate::evaluation::{DEFAULT_FOLDS, DEFAULT_MAX_PER_FOLD};
use crate::ui::types::choices::VoterChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_k() -> usize {
    10
}
fn default_folds() -> usize {
    DEFAULT_FOLDS
}
fn default_max_per_fold() -> usize {
    DEFAULT_MAX_PER_FOLD
}
fn default_false() -> bool {
    false
}
fn default_dataset_path() -> PathBuf {
    PathBuf::from("delivery_zones.csv")
}
fn default_feature_columns() -> Vec<String> {
    vec!["LATITUDE".to_string(), "LONGITUDE".to_string()]
}
fn default_label_column() -> String {
    "DELIVERY ZONE CODE".to_string()
}
fn default_label_must_contain() -> Option<String> {
    Some("-".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassifierSettings {
    #[serde(default = "default_k")]
    #[schemars(
        title = "Neighbors (k)",
        description = "Number of neighbors that vote; 0 picks floor(sqrt(training size))",
        range(min = 0),
        default = "default_k"
    )]
    pub k: usize,

    #[serde(default)]
    #[schemars(skip)]
    pub voter: VoterChoice,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            k: default_k(),
            voter: VoterChoice::default(),
        }
    }
}

impl ClassifierSettings {
    /// `k`, or `floor(sqrt(sample_count))` (at least 1) when `k` is 0.
    pub fn resolve_k(&self, sample_count: usize) -> usize {
        if self.k > 0 {
            return self.k;
        }
        (libm::sqrt(sample_count as f64) as usize).max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvaluationSettings {
    #[serde(default = "default_folds")]
    #[schemars(
        title = "Folds",
        description = "Number of cross-validation folds",
        range(min = 2),
        default = "default_folds"
    )]
    pub folds: usize,

    #[serde(default = "default_max_per_fold")]
    #[schemars(
        title = "Max tested per fold",
        description = "Larger test folds are randomly subsampled down to this size",
        range(min = 1),
        default = "default_max_per_fold"
    )]
    pub max_per_fold: usize,

    #[serde(default)]
    #[schemars(
        title = "Seed",
        description = "Shuffle seed (None = random every run)"
    )]
    pub seed: Option<u64>,

    #[serde(default = "default_false")]
    #[schemars(
        title = "Parallel",
        description = "Run folds on separate threads?",
        default = "default_false"
    )]
    pub parallel: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            max_per_fold: default_max_per_fold(),
            seed: None,
            parallel: default_false(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    #[schemars(
        with = "String",
        title = "Dataset path",
        description = "Delimited text file with a header row",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv", "tsv", "txt"]
        )
    )]
    pub path: PathBuf,

    #[serde(default = "default_feature_columns")]
    #[schemars(title = "Feature columns")]
    pub feature_columns: Vec<String>,

    #[serde(default = "default_label_column")]
    #[schemars(
        title = "Label column",
        description = "Header of the column holding the label",
        default = "default_label_column"
    )]
    pub label_column: String,

    #[serde(default = "default_label_must_contain")]
    #[schemars(
        title = "Required label substring",
        description = "Rows whose label lacks it are skipped (null = keep all)"
    )]
    pub label_must_contain: Option<String>,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            feature_columns: default_feature_columns(),
            label_column: default_label_column(),
            label_must_contain: default_label_must_contain(),
        }
    }
}
