use crate::ui::types::choices::{ClassifierSettings, DatasetSettings, EvaluationSettings};
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_model_path() -> PathBuf {
    PathBuf::from("knn_classifier.json")
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Everything the binary needs; every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    #[schemars(skip)]
    pub dataset: DatasetSettings,

    #[serde(default = "default_model_path")]
    #[schemars(
        with = "String",
        title = "Model file",
        description = "Where the trained model is saved and loaded",
        default = "default_model_path"
    )]
    pub model_path: PathBuf,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Retrain on start",
        description = "Train from the dataset instead of loading the saved model?",
        default = "default_true"
    )]
    pub retrain: bool,

    #[serde(default)]
    #[schemars(skip)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    #[schemars(skip)]
    pub evaluation: EvaluationSettings,

    #[serde(default = "default_log_level")]
    #[schemars(
        title = "Log level",
        description = "off, error, warn, info, debug or trace",
        default = "default_log_level"
    )]
    pub log_level: String,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Report file",
        description = "Where evaluate also writes its outcome (.csv, .tsv or .json; null = none)"
    )]
    pub report_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSettings::default(),
            model_path: default_model_path(),
            retrain: default_true(),
            classifier: ClassifierSettings::default(),
            evaluation: EvaluationSettings::default(),
            log_level: default_log_level(),
            report_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("cannot write config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::VoterChoice;
    use tempfile::tempdir;

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg = AppConfig::from_json(
            r#"{
                "dataset": {"path": "zones.csv"},
                "retrain": false,
                "classifier": {"k": 0, "voter": {"type": "majority", "params": {}}},
                "evaluation": {"seed": 7}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.dataset.path, PathBuf::from("zones.csv"));
        assert!(!cfg.retrain);
        assert_eq!(cfg.classifier.k, 0);
        assert!(matches!(cfg.classifier.voter, VoterChoice::Majority(_)));
        assert_eq!(cfg.evaluation.seed, Some(7));
        assert_eq!(cfg.evaluation.folds, 3);
        assert_eq!(cfg.model_path, PathBuf::from("knn_classifier.json"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.report_path, None);
    }

    #[test]
    fn report_path_is_read() {
        let cfg = AppConfig::from_json(r#"{"report_path": "out/matrix.tsv"}"#).unwrap();
        assert_eq!(cfg.report_path, Some(PathBuf::from("out/matrix.tsv")));
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut cfg = AppConfig::default();
        cfg.classifier.k = 4;
        cfg.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn unreadable_config_mentions_the_path() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("here.json"));
    }
}
