use crate::ui::types::choices::{NoParams, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassifyParams {
    #[schemars(title = "Latitude", description = "First coordinate of the query point")]
    pub latitude: f64,

    #[schemars(title = "Longitude", description = "Second coordinate of the query point")]
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Classify a point",
        detailed_message = "Predict the label of one coordinate."
    ))]
    Classify(ClassifyParams),
    #[strum_discriminants(strum(
        message = "Evaluate",
        detailed_message = "k-fold cross-validation of the current model."
    ))]
    Evaluate(NoParams),
    #[strum_discriminants(strum(
        message = "Model info",
        detailed_message = "Training state, k and training set size."
    ))]
    Info(NoParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::Classify => json!({ "latitude": 0.0, "longitude": 0.0 }),
            TaskKind::Evaluate | TaskKind::Info => json!({}),
        }
    }
}
