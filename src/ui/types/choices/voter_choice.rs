use crate::classifiers::knn::{
    DEFAULT_DISTANCE_WEIGHT_FACTOR, DEFAULT_EPSILON, DEFAULT_MAX_CLASS_WEIGHT,
};
use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}
fn default_distance_weight_factor() -> f64 {
    DEFAULT_DISTANCE_WEIGHT_FACTOR
}
fn default_true() -> bool {
    true
}
fn default_max_class_weight() -> f64 {
    DEFAULT_MAX_CLASS_WEIGHT
}

/// Empty parameter object so the wizard can still look under "params"
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeightedDistanceParameters {
    #[serde(default = "default_epsilon")]
    #[schemars(
        title = "Epsilon",
        description = "Added to every distance so exact matches stay finite (> 0)",
        range(min = 0.0),
        default = "default_epsilon"
    )]
    pub epsilon: f64,

    #[serde(default = "default_distance_weight_factor")]
    #[schemars(
        title = "Distance weight factor",
        description = "Exponent applied to the inverse distance",
        range(min = 0.0),
        default = "default_distance_weight_factor"
    )]
    pub distance_weight_factor: f64,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Use class weights",
        description = "Boost votes of rare labels?",
        default = "default_true"
    )]
    pub use_class_weights: bool,

    #[serde(default = "default_max_class_weight")]
    #[schemars(
        title = "Max class weight",
        description = "Ceiling for any single label's weight (> 0)",
        range(min = 0.0),
        default = "default_max_class_weight"
    )]
    pub max_class_weight: f64,
}

impl Default for WeightedDistanceParameters {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            distance_weight_factor: default_distance_weight_factor(),
            use_class_weights: default_true(),
            max_class_weight: default_max_class_weight(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(VoterKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum VoterChoice {
    #[strum_discriminants(strum(
        message = "Majority vote",
        detailed_message = "Each of the k nearest neighbors casts one vote."
    ))]
    Majority(NoParams),
    #[strum_discriminants(strum(
        message = "Weighted distance vote",
        detailed_message = "Closer neighbors and rarer labels weigh more."
    ))]
    WeightedDistance(WeightedDistanceParameters),
}

impl Default for VoterChoice {
    fn default() -> Self {
        Self::WeightedDistance(WeightedDistanceParameters::default())
    }
}

impl UIChoice for VoterChoice {
    type Kind = VoterKind;

    fn schema() -> Schema {
        schema_for!(VoterChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a voting policy:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            VoterKind::Majority => serde_json::json!({}),
            VoterKind::WeightedDistance => serde_json::to_value(WeightedDistanceParameters::default())
                .unwrap_or(Value::Null),
        }
    }
}
