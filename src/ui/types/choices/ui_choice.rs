use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::str::FromStr;
use strum::{EnumMessage, IntoEnumIterator};

/// Contract for any “choice enum” serialized as `{"type": ..., "params": ...}`.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + FromStr + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose a type:"
    }
    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Default `params` JSON for a given kind.
    fn default_params(kind: Self::Kind) -> Value;

    /// Build the typed enum from kind + params.
    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        let v = json!({ "type": key, "params": params });
        Ok(serde_json::from_value(v)?)
    }

    /// Parses either the full tagged JSON or a bare kind name such as
    /// `info`, which takes the kind's default params.
    fn parse_arg(arg: &str) -> Result<Self> {
        let trimmed = arg.trim();
        if let Ok(kind) = Self::Kind::from_str(trimmed) {
            return Self::from_parts(kind, Self::default_params(kind));
        }
        serde_json::from_str(trimmed).with_context(|| format!("cannot parse choice from `{trimmed}`"))
    }
}
