use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Accepts `null` (an `Option` field).
    pub nullable: bool,
    /// Declared with `"format": "path"`.
    pub is_path: bool,
    pub extensions: Vec<String>,
}

// Return the whole schema for T
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs of the `params` object of the `kind_key` branch of a tagged enum.
///
/// A branch without params (or whose params do not resolve) has no fields.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    for branch in branches {
        let branch = branch.as_object().context("branch is not an object")?;
        let Some(props) = branch.get("properties").and_then(Value::as_object) else {
            continue;
        };
        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let params = props
            .get("params")
            .and_then(Value::as_object)
            .and_then(|p| resolve_ref_obj(root_obj, p));
        return match params {
            Some(params) => collect_specs(root_obj, params),
            None => Ok(vec![]),
        };
    }

    bail!("no branch found for type={kind_key}");
}

/// Field specs of a plain struct schema (top-level `properties`).
pub fn specs_for_struct(root: &Schema) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    collect_specs(root_obj, root_obj)
}

fn collect_specs(
    root_obj: &Map<String, Value>,
    params_obj: &Map<String, Value>,
) -> Result<Vec<FieldSpec>> {
    let Some(props) = params_obj.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };
    let required = string_list(params_obj, "required");

    let mut out = Vec::with_capacity(props.len());
    for (name, raw) in props {
        let mut field = raw
            .as_object()
            .with_context(|| format!("schema of field '{name}' is not an object"))?;
        if field.contains_key("$ref") {
            field = resolve_ref_obj(root_obj, field)
                .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        }

        // nested objects and arrays are not prompted for
        let Some(kind) = detect_field_kind(field.get("type")) else {
            continue;
        };

        out.push(FieldSpec {
            name: name.clone(),
            title: str_field(field, "title").unwrap_or(name).to_string(),
            description: str_field(field, "description").map(str::to_string),
            required: required.contains(name),
            kind,
            default: field.get("default").cloned(),
            min: first_number(field, &["minimum", "exclusiveMinimum"]),
            max: first_number(field, &["maximum", "exclusiveMaximum"]),
            nullable: matches!(
                field.get("type"),
                Some(Value::Array(types)) if types.iter().any(|t| t == "null")
            ),
            is_path: str_field(field, "format") == Some("path"),
            extensions: string_list(field, "x-extensions"),
        });
    }
    Ok(out)
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_f64))
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tval) = props.get("type") else {
        return false;
    };
    let Some(tobj) = tval.as_object() else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(|v| v.as_array()) {
        if arr.len() == 1 && arr[0].as_str() == Some(kind_key) {
            return true;
        }
    }
    false
}

/// Resolve a local $ref like "#/$defs/SeaParameters" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn kind_named(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

/// `"integer"` or a union such as `["integer", "null"]` for `Option<T>`.
fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty? {
        Value::String(name) => kind_named(name),
        Value::Array(names) => names.iter().filter_map(Value::as_str).find_map(kind_named),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{DatasetSettings, EvaluationSettings};

    fn spec<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn struct_specs_carry_kinds_and_bounds() {
        let specs = specs_for_struct(&schema_for::<EvaluationSettings>()).unwrap();
        let folds = spec(&specs, "folds");
        assert_eq!(folds.kind, FieldKind::Integer);
        assert_eq!(folds.min, Some(2.0));
        assert_eq!(folds.title, "Folds");
        assert_eq!(spec(&specs, "seed").kind, FieldKind::Integer);
        assert!(!spec(&specs, "seed").required);
        assert!(spec(&specs, "seed").nullable);
        assert!(!folds.nullable);
        assert_eq!(spec(&specs, "parallel").kind, FieldKind::Boolean);
    }

    #[test]
    fn path_fields_are_flagged_and_arrays_skipped() {
        let specs = specs_for_struct(&schema_for::<DatasetSettings>()).unwrap();
        let path = spec(&specs, "path");
        assert!(path.is_path);
        assert!(path.extensions.iter().any(|e| e == "csv"));
        assert!(specs.iter().all(|s| s.name != "feature_columns"));
        assert_eq!(spec(&specs, "label_must_contain").kind, FieldKind::String);
    }
}
