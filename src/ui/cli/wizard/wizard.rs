use anyhow::{Context, Result, bail};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{
    ClassifierSettings, DatasetSettings, EvaluationSettings, FieldKind, FieldSpec, UIChoice,
    VoterChoice, schema_for, specs_for_kind, specs_for_struct,
};
use crate::ui::types::config::AppConfig;

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_items<K>() -> Vec<(K, String)>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            (k, text)
        })
        .collect()
}

/// Asks for a kind, then for each field of that kind's params.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let items = kind_items::<C::Kind>();
    let texts: Vec<String> = items.iter().map(|(_, t)| t.clone()).collect();
    let index = driver.choose(C::prompt_label(), C::prompt_help(), &texts)?;
    let Some(&(choice_kind, _)) = items.get(index) else {
        bail!("choice index {index} out of range");
    };

    let key: &'static str = choice_kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let defaults = C::default_params(choice_kind);

    let params = prompt_fields(driver, &specs, &defaults)?;
    C::from_parts(choice_kind, Value::Object(params))
}

/// Asks for every primitive field of a settings struct. Fields the schema
/// walker skips (nested or array fields) keep their `Default` values.
pub fn prompt_settings<T, D>(driver: &D) -> Result<T>
where
    T: JsonSchema + Serialize + DeserializeOwned + Default,
    D: PromptDriver,
{
    let specs = specs_for_struct(&schema_for::<T>())?;
    let defaults = serde_json::to_value(T::default())?;
    let mut merged = defaults.as_object().cloned().unwrap_or_default();
    merged.extend(prompt_fields(driver, &specs, &defaults)?);
    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Walks the user through a whole [`AppConfig`].
pub fn prompt_config<D: PromptDriver>(driver: &D) -> Result<AppConfig> {
    let mut config: AppConfig = prompt_settings(driver)?;
    config.dataset = prompt_settings::<DatasetSettings, _>(driver)?;
    config.classifier = prompt_settings::<ClassifierSettings, _>(driver)?;
    config.classifier.voter = prompt_choice::<VoterChoice, _>(driver)?;
    config.evaluation = prompt_settings::<EvaluationSettings, _>(driver)?;
    Ok(config)
}

fn prompt_fields<D: PromptDriver>(
    driver: &D,
    specs: &[FieldSpec],
    defaults: &Value,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for s in specs {
        let init = s
            .default
            .clone()
            .filter(|v| !v.is_null())
            .or_else(|| defaults.get(&s.name).cloned());
        let help = s.description.as_deref().unwrap_or("");

        let value = if s.nullable && s.kind != FieldKind::Boolean {
            prompt_nullable(driver, s, init.as_ref(), help)?
        } else {
            match s.kind {
                FieldKind::Boolean => {
                    let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
                    Value::Bool(driver.ask_bool(&s.title, help, def)?)
                }
                FieldKind::String => {
                    let def = init
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_default();
                    let answered = if s.is_path {
                        let more_help = if help.is_empty() {
                            "Please type a valid file path"
                        } else {
                            help
                        };
                        let exts: Vec<&str> = s.extensions.iter().map(String::as_str).collect();
                        let pb = prompt_path_until_ok(driver, &s.title, more_help, &def, &exts)?;
                        pb.to_string_lossy().into_owned()
                    } else {
                        driver.ask_string(&s.title, help, &def)?
                    };
                    Value::String(answered)
                }
                FieldKind::Integer => {
                    let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
                    Value::from(driver.ask_u64(
                        &s.title,
                        help,
                        def,
                        s.min.map(|x| x as u64),
                        s.max.map(|x| x as u64),
                    )?)
                }
                FieldKind::Number => {
                    let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
                    Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
                }
            }
        };
        params.insert(s.name.clone(), value);
    }
    Ok(params)
}

/// Free-text answer where blank means `null`.
fn prompt_nullable<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    init: Option<&Value>,
    help: &str,
) -> Result<Value> {
    let def_txt = match (s.kind, init) {
        (FieldKind::String, Some(v)) => v.as_str().map(str::to_string),
        (FieldKind::Integer, Some(v)) => v.as_u64().map(|n| n.to_string()),
        (FieldKind::Number, Some(v)) => v.as_f64().map(|x| x.to_string()),
        _ => None,
    }
    .unwrap_or_default();

    let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), &def_txt)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(Value::Null);
    }
    Ok(match s.kind {
        FieldKind::Integer => {
            let n: u64 = answer
                .parse()
                .with_context(|| format!("invalid integer for {}", s.title))?;
            Value::from(n)
        }
        FieldKind::Number => {
            let x: f64 = answer
                .parse()
                .with_context(|| format!("invalid number for {}", s.title))?;
            Value::from(x)
        }
        _ => Value::String(answer.to_string()),
    })
}

fn validate_path_str(input: &str, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}
