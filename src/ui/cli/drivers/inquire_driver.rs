use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::{CustomTypeValidator, Validation};
use inquire::{Confirm, CustomType, CustomUserError, Select, Text};
use std::fmt::Display;
use std::str::FromStr;

/// Terminal prompts.
pub struct InquireDriver;

/// Inclusive bounds check; `None` leaves that side open.
fn bounded<T>(min: Option<T>, max: Option<T>) -> impl CustomTypeValidator<T>
where
    T: PartialOrd + Display + Copy + Send + Sync + 'static,
{
    move |x: &T| -> Result<Validation, CustomUserError> {
        let msg = match (min, max) {
            (Some(lo), Some(hi)) if *x < lo || *x > hi => format!("Must be between {lo} and {hi}"),
            (Some(lo), None) if *x < lo => format!("Must be ≥ {lo}"),
            (None, Some(hi)) if *x > hi => format!("Must be ≤ {hi}"),
            _ => return Ok(Validation::Valid),
        };
        Ok(Validation::Invalid(msg.into()))
    }
}

fn ask_number<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: FromStr + ToString + PartialOrd + Display + Copy + Clone + Send + Sync + 'static,
{
    let mut q = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help);
    if min.is_some() || max.is_some() {
        q = q.with_validator(bounded(min, max));
    }
    Ok(q.prompt()?)
}

impl PromptDriver for InquireDriver {
    fn choose(&self, title: &str, help: Option<&str>, options: &[String]) -> Result<usize> {
        let mut select = Select::new(title, options.to_vec());
        if let Some(help) = help {
            select = select.with_help_message(help);
        }
        Ok(select.raw_prompt()?.index)
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_number(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_number(title, help, default, min, max)
    }
}
