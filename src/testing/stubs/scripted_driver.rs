use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a fixed script, in order.
///
/// An empty answer takes the prompt's default. `choose` expects an index.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    fn next(&self, title: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("script ran out of answers at '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn choose(&self, title: &str, _help: Option<&str>, options: &[String]) -> Result<usize> {
        let answer = self.next(title)?;
        let index: usize = answer
            .trim()
            .parse()
            .with_context(|| format!("'{answer}' is not an option index"))?;
        if index >= options.len() {
            return Err(anyhow!("option {index} out of {} at '{title}'", options.len()));
        }
        Ok(index)
    }

    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title)?.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" | "true" => Ok(true),
            "n" | "no" | "false" => Ok(false),
            other => Err(anyhow!("'{other}' is not a yes/no answer")),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        let answer = self.next(title)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let answer = self.next(title)?;
        let value = if answer.trim().is_empty() {
            default
        } else {
            answer.trim().parse()?
        };
        check_bounds(title, value, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        let answer = self.next(title)?;
        let value = if answer.trim().is_empty() {
            default
        } else {
            answer.trim().parse()?
        };
        check_bounds(title, value, min, max)
    }
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(
    title: &str,
    value: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<T> {
    if min.as_ref().is_some_and(|lo| value < *lo) || max.as_ref().is_some_and(|hi| value > *hi) {
        return Err(anyhow!("{value} is out of range for '{title}'"));
    }
    Ok(value)
}
