use anyhow::{Context, Result};
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select};

/// Terminal interactions the wizard needs. Swappable so prompts can be
/// scripted in tests.
pub trait PromptDriver {
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;

    fn ask_select(&self, title: &str, help: &str, options: &[String], start: usize)
    -> Result<String>;

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
}

pub struct InquireDriver;

fn bounds_message<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("Value must be between {lo} and {hi}"),
        (Some(lo), None) => format!("Value must be at least {lo}"),
        (None, Some(hi)) => format!("Value must be at most {hi}"),
        (None, None) => String::new(),
    }
}

impl PromptDriver for InquireDriver {
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let msg = bounds_message(min, max);
        CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_error_message("Please type a whole number")
            .with_validator(move |v: &u64| {
                let below = min.is_some_and(|lo| *v < lo);
                let above = max.is_some_and(|hi| *v > hi);
                if below || above {
                    Ok(Validation::Invalid(msg.clone().into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()
            .with_context(|| format!("failed while prompting for {title}"))
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        let msg = bounds_message(min, max);
        CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_error_message("Please type a number")
            .with_validator(move |v: &f64| {
                let below = min.is_some_and(|lo| *v < lo);
                let above = max.is_some_and(|hi| *v > hi);
                if !v.is_finite() || below || above {
                    Ok(Validation::Invalid(msg.clone().into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()
            .with_context(|| format!("failed while prompting for {title}"))
    }

    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        start: usize,
    ) -> Result<String> {
        Select::new(title, options.to_vec())
            .with_help_message(help)
            .with_starting_cursor(start.min(options.len().saturating_sub(1)))
            .prompt()
            .with_context(|| format!("failed while prompting for {title}"))
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()
            .with_context(|| format!("failed while prompting for {title}"))
    }
}
