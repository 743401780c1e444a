use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::form::{FormSection, StressForm, to_flat};
use crate::ui::types::schema::{FieldKind, specs_for};

const BOLD: &str = "\x1b[1m";
const FG_CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Prompts every control of one section, offering `current` as the defaults.
pub fn prompt_section<S: FormSection, D: PromptDriver>(driver: &D, current: &S) -> Result<S> {
    println!("{BOLD}{FG_CYAN}{}{RESET}", S::HEADING);

    let defaults = to_flat(current)?;
    let mut values = Map::new();

    for s in specs_for::<S>()? {
        let init = defaults.get(&s.name).or(s.default.as_ref());
        let help = s.description.as_deref().unwrap_or("");

        let val = match s.kind {
            FieldKind::Integer => {
                let def = init.and_then(Value::as_u64).unwrap_or(0);
                Value::from(driver.ask_u64(
                    &s.title,
                    help,
                    def,
                    s.min.map(|x| x as u64),
                    s.max.map(|x| x as u64),
                )?)
            }
            FieldKind::Number => {
                let def = init.and_then(Value::as_f64).unwrap_or(0.0);
                Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
            }
            FieldKind::Choice => {
                let opts = s
                    .allowed
                    .as_deref()
                    .ok_or_else(|| anyhow!("choice field '{}' lists no options", s.name))?;
                let start = init
                    .and_then(Value::as_str)
                    .and_then(|cur| opts.iter().position(|o| o == cur))
                    .unwrap_or(0);
                Value::String(driver.ask_select(&s.title, help, opts, start)?)
            }
        };
        values.insert(s.name, val);
    }

    serde_json::from_value(Value::Object(values))
        .with_context(|| format!("invalid {} answers", S::HEADING))
}

/// Walks the three sections in order. Answers from a previous run become the
/// new defaults.
pub fn prompt_form<D: PromptDriver>(driver: &D, current: &StressForm) -> Result<StressForm> {
    Ok(StressForm {
        personal: prompt_section(driver, &current.personal)?,
        lifestyle: prompt_section(driver, &current.lifestyle)?,
        medical: prompt_section(driver, &current.medical)?,
    })
}

pub fn prompt_model<D: PromptDriver>(
    driver: &D,
    names: &[String],
    current: Option<&str>,
) -> Result<String> {
    let start = current
        .and_then(|c| names.iter().position(|n| n == c))
        .unwrap_or(0);
    driver.ask_select("Model", "Classifier used for the prediction", names, start)
}
