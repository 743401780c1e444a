use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde_json::{Map, Value};

use crate::artifacts::config::DEFAULT_MODELS_DIR;
use crate::ui::types::form::StressForm;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Predict stress level from lifestyle and health answers"
)]
pub struct Cli {
    /// Directory holding the model artifacts and manifest.json
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_MODELS_DIR,
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    pub models_dir: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one prediction without the interactive wizard
    Predict(PredictArgs),
    /// List the loaded model variants
    Models,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Model variant (e.g. "Random Forest", random-forest)
    #[arg(long, value_name = "NAME")]
    pub model: String,

    /// JSON object of field values; missing fields take their defaults
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Override a field (e.g. --set Age=42 --set "Occupation=Data Scientist")
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_value)]
    pub set: Vec<KeyValue>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl PredictArgs {
    /// Builds the form from the input file and overrides, then applies the
    /// same bounds the wizard enforces.
    pub fn to_form(&self) -> Result<StressForm> {
        let mut values = match &self.input {
            Some(path) => read_object(path)?,
            None => Map::new(),
        };
        for kv in &self.set {
            values.insert(kv.key.clone(), kv.value.clone());
        }

        let form = StressForm::from_flat(values)?;
        form.check_bounds()?;
        Ok(form)
    }
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    match serde_json::from_str(&text)
        .with_context(|| format!("input file {} is not valid JSON", path.display()))?
    {
        Value::Object(m) => Ok(m),
        other => bail!(
            "input file {} must hold a JSON object, found {other}",
            path.display()
        ),
    }
}

/// Finds `raw` among `names`, tolerating case and kebab/snake spellings.
pub fn resolve_model<'a>(raw: &str, names: &'a [String]) -> Result<&'a str> {
    let wanted = canonical_name(raw);
    if wanted.is_empty() {
        bail!("model name cannot be empty");
    }
    names
        .iter()
        .find(|n| canonical_name(n) == wanted)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown model '{raw}' (available: {})", names.join(", ")))
}

/// "Random Forest", "random-forest", "random_forest" and "RandomForest"
/// all collapse to "random-forest".
fn canonical_name(input: &str) -> String {
    let trimmed = input.trim();
    let words: Vec<String> = trimmed
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(kebab_from_token)
        .collect();
    words.join("-")
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            for low in ch.to_lowercase() {
                buf.push(low);
            }
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase();
        }
    }
    buf
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected FIELD=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("field name cannot be empty".to_string());
    }

    let value = value.trim();
    let parsed = parse_literal(value).map_err(|e| e.to_string())?;

    Ok(KeyValue {
        key: key.to_string(),
        value: parsed,
    })
}

fn parse_literal(raw: &str) -> Result<Value> {
    if raw.is_empty() {
        return Ok(Value::String(String::new()));
    }

    match serde_json::from_str(raw) {
        Ok(v) => Ok(v),
        Err(_) => Ok(Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::form::{Occupation, YesNo};
    use clap::CommandFactory;
    use serde_json::json;
    use std::io::Write;

    fn names() -> Vec<String> {
        ["Logistic Regression", "Decision Tree", "Random Forest"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_wizard() {
        let cli = Cli::try_parse_from(["stress-level"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.models_dir, PathBuf::from("models"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn predict_collects_overrides_and_format() {
        let cli = Cli::try_parse_from([
            "stress-level",
            "-vv",
            "predict",
            "--model",
            "random-forest",
            "--set",
            "Age=42",
            "--set",
            "Occupation=Data Scientist",
            "--format",
            "json",
            "--models-dir",
            "/tmp/m",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.models_dir, PathBuf::from("/tmp/m"));

        let Some(Command::Predict(args)) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.set.len(), 2);

        let form = args.to_form().unwrap();
        assert_eq!(form.personal.age, 42);
        assert_eq!(form.personal.occupation, Occupation::DataScientist);
    }

    #[test]
    fn key_value_parsing_keeps_json_literals() {
        let kv = parse_key_value("Sleep_Duration = 6.5").unwrap();
        assert_eq!(kv.key, "Sleep_Duration");
        assert_eq!(kv.value, json!(6.5));

        let kv = parse_key_value("Smoking_Habit=No").unwrap();
        assert_eq!(kv.value, json!("No"));

        assert!(parse_key_value("Age").is_err());
        assert!(parse_key_value("=3").is_err());
    }

    #[test]
    fn input_file_and_overrides_merge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Age": 60, "Smoking_Habit": "No"}}"#).unwrap();

        let args = PredictArgs {
            model: "x".into(),
            input: Some(file.path().to_path_buf()),
            set: vec![parse_key_value("Age=61").unwrap()],
            format: OutputFormat::Text,
        };
        let form = args.to_form().unwrap();
        assert_eq!(form.personal.age, 61);
        assert_eq!(form.lifestyle.smoking_habit, YesNo::No);
    }

    #[test]
    fn out_of_bounds_override_is_rejected() {
        let args = PredictArgs {
            model: "x".into(),
            input: None,
            set: vec![parse_key_value("Screen_Time=11").unwrap()],
            format: OutputFormat::Text,
        };
        assert!(args.to_form().is_err());
    }

    #[test]
    fn non_object_input_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let err = read_object(file.path()).unwrap_err();
        assert!(err.to_string().contains("must hold a JSON object"));
    }

    #[test]
    fn model_names_resolve_across_spellings() {
        let names = names();
        for raw in ["Random Forest", "random-forest", "random_forest", "RandomForest", " RANDOM forest "] {
            assert_eq!(resolve_model(raw, &names).unwrap(), "Random Forest", "{raw}");
        }
        assert_eq!(
            resolve_model("logistic-regression", &names).unwrap(),
            "Logistic Regression"
        );
        let err = resolve_model("svm", &names).unwrap_err();
        assert!(err.to_string().contains("available: Logistic Regression"));
        assert!(resolve_model("  ", &names).is_err());
    }
}
