use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use stress_level::artifacts::{ArtifactConfig, ArtifactStore};
use stress_level::pipeline::{Prediction, predict};
use stress_level::ui::cli::args::{Cli, Command, OutputFormat, PredictArgs, resolve_model};
use stress_level::ui::cli::drivers::{InquireDriver, PromptDriver};
use stress_level::ui::cli::wizard::{prompt_form, prompt_model};
use stress_level::ui::types::form::StressForm;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ArtifactConfig::from_dir(cli.models_dir.clone())
        .with_context(|| format!("failed to read manifest in {}", cli.models_dir.display()))?;
    let store = ArtifactStore::load(&config)
        .with_context(|| format!("failed to load models from {}", cli.models_dir.display()))?;

    let choices = StressForm::choice_fields()?;
    let borrowed: Vec<(&str, Vec<&str>)> = choices
        .iter()
        .map(|(name, opts)| (name.as_str(), opts.iter().map(String::as_str).collect()))
        .collect();
    store.report_unmapped_choices(&borrowed);

    let names: Vec<String> = store
        .variant_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    match cli.command {
        Some(Command::Models) => list_models(&store),
        Some(Command::Predict(args)) => run_predict(&store, &names, &args)?,
        None => run_wizard(&store, &names, &InquireDriver)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn list_models(store: &ArtifactStore) {
    for v in store.variants() {
        let c = v.classifier();
        println!(
            "{BOLD}{}{RESET}  {DIM}{} | {} features | classes {:?}{RESET}",
            v.name(),
            c.kind(),
            c.number_of_features(),
            c.classes()
        );
    }
}

fn run_predict(store: &ArtifactStore, names: &[String], args: &PredictArgs) -> Result<()> {
    let model = resolve_model(&args.model, names)?;
    let record = args.to_form()?.to_record()?;
    let p = predict(store, model, &record).context("prediction failed")?;

    match args.format {
        OutputFormat::Text => println!("{}", p.label),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&p)?),
    }
    Ok(())
}

fn run_wizard<D: PromptDriver>(store: &ArtifactStore, names: &[String], driver: &D) -> Result<()> {
    println!("{BOLD}{FG_CYAN}▶ Stress Level Prediction{RESET}");
    println!("{DIM}{} model(s) loaded{RESET}  {}", names.len(), timestamp_now());
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );

    let mut form = StressForm::default();
    let mut model: Option<String> = None;

    loop {
        let chosen = prompt_model(driver, names, model.as_deref())?;
        form = prompt_form(driver, &form).context("failed while filling in the form")?;
        let record = form.to_record()?;

        println!("\n{BOLD}Prediction Result{RESET}");
        match predict(store, &chosen, &record) {
            Ok(p) => print_prediction(&p),
            Err(e) => {
                error!("prediction with '{chosen}' failed: {e}");
                eprintln!("{FG_RED}✗ Prediction failed{RESET}\n");
            }
        }
        model = Some(chosen);

        if !driver.ask_bool("Predict again?", "Previous answers are kept as defaults", true)? {
            break;
        }
    }

    info!("wizard finished");
    Ok(())
}

fn print_prediction(p: &Prediction) {
    let colour = match p.class_code {
        1 => FG_GREEN,
        2 => FG_YELLOW,
        3 => FG_RED,
        _ => FG_GREY,
    };
    println!(
        "{colour}{BOLD}{}{RESET}  {DIM}via {}{RESET}\n",
        p.label, p.model
    );
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
