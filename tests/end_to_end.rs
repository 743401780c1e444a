use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use serde_json::{Map, Value, json};
use stress_level::artifacts::{ArtifactConfig, ArtifactStore};
use stress_level::error::PipelineError;
use stress_level::pipeline::{StressLevel, predict};
use stress_level::ui::types::form::StressForm;

fn bundled_store() -> ArtifactStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models");
    let config = ArtifactConfig::from_dir(dir).unwrap();
    ArtifactStore::load(&config).unwrap()
}

fn form(overrides: Value) -> StressForm {
    let Value::Object(m) = overrides else {
        panic!("overrides must be an object");
    };
    let f = StressForm::from_flat(m).unwrap();
    f.check_bounds().unwrap();
    f
}

fn calm() -> StressForm {
    form(json!({
        "Sleep_Duration": 8.5, "Sleep_Quality": 5, "Work_Hours": 6.0,
        "Screen_Time": 2.0, "Caffeine_Intake": 0, "Physical_Activity": 4.0,
        "Smoking_Habit": "No", "Meditation_Practice": "Yes", "Blood_Pressure": 110
    }))
}

fn tense() -> StressForm {
    form(json!({
        "Sleep_Duration": 4.5, "Sleep_Quality": 1, "Work_Hours": 13.0,
        "Screen_Time": 9.0, "Caffeine_Intake": 5, "Alcohol_Intake": 4,
        "Physical_Activity": 0.5, "Smoking_Habit": "Yes",
        "Meditation_Practice": "No", "Blood_Pressure": 165
    }))
}

#[test]
fn bundled_models_load_in_menu_order() {
    let store = bundled_store();
    assert_eq!(
        store.variant_names(),
        vec!["Logistic Regression", "Decision Tree", "Random Forest"]
    );
    assert_eq!(store.schema().len(), 41);
    for v in store.variants() {
        assert_eq!(v.classifier().number_of_features(), 41, "{}", v.name());
        assert_eq!(v.classifier().classes(), &[1, 2, 3]);
    }
}

#[test]
fn every_form_choice_has_an_indicator_column() {
    let store = bundled_store();
    let choices = StressForm::choice_fields().unwrap();
    let borrowed: Vec<(&str, Vec<&str>)> = choices
        .iter()
        .map(|(n, o)| (n.as_str(), o.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(store.report_unmapped_choices(&borrowed), 0);
}

#[test]
fn default_form_predictions() {
    let store = bundled_store();
    let record = StressForm::default().to_record().unwrap();

    let label = |model: &str| predict(&store, model, &record).unwrap().label;
    assert_eq!(label("Logistic Regression"), "Low Stress");
    assert_eq!(label("Decision Tree"), "Low Stress");
    assert_eq!(label("Random Forest"), "Medium Stress");
}

#[test]
fn calm_and_tense_profiles_sit_at_opposite_ends() {
    let store = bundled_store();
    let calm = calm().to_record().unwrap();
    let tense = tense().to_record().unwrap();

    for name in store.variant_names() {
        let p = predict(&store, name, &calm).unwrap();
        assert_eq!(p.level, Some(StressLevel::Low), "{name}");
        let p = predict(&store, name, &tense).unwrap();
        assert_eq!(p.level, Some(StressLevel::High), "{name}");
        assert_eq!(p.class_code, 3);
    }
}

#[test]
fn prediction_serializes_for_json_output() {
    let store = bundled_store();
    let record = tense().to_record().unwrap();
    let p = predict(&store, "Decision Tree", &record).unwrap();
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(
        v,
        json!({
            "model": "Decision Tree",
            "class_code": 3,
            "level": "High",
            "label": "High Stress"
        })
    );
}

#[test]
fn unknown_model_is_reported() {
    let store = bundled_store();
    let record = StressForm::default().to_record().unwrap();
    let err = predict(&store, "SVM", &record).unwrap_err();
    assert_eq!(err, PipelineError::UnknownModel("SVM".into()));
}

#[test]
fn concurrent_requests_share_the_store() {
    let store = Arc::new(bundled_store());
    let handles: Vec<_> = [calm(), tense(), StressForm::default()]
        .into_iter()
        .map(|f| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let r = f.to_record().unwrap();
                predict(&store, "Random Forest", &r).unwrap().label
            })
        })
        .collect();

    let labels: Vec<&str> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(labels, vec!["Low Stress", "High Stress", "Medium Stress"]);
}

#[test]
fn empty_overrides_match_default_form() {
    assert_eq!(form(Value::Object(Map::new())), StressForm::default());
}
