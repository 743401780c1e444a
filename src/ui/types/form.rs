use crate::core::{RawInputRecord, RawValue};
use crate::ui::types::schema::{FieldKind, FieldSpec, specs_for};
use anyhow::{Context, Result, anyhow, bail};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Occupation {
    #[default]
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Marketing Manager")]
    MarketingManager,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    Teacher,
    Doctor,
    #[serde(rename = "Graphic Designer")]
    GraphicDesigner,
    #[serde(rename = "Civil Engineer")]
    CivilEngineer,
    #[serde(rename = "Business Owner")]
    BusinessOwner,
    Nurse,
    Student,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum YesNo {
    #[default]
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ExerciseType {
    #[default]
    Cardio,
    Yoga,
    #[serde(rename = "Strength Training")]
    StrengthTraining,
    Aerobics,
    Walking,
    Pilates,
}

/// A group of related controls shown together.
pub trait FormSection: Serialize + DeserializeOwned + JsonSchema + Default {
    const HEADING: &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(rename = "Age")]
    #[schemars(title = "Age", range(min = 18, max = 100))]
    pub age: u32,

    #[serde(rename = "Gender")]
    #[schemars(title = "Gender")]
    pub gender: Gender,

    #[serde(rename = "Marital_Status")]
    #[schemars(title = "Marital Status")]
    pub marital_status: MaritalStatus,

    #[serde(rename = "Occupation")]
    #[schemars(title = "Occupation", description = "Closest match to your job")]
    pub occupation: Occupation,

    #[serde(rename = "Sleep_Duration")]
    #[schemars(title = "Sleep Duration (hours)", range(min = 0.0, max = 12.0))]
    pub sleep_duration: f64,

    #[serde(rename = "Travel_Time")]
    #[schemars(
        title = "Travel Time (hours)",
        description = "Daily commute",
        range(min = 0.0, max = 5.0)
    )]
    pub travel_time: f64,

    #[serde(rename = "Sleep_Quality")]
    #[schemars(title = "Sleep Quality (1-5)", range(min = 1, max = 5))]
    pub sleep_quality: u32,

    #[serde(rename = "Work_Hours")]
    #[schemars(title = "Work Hours per day", range(min = 0.0, max = 16.0))]
    pub work_hours: f64,

    #[serde(rename = "Social_Interactions")]
    #[schemars(title = "Social Interactions (1-10)", range(min = 1, max = 10))]
    pub social_interactions: u32,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::default(),
            marital_status: MaritalStatus::default(),
            occupation: Occupation::default(),
            sleep_duration: 7.0,
            travel_time: 1.0,
            sleep_quality: 3,
            work_hours: 8.0,
            social_interactions: 5,
        }
    }
}

impl FormSection for PersonalInfo {
    const HEADING: &'static str = "Personal Information";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Lifestyle {
    #[serde(rename = "Wake_Up_Time")]
    #[schemars(
        title = "Wake Up Time",
        description = "Minutes from 00:00",
        range(min = 0, max = 1440)
    )]
    pub wake_up_time: u32,

    #[serde(rename = "Bed_Time")]
    #[schemars(
        title = "Bed Time",
        description = "Minutes from 00:00",
        range(min = 0, max = 1440)
    )]
    pub bed_time: u32,

    #[serde(rename = "Physical_Activity")]
    #[schemars(title = "Physical Activity Level", range(min = 0.0, max = 5.0))]
    pub physical_activity: f64,

    #[serde(rename = "Screen_Time")]
    #[schemars(title = "Screen Time (hours)", range(min = 0.0, max = 10.0))]
    pub screen_time: f64,

    #[serde(rename = "Caffeine_Intake")]
    #[schemars(title = "Caffeine Intake", range(min = 0, max = 5))]
    pub caffeine_intake: u32,

    #[serde(rename = "Alcohol_Intake")]
    #[schemars(title = "Alcohol Intake", range(min = 0, max = 5))]
    pub alcohol_intake: u32,

    #[serde(rename = "Smoking_Habit")]
    #[schemars(title = "Smoking Habit")]
    pub smoking_habit: YesNo,

    #[serde(rename = "Meditation_Practice")]
    #[schemars(title = "Meditation Practice")]
    pub meditation_practice: YesNo,

    #[serde(rename = "Exercise_Type")]
    #[schemars(title = "Exercise Type")]
    pub exercise_type: ExerciseType,
}

impl Default for Lifestyle {
    fn default() -> Self {
        Self {
            wake_up_time: 420,
            bed_time: 1320,
            physical_activity: 2.0,
            screen_time: 4.0,
            caffeine_intake: 1,
            alcohol_intake: 0,
            smoking_habit: YesNo::default(),
            meditation_practice: YesNo::default(),
            exercise_type: ExerciseType::default(),
        }
    }
}

impl FormSection for Lifestyle {
    const HEADING: &'static str = "Lifestyle";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MedicalInfo {
    #[serde(rename = "Blood_Pressure")]
    #[schemars(title = "Blood Pressure", range(min = 80, max = 200))]
    pub blood_pressure: u32,

    #[serde(rename = "Cholesterol_Level")]
    #[schemars(title = "Cholesterol Level", range(min = 100, max = 300))]
    pub cholesterol_level: u32,

    #[serde(rename = "Blood_Sugar_Level")]
    #[schemars(title = "Blood Sugar Level", range(min = 60, max = 200))]
    pub blood_sugar_level: u32,
}

impl Default for MedicalInfo {
    fn default() -> Self {
        Self {
            blood_pressure: 120,
            cholesterol_level: 180,
            blood_sugar_level: 90,
        }
    }
}

impl FormSection for MedicalInfo {
    const HEADING: &'static str = "Medical Information";
}

/// Every control of the form, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StressForm {
    pub personal: PersonalInfo,
    pub lifestyle: Lifestyle,
    pub medical: MedicalInfo,
}

pub(crate) fn to_flat<S: Serialize>(section: &S) -> Result<Map<String, Value>> {
    match serde_json::to_value(section)? {
        Value::Object(m) => Ok(m),
        other => bail!("form section serialized to {other}, expected an object"),
    }
}

fn section_from_flat<S: FormSection>(flat: &Map<String, Value>) -> Result<S> {
    let mut own = Map::new();
    for spec in specs_for::<S>()? {
        if let Some(v) = flat.get(&spec.name) {
            own.insert(spec.name, v.clone());
        }
    }
    serde_json::from_value(Value::Object(own))
        .with_context(|| format!("invalid {} values", S::HEADING))
}

fn check_section<S: FormSection>(section: &S) -> Result<()> {
    let flat = to_flat(section)?;
    for spec in specs_for::<S>()? {
        if let Some(v) = flat.get(&spec.name) {
            spec.check(v)?;
        }
    }
    Ok(())
}

impl StressForm {
    /// Field specs of all sections, in display order.
    pub fn field_specs() -> Result<Vec<FieldSpec>> {
        let mut specs = specs_for::<PersonalInfo>()?;
        specs.extend(specs_for::<Lifestyle>()?);
        specs.extend(specs_for::<MedicalInfo>()?);
        Ok(specs)
    }

    /// Single-choice fields and the options they offer.
    pub fn choice_fields() -> Result<Vec<(String, Vec<String>)>> {
        Ok(Self::field_specs()?
            .into_iter()
            .filter(|s| s.kind == FieldKind::Choice)
            .map(|s| (s.name, s.allowed.unwrap_or_default()))
            .collect())
    }

    pub fn to_flat(&self) -> Result<Map<String, Value>> {
        let mut flat = to_flat(&self.personal)?;
        flat.extend(to_flat(&self.lifestyle)?);
        flat.extend(to_flat(&self.medical)?);
        Ok(flat)
    }

    /// Starts from the defaults and applies `values` keyed by field name.
    /// Unknown field names are rejected.
    pub fn from_flat(values: Map<String, Value>) -> Result<Self> {
        let mut flat = StressForm::default().to_flat()?;
        for (k, v) in values {
            if !flat.contains_key(&k) {
                let known: Vec<&str> = flat.keys().map(String::as_str).collect();
                bail!("unknown field '{k}' (known fields: {})", known.join(", "));
            }
            flat.insert(k, v);
        }

        Ok(StressForm {
            personal: section_from_flat(&flat)?,
            lifestyle: section_from_flat(&flat)?,
            medical: section_from_flat(&flat)?,
        })
    }

    /// Applies the same bounds the interactive controls enforce.
    pub fn check_bounds(&self) -> Result<()> {
        check_section(&self.personal)?;
        check_section(&self.lifestyle)?;
        check_section(&self.medical)?;
        Ok(())
    }

    pub fn to_record(&self) -> Result<RawInputRecord> {
        let mut record = RawInputRecord::new();
        for (k, v) in self.to_flat()? {
            let value = match v {
                Value::Number(n) => RawValue::Number(
                    n.as_f64()
                        .ok_or_else(|| anyhow!("field {k} is not representable as f64"))?,
                ),
                Value::String(s) => RawValue::Choice(s),
                other => bail!("field {k} has unsupported value {other}"),
            };
            record.insert(k, value);
        }
        Ok(record)
    }
}
